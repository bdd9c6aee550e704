pub mod cgpa;
pub mod config;
pub mod display;
pub mod press;
pub mod reset;
pub mod streak;
pub mod target;
pub mod task;
