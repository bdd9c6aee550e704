//! Shared plumbing for CLI commands: opening the desk and printing events.

use studydesk_core::{Event, StudyDesk, Subject};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn open_desk() -> Result<StudyDesk, Box<dyn std::error::Error>> {
    let desk = StudyDesk::open()?;
    tracing::debug!(tasks = desk.tasks().len(), "desk opened");
    Ok(desk)
}

/// First eight characters of a subject id, enough to tell rows apart.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn subject_line(subject: &Subject) -> String {
    let name = if subject.name.trim().is_empty() {
        "<unnamed>"
    } else {
        subject.name.as_str()
    };
    format!(
        "  {}  {:<24} {} credits  {}  {:>2} pts",
        short_id(&subject.id),
        name,
        subject.credits,
        subject.grade,
        subject.points()
    )
}

/// Print display events as plain text.
pub fn render(events: &[Event]) {
    for event in events {
        match event {
            Event::TasksRendered { tasks, done, total } => {
                if tasks.is_empty() {
                    println!("No study tasks yet.");
                }
                for (i, task) in tasks.iter().enumerate() {
                    let mark = if task.done { "x" } else { " " };
                    println!("{:>3}. [{mark}] {}", i + 1, task.text);
                }
                if *total > 0 {
                    println!("{done}/{total} done");
                }
            }
            Event::TaskToggled { index, done } => {
                let state = if *done { "done" } else { "not done" };
                println!("Task {} marked {state}", index + 1);
            }
            Event::StreakRendered { view } => {
                println!("{} {}", view.glyph.symbol(), view.message);
            }
            Event::TaskInputFocused => println!("Task input focused"),
            Event::SubjectsRendered { semester, subjects } => {
                println!("Semester {semester}:");
                if subjects.is_empty() {
                    println!("  (no subjects)");
                }
                for subject in subjects {
                    println!("{}", subject_line(subject));
                }
            }
            Event::RowPoints { id, points } => {
                println!("  {}: {points} points", short_id(id));
            }
            Event::RowErrors { ids } => {
                for id in ids {
                    println!("  {}: name is required", short_id(id));
                }
            }
            Event::SgpaShown { semester, sgpa } => {
                println!("SGPA (semester {semester}): {sgpa:.2}");
            }
            Event::CgpaShown {
                cgpa,
                total_credits,
            } => {
                println!("Overall CGPA: {cgpa:.2} over {total_credits} credits");
            }
            Event::ProjectionShown { message, .. } => println!("{message}"),
            Event::Message { text, .. } => println!("{text}"),
            Event::DisplayModeChanged { screenshot_mode } => {
                let state = if *screenshot_mode { "on" } else { "off" };
                println!("Screenshot mode {state}");
            }
            Event::TaskRemovalStarted { .. }
            | Event::TaskInputCleared
            | Event::SgpaCleared
            | Event::CgpaCleared => {}
        }
    }
}
