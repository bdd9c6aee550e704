use clap::Subcommand;
use studydesk_core::Action;

use crate::common::{open_desk, render, CliResult};

#[derive(Subcommand)]
pub enum DisplayAction {
    /// Flip screenshot mode on or off
    Toggle,
    /// Show the current display mode
    Show,
}

pub fn run(action: DisplayAction) -> CliResult {
    let mut desk = open_desk()?;
    match action {
        DisplayAction::Toggle => render(&desk.dispatch(Action::ToggleDisplayMode)?),
        DisplayAction::Show => {
            let state = if desk.config().ui.screenshot_mode { "on" } else { "off" };
            println!("Screenshot mode {state}");
        }
    }
    Ok(())
}
