use clap::Args;
use studydesk_core::{Action, Event};

use crate::common::{open_desk, render, CliResult};

#[derive(Args)]
pub struct TargetArgs {
    /// Current CGPA
    #[arg(allow_hyphen_values = true)]
    current: String,
    /// Credits completed so far
    #[arg(allow_hyphen_values = true)]
    completed: String,
    /// Target CGPA
    #[arg(allow_hyphen_values = true)]
    target: String,
    /// Credits still to be taken
    #[arg(allow_hyphen_values = true)]
    remaining: String,
    /// Print the projection as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TargetArgs) -> CliResult {
    let mut desk = open_desk()?;
    let events = desk.dispatch(Action::ProjectTarget {
        current_cgpa: args.current,
        completed_credits: args.completed,
        target_cgpa: args.target,
        remaining_credits: args.remaining,
    })?;

    match events.first() {
        Some(Event::ProjectionShown { projection, .. }) if args.json => {
            println!("{}", serde_json::to_string_pretty(projection)?);
        }
        Some(Event::Message { text, .. }) => return Err(text.clone().into()),
        _ => render(&events),
    }
    Ok(())
}
