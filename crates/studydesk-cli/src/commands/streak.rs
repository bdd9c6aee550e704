use studydesk_core::{Action, Event};

use crate::common::{open_desk, render, CliResult};

pub fn run() -> CliResult {
    let mut desk = open_desk()?;
    let events: Vec<Event> = desk
        .dispatch(Action::Refresh)?
        .into_iter()
        .filter(|e| matches!(e, Event::StreakRendered { .. }))
        .collect();
    render(&events);
    if let Some(last) = desk.streak().last_date {
        println!("Last study day: {last}");
    }
    Ok(())
}
