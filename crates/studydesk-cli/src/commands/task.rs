//! Task management commands for CLI.

use clap::Subcommand;
use studydesk_core::{Action, Event};

use crate::common::{open_desk, render, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a study topic (also advances the streak)
    Add {
        /// Task text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// Print the stored task list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as done
    Done {
        /// Task number as shown by `task list`
        number: usize,
    },
    /// Mark a task as not done
    Undo {
        /// Task number as shown by `task list`
        number: usize,
    },
    /// Delete a task
    Remove {
        /// Task number as shown by `task list`
        number: usize,
    },
}

/// Task numbers are shown starting at 1.
fn to_index(number: usize) -> Result<usize, String> {
    number
        .checked_sub(1)
        .ok_or_else(|| "task numbers start at 1".to_string())
}

pub fn run(action: TaskAction) -> CliResult {
    let mut desk = open_desk()?;

    match action {
        TaskAction::Add { text } => {
            let text = text.join(" ");
            let events = desk.dispatch(Action::AddTask { text })?;
            if events.is_empty() {
                return Err("task text cannot be blank".into());
            }
            render(&events);
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(desk.tasks())?);
            } else {
                let events: Vec<Event> = desk
                    .dispatch(Action::Refresh)?
                    .into_iter()
                    .filter(|e| matches!(e, Event::TasksRendered { .. }))
                    .collect();
                render(&events);
            }
        }
        TaskAction::Done { number } => {
            let index = to_index(number)?;
            render(&desk.dispatch(Action::ToggleTask { index, done: true })?);
        }
        TaskAction::Undo { number } => {
            let index = to_index(number)?;
            render(&desk.dispatch(Action::ToggleTask { index, done: false })?);
        }
        TaskAction::Remove { number } => {
            let index = to_index(number)?;
            // no transition to wait for in a terminal
            desk.dispatch(Action::RemoveTask { index })?;
            let removed = desk.tasks().get(index).map(|t| t.text.clone());
            render(&desk.dispatch(Action::FinishTaskRemoval { index })?);
            if let Some(text) = removed {
                println!("Removed: {text}");
            }
        }
    }
    Ok(())
}
