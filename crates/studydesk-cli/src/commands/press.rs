use clap::Args;
use studydesk_core::{resolve_shortcut, KeyPress};

use crate::common::{open_desk, render, CliResult};

#[derive(Args)]
pub struct PressArgs {
    /// Key name, e.g. "/" or "enter"
    key: String,
    /// Hold Ctrl
    #[arg(long)]
    ctrl: bool,
    /// Hold Meta / Cmd
    #[arg(long)]
    meta: bool,
    /// Pretend focus is inside a text field
    #[arg(long)]
    in_text_field: bool,
}

pub fn run(args: PressArgs) -> CliResult {
    let mut desk = open_desk()?;
    let press = KeyPress {
        key: args.key,
        ctrl: args.ctrl,
        meta: args.meta,
        in_text_field: args.in_text_field,
    };
    match resolve_shortcut(&desk.config().shortcuts, &press) {
        Some(action) => render(&desk.dispatch(action)?),
        None => println!("No shortcut bound to that key."),
    }
    Ok(())
}
