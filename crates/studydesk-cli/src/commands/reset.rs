use clap::Args;
use studydesk_core::Action;

use crate::common::{open_desk, CliResult};

#[derive(Args)]
pub struct ResetArgs {
    /// Forget the task list
    #[arg(long)]
    tasks: bool,
    /// Forget the streak
    #[arg(long)]
    streak: bool,
    /// Forget the CGPA ledger
    #[arg(long)]
    cgpa: bool,
    /// Forget everything
    #[arg(long, conflicts_with_all = ["tasks", "streak", "cgpa"])]
    all: bool,
}

pub fn run(args: ResetArgs) -> CliResult {
    if !(args.all || args.tasks || args.streak || args.cgpa) {
        return Err("choose what to reset: --tasks, --streak, --cgpa or --all".into());
    }
    let mut desk = open_desk()?;
    desk.dispatch(Action::Reset {
        tasks: args.all || args.tasks,
        streak: args.all || args.streak,
        cgpa: args.all || args.cgpa,
    })?;
    println!("reset done");
    Ok(())
}
