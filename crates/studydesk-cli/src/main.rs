use clap::{Parser, Subcommand};

mod commands;
mod common;
mod logging;

#[derive(Parser)]
#[command(name = "studydesk", version, about = "Study tracker, streak and CGPA calculator")]
struct Cli {
    /// Log filter, e.g. "debug" or "studydesk_core=trace" (defaults to RUST_LOG, then "warn")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study task list
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Show the daily study streak
    Streak,
    /// Semester CGPA ledger
    Cgpa {
        #[command(subcommand)]
        action: commands::cgpa::CgpaAction,
    },
    /// Average grade points needed to reach a target CGPA
    Target(commands::target::TargetArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Display mode (screenshot mode)
    Display {
        #[command(subcommand)]
        action: commands::display::DisplayAction,
    },
    /// Simulate a key press against the configured shortcuts
    Press(commands::press::PressArgs),
    /// Forget stored data
    Reset(commands::reset::ResetArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Streak => commands::streak::run(),
        Commands::Cgpa { action } => commands::cgpa::run(action),
        Commands::Target(args) => commands::target::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Display { action } => commands::display::run(action),
        Commands::Press(args) => commands::press::run(args),
        Commands::Reset(args) => commands::reset::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
