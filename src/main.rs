mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use roster_core::ScheduleId;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "View and manage who is scheduled for which event")]
struct Cli {
    /// Show debug logging from roster
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the schedule table
    List {
        /// Only show schedules assigned to this person
        #[arg(short, long)]
        name: Option<String>,

        /// Only show schedules for this event
        #[arg(short, long)]
        event: Option<String>,

        /// Include inactive schedules
        #[arg(long)]
        show_all: bool,

        /// Click a column header (id, event, assigned, date). Repeat to flip direction.
        #[arg(short, long)]
        sort: Vec<String>,
    },
    /// Show schedules on a calendar
    Calendar {
        /// day, week, month or year
        #[arg(long, default_value = "month")]
        view: String,

        /// Date to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Step back this many views
        #[arg(long, conflicts_with = "next")]
        prev: Option<u32>,

        /// Step forward this many views
        #[arg(long)]
        next: Option<u32>,
    },
    /// Show one schedule in detail
    Show { id: ScheduleId },
    /// Add a schedule
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        event: String,

        /// Schedule date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },
    /// Edit a schedule; unspecified fields keep their current value
    Edit {
        id: ScheduleId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        event: Option<String>,

        /// Schedule date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a schedule
    Delete { id: ScheduleId },
    /// List the people and events schedules can use
    Choices,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::List {
            name,
            event,
            show_all,
            sort,
        } => commands::list::run(name, event, show_all, sort).await,
        Commands::Calendar {
            view,
            date,
            prev,
            next,
        } => commands::calendar::run(&view, date.as_deref(), prev, next).await,
        Commands::Show { id } => commands::show::run(id).await,
        Commands::Add { name, event, date } => commands::add::run(name, event, &date).await,
        Commands::Edit {
            id,
            name,
            event,
            date,
        } => commands::edit::run(id, name, event, date.as_deref()).await,
        Commands::Delete { id } => commands::delete::run(id).await,
        Commands::Choices => commands::choices::run(),
    }
}

/// Warnings and errors by default; `--verbose` turns on roster's debug
/// output. `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,roster=debug,roster_core=debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
