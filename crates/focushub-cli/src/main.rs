use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "focushub", version, about = "FocusHub CLI")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit tracking and streaks
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Day planner backlog and timeline
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Prioritized to-do list
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Medication inventory
    Med {
        #[command(subcommand)]
        action: commands::med::MedAction,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Split an overwhelming task into micro-steps
    Breakdown {
        /// Task description
        #[arg(required = true, num_args = 1..)]
        task: Vec<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_env("FOCUSHUB_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Med { action } => commands::med::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Breakdown { task } => commands::breakdown::run(&task.join(" ")),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "focushub", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
