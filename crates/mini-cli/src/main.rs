//! Mini command-line runner.
//!
//! # Commands
//!
//! - `mini run <file>` - Run a program and print its application description
//! - `mini check <file>` - Lex and parse without running
//! - `mini tokens <file>` - Print the token stream
//! - `mini repl` - Interactive session
//!
//! # Examples
//!
//! ```text
//! mini run weather.mini
//! mini run weather.mini --json
//! mini -vv run weather.mini --max-call-depth 200
//! mini repl
//! ```

use std::process;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

mod commands;
mod repl;

#[derive(Parser)]
#[command(name = "mini")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mini language runner", long_about = None)]
#[command(after_help = "Use 'mini <command> --help' for more information about a command.")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Mini program
    ///
    /// Executes a .mini source file, then prints the program's output and
    /// the application description it declared.
    #[command(after_help = "Examples:\n  mini run app.mini\n  mini run app.mini --json")]
    Run(RunArgs),

    /// Check a Mini program for lexical and syntax errors
    #[command(after_help = "Example:\n  mini check app.mini")]
    Check {
        /// Path to .mini source file
        file: String,
    },

    /// Print the token stream of a Mini program
    #[command(after_help = "Example:\n  mini tokens app.mini")]
    Tokens {
        /// Path to .mini source file
        file: String,
    },

    /// Start an interactive session
    Repl(ReplArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Path to .mini source file
    file: String,

    /// Print the application description as JSON
    #[arg(long)]
    json: bool,

    /// Maximum function call depth
    #[arg(long, default_value_t = 1000)]
    max_call_depth: usize,
}

#[derive(Args)]
struct ReplArgs {
    /// Maximum function call depth
    #[arg(long, default_value_t = 1000)]
    max_call_depth: usize,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => commands::run(&args.file, args.json, args.max_call_depth),
        Commands::Check { file } => commands::check(&file),
        Commands::Tokens { file } => commands::tokens(&file),
        Commands::Repl(args) => repl::run(args.max_call_depth),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        process::exit(commands::exit_code(&e));
    }
}
