//! cxxabi CLI — inspect C++ ABI descriptors and validate ABI profiles.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "cxxabi", version, about = "C++ ABI descriptor inspection")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every known ABI kind
    List,
    /// Show the derived facts of an ABI kind
    Describe {
        /// ABI kind (e.g., generic-itanium, microsoft, webassembly)
        kind: String,
        /// Output format (human, toml, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Validate an ABI profile file
    Check {
        /// Path to a .abi.toml file
        file: PathBuf,
    },
    /// Write a new ABI profile pinning the current facts of a kind
    New {
        /// Profile name
        name: String,
        /// ABI kind the profile selects
        #[arg(long)]
        abi: String,
        /// Output file (default: abi/<name>.abi.toml)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List ABI profiles in a project's abi/ directory
    Profiles {
        /// Project directory (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List => commands::kind::list(),
        Commands::Describe { kind, format } => commands::kind::describe(&kind, format.as_deref()),
        Commands::Check { file } => commands::profile::check(&file),
        Commands::New { name, abi, output } => {
            let cwd = std::env::current_dir()?;
            commands::profile::new(&cwd, &name, &abi, output.as_deref())
        }
        Commands::Profiles { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            commands::profile::list(&dir)
        }
    }
}
