//! nodecms CLI
//!
//! Single binary static site generator for JSON and Markdown content trees.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for nodecms.
#[derive(Parser)]
#[command(
    name = "nodecms",
    version,
    about = "A static site generator for JSON and Markdown content trees"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = nodecms_core::config::CONFIG_FILE)]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Start development server with live reload
    Watch {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind (defaults to server.host)
        #[arg(long)]
        host: Option<String>,
        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },
    /// Render every page without writing output
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    nodecms::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output } => {
            nodecms::cmd::build::run(&cli.config, output.as_deref())?;
        }
        Commands::Watch { port, host, open } => {
            nodecms::cmd::watch::run(&cli.config, host.as_deref(), port, open).await?;
        }
        Commands::Check { strict } => {
            nodecms::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
