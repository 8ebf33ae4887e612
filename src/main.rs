//! lazystack - a keyboard-driven terminal UI for browsing OpenStack resources
//!
//! Lists servers, images, flavors, networks, volumes, load balancers, DNS
//! zones, hypervisors, aggregates and projects, with the active project
//! switchable at runtime.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use lazystack::cli::{self, ConfigSubcommand};
use lazystack::config::{ConfigLoader, Credentials};
use lazystack::openstack::{FallbackProvider, FixtureProvider, OpenStackProvider, ResourceProvider};
use lazystack::tui::{self, App, Theme};

/// lazystack - a keyboard-driven terminal UI for browsing OpenStack resources
#[derive(Parser, Debug)]
#[command(name = "lazystack")]
#[command(about = "A keyboard-driven terminal UI for browsing OpenStack resources", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Browse built-in sample data instead of a live cloud
    #[arg(long)]
    demo: bool,

    /// Project to start in (overrides OS_PROJECT_NAME)
    #[arg(long, short = 'p')]
    project: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Config { subcommand }) => return cli::handle_config_command(subcommand),
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        None => {}
    }

    // Print log file location to stderr before starting TUI (so it doesn't interfere)
    if let Some(log_path) = cli::init_logging(args.debug)? {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {:#}, using defaults", e);
        ConfigLoader::load_defaults()
    });

    // Missing credentials are fatal before the UI starts
    let credentials = if args.demo {
        Credentials::demo(|key| std::env::var(key).ok(), args.project.as_deref())
    } else {
        Credentials::from_env(args.project.as_deref()).context("Missing OpenStack credentials")?
    };
    tracing::debug!("Using credentials {:?}", credentials);

    let provider: Arc<dyn ResourceProvider> = if args.demo {
        tracing::info!("Demo mode: serving fixture data");
        Arc::new(FixtureProvider::new())
    } else {
        let timeout = Duration::from_secs(config.openstack.request_timeout_secs);
        let live: Arc<dyn ResourceProvider> = Arc::new(
            OpenStackProvider::new(credentials.clone(), timeout)
                .context("Failed to create OpenStack client")?,
        );
        if config.openstack.fallback_to_fixtures {
            Arc::new(FallbackProvider::new(live))
        } else {
            live
        }
    };

    let app = App::new(
        provider,
        credentials.project,
        credentials.project_domain,
        config,
        Theme::default(),
    );

    tui::run_tui(app).await
}
