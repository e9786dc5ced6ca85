//! Robots-Scope main entry point
//!
//! This is the command-line interface for checking URLs against a site's robots.txt.

use anyhow::Context;
use clap::Parser;
use robots_scope::config::{load_config, Config};
use robots_scope::{HttpFetcher, RobotsError, SiteClient};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Robots-Scope: robots.txt disallow rules for a site
///
/// Fetches the robots.txt of the site SITE belongs to, lists the URLs it
/// disallows for the chosen user agent, and checks any further URLs against it.
#[derive(Parser, Debug)]
#[command(name = "robots-scope")]
#[command(version)]
#[command(about = "Check URLs against a site's robots.txt", long_about = None)]
struct Cli {
    /// Any URL on the site whose robots.txt should be read
    #[arg(value_name = "SITE")]
    site: String,

    /// URLs to check against the site's rules
    #[arg(value_name = "URLS")]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// User agent matched against `User-agent:` lines (overrides the config)
    #[arg(short = 'a', long)]
    user_agent: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    let user_agent = cli.user_agent.clone().or(config.robots.user_agent.clone());
    let fetcher = HttpFetcher::new(&config.http).context("failed to build HTTP client")?;
    let client = SiteClient::new(user_agent);

    let location = client.derive_robots_location(&cli.site)?;
    println!("robots.txt: {}", location.robots_url());

    let refresh = client.refresh_if_stale(&cli.site, &fetcher, config.cache.max_age());
    match refresh.await {
        Ok(fetched) => tracing::debug!("Fetched robots.txt: {}", fetched),
        Err(RobotsError::RobotsDisallowed { domain }) => {
            eprintln!("{} does not allow robots.", domain);
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    }

    print_rules(&client);
    check_urls(&client, &cli.urls);

    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("robots_scope=warn"),
            1 => EnvFilter::new("robots_scope=info,warn"),
            2 => EnvFilter::new("robots_scope=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_rules(client: &SiteClient) {
    let disallowed = client.disallowed_urls();
    if disallowed.is_empty() {
        println!("No disallowed URLs");
        return;
    }

    println!("Disallowed ({}):", disallowed.len());
    for url in &disallowed {
        println!("  - {}", url);
    }
}

fn check_urls(client: &SiteClient, urls: &[String]) {
    for url in urls {
        let verdict = match client.is_allowed(url) {
            Ok(true) => "allowed",
            Ok(false) => "disallowed",
            Err(e) => {
                tracing::debug!("{}", e);
                "invalid"
            }
        };
        println!("{}\t{}", verdict, url);
    }
}
