//! CLI argument definitions, tracing setup, and the fetch command.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Report, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use artifactview_core::pipeline::{self, FetchReport, ProgressReporter};
use artifactview_core::serve;
use artifactview_github::GithubClient;
use artifactview_shared::{
    AppConfig, ArtifactViewError, RUN_URL_FORMAT, RunRef, load_config, resolve_token,
};

use crate::clipboard;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// artifactview — fetch and browse GitHub Actions artifacts.
#[derive(Parser)]
#[command(
    name = "artifactview",
    version,
    about = "Fetch all artifacts of a GitHub Actions run, unpack them, and serve them locally.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// GitHub Actions run URL. Read from the clipboard when omitted.
    pub url: Option<String>,

    /// Output directory for the fetched artifacts.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = format!(
        "artifactview_cli={level},artifactview_core={level},\
         artifactview_github={level},artifactview_shared={level}"
    );

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the fetch command. Usage-class failures (bad URL, missing token,
/// unreadable clipboard, broken config file) additionally print the usage
/// hint; the specific error is surfaced either way.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    // A config file that fails to load gets the hint with default settings.
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => return Err(usage_report(e, &AppConfig::default())),
    };

    fetch_and_serve(cli, &config)
        .await
        .map_err(|e| usage_report(e, &config))
}

/// Convert a failure into the final error report, printing the usage hint
/// first when the failure is usage-class.
fn usage_report(e: ArtifactViewError, config: &AppConfig) -> Report {
    if e.is_usage_error() {
        print_usage_hint(config);
    }
    e.into()
}

/// The usage text printed alongside usage-class errors.
fn print_usage_hint(config: &AppConfig) {
    eprintln!();
    eprintln!("Usage: artifactview [RUN_URL]");
    eprintln!("  Pass a GitHub Actions run URL as the argument, or copy one to the");
    eprintln!("  clipboard and run without arguments. Expected URL format:");
    eprintln!("  {RUN_URL_FORMAT}");
    eprintln!(
        "  A GitHub token must be set in the {} environment variable.",
        config.github.token_env
    );
}

/// Token → URL → fetch pipeline → summary → file server.
async fn fetch_and_serve(cli: Cli, config: &AppConfig) -> artifactview_shared::Result<()> {
    // Token is resolved before anything else; no network call without it.
    let token = resolve_token(config)?;

    let url = match cli.url {
        Some(url) => url,
        None => {
            info!("no URL argument, reading clipboard");
            clipboard::read_text()?
        }
    };

    let run = RunRef::parse(&url)?;

    let output_root = cli
        .out
        .unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir));

    info!(%run, output_root = %output_root.display(), "fetching artifacts");

    let client = GithubClient::new(&token, config.github.api_base.clone())?;
    let reporter = CliProgress::new();

    let report = pipeline::fetch_run(&client, &run, &output_root, &reporter).await?;

    if report.artifacts_found == 0 {
        println!("No artifacts found for this run");
        return Ok(());
    }

    print_summary(&run, &report);

    serve::serve_directory(
        &config.server.command,
        &config.server.args,
        &report.output_root,
    )
}

/// Print the post-fetch summary block.
fn print_summary(run: &RunRef, report: &FetchReport) {
    println!();
    println!("  Artifacts fetched!");
    println!("  Run:     {run}");
    println!("  Found:   {}", report.artifacts_found);
    println!("  Fetched: {}", report.artifacts_fetched);
    if report.artifacts_skipped > 0 {
        println!("  Skipped: {}", report.artifacts_skipped);
        for (name, detail) in &report.errors {
            println!("           {name}: {detail}");
        }
    }
    println!("  Output:  {}", report.output_root.display());
    println!("  Time:    {:.1}s", report.duration.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn artifact_started(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {name}"));
    }

    fn done(&self, _report: &FetchReport) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_url(url: &str) -> Cli {
        Cli {
            url: Some(url.to_string()),
            out: None,
            log_format: LogFormat::Text,
            verbose: 0,
        }
    }

    #[test]
    fn cli_parses_positional_url_and_flags() {
        let cli = Cli::try_parse_from([
            "artifactview",
            "https://github.com/a/b/actions/runs/1",
            "--out",
            "/tmp/av-out",
            "--log-format",
            "json",
            "-vv",
        ])
        .expect("parse CLI args");

        assert_eq!(
            cli.url.as_deref(),
            Some("https://github.com/a/b/actions/runs/1")
        );
        assert_eq!(cli.out, Some(PathBuf::from("/tmp/av-out")));
        assert!(matches!(cli.log_format, LogFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[tokio::test]
    async fn missing_token_fails_before_input_resolution() {
        let mut config = AppConfig::default();
        config.github.token_env = "AV_CLI_TEST_NO_TOKEN_4471".into();

        let cli = cli_with_url("https://github.com/a/b/actions/runs/1");
        let err = fetch_and_serve(cli, &config).await.unwrap_err();

        assert!(matches!(err, ArtifactViewError::Config { .. }));
        assert!(err.is_usage_error());
    }

    #[tokio::test]
    async fn invalid_url_argument_is_a_validation_error() {
        let mut config = AppConfig::default();
        config.github.token_env = "AV_CLI_TEST_TOKEN_4472".into();
        unsafe { std::env::set_var("AV_CLI_TEST_TOKEN_4472", "test-token") };

        let cli = cli_with_url("https://example.com/not-a-run-url");
        let err = fetch_and_serve(cli, &config).await.unwrap_err();

        assert!(matches!(err, ArtifactViewError::Validation { .. }));
        assert!(err.to_string().contains(RUN_URL_FORMAT));

        unsafe { std::env::remove_var("AV_CLI_TEST_TOKEN_4472") };
    }

    #[test]
    fn config_load_failure_keeps_its_error_message() {
        let err = ArtifactViewError::config("failed to parse artifactview.toml");
        let report = usage_report(err, &AppConfig::default());
        assert!(report.to_string().contains("failed to parse"));
    }
}
