use clap::{Parser, ValueEnum};
use mcp_probe::{Config, DEFAULT_BASE_URL, Prober, Reporter, Runner, Suite, report, suite};
use std::{path::PathBuf, process::ExitCode, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SuiteArg {
    Core,
    Text,
    All,
}

impl From<SuiteArg> for Suite {
    fn from(arg: SuiteArg) -> Self {
        match arg {
            SuiteArg::Core => Suite::Core,
            SuiteArg::Text => Suite::Text,
            SuiteArg::All => Suite::All,
        }
    }
}

/// Smoke-test an MCP server's REST and `/mcp` endpoints
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Base URL of the server under test
    #[arg(long, env = "MCP_PROBE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: Url,

    /// Built-in suite to run
    #[arg(long, value_enum, default_value = "core")]
    suite: SuiteArg,

    /// JSON file of test cases to run instead of a built-in suite
    #[arg(long, value_name = "FILE")]
    cases: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Maximum number of requests in flight
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: u16,

    /// Write a JSON report of every outcome to FILE
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays a clean report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if args.no_color {
        yansi::disable();
    } else {
        yansi::whenever(yansi::Condition::TTY_AND_COLOR);
    }

    let config = Config::new()
        .with_base_url(args.base_url)
        .with_timeout(Duration::from_secs(args.timeout))
        .with_concurrency(args.concurrency.into());
    tracing::debug!(?config, "resolved configuration");

    let cases = match &args.cases {
        Some(path) => suite::load(path)?,
        None => Suite::from(args.suite).cases(),
    };

    let prober = Prober::new(&config)?;
    let runner = Runner::new(prober).with_concurrency(config.concurrency);
    let mut reporter = Reporter::new(std::io::stdout().lock(), config.preview_chars);
    let summary = runner.run(&cases, &mut reporter).await?;

    if let Some(path) = &args.report {
        report::write_json(path, &config.base_url, &summary)?;
    }

    Ok(ExitCode::from(summary.exit_status()))
}
