use anyhow::Context;
use clap::{Parser, Subcommand};
use riskpulse_core::sanitize::Sanitize;
use riskpulse_core::service::OverviewService;
use riskpulse_core::signals::{classify_risk, correlation_with};
use riskpulse_core::storage::tables::PgTableSource;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "riskpulse_worker")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the most recent composite sentiment values and their correlation with the benchmark.
    Sentiment {
        #[arg(long, default_value_t = 10)]
        tail: usize,
    },
    /// Build the overview snapshot and print it as JSON.
    Snapshot {
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = riskpulse_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let db_url = settings.require_database_url()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(db_url)
        .await
        .context("connect DATABASE_URL failed")?;

    riskpulse_core::storage::migrate(&pool).await?;

    let service = OverviewService::from_settings(Arc::new(PgTableSource::new(pool)), &settings);

    let result = match args.command {
        Command::Sentiment { tail } => print_sentiment(&service, tail).await,
        Command::Snapshot { pretty } => print_snapshot(&service, pretty).await,
    };

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %err, "worker command failed");
    }
    result
}

async fn print_sentiment(service: &OverviewService, tail: usize) -> anyhow::Result<()> {
    let (output, market) = service.generate_with_market().await?;

    for (date, score) in output.series.tail(tail) {
        match Some(score).sanitize() {
            Some(v) => println!("{date}  {v:+.4}  {}", classify_risk(v).as_str()),
            None => println!("{date}  n/a"),
        }
    }

    let benchmark = &service.assembler().config().benchmark;
    match correlation_with(&output.series, &market, benchmark) {
        Some(rho) => println!("correlation with {benchmark} daily returns: {rho:.3}"),
        None => println!("correlation with {benchmark} daily returns: n/a"),
    }

    tracing::info!(
        rows = output.series.len(),
        groups = output.groups.columns().len(),
        "sentiment series generated"
    );
    Ok(())
}

async fn print_snapshot(service: &OverviewService, pretty: bool) -> anyhow::Result<()> {
    let payload = service.build_overview_snapshot(true).await?;
    let text = if pretty {
        serde_json::to_string_pretty(payload.as_ref())?
    } else {
        serde_json::to_string(payload.as_ref())?
    };
    println!("{text}");
    Ok(())
}

fn init_sentry(settings: &riskpulse_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
