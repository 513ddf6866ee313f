use clap::Parser;
use neo_core::ingest::provider::HttpFeedClient;
use neo_core::tracker::{RefreshOutcome, Tracker};
use neo_core::views::View;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "neo_tracker", about = "Near-Earth objects approaching within a date range")]
struct Args {
    /// First day of the window (YYYY-MM-DD).
    #[arg(long)]
    start_date: String,

    /// Last day of the window (YYYY-MM-DD).
    #[arg(long)]
    end_date: String,

    /// View to print; repeat for several. Prints every view when omitted.
    #[arg(long = "view", value_name = "VIEW")]
    views: Vec<View>,

    /// Print the flattened records as JSON instead of tables.
    #[arg(long, conflicts_with = "views")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = neo_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let client = HttpFeedClient::from_settings(&settings)?;
    let mut tracker = Tracker::new(client);

    let outcome = match tracker.refresh(&args.start_date, &args.end_date).await {
        Ok(outcome) => outcome,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "NEO refresh failed");
            return Err(err);
        }
    };

    match outcome {
        RefreshOutcome::InvalidInput(message) => {
            eprintln!("Invalid Date: {message}");
            std::process::exit(2);
        }
        RefreshOutcome::NoData => {
            tracing::info!(
                start_date = %args.start_date,
                end_date = %args.end_date,
                "no NEO data returned"
            );
        }
        RefreshOutcome::Updated(_) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(tracker.records())?);
            } else {
                print!("{}", render_views(&args.views, tracker.records()));
            }
        }
    }

    Ok(())
}

fn render_views(views: &[View], records: &[neo_core::domain::neo::NeoRecord]) -> String {
    let views: &[View] = if views.is_empty() {
        &View::ALL
    } else {
        views
    };

    views
        .iter()
        .map(|v| v.table(records).render_text())
        .collect::<Vec<_>>()
        .join("\n")
}

fn init_sentry(settings: &neo_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
