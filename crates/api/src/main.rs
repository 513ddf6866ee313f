use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neo_core::domain::neo::NeoRecord;
use neo_core::ingest::provider::{FeedClient, HttpFeedClient};
use neo_core::tracker::{RefreshOutcome, Tracker};
use neo_core::views::{View, ViewTable};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = neo_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let client: Box<dyn FeedClient> = Box::new(HttpFeedClient::from_settings(&settings)?);
    let app = router(AppState::new(client));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/refresh", post(refresh))
        .route("/records", get(get_records))
        .route("/views/:view", get(get_view))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    tracker: Arc<Mutex<Tracker<Box<dyn FeedClient>>>>,
}

impl AppState {
    fn new(client: Box<dyn FeedClient>) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(Tracker::new(client))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshRequest {
    start_date: String,
    end_date: String,
}

async fn refresh(State(state): State<AppState>, Json(req): Json<RefreshRequest>) -> Response {
    let mut tracker = state.tracker.lock().await;

    match tracker.refresh(&req.start_date, &req.end_date).await {
        Ok(RefreshOutcome::Updated(count)) => Json(json!({ "records": count })).into_response(),
        Ok(RefreshOutcome::NoData) => StatusCode::NO_CONTENT.into_response(),
        Ok(RefreshOutcome::InvalidInput(message)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "NEO refresh failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_records(State(state): State<AppState>) -> Json<Vec<NeoRecord>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.records().to_vec())
}

async fn get_view(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> Result<Json<ViewTable>, StatusCode> {
    let view = view.parse::<View>().map_err(|_| StatusCode::NOT_FOUND)?;
    let tracker = state.tracker.lock().await;
    Ok(Json(view.table(tracker.records())))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::domain::date_range::DateRange;
    use serde_json::Value;

    /// Answers every request with the same body, or with no data.
    struct FixedClient(Option<Value>);

    #[async_trait::async_trait]
    impl FeedClient for FixedClient {
        fn provider_name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_feed(&self, _range: &DateRange) -> anyhow::Result<Option<Value>> {
            Ok(self.0.clone())
        }
    }

    fn state_with(body: Option<Value>) -> AppState {
        AppState::new(Box::new(FixedClient(body)))
    }

    fn feed() -> Value {
        json!({
            "near_earth_objects": {
                "2023-01-01": [
                    {
                        "name": "(2023 AB)",
                        "is_potentially_hazardous_asteroid": true,
                        "estimated_diameter": {"meters": {"estimated_diameter_max": 250.0}},
                        "close_approach_data": [{
                            "close_approach_date_full": "2023-Jan-01 05:12",
                            "miss_distance": {"kilometers": "1234.5"},
                            "relative_velocity": {"kilometers_per_hour": "5000"}
                        }]
                    }
                ]
            }
        })
    }

    fn request(start: &str, end: &str) -> Json<RefreshRequest> {
        Json(RefreshRequest {
            start_date: start.to_string(),
            end_date: end.to_string(),
        })
    }

    async fn body_json(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn refresh_then_read_records_and_views() {
        let state = state_with(Some(feed()));

        let res = refresh(State(state.clone()), request("2023-01-01", "2023-01-01")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({"records": 1}));

        let Json(records) = get_records(State(state.clone())).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].miss_distance_km, 1234.5);

        let Json(table) = get_view(State(state), Path("hazardous".to_string()))
            .await
            .unwrap();
        assert_eq!(table.rows, [["(2023 AB)", "Yes"]]);
    }

    #[tokio::test]
    async fn invalid_dates_are_a_bad_request() {
        let state = state_with(Some(feed()));
        let res = refresh(State(state.clone()), request("2023-13-01", "2023-01-01")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["error"],
            "Please enter valid dates in YYYY-MM-DD format."
        );

        let Json(records) = get_records(State(state)).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn no_data_is_no_content() {
        let state = state_with(None);
        let res = refresh(State(state), request("2023-01-01", "2023-01-01")).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn malformed_feed_is_a_server_error() {
        let state = state_with(Some(json!({"near_earth_objects": {"2023-01-01": [{}]}})));
        let res = refresh(State(state), request("2023-01-01", "2023-01-01")).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unknown_view_is_not_found() {
        let state = state_with(None);
        let res = get_view(State(state), Path("orbit".to_string())).await;
        assert_eq!(res.unwrap_err(), StatusCode::NOT_FOUND);
    }
}
