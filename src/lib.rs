pub mod auth;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod ical;
pub mod openapi;
pub mod quote;
pub mod schedule;
pub mod settings;
pub mod storage;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use chrono::{Local, NaiveDate};
use handlers::{
    add_class, add_task, delete_class, delete_task, get_greeting, get_ical, get_notes, get_quote,
    get_schedule, healthz_live, healthz_ready, list_classes, list_tasks, next_week, previous_week,
    put_name, put_notes, root, this_week, toggle_task,
};
use http::Method;
use tokio::sync::Mutex;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dashboard::Dashboard;
use crate::ical::ICalExporter;
use crate::openapi::ApiDoc;
use crate::quote::QuoteClient;
use crate::schedule::WeekOutOfRange;
use crate::settings::Settings;
use crate::storage::FileStorage;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub dashboard: Arc<Mutex<Dashboard<FileStorage>>>,
    pub quotes: Arc<QuoteClient>,
    pub exporter: Arc<ICalExporter>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        storage: FileStorage,
        today: NaiveDate,
    ) -> Result<Self, WeekOutOfRange> {
        let dashboard = Dashboard::open(storage, today)?;
        Ok(Self {
            quotes: Arc::new(QuoteClient::new(settings.quote_url.clone())),
            dashboard: Arc::new(Mutex::new(dashboard)),
            exporter: Arc::new(ICalExporter::new()),
            settings,
        })
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let storage = FileStorage::open(&settings.data_dir)?;
    info!(data_dir = %settings.data_dir.display(), "Opened dashboard storage");
    let state = AppState::new(settings, storage, Local::now().date_naive())?;

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    let app = build_router(state);

    info!("Starting Study Dashboard API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/schedule", get(get_schedule))
        .route("/schedule/next", post(next_week))
        .route("/schedule/previous", post(previous_week))
        .route("/schedule/today", post(this_week))
        .route("/schedule.ical", get(get_ical))
        .route("/classes", get(list_classes).post(add_class))
        .route("/classes/{id}", delete(delete_class))
        .route("/tasks", get(list_tasks).post(add_task))
        .route("/tasks/{id}", delete(delete_task))
        .route("/tasks/{id}/toggle", post(toggle_task))
        .route("/notes", get(get_notes).put(put_notes))
        .route("/greeting", get(get_greeting))
        .route("/profile/name", put(put_name))
        .route("/quote", get(get_quote))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(cors).layer(trace_layer)
}
