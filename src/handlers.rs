use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dashboard::Task;
use crate::dashboard::profile::today_label;
use crate::schedule::{ClassEvent, ClassId, WeekView};
use crate::validation::ClassForm;
use crate::{AppState, auth::Authenticated, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    /// Any date in the requested week.
    pub monday: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassEntry {
    #[serde(flatten)]
    pub class: ClassEvent,
    pub summary: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewTask {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Notes {
    pub notes: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NameChange {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Greeting {
    pub greeting: String,
    pub user_name: String,
    pub today: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Quote {
    pub quote: String,
}

#[utoipa::path(get, path = "/", tag = "dashboard")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Study Dashboard API",
        "endpoints": {
            "/schedule": "Current week of the class schedule",
            "/schedule.ical": "Current week as an iCal file",
            "/classes": "Recurring classes",
            "/tasks": "To-do list",
            "/notes": "Notes pad",
            "/greeting": "Greeting for the user",
            "/quote": "Motivational quote"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "dashboard")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "dashboard")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/schedule",
    params(
        ("monday" = Option<String>, Query, description = "Any date (YYYY-MM-DD) in the week to show; defaults to the current cursor week"),
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "Week view", body = WeekView),
        (status = 400, description = "Date outside the supported calendar range"),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "schedule"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekView>, ApiError> {
    let dashboard = state.dashboard.lock().await;
    let view = match query.monday {
        Some(date) => dashboard.week_of(date)?,
        None => dashboard.current_week(),
    };
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/schedule/next",
    responses(
        (status = 200, description = "Following week", body = WeekView),
        (status = 400, description = "Cursor is at the last representable week")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "schedule"
)]
pub async fn next_week(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<WeekView>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.cursor.next()?;
    Ok(Json(dashboard.current_week()))
}

#[utoipa::path(
    post,
    path = "/schedule/previous",
    responses(
        (status = 200, description = "Preceding week", body = WeekView),
        (status = 400, description = "Cursor is at the first representable week")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "schedule"
)]
pub async fn previous_week(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<WeekView>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.cursor.previous()?;
    Ok(Json(dashboard.current_week()))
}

#[utoipa::path(
    post,
    path = "/schedule/today",
    responses((status = 200, description = "Week containing today", body = WeekView)),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "schedule"
)]
pub async fn this_week(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<WeekView>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.cursor.reset(Local::now().date_naive())?;
    Ok(Json(dashboard.current_week()))
}

#[utoipa::path(
    get,
    path = "/schedule.ical",
    params(
        ("monday" = Option<String>, Query, description = "Any date (YYYY-MM-DD) in the week to export"),
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 400, description = "Date outside the supported calendar range"),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "No classes that week")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "schedule"
)]
pub async fn get_ical(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let view = {
        let dashboard = state.dashboard.lock().await;
        match query.monday {
            Some(date) => dashboard.week_of(date)?,
            None => dashboard.current_week(),
        }
    };

    if view.placements.is_empty() {
        return Err(ApiError::NotFound("No classes found".into()));
    }

    let body = state.exporter.generate(&view);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=class_schedule.ics",
            ),
        ],
        body,
    ))
}

#[utoipa::path(
    get,
    path = "/classes",
    responses((status = 200, description = "All classes in insertion order", body = [ClassEntry])),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn list_classes(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Json<Vec<ClassEntry>> {
    let dashboard = state.dashboard.lock().await;
    let entries = dashboard
        .classes
        .list()
        .iter()
        .map(|class| ClassEntry {
            summary: class.to_string(),
            class: class.clone(),
        })
        .collect();
    Json(entries)
}

#[utoipa::path(
    post,
    path = "/classes",
    request_body = ClassForm,
    responses(
        (status = 201, description = "Class added", body = ClassEvent),
        (status = 400, description = "Invalid class details")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn add_class(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(form): Json<ClassForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    let id = dashboard.classes.add(&form)?;
    let class = dashboard
        .classes
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("No entry with id {id}")))?;
    Ok((StatusCode::CREATED, Json(class)))
}

#[utoipa::path(
    delete,
    path = "/classes/{id}",
    params(("id" = String, Path, description = "Class id")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Unknown class")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn delete_class(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<ClassId>,
) -> Result<StatusCode, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.classes.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/tasks",
    responses((status = 200, description = "To-do list", body = [Task])),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "tasks"
)]
pub async fn list_tasks(State(state): State<AppState>, _auth: Authenticated) -> Json<Vec<Task>> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.tasks.list().to_vec())
}

#[utoipa::path(
    post,
    path = "/tasks",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task added", body = Task),
        (status = 400, description = "Empty task text")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "tasks"
)]
pub async fn add_task(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(new_task): Json<NewTask>,
) -> Result<impl IntoResponse, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    let task = dashboard.tasks.add(&new_task.text)?.clone();
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    post,
    path = "/tasks/{id}/toggle",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 404, description = "Unknown task")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "tasks"
)]
pub async fn toggle_task(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    let task = dashboard.tasks.toggle(id)?.clone();
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Unknown task")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "tasks"
)]
pub async fn delete_task(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.tasks.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/notes",
    responses((status = 200, description = "Saved notes", body = Notes)),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "profile"
)]
pub async fn get_notes(State(state): State<AppState>, _auth: Authenticated) -> Json<Notes> {
    let dashboard = state.dashboard.lock().await;
    Json(Notes {
        notes: dashboard.profile.notes().to_string(),
    })
}

#[utoipa::path(
    put,
    path = "/notes",
    request_body = Notes,
    responses((status = 204, description = "Notes saved")),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "profile"
)]
pub async fn put_notes(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<Notes>,
) -> StatusCode {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.profile.set_notes(body.notes);
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/greeting",
    responses((status = 200, description = "Greeting and today's date", body = Greeting)),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "profile"
)]
pub async fn get_greeting(State(state): State<AppState>, _auth: Authenticated) -> Json<Greeting> {
    let now = Local::now();
    let dashboard = state.dashboard.lock().await;
    Json(Greeting {
        greeting: dashboard.profile.greeting(now.hour()),
        user_name: dashboard.profile.user_name().to_string(),
        today: today_label(now.date_naive()),
    })
}

#[utoipa::path(
    put,
    path = "/profile/name",
    request_body = NameChange,
    responses(
        (status = 204, description = "Name changed"),
        (status = 400, description = "Blank name")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "profile"
)]
pub async fn put_name(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<NameChange>,
) -> Result<StatusCode, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    if dashboard.profile.set_user_name(&body.name) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::BadRequest("name must not be empty".into()))
    }
}

#[utoipa::path(
    get,
    path = "/quote",
    responses((status = 200, description = "Motivational quote", body = Quote)),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "dashboard"
)]
pub async fn get_quote(State(state): State<AppState>, _auth: Authenticated) -> Json<Quote> {
    Json(Quote {
        quote: state.quotes.fetch().await,
    })
}
