use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::dashboard::Task;
use crate::handlers::{ClassEntry, Greeting, NameChange, NewTask, Notes, Quote};
use crate::schedule::{ClassEvent, ClassId, Placement, WeekView};
use crate::validation::ClassForm;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "query_token",
            SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::new("token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_schedule,
        crate::handlers::next_week,
        crate::handlers::previous_week,
        crate::handlers::this_week,
        crate::handlers::get_ical,
        crate::handlers::list_classes,
        crate::handlers::add_class,
        crate::handlers::delete_class,
        crate::handlers::list_tasks,
        crate::handlers::add_task,
        crate::handlers::toggle_task,
        crate::handlers::delete_task,
        crate::handlers::get_notes,
        crate::handlers::put_notes,
        crate::handlers::get_greeting,
        crate::handlers::put_name,
        crate::handlers::get_quote
    ),
    components(schemas(
        ClassEvent,
        ClassId,
        ClassForm,
        ClassEntry,
        Placement,
        WeekView,
        Task,
        NewTask,
        Notes,
        NameChange,
        Greeting,
        Quote
    )),
    tags(
        (name = "dashboard", description = "Service and dashboard widgets"),
        (name = "schedule", description = "Weekly class schedule"),
        (name = "classes", description = "Recurring class management"),
        (name = "tasks", description = "To-do list"),
        (name = "profile", description = "User name and notes")
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;
