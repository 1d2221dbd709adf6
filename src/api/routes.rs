//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::error::ErrorResponse;
use super::handlers::{self, HealthResponse};
use super::state::AppState;
use crate::db::Database;
use crate::serializers::{ContactData, TodoData};
use crate::validators::ValidationErrors;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Todo and contact CRUD API",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_todos,
        handlers::create_todo,
        handlers::get_todo,
        handlers::update_todo,
        handlers::delete_todo,
        handlers::list_contacts,
        handlers::create_contact,
    ),
    components(
        schemas(
            HealthResponse,
            TodoData,
            ContactData,
            ValidationErrors,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "todos", description = "Todo management endpoints"),
        (name = "contacts", description = "Contact management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(handlers::health));

    // Todo routes (generic over Database)
    let todo_routes = routes!(D => {
        get "/todos/" => handlers::list_todos,
        post "/todos/" => handlers::create_todo,
        get "/todos/{id}/" => handlers::get_todo,
        put "/todos/{id}/" => handlers::update_todo,
        patch "/todos/{id}/" => handlers::update_todo,
        delete "/todos/{id}/" => handlers::delete_todo,
    });

    // Contact routes (generic over Database)
    let contact_routes = routes!(D => {
        get "/contacts/" => handlers::list_contacts,
        post "/contacts/" => handlers::create_contact,
    });

    system_routes
        .merge(todo_routes)
        .merge(contact_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
