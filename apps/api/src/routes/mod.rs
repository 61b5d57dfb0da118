pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contacts::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Contacts API: create is public, the rest require the admin token
        .route(
            "/api/v1/contacts",
            post(handlers::handle_create_contact).get(handlers::handle_list_contacts),
        )
        .route(
            "/api/v1/contacts/:id",
            get(handlers::handle_get_contact)
                .put(handlers::handle_update_contact)
                .delete(handlers::handle_delete_contact),
        )
        .with_state(state)
}
