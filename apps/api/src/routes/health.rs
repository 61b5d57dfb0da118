use axum::Json;
use serde_json::{json, Value};

const SERVICE: &str = "contact-intake-api";

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE
    }))
}

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Contact intake API",
        "version": env!("CARGO_PKG_VERSION"),
        "contacts": "/api/v1/contacts"
    }))
}
