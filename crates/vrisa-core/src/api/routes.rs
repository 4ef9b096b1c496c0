//! API routes

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{self, AppState};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))

        // Alert rules
        .route("/api/v1/alerts/rules", get(handlers::list_alert_rules))
        .route("/api/v1/alerts/rules", post(handlers::create_alert_rule))
        .route("/api/v1/alerts/rules/:index", delete(handlers::request_rule_delete))
        .route("/api/v1/alerts/confirm", post(handlers::confirm_rule_delete))
        .route("/api/v1/alerts/cancel", post(handlers::cancel_rule_delete))
        .route("/api/v1/alerts/evaluate", post(handlers::evaluate_reading))

        // Registration requests
        .route("/api/v1/registrations", get(handlers::list_registrations))
        .route("/api/v1/registrations", post(handlers::submit_registration))
        .route("/api/v1/registrations/:index/accept", post(handlers::registration_accept))
        .route("/api/v1/registrations/:index/reject", post(handlers::registration_reject))
        .route("/api/v1/registrations/confirm", post(handlers::registrations_confirm))
        .route("/api/v1/registrations/cancel", post(handlers::registrations_cancel))

        // Integration requests
        .route("/api/v1/integrations", get(handlers::list_integrations))
        .route("/api/v1/integrations", post(handlers::submit_integration))
        .route("/api/v1/integrations/:index/accept", post(handlers::integration_accept))
        .route("/api/v1/integrations/:index/reject", post(handlers::integration_reject))
        .route("/api/v1/integrations/confirm", post(handlers::integrations_confirm))
        .route("/api/v1/integrations/cancel", post(handlers::integrations_cancel))

        // Directory
        .route("/api/v1/stations", get(handlers::list_stations))
        .route("/api/v1/institutions", get(handlers::list_institutions))

        .with_state(state)
}
