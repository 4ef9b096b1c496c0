//! API handlers for the HTTP REST API

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alerting::{evaluate, AlertRuleStore};
use crate::approvals::{seed, ApprovalQueue, PendingDecision};
use crate::config::DirectoryConfig;
use crate::error::Error;
use crate::models::{
    AlertEvent, AlertRule, AlertRuleDraft, Decision, Institution, IntegrationDraft,
    IntegrationRequest, Reading, RegistrationDraft, RegistrationRequest, Station,
};

/// Application state shared across handlers
///
/// The domain components stay synchronous; handlers take the relevant
/// mutex for the duration of one operation, so each collection still sees
/// one command at a time.
#[derive(Clone)]
pub struct AppState {
    /// Configured alert rules
    pub rules: Arc<Mutex<AlertRuleStore>>,
    /// Account registrations awaiting review
    pub registrations: Arc<Mutex<ApprovalQueue<RegistrationRequest>>>,
    /// Institution integrations awaiting review
    pub integrations: Arc<Mutex<ApprovalQueue<IntegrationRequest>>>,
    /// Stations and institutions offered in selection inputs
    pub directory: Arc<DirectoryConfig>,
}

impl AppState {
    /// State with empty collections
    pub fn new(directory: DirectoryConfig) -> Self {
        Self {
            rules: Arc::new(Mutex::new(AlertRuleStore::new())),
            registrations: Arc::new(Mutex::new(ApprovalQueue::new())),
            integrations: Arc::new(Mutex::new(ApprovalQueue::new())),
            directory: Arc::new(directory),
        }
    }

    /// State with the demo request snapshot loaded
    pub fn seeded(directory: DirectoryConfig) -> Self {
        let state = Self::new(directory);
        *state.registrations.lock() = ApprovalQueue::from_requests(seed::sample_registrations());
        *state.integrations.lock() = ApprovalQueue::from_requests(seed::sample_integrations());
        state
    }
}

fn error_response(err: Error) -> (StatusCode, String) {
    let status = match &err {
        Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// --- Alert rules ---

/// List alert rules response
#[derive(Serialize)]
pub struct ListRulesResponse {
    /// Rules in store order
    pub rules: Vec<AlertRule>,
    /// Number of rules
    pub total: usize,
    /// Index staged for deletion, if a confirmation is pending
    pub pending_delete: Option<usize>,
}

/// List configured alert rules
pub async fn list_alert_rules(State(state): State<AppState>) -> Json<ListRulesResponse> {
    let store = state.rules.lock();
    Json(ListRulesResponse {
        rules: store.rules().to_vec(),
        total: store.len(),
        pending_delete: store.pending_delete(),
    })
}

/// Create alert rule response
#[derive(Serialize)]
pub struct CreateRuleResponse {
    /// Identifier of the new rule
    pub id: Uuid,
}

/// Create an alert rule from a form submission
pub async fn create_alert_rule(
    State(state): State<AppState>,
    Json(draft): Json<AlertRuleDraft>,
) -> Result<(StatusCode, Json<CreateRuleResponse>), (StatusCode, String)> {
    let id = state.rules.lock().create(draft).map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(CreateRuleResponse { id })))
}

/// Staged deletion response
#[derive(Serialize)]
pub struct StageDeleteResponse {
    /// Index now staged for deletion
    pub pending_delete: usize,
}

/// Stage an alert rule for deletion
pub async fn request_rule_delete(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StageDeleteResponse>, (StatusCode, String)> {
    state
        .rules
        .lock()
        .request_delete(index)
        .map_err(error_response)?;

    Ok(Json(StageDeleteResponse {
        pending_delete: index,
    }))
}

/// Confirmed deletion response
#[derive(Serialize)]
pub struct ConfirmDeleteResponse {
    /// The removed rule, absent when nothing was staged
    pub removed: Option<AlertRule>,
}

/// Confirm the staged alert rule deletion
pub async fn confirm_rule_delete(
    State(state): State<AppState>,
) -> Result<Json<ConfirmDeleteResponse>, (StatusCode, String)> {
    let removed = state.rules.lock().confirm().map_err(error_response)?;

    Ok(Json(ConfirmDeleteResponse { removed }))
}

/// Cancel the staged alert rule deletion
pub async fn cancel_rule_delete(State(state): State<AppState>) -> StatusCode {
    state.rules.lock().cancel();
    StatusCode::NO_CONTENT
}

/// Reading evaluation response
#[derive(Serialize)]
pub struct EvaluateResponse {
    /// Rules that fired for the reading
    pub events: Vec<AlertEvent>,
    /// Number of rules that fired
    pub total: usize,
}

/// Check a reading against the configured rules
pub async fn evaluate_reading(
    State(state): State<AppState>,
    Json(reading): Json<Reading>,
) -> Json<EvaluateResponse> {
    let events = evaluate(state.rules.lock().rules(), &reading);
    let total = events.len();

    Json(EvaluateResponse { events, total })
}

// --- Registration requests ---

/// List registrations response
#[derive(Serialize)]
pub struct ListRegistrationsResponse {
    /// Pending requests in arrival order
    pub requests: Vec<RegistrationRequest>,
    /// Number of pending requests
    pub total: usize,
    /// Staged decision, if a confirmation is pending
    pub pending_decision: Option<PendingDecision>,
}

/// List account registrations awaiting review
pub async fn list_registrations(State(state): State<AppState>) -> Json<ListRegistrationsResponse> {
    let queue = state.registrations.lock();
    Json(ListRegistrationsResponse {
        requests: queue.pending_requests().to_vec(),
        total: queue.len(),
        pending_decision: queue.pending_decision(),
    })
}

/// Outcome of a registration submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// Citizen account, activated without review
    Approved,
    /// Queued for admin review
    PendingReview,
}

/// Registration submission response
#[derive(Serialize)]
pub struct SubmitRegistrationResponse {
    /// Whether the account was activated or queued
    pub outcome: RegistrationOutcome,
}

/// Submit an account registration from the public portal
///
/// Citizen accounts resolve immediately; every other role joins the
/// review queue.
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(draft): Json<RegistrationDraft>,
) -> Result<(StatusCode, Json<SubmitRegistrationResponse>), (StatusCode, String)> {
    let request = draft.validate().map_err(error_response)?;

    let outcome = if request.role.needs_review() {
        state.registrations.lock().submit(request);
        RegistrationOutcome::PendingReview
    } else {
        RegistrationOutcome::Approved
    };

    Ok((
        StatusCode::CREATED,
        Json(SubmitRegistrationResponse { outcome }),
    ))
}

/// Staged decision response
#[derive(Serialize)]
pub struct StageDecisionResponse {
    /// The staged decision and its target
    pub pending_decision: PendingDecision,
}

/// Stage acceptance of a registration request
pub async fn registration_accept(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StageDecisionResponse>, (StatusCode, String)> {
    stage_decision(&state.registrations, Decision::Accept, index)
}

/// Stage rejection of a registration request
pub async fn registration_reject(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StageDecisionResponse>, (StatusCode, String)> {
    stage_decision(&state.registrations, Decision::Reject, index)
}

/// A confirmed registration decision
#[derive(Serialize)]
pub struct ResolvedRegistration {
    /// The confirmed decision
    pub decision: Decision,
    /// The request it removed
    pub request: RegistrationRequest,
}

/// Confirmed registration decision response
#[derive(Serialize)]
pub struct ConfirmRegistrationResponse {
    /// The resolved entry, absent when nothing was staged
    pub resolved: Option<ResolvedRegistration>,
}

/// Confirm the staged registration decision
pub async fn registrations_confirm(
    State(state): State<AppState>,
) -> Result<Json<ConfirmRegistrationResponse>, (StatusCode, String)> {
    let resolved = state
        .registrations
        .lock()
        .confirm()
        .map_err(error_response)?
        .map(|(decision, request)| ResolvedRegistration { decision, request });

    Ok(Json(ConfirmRegistrationResponse { resolved }))
}

/// Cancel the staged registration decision
pub async fn registrations_cancel(State(state): State<AppState>) -> StatusCode {
    state.registrations.lock().cancel();
    StatusCode::NO_CONTENT
}

// --- Integration requests ---

/// List integrations response
#[derive(Serialize)]
pub struct ListIntegrationsResponse {
    /// Pending requests in arrival order
    pub requests: Vec<IntegrationRequest>,
    /// Number of pending requests
    pub total: usize,
    /// Staged decision, if a confirmation is pending
    pub pending_decision: Option<PendingDecision>,
}

/// List institution integrations awaiting review
pub async fn list_integrations(State(state): State<AppState>) -> Json<ListIntegrationsResponse> {
    let queue = state.integrations.lock();
    Json(ListIntegrationsResponse {
        requests: queue.pending_requests().to_vec(),
        total: queue.len(),
        pending_decision: queue.pending_decision(),
    })
}

/// Integration submission response
#[derive(Serialize)]
pub struct SubmitIntegrationResponse {
    /// Queue position of the new request
    pub index: usize,
}

/// Submit an institution integration request
pub async fn submit_integration(
    State(state): State<AppState>,
    Json(draft): Json<IntegrationDraft>,
) -> Result<(StatusCode, Json<SubmitIntegrationResponse>), (StatusCode, String)> {
    let request = draft.validate().map_err(error_response)?;

    let mut queue = state.integrations.lock();
    queue.submit(request);
    let index = queue.len() - 1;

    Ok((StatusCode::CREATED, Json(SubmitIntegrationResponse { index })))
}

/// Stage acceptance of an integration request
pub async fn integration_accept(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StageDecisionResponse>, (StatusCode, String)> {
    stage_decision(&state.integrations, Decision::Accept, index)
}

/// Stage rejection of an integration request
pub async fn integration_reject(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StageDecisionResponse>, (StatusCode, String)> {
    stage_decision(&state.integrations, Decision::Reject, index)
}

/// A confirmed integration decision
#[derive(Serialize)]
pub struct ResolvedIntegration {
    /// The confirmed decision
    pub decision: Decision,
    /// The request it removed
    pub request: IntegrationRequest,
}

/// Confirmed integration decision response
#[derive(Serialize)]
pub struct ConfirmIntegrationResponse {
    /// The resolved entry, absent when nothing was staged
    pub resolved: Option<ResolvedIntegration>,
}

/// Confirm the staged integration decision
pub async fn integrations_confirm(
    State(state): State<AppState>,
) -> Result<Json<ConfirmIntegrationResponse>, (StatusCode, String)> {
    let resolved = state
        .integrations
        .lock()
        .confirm()
        .map_err(error_response)?
        .map(|(decision, request)| ResolvedIntegration { decision, request });

    Ok(Json(ConfirmIntegrationResponse { resolved }))
}

/// Cancel the staged integration decision
pub async fn integrations_cancel(State(state): State<AppState>) -> StatusCode {
    state.integrations.lock().cancel();
    StatusCode::NO_CONTENT
}

fn stage_decision<T>(
    queue: &Mutex<ApprovalQueue<T>>,
    decision: Decision,
    index: usize,
) -> Result<Json<StageDecisionResponse>, (StatusCode, String)> {
    let mut queue = queue.lock();
    match decision {
        Decision::Accept => queue.request_accept(index),
        Decision::Reject => queue.request_reject(index),
    }
    .map_err(error_response)?;

    Ok(Json(StageDecisionResponse {
        pending_decision: PendingDecision { decision, index },
    }))
}

// --- Directory ---

/// Station directory response
#[derive(Serialize)]
pub struct ListStationsResponse {
    /// Known stations
    pub stations: Vec<Station>,
}

/// List the stations offered in selection inputs
pub async fn list_stations(State(state): State<AppState>) -> Json<ListStationsResponse> {
    Json(ListStationsResponse {
        stations: state.directory.stations.clone(),
    })
}

/// Institution directory response
#[derive(Serialize)]
pub struct ListInstitutionsResponse {
    /// Known institutions
    pub institutions: Vec<Institution>,
}

/// List the institutions offered in selection inputs
pub async fn list_institutions(State(state): State<AppState>) -> Json<ListInstitutionsResponse> {
    Json(ListInstitutionsResponse {
        institutions: state.directory.institutions.clone(),
    })
}
