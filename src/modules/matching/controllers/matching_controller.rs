// HTTP handlers for payment matching
//
// The service keeps no session state: the portal sends its session snapshot
// with every operation and receives the new snapshot with its figures.
//
// Endpoints:
// - POST /payments/{payment_id}/matching/session - Open a session from backend data
// - POST /payments/{payment_id}/matching/commit  - Submit selections to the backend
// - POST /matching/toggle                        - Select or deselect a booking
// - POST /matching/contribution                  - Edit a selected booking's contribution
// - POST /matching/auto-match                    - Fit the last selection to the payment
// - POST /matching/select-within-limit           - Add bookings while they fit
// - POST /matching/preview                       - Figures for a snapshot

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::matching::{
    models::{MatchingResult, MatchingSession, SelectionEntry, SessionSnapshot},
    services::{parse_amount_input, AutoMatchOutcome, MatchingCalculator, MatchingService, SelectionStrategy},
};

/// Session snapshot with its derived figures
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session: SessionSnapshot,
    pub result: MatchingResult,
}

impl From<&MatchingSession> for SessionResponse {
    fn from(session: &MatchingSession) -> Self {
        Self {
            session: session.snapshot(),
            result: session.result(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub session: SessionSnapshot,
    pub booking_id: String,
}

/// Request for POST /matching/contribution
///
/// `amount` is taken as typed in the portal: a JSON number or string.
/// Anything that does not parse as a non-negative number counts as zero.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRequest {
    pub session: SessionSnapshot,
    pub booking_id: String,
    #[serde(default)]
    pub amount: serde_json::Value,
}

impl ContributionRequest {
    fn parsed_amount(&self) -> Decimal {
        match &self.amount {
            serde_json::Value::String(raw) => parse_amount_input(raw),
            serde_json::Value::Number(number) => parse_amount_input(&number.to_string()),
            _ => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoMatchResponse {
    pub session: SessionSnapshot,
    pub result: MatchingResult,
    pub adjusted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectWithinLimitRequest {
    pub session: SessionSnapshot,
    #[serde(default)]
    pub strategy: SelectionStrategy,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    pub payment_id: String,
    pub submitted: Vec<SelectionEntry>,
    pub result: MatchingResult,
}

/// POST /payments/{payment_id}/matching/session
///
/// # Returns
/// - 200: Session with candidates and persisted matches pre-selected
/// - 400: Payment cannot be reconciled (non-positive amount)
/// - 404: Payment not found on the backend
/// - 502: Backend unavailable
pub async fn open_session(
    payment_id: web::Path<String>,
    service: web::Data<MatchingService>,
) -> Result<HttpResponse> {
    let session = service.open_session(&payment_id).await?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(&session)))
}

/// POST /matching/toggle
///
/// # Returns
/// - 200: Updated session
/// - 404: Booking is not a candidate for this payment
/// - 422: Selecting would exceed the payment amount
pub async fn toggle(request: web::Json<ToggleRequest>) -> Result<HttpResponse> {
    let request = request.into_inner();
    let session = MatchingSession::restore(request.session)?;
    let next = MatchingCalculator::toggle(&session, &request.booking_id)?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(&next)))
}

/// POST /matching/contribution
pub async fn set_contribution(request: web::Json<ContributionRequest>) -> Result<HttpResponse> {
    let request = request.into_inner();
    let amount = request.parsed_amount();
    let session = MatchingSession::restore(request.session)?;
    let next = MatchingCalculator::set_contribution(&session, &request.booking_id, amount)?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(&next)))
}

/// POST /matching/auto-match
///
/// Always 200 for a valid snapshot; `adjusted` tells whether anything changed.
pub async fn auto_match(request: web::Json<SessionRequest>) -> Result<HttpResponse> {
    let session = MatchingSession::restore(request.into_inner().session)?;

    let (next, adjusted) = match MatchingCalculator::auto_match_exact(&session) {
        AutoMatchOutcome::Adjusted(next) => (next, true),
        AutoMatchOutcome::NoOp => (session, false),
    };

    Ok(HttpResponse::Ok().json(AutoMatchResponse {
        session: next.snapshot(),
        result: next.result(),
        adjusted,
    }))
}

/// POST /matching/select-within-limit
pub async fn select_within_limit(
    request: web::Json<SelectWithinLimitRequest>,
    service: web::Data<MatchingService>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let session = MatchingSession::restore(request.session)?;
    let next = MatchingCalculator::select_within_limit(
        &session,
        request.strategy,
        service.config().search_state_limit,
    );
    Ok(HttpResponse::Ok().json(SessionResponse::from(&next)))
}

/// POST /matching/preview
pub async fn preview(request: web::Json<SessionRequest>) -> Result<HttpResponse> {
    let session = MatchingSession::restore(request.into_inner().session)?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(&session)))
}

/// POST /payments/{payment_id}/matching/commit
///
/// # Returns
/// - 200: Submitted entries and final figures
/// - 400: Snapshot invalid or for another payment
/// - 422: Selections exceed the payment amount held by the backend
/// - 502: Backend rejected the submission
pub async fn commit(
    payment_id: web::Path<String>,
    request: web::Json<SessionRequest>,
    service: web::Data<MatchingService>,
) -> Result<HttpResponse> {
    let session = MatchingSession::restore(request.into_inner().session)?;
    let committed = service.commit(&payment_id, &session).await?;

    Ok(HttpResponse::Ok().json(CommitResponse {
        payment_id: payment_id.into_inner(),
        submitted: committed.entries(),
        result: committed.result(),
    }))
}

/// Configure matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments/{payment_id}/matching")
            .route("/session", web::post().to(open_session))
            .route("/commit", web::post().to(commit)),
    )
    .service(
        web::scope("/matching")
            .route("/toggle", web::post().to(toggle))
            .route("/contribution", web::post().to(set_contribution))
            .route("/auto-match", web::post().to(auto_match))
            .route("/select-within-limit", web::post().to(select_within_limit))
            .route("/preview", web::post().to(preview)),
    );
}
