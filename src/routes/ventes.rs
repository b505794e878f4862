//! Sales CRUD routes
//!
//! All five operations require a valid bearer token; the resolved user is
//! the acting identity but no role policy is applied to it.

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::repositories::VenteRecord;
use crate::services::VenteService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

pub const MSG_NO_DATA: &str = "No data provided";

/// Sale fields as supplied by the client
///
/// Used by both create (all fields required, enforced by validation) and
/// update (omitted fields keep their stored values).
#[derive(Debug, Deserialize)]
pub struct VentePayload {
    pub design: Option<String>,
    pub prix: Option<f64>,
    pub quantite: Option<i64>,
}

impl VentePayload {
    /// True when no field was supplied at all
    fn is_empty(&self) -> bool {
        self.design.is_none() && self.prix.is_none() && self.quantite.is_none()
    }
}

/// List response envelope
#[derive(Serialize)]
pub struct VentesResponse {
    pub ventes: Vec<VenteRecord>,
}

/// Single-sale response envelope
#[derive(Serialize)]
pub struct VenteResponse {
    pub vente: VenteRecord,
}

/// GET /api/ventes - every sale, in storage order
pub async fn list_ventes(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<VentesResponse>> {
    let ventes = VenteService::list(state.db()).await?;
    Ok(Json(VentesResponse { ventes }))
}

/// GET /api/ventes/{id} - one sale by id
pub async fn get_vente(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<VenteResponse>> {
    let vente = VenteService::get(state.db(), id).await?;
    Ok(Json(VenteResponse { vente }))
}

/// POST /api/ventes - create a sale
///
/// The created record is not echoed back; clients re-fetch if they need
/// the assigned id and timestamps.
pub async fn create_vente(
    State(state): State<AppState>,
    _auth: AuthUser,
    body: Result<Json<VentePayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Ok(Json(req)) = body else {
        return Err(ApiError::BadRequest(MSG_NO_DATA.to_string()));
    };
    if req.is_empty() {
        return Err(ApiError::BadRequest(MSG_NO_DATA.to_string()));
    }

    VenteService::create(state.db(), req.design, req.prix, req.quantite).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Sale created successfully")),
    ))
}

/// PUT /api/ventes/{id} - partial update
pub async fn update_vente(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    body: Result<Json<VentePayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Ok(Json(req)) = body else {
        return Err(ApiError::BadRequest(MSG_NO_DATA.to_string()));
    };
    if req.is_empty() {
        return Err(ApiError::BadRequest(MSG_NO_DATA.to_string()));
    }

    VenteService::update(state.db(), id, req.design, req.prix, req.quantite).await?;

    Ok(Json(MessageResponse::new("Sale updated successfully")))
}

/// DELETE /api/ventes/{id}
pub async fn delete_vente(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    VenteService::delete(state.db(), id).await?;

    Ok(Json(MessageResponse::new("Sale deleted successfully")))
}
