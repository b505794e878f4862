//! Sales service: the five CRUD operations
//!
//! Each operation validates, then runs its repository queries, mapping
//! lookup misses to 404 and duplicate designations to 409. Updates use
//! partial semantics: omitted fields fall back to the stored values and
//! the merged result is re-validated in full.

use crate::error::ApiError;
use crate::repositories::{VenteRecord, VenteRepository};
use crate::validation::validate_vente;
use sqlx::SqlitePool;

pub const MSG_NOT_FOUND: &str = "Sale not found";
pub const MSG_DESIGN_EXISTS: &str = "An item with this designation already exists";

fn conflict_on_unique(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(db_err)
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            ApiError::Conflict(MSG_DESIGN_EXISTS.to_string())
        }
        _ => ApiError::Database(e),
    }
}

/// Sales operations
pub struct VenteService;

impl VenteService {
    /// List every sale in storage order
    pub async fn list(pool: &SqlitePool) -> Result<Vec<VenteRecord>, ApiError> {
        Ok(VenteRepository::list(pool).await?)
    }

    /// Fetch one sale by id
    pub async fn get(pool: &SqlitePool, num_produit: i64) -> Result<VenteRecord, ApiError> {
        VenteRepository::find_by_id(pool, num_produit)
            .await?
            .ok_or_else(|| ApiError::NotFound(MSG_NOT_FOUND.to_string()))
    }

    /// Create a sale, returning its assigned id
    pub async fn create(
        pool: &SqlitePool,
        design: Option<String>,
        prix: Option<f64>,
        quantite: Option<i64>,
    ) -> Result<i64, ApiError> {
        let errors = validate_vente(design.as_deref(), prix, quantite);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        // All three are present once validation passes
        let (Some(design), Some(prix), Some(quantite)) = (design, prix, quantite) else {
            return Err(ApiError::BadRequest("Incomplete data".to_string()));
        };

        if VenteRepository::find_by_design(pool, &design)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(MSG_DESIGN_EXISTS.to_string()));
        }

        VenteRepository::create(pool, &design, prix, quantite)
            .await
            .map_err(conflict_on_unique)
    }

    /// Partially update a sale
    ///
    /// Omitted fields keep their stored values; the merged record passes
    /// through the same validation as create.
    pub async fn update(
        pool: &SqlitePool,
        num_produit: i64,
        design: Option<String>,
        prix: Option<f64>,
        quantite: Option<i64>,
    ) -> Result<(), ApiError> {
        let current = VenteRepository::find_by_id(pool, num_produit)
            .await?
            .ok_or_else(|| ApiError::NotFound(MSG_NOT_FOUND.to_string()))?;

        let design = design.unwrap_or(current.design);
        let prix = prix.unwrap_or(current.prix);
        let quantite = quantite.unwrap_or(current.quantite);

        let errors = validate_vente(Some(&design), Some(prix), Some(quantite));
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        VenteRepository::update(pool, num_produit, &design, prix, quantite)
            .await
            .map_err(conflict_on_unique)
    }

    /// Delete a sale
    pub async fn delete(pool: &SqlitePool, num_produit: i64) -> Result<(), ApiError> {
        VenteRepository::find_by_id(pool, num_produit)
            .await?
            .ok_or_else(|| ApiError::NotFound(MSG_NOT_FOUND.to_string()))?;

        Ok(VenteRepository::delete(pool, num_produit).await?)
    }
}
