//! Sales repository for database operations

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

/// Sale record from database
///
/// Serializes with the wire field names (`numProduit`, `design`, ...).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VenteRecord {
    #[serde(rename = "numProduit")]
    #[sqlx(rename = "numProduit")]
    pub num_produit: i64,
    pub design: String,
    pub prix: f64,
    pub quantite: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sales repository for database operations
pub struct VenteRepository;

impl VenteRepository {
    /// List every sale, in natural row order
    pub async fn list(pool: &SqlitePool) -> Result<Vec<VenteRecord>, sqlx::Error> {
        sqlx::query_as::<_, VenteRecord>(
            r#"
            SELECT numProduit, design, prix, quantite, created_at, updated_at
            FROM ventes
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Find a sale by id
    pub async fn find_by_id(
        pool: &SqlitePool,
        num_produit: i64,
    ) -> Result<Option<VenteRecord>, sqlx::Error> {
        sqlx::query_as::<_, VenteRecord>(
            r#"
            SELECT numProduit, design, prix, quantite, created_at, updated_at
            FROM ventes
            WHERE numProduit = ?
            "#,
        )
        .bind(num_produit)
        .fetch_optional(pool)
        .await
    }

    /// Find a sale by designation
    pub async fn find_by_design(
        pool: &SqlitePool,
        design: &str,
    ) -> Result<Option<VenteRecord>, sqlx::Error> {
        sqlx::query_as::<_, VenteRecord>(
            r#"
            SELECT numProduit, design, prix, quantite, created_at, updated_at
            FROM ventes
            WHERE design = ?
            "#,
        )
        .bind(design)
        .fetch_optional(pool)
        .await
    }

    /// Insert a new sale with server-assigned id and timestamps
    ///
    /// Returns the assigned id.
    pub async fn create(
        pool: &SqlitePool,
        design: &str,
        prix: f64,
        quantite: i64,
    ) -> Result<i64, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO ventes (design, prix, quantite, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(design)
        .bind(prix)
        .bind(quantite)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite a sale's fields, refreshing the modification timestamp
    pub async fn update(
        pool: &SqlitePool,
        num_produit: i64,
        design: &str,
        prix: f64,
        quantite: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE ventes
            SET design = ?, prix = ?, quantite = ?, updated_at = ?
            WHERE numProduit = ?
            "#,
        )
        .bind(design)
        .bind(prix)
        .bind(quantite)
        .bind(Utc::now())
        .bind(num_produit)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Remove a sale
    pub async fn delete(pool: &SqlitePool, num_produit: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM ventes WHERE numProduit = ?")
            .bind(num_produit)
            .execute(pool)
            .await?;

        Ok(())
    }
}
