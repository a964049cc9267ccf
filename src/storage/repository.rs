use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{Currency, Vehicle, VehicleId};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying vehicle listings.
///
/// Owns its connection pool explicitly; there is no global handle anywhere.
/// Construct one at startup and pass it into the service layer.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Save a new vehicle to the database.
    pub async fn save_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (id, online, category, brand, model, year, kilometers, plate, price, info_price, currency)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(vehicle.id.to_string())
        .bind(vehicle.online)
        .bind(&vehicle.category)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.kilometers)
        .bind(&vehicle.plate)
        .bind(vehicle.price)
        .bind(vehicle.info_price)
        .bind(vehicle.currency.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to save vehicle")?;
        Ok(())
    }

    /// Get a vehicle by ID.
    pub async fn get_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>> {
        let row = sqlx::query(
            r#"
            SELECT id, online, category, brand, model, year, kilometers, plate, price, info_price, currency
            FROM vehicles
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch vehicle")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_vehicle(&row)?)),
            None => Ok(None),
        }
    }

    /// List all vehicles, ordered by brand ascending. This ordering is part
    /// of the export contract; the exporters themselves never sort.
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, online, category, brand, model, year, kilometers, plate, price, info_price, currency
            FROM vehicles
            ORDER BY brand ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list vehicles")?;

        rows.iter().map(Self::row_to_vehicle).collect()
    }

    pub async fn count_vehicles(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM vehicles")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count vehicles")?;
        Ok(row.get("count"))
    }

    /// Overwrite every mutable field of an existing vehicle.
    pub async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE vehicles
            SET category = ?, brand = ?, model = ?, year = ?, kilometers = ?, plate = ?, price = ?, info_price = ?, currency = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.category)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.kilometers)
        .bind(&vehicle.plate)
        .bind(vehicle.price)
        .bind(vehicle.info_price)
        .bind(vehicle.currency.as_str())
        .bind(vehicle.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update vehicle")?;
        Ok(())
    }

    /// Flip the published flag without touching anything else.
    pub async fn set_online(&self, id: VehicleId, online: bool) -> Result<()> {
        sqlx::query("UPDATE vehicles SET online = ? WHERE id = ?")
            .bind(online)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to update online flag")?;
        Ok(())
    }

    /// Delete a vehicle.
    pub async fn delete_vehicle(&self, id: VehicleId) -> Result<()> {
        sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete vehicle")?;
        Ok(())
    }

    fn row_to_vehicle(row: &sqlx::sqlite::SqliteRow) -> Result<Vehicle> {
        let id_str: String = row.get("id");
        let currency_str: String = row.get("currency");

        Ok(Vehicle {
            id: Uuid::parse_str(&id_str).context("Invalid vehicle ID")?,
            online: row.get::<i32, _>("online") != 0,
            category: row.get("category"),
            brand: row.get("brand"),
            model: row.get("model"),
            year: row.get("year"),
            kilometers: row.get("kilometers"),
            plate: row.get("plate"),
            price: row.get("price"),
            info_price: row.get("info_price"),
            currency: Currency::from_str(&currency_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid currency tag: {}", currency_str))?,
        })
    }
}
