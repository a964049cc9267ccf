use crate::domain::{Vehicle, VehicleDraft, VehicleId, VehicleUpdate};
use crate::report::{export_listing, ExportDocument, ExportFormat};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations on the inventory.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct InventoryService {
    repo: Repository,
}

impl InventoryService {
    /// Create a new inventory service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Vehicle operations
    // ========================

    /// Validate operator input and persist the new listing.
    pub async fn add_vehicle(&self, draft: VehicleDraft) -> Result<Vehicle, AppError> {
        let vehicle = draft.validate()?;
        self.repo.save_vehicle(&vehicle).await?;
        Ok(vehicle)
    }

    /// Fetch one listing by ID.
    pub async fn get_vehicle(&self, id: VehicleId) -> Result<Vehicle, AppError> {
        self.repo
            .get_vehicle(id)
            .await?
            .ok_or_else(|| AppError::VehicleNotFound(id.to_string()))
    }

    /// The full listing, ordered by brand ascending. This is the exact
    /// sequence the export subsystem is handed.
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        Ok(self.repo.list_vehicles().await?)
    }

    pub async fn count_vehicles(&self) -> Result<i64, AppError> {
        Ok(self.repo.count_vehicles().await?)
    }

    /// Apply a partial update, revalidating every provided field.
    pub async fn update_vehicle(
        &self,
        id: VehicleId,
        update: VehicleUpdate,
    ) -> Result<Vehicle, AppError> {
        let current = self.get_vehicle(id).await?;
        let updated = update.apply(current)?;
        self.repo.update_vehicle(&updated).await?;
        Ok(updated)
    }

    /// Publish or unpublish a listing.
    pub async fn set_online(&self, id: VehicleId, online: bool) -> Result<Vehicle, AppError> {
        // Fetch first so a missing ID surfaces as VehicleNotFound rather
        // than a silent no-op UPDATE.
        let mut vehicle = self.get_vehicle(id).await?;
        self.repo.set_online(id, online).await?;
        vehicle.online = online;
        Ok(vehicle)
    }

    pub async fn remove_vehicle(&self, id: VehicleId) -> Result<(), AppError> {
        let vehicle = self.get_vehicle(id).await?;
        self.repo.delete_vehicle(vehicle.id).await?;
        Ok(())
    }

    // ========================
    // Export
    // ========================

    /// Fetch the brand-ordered listing and hand it to the report core.
    pub async fn export_listing(&self, format: ExportFormat) -> Result<ExportDocument, AppError> {
        let vehicles = self.list_vehicles().await?;
        Ok(export_listing(&vehicles, format)?)
    }
}
