// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use cochera::application::InventoryService;
use cochera::domain::VehicleDraft;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(InventoryService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = InventoryService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// A valid draft with every numeric field still in string form,
/// the way operator input arrives.
pub fn draft(brand: &str, model: &str, plate: &str) -> VehicleDraft {
    VehicleDraft {
        category: "sedan".into(),
        brand: brand.into(),
        model: model.into(),
        year: "2019".into(),
        kilometers: "52000".into(),
        plate: plate.into(),
        price: "15000000".into(),
        info_price: None,
        currency: "$".into(),
    }
}

/// Test fixture: a small showroom spanning several brands, inserted out of
/// brand order on purpose.
pub struct Showroom;

impl Showroom {
    pub async fn create(service: &InventoryService) -> Result<()> {
        service
            .add_vehicle(draft("Volkswagen", "Amarok", "AD456EF"))
            .await?;
        service
            .add_vehicle(draft("Fiat", "Cronos", "AC789GH"))
            .await?;
        service
            .add_vehicle(draft("Toyota", "Corolla", "AB123CD"))
            .await?;
        Ok(())
    }
}
