mod common;

use anyhow::Result;
use cochera::application::AppError;
use cochera::domain::{Currency, VehicleUpdate};
use common::{draft, test_service, Showroom};
use uuid::Uuid;

#[tokio::test]
async fn test_add_and_get_vehicle() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let added = service
        .add_vehicle(draft("Toyota", "Corolla", "AB123CD"))
        .await?;
    let fetched = service.get_vehicle(added.id).await?;

    assert_eq!(fetched.id, added.id);
    assert_eq!(fetched.brand, "Toyota");
    assert_eq!(fetched.model, "Corolla");
    assert_eq!(fetched.year, 2019);
    assert_eq!(fetched.kilometers, 52000);
    assert_eq!(fetched.plate, "AB123CD");
    assert_eq!(fetched.price, 15000000.0);
    assert_eq!(fetched.currency, Currency::Local);
    assert!(fetched.online);
    Ok(())
}

#[tokio::test]
async fn test_get_missing_vehicle_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service.get_vehicle(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::VehicleNotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_list_is_ordered_by_brand() -> Result<()> {
    let (service, _temp) = test_service().await?;
    Showroom::create(&service).await?;

    let vehicles = service.list_vehicles().await?;
    let brands: Vec<&str> = vehicles.iter().map(|v| v.brand.as_str()).collect();
    assert_eq!(brands, ["Fiat", "Toyota", "Volkswagen"]);
    Ok(())
}

#[tokio::test]
async fn test_count_vehicles() -> Result<()> {
    let (service, _temp) = test_service().await?;
    assert_eq!(service.count_vehicles().await?, 0);

    Showroom::create(&service).await?;
    assert_eq!(service.count_vehicles().await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_update_vehicle_roundtrip() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let added = service
        .add_vehicle(draft("Toyota", "Corolla", "AB123CD"))
        .await?;

    let update = VehicleUpdate {
        kilometers: Some("61000".into()),
        price: Some("16500000".into()),
        currency: Some("USD".into()),
        ..Default::default()
    };
    service.update_vehicle(added.id, update).await?;

    let fetched = service.get_vehicle(added.id).await?;
    assert_eq!(fetched.kilometers, 61000);
    assert_eq!(fetched.price, 16500000.0);
    assert_eq!(fetched.currency, Currency::Foreign);
    // Untouched fields survive
    assert_eq!(fetched.brand, "Toyota");
    assert_eq!(fetched.plate, "AB123CD");
    Ok(())
}

#[tokio::test]
async fn test_update_rejects_malformed_input() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let added = service
        .add_vehicle(draft("Toyota", "Corolla", "AB123CD"))
        .await?;

    let update = VehicleUpdate {
        kilometers: Some("-500".into()),
        ..Default::default()
    };
    let result = service.update_vehicle(added.id, update).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    // Nothing was persisted
    let fetched = service.get_vehicle(added.id).await?;
    assert_eq!(fetched.kilometers, 52000);
    Ok(())
}

#[tokio::test]
async fn test_add_rejects_malformed_draft() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let mut bad = draft("Toyota", "Corolla", "AB123CD");
    bad.currency = "EUR".into();
    let result = service.add_vehicle(bad).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(service.count_vehicles().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_set_online_persists() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let added = service
        .add_vehicle(draft("Toyota", "Corolla", "AB123CD"))
        .await?;
    assert!(added.online);

    service.set_online(added.id, false).await?;
    let fetched = service.get_vehicle(added.id).await?;
    assert!(!fetched.online);

    service.set_online(added.id, true).await?;
    let fetched = service.get_vehicle(added.id).await?;
    assert!(fetched.online);
    Ok(())
}

#[tokio::test]
async fn test_remove_vehicle() -> Result<()> {
    let (service, _temp) = test_service().await?;
    Showroom::create(&service).await?;

    let vehicles = service.list_vehicles().await?;
    service.remove_vehicle(vehicles[0].id).await?;

    assert_eq!(service.count_vehicles().await?, 2);
    let result = service.get_vehicle(vehicles[0].id).await;
    assert!(matches!(result, Err(AppError::VehicleNotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_remove_missing_vehicle_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service.remove_vehicle(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::VehicleNotFound(_))));
    Ok(())
}
