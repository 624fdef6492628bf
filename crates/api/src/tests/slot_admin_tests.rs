// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{TEST_NOW, create_slot_request, create_test_slot, park};
use crate::error::ApiError;
use crate::request_response::{MaintenanceRequest, UpdateSlotRequest};
use crate::{
    create_slot, delete_slot, get_slot, list_cities, list_slots, set_slot_maintenance,
    slot_statistics, toggle_slot_availability, update_slot,
};
use park_slot::Engine;

#[tokio::test]
async fn test_create_slot_with_location() {
    let engine: Engine = Engine::default();
    let mut request = create_slot_request();
    request.latitude = Some(19.076);
    request.longitude = Some(72.8777);
    request.city = Some(String::from("Mumbai"));

    let view = create_slot(&engine, request, TEST_NOW).await.unwrap();

    assert_eq!(view.slot_number, 1);
    assert_eq!(
        view.location.as_ref().and_then(|l| l.city.as_deref()),
        Some("Mumbai")
    );
}

#[tokio::test]
async fn test_create_slot_rejects_unknown_type_and_half_a_location() {
    let engine: Engine = Engine::default();
    let mut request = create_slot_request();
    request.slot_type = String::from("GIGANTIC");

    let err = create_slot(&engine, request, TEST_NOW).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "slot_type"));

    let mut request = create_slot_request();
    request.latitude = Some(19.076);
    let err = create_slot(&engine, request, TEST_NOW).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "coordinates"));
}

#[tokio::test]
async fn test_update_and_get_slot() {
    let engine: Engine = Engine::default();
    let slot = create_test_slot(&engine).await;

    let updated = update_slot(
        &engine,
        slot.id,
        UpdateSlotRequest {
            slot_type: Some(String::from("LARGE")),
            floor_number: Some(4),
            ..UpdateSlotRequest::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.floor_number, 4);

    let fetched = get_slot(&engine, slot.id).await.unwrap();
    assert_eq!(fetched.floor_number, 4);
    assert_eq!(fetched.slot_number, slot.slot_number);
}

#[tokio::test]
async fn test_update_occupied_slot_is_a_rule_violation() {
    let engine: Engine = Engine::default();
    let slot = create_test_slot(&engine).await;
    park(&engine, slot.id, "MH12AB1234").await;

    let err = update_slot(
        &engine,
        slot.id,
        UpdateSlotRequest {
            floor_number: Some(2),
            ..UpdateSlotRequest::default()
        },
    )
    .await
    .unwrap_err();

    assert!(
        matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "occupied_slot_immutable")
    );
}

#[tokio::test]
async fn test_delete_slot_and_not_found_translation() {
    let engine: Engine = Engine::default();
    let slot = create_test_slot(&engine).await;

    assert!(delete_slot(&engine, slot.id).await.is_ok());

    let err = delete_slot(&engine, slot.id).await.unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[tokio::test]
async fn test_toggle_and_maintenance_round_trip() {
    let engine: Engine = Engine::default();
    let slot = create_test_slot(&engine).await;

    let disabled = toggle_slot_availability(&engine, slot.id).await.unwrap();
    assert!(!disabled.is_available);

    let serviced = set_slot_maintenance(
        &engine,
        slot.id,
        MaintenanceRequest {
            reason: Some(String::from("repainting lines")),
        },
    )
    .await
    .unwrap();
    assert_eq!(serviced.maintenance_reason.as_deref(), Some("repainting lines"));

    let restored = set_slot_maintenance(&engine, slot.id, MaintenanceRequest { reason: None })
        .await
        .unwrap();
    assert!(restored.maintenance_reason.is_none());
}

#[tokio::test]
async fn test_list_slots_rejects_unknown_type_filter() {
    let engine: Engine = Engine::default();
    create_test_slot(&engine).await;

    let err = list_slots(&engine, Some("TINY"), None, None, false)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "slot_type"));
}

#[tokio::test]
async fn test_statistics_and_cities_pass_through() {
    let engine: Engine = Engine::default();
    let mut request = create_slot_request();
    request.latitude = Some(19.076);
    request.longitude = Some(72.8777);
    request.city = Some(String::from("Mumbai"));
    create_slot(&engine, request, TEST_NOW).await.unwrap();
    create_test_slot(&engine).await;

    let stats = slot_statistics(&engine).await;
    assert_eq!(stats.statistics.total, 2);
    assert_eq!(stats.statistics.free, 2);

    let cities = list_cities(&engine).await;
    assert_eq!(cities.cities, vec![String::from("Mumbai")]);

    let listing = list_slots(&engine, None, None, Some(String::from("Mumbai")), true)
        .await
        .unwrap();
    assert_eq!(listing.slots.len(), 1);
}
