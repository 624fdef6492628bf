// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use crate::registry::{CreateSlot, SlotView};
use crate::Engine;
use park_slot_audit::Actor;
use park_slot_domain::{
    LicensePlate, Location, PaymentInfo, PaymentMethod, PhoneNumber, SlotType, Vehicle,
    VehicleType,
};
use time::macros::datetime;
use time::OffsetDateTime;

pub(crate) const TEST_NOW: OffsetDateTime = datetime!(2026-03-01 10:00:00 UTC);

pub(crate) fn create_test_engine() -> Engine {
    Engine::default()
}

pub(crate) fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub(crate) async fn create_test_slot(engine: &Engine) -> SlotView {
    engine
        .create_slot(
            CreateSlot {
                slot_type: SlotType::Medium,
                floor_number: 1,
                location: None,
            },
            TEST_NOW,
        )
        .await
        .unwrap()
}

pub(crate) async fn create_test_slot_at(
    engine: &Engine,
    latitude: f64,
    longitude: f64,
    city: &str,
) -> SlotView {
    engine
        .create_slot(
            CreateSlot {
                slot_type: SlotType::Medium,
                floor_number: 1,
                location: Some(
                    Location::new(latitude, longitude, None, None, Some(String::from(city)), None)
                        .unwrap(),
                ),
            },
            TEST_NOW,
        )
        .await
        .unwrap()
}

pub(crate) fn create_test_vehicle(plate: &str) -> Vehicle {
    create_test_vehicle_of(plate, VehicleType::Car)
}

pub(crate) fn create_test_vehicle_of(plate: &str, vehicle_type: VehicleType) -> Vehicle {
    Vehicle {
        license_plate: LicensePlate::parse(plate).unwrap(),
        vehicle_type,
        owner_name: String::from("Asha Rao"),
        phone_number: PhoneNumber::parse("9876543210").unwrap(),
    }
}

pub(crate) fn create_test_payment() -> PaymentInfo {
    PaymentInfo {
        method: PaymentMethod::Cash,
        reference: None,
    }
}
