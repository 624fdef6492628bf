// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{CreateSlotRequest, ParkRequest};
use crate::{create_slot, park_vehicle};
use park_slot::{Engine, SlotView};
use park_slot_audit::Actor;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub(crate) const TEST_NOW: OffsetDateTime = datetime!(2026-03-01 10:00:00 UTC);

pub(crate) fn create_test_actor() -> Actor {
    Actor::new(String::from("operator-1"), String::from("admin"))
}

pub(crate) fn create_slot_request() -> CreateSlotRequest {
    CreateSlotRequest {
        slot_type: String::from("MEDIUM"),
        floor_number: 1,
        latitude: None,
        longitude: None,
        location_name: None,
        address: None,
        city: None,
        region: None,
    }
}

pub(crate) async fn create_test_slot(engine: &Engine) -> SlotView {
    create_slot(engine, create_slot_request(), TEST_NOW)
        .await
        .unwrap()
}

pub(crate) fn create_park_request(slot_id: i64, plate: &str) -> ParkRequest {
    ParkRequest {
        slot_id,
        license_plate: String::from(plate),
        vehicle_type: String::from("CAR"),
        owner_name: String::from("Asha Rao"),
        phone_number: String::from("9876543210"),
        start_time: TEST_NOW,
        end_time: TEST_NOW + Duration::hours(2),
        payment_method: String::from("cash"),
        payment_reference: None,
        user_id: None,
    }
}

pub(crate) async fn park(engine: &Engine, slot_id: i64, plate: &str) {
    park_vehicle(
        engine,
        create_park_request(slot_id, plate),
        create_test_actor(),
        TEST_NOW,
    )
    .await
    .unwrap();
}
