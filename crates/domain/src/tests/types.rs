// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Booking, BookingId, BookingStatus, DomainError, LicensePlate, ParkingSlot, PaymentInfo,
    PaymentMethod, PhoneNumber, SlotId, SlotNumber, SlotType, Vehicle, VehicleType,
};
use time::OffsetDateTime;
use time::macros::datetime;

fn create_test_vehicle() -> Vehicle {
    Vehicle {
        license_plate: LicensePlate::parse("MH12AB1234").unwrap(),
        vehicle_type: VehicleType::Car,
        owner_name: String::from("Asha Rao"),
        phone_number: PhoneNumber::parse("9876543210").unwrap(),
    }
}

fn create_test_booking() -> Booking {
    Booking::new(
        BookingId::new(1),
        String::from("BK-000001"),
        create_test_vehicle(),
        SlotId::new(7),
        datetime!(2026-03-01 10:00 UTC),
        datetime!(2026-03-01 12:00 UTC),
        datetime!(2026-03-01 10:03 UTC),
        20.0,
        PaymentInfo {
            method: PaymentMethod::Cash,
            reference: None,
        },
        Some(42),
    )
}

#[test]
fn test_license_plate_normalizes_to_uppercase() {
    let plate: LicensePlate = LicensePlate::parse("  mh12ab1234 ").unwrap();
    assert_eq!(plate.value(), "MH12AB1234");
}

#[test]
fn test_license_plate_rejects_empty() {
    let result: Result<LicensePlate, DomainError> = LicensePlate::parse("   ");
    assert!(matches!(result, Err(DomainError::InvalidLicensePlate(_))));
}

#[test]
fn test_license_plate_rejects_wrong_pattern() {
    for bad in ["MH12AB123", "MH12AB12345", "1H12AB1234", "MHXXAB1234", "MH12341234"] {
        let result: Result<LicensePlate, DomainError> = LicensePlate::parse(bad);
        assert!(
            matches!(result, Err(DomainError::InvalidLicensePlate(_))),
            "expected '{bad}' to be rejected"
        );
    }
}

#[test]
fn test_phone_number_requires_ten_digits() {
    assert!(PhoneNumber::parse("9876543210").is_ok());
    assert!(matches!(
        PhoneNumber::parse("98765"),
        Err(DomainError::InvalidPhoneNumber(_))
    ));
    assert!(matches!(
        PhoneNumber::parse("98765432ab"),
        Err(DomainError::InvalidPhoneNumber(_))
    ));
}

#[test]
fn test_vehicle_type_parse_is_case_insensitive() {
    assert_eq!(VehicleType::parse("car").unwrap(), VehicleType::Car);
    assert_eq!(VehicleType::parse("SUV").unwrap(), VehicleType::Suv);
    assert!(matches!(
        VehicleType::parse("boat"),
        Err(DomainError::InvalidVehicleType(_))
    ));
}

#[test]
fn test_slot_type_parse() {
    assert_eq!(SlotType::parse("medium").unwrap(), SlotType::Medium);
    assert!(matches!(
        SlotType::parse("huge"),
        Err(DomainError::InvalidSlotType(_))
    ));
}

#[test]
fn test_payment_method_parse() {
    assert_eq!(PaymentMethod::parse("Cash").unwrap(), PaymentMethod::Cash);
    assert_eq!(
        PaymentMethod::parse("ONLINE").unwrap(),
        PaymentMethod::Online
    );
    assert!(matches!(
        PaymentMethod::parse("cheque"),
        Err(DomainError::InvalidPaymentMethod(_))
    ));
}

#[test]
fn test_slot_number_rejects_zero() {
    assert!(SlotNumber::new(1).is_ok());
    assert!(matches!(
        SlotNumber::new(0),
        Err(DomainError::InvalidSlotNumber { number: 0 })
    ));
}

#[test]
fn test_new_slot_is_enabled_and_not_under_maintenance() {
    let now: OffsetDateTime = datetime!(2026-03-01 08:00 UTC);
    let slot: ParkingSlot = ParkingSlot::new(
        SlotId::new(1),
        SlotNumber::new(5).unwrap(),
        SlotType::Medium,
        0,
        None,
        now,
    );

    assert!(slot.is_available);
    assert!(!slot.is_under_maintenance());
    assert_eq!(slot.slot_number().value(), 5);
    assert_eq!(slot.created_at(), now);
}

#[test]
fn test_new_booking_is_active_with_no_fee() {
    let booking: Booking = create_test_booking();

    assert_eq!(booking.status(), BookingStatus::Active);
    assert!(booking.is_active());
    assert!(booking.exit_time().is_none());
    assert!(booking.total_amount().is_none());
    assert_eq!(booking.booking_number(), "BK-000001");
}

#[test]
fn test_complete_sets_exit_time_fee_and_terminal_status() {
    let mut booking: Booking = create_test_booking();
    let exit: OffsetDateTime = datetime!(2026-03-01 12:10 UTC);

    booking.complete(exit, 47.20);

    assert_eq!(booking.status(), BookingStatus::Completed);
    assert_eq!(booking.exit_time(), Some(exit));
    assert_eq!(booking.total_amount(), Some(47.20));
    assert!(!booking.is_active());
}

#[test]
fn test_cancel_is_terminal_and_records_no_fee() {
    let mut booking: Booking = create_test_booking();
    let at: OffsetDateTime = datetime!(2026-03-01 10:05 UTC);

    booking.cancel(at);

    assert_eq!(booking.status(), BookingStatus::Cancelled);
    assert_eq!(booking.exit_time(), Some(at));
    assert!(booking.total_amount().is_none());
}

#[test]
fn test_booking_status_as_str() {
    assert_eq!(BookingStatus::Active.as_str(), "ACTIVE");
    assert_eq!(BookingStatus::Completed.as_str(), "COMPLETED");
    assert_eq!(BookingStatus::Cancelled.as_str(), "CANCELLED");
}
