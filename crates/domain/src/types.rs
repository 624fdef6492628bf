// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::validate_coordinates;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable surrogate key for a parking slot.
///
/// Assigned by the engine at creation and never reused, unlike the
/// externally visible [`SlotNumber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(i64);

impl SlotId {
    /// Creates a new `SlotId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable surrogate key for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(i64);

impl BookingId {
    /// Creates a new `BookingId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The externally visible number painted on a parking slot.
///
/// Unique among currently-existing slots. Numbers freed by deletion are
/// reused: the next assigned number is the smallest positive integer not
/// currently in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotNumber(u32);

impl SlotNumber {
    /// Creates a new `SlotNumber`.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is zero.
    pub const fn new(number: u32) -> Result<Self, DomainError> {
        if number >= 1 {
            Ok(Self(number))
        } else {
            Err(DomainError::InvalidSlotNumber { number })
        }
    }

    /// Returns the slot number value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SlotNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical size class of a parking slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotType {
    /// Fits bikes.
    Small,
    /// Fits cars.
    Medium,
    /// Fits SUVs and trucks.
    Large,
}

impl SlotType {
    /// Parses a slot type from a string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid slot type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(Self::Small),
            "MEDIUM" => Ok(Self::Medium),
            "LARGE" => Ok(Self::Large),
            _ => Err(DomainError::InvalidSlotType(format!(
                "Unknown slot type: {s}"
            ))),
        }
    }

    /// Returns the string representation of this slot type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Large => "LARGE",
        }
    }
}

impl std::fmt::Display for SlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle classification determining the hourly tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    /// Two-wheeler.
    Bike,
    /// Standard car.
    Car,
    /// Sport utility vehicle.
    Suv,
    /// Truck or lorry.
    Truck,
}

impl VehicleType {
    /// Parses a vehicle type from a string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid vehicle type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_uppercase().as_str() {
            "BIKE" => Ok(Self::Bike),
            "CAR" => Ok(Self::Car),
            "SUV" => Ok(Self::Suv),
            "TRUCK" => Ok(Self::Truck),
            _ => Err(DomainError::InvalidVehicleType(format!(
                "Unknown vehicle type: {s}"
            ))),
        }
    }

    /// Returns the string representation of this vehicle type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bike => "BIKE",
            Self::Car => "CAR",
            Self::Suv => "SUV",
            Self::Truck => "TRUCK",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized vehicle registration plate.
///
/// Plates are normalized to uppercase and must match the pattern:
/// two letters, two digits, two letters, four digits (e.g. `MH12AB1234`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicensePlate(String);

impl LicensePlate {
    /// Parses and normalizes a license plate.
    ///
    /// # Errors
    ///
    /// Returns an error if the plate is empty or does not match the
    /// required pattern.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidLicensePlate(String::from(
                "License plate cannot be empty",
            )));
        }
        if !Self::matches_pattern(&normalized) {
            return Err(DomainError::InvalidLicensePlate(format!(
                "'{normalized}' must match the pattern: 2 letters, 2 digits, 2 letters, 4 digits"
            )));
        }
        Ok(Self(normalized))
    }

    /// Checks the 2-letters, 2-digits, 2-letters, 4-digits pattern.
    fn matches_pattern(plate: &str) -> bool {
        let chars: Vec<char> = plate.chars().collect();
        if chars.len() != 10 {
            return false;
        }
        chars[0..2].iter().all(char::is_ascii_uppercase)
            && chars[2..4].iter().all(char::is_ascii_digit)
            && chars[4..6].iter().all(char::is_ascii_uppercase)
            && chars[6..10].iter().all(char::is_ascii_digit)
    }

    /// Returns the normalized plate value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 10-digit phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses a phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not exactly 10 ASCII digits.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.len() == 10 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(DomainError::InvalidPhoneNumber(format!(
                "'{trimmed}' must be exactly 10 digits"
            )))
        }
    }

    /// Returns the phone number value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// A vehicle as registered with a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// The normalized license plate.
    pub license_plate: LicensePlate,
    /// The vehicle classification.
    pub vehicle_type: VehicleType,
    /// The owner's name.
    pub owner_name: String,
    /// The owner's contact number.
    pub phone_number: PhoneNumber,
}

/// How a booking will be paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on exit.
    Cash,
    /// Online payment (e.g. UPI).
    Online,
}

impl PaymentMethod {
    /// Parses a payment method from a string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid method.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "online" => Ok(Self::Online),
            _ => Err(DomainError::InvalidPaymentMethod(format!(
                "Unknown payment method: {s}. Must be 'cash' or 'online'"
            ))),
        }
    }

    /// Returns the string representation of this payment method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Online => "online",
        }
    }
}

/// Payment details recorded on a booking.
///
/// The engine records the method and reference only; it does not talk to
/// a payment processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// The payment method.
    pub method: PaymentMethod,
    /// Optional payment reference (e.g. a UPI id for online payments).
    pub reference: Option<String>,
}

/// Geographic and postal location of a parking slot.
///
/// A slot without a `Location` is excluded from proximity queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees, within [-90, 90].
    latitude: f64,
    /// Longitude in degrees, within [-180, 180].
    longitude: f64,
    /// Human-readable location name.
    pub location_name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City name, used for list filtering.
    pub city: Option<String>,
    /// Region or state name.
    pub region: Option<String>,
}

impl Location {
    /// Creates a new `Location` with validated coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of range.
    pub fn new(
        latitude: f64,
        longitude: f64,
        location_name: Option<String>,
        address: Option<String>,
        city: Option<String>,
        region: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            location_name,
            address,
            city,
            region,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A physical parking slot.
///
/// Occupancy is deliberately not a field: it is derived from the booking
/// ledger so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSlot {
    /// The stable surrogate key.
    id: SlotId,
    /// The externally visible number, immutable after creation.
    slot_number: SlotNumber,
    /// The physical size class.
    pub slot_type: SlotType,
    /// The floor this slot is on.
    pub floor_number: u16,
    /// Optional geographic location.
    pub location: Option<Location>,
    /// Administrative enable/disable flag, independent of occupancy.
    pub is_available: bool,
    /// `Some(reason)` while the slot is under maintenance.
    pub maintenance_reason: Option<String>,
    /// When the slot was created.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl ParkingSlot {
    /// Creates a new enabled slot that is not under maintenance.
    ///
    /// # Arguments
    ///
    /// * `id` - The surrogate key assigned by the engine
    /// * `slot_number` - The externally visible number assigned by the engine
    /// * `slot_type` - The physical size class
    /// * `floor_number` - The floor this slot is on
    /// * `location` - Optional geographic location
    /// * `created_at` - Creation instant
    #[must_use]
    pub const fn new(
        id: SlotId,
        slot_number: SlotNumber,
        slot_type: SlotType,
        floor_number: u16,
        location: Option<Location>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            slot_number,
            slot_type,
            floor_number,
            location,
            is_available: true,
            maintenance_reason: None,
            created_at,
        }
    }

    /// Returns the surrogate key.
    #[must_use]
    pub const fn id(&self) -> SlotId {
        self.id
    }

    /// Returns the externally visible slot number.
    #[must_use]
    pub const fn slot_number(&self) -> SlotNumber {
        self.slot_number
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns whether the slot is under maintenance.
    #[must_use]
    pub const fn is_under_maintenance(&self) -> bool {
        self.maintenance_reason.is_some()
    }
}

/// Lifecycle state of a booking.
///
/// `Active` is the only non-terminal state. Checkout and force-removal
/// both land on `Completed`; administrative cancellation lands on
/// `Cancelled`. No path leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// The vehicle currently occupies its slot.
    Active,
    /// Checked out; fee computed and final.
    Completed,
    /// Administratively cancelled before checkout; no fee.
    Cancelled,
}

impl BookingStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One vehicle's occupancy record for one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The stable surrogate key.
    id: BookingId,
    /// The human-readable booking number, unique and monotonic.
    booking_number: String,
    /// The vehicle occupying the slot.
    pub vehicle: Vehicle,
    /// The slot this booking is bound to for its whole lifetime.
    slot_id: SlotId,
    /// Customer-requested start of the schedule window. Advisory only.
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// Customer-requested end of the schedule window. Advisory only.
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    /// Actual check-in instant; may differ from `start_time`.
    #[serde(with = "time::serde::rfc3339")]
    entry_time: OffsetDateTime,
    /// Actual check-out instant, set when the booking leaves `Active`.
    #[serde(with = "time::serde::rfc3339::option")]
    exit_time: Option<OffsetDateTime>,
    /// Lifecycle state.
    status: BookingStatus,
    /// Snapshot of the vehicle type's hourly rate at booking time.
    /// Later tariff changes never alter this booking's charge.
    hourly_rate: f64,
    /// Final charge; `None` while `Active`, never negative once set.
    total_amount: Option<f64>,
    /// Recorded payment details.
    pub payment: PaymentInfo,
    /// The owning customer, when known.
    pub user_id: Option<i64>,
}

impl Booking {
    /// Creates a new `Active` booking checked in at `entry_time`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: BookingId,
        booking_number: String,
        vehicle: Vehicle,
        slot_id: SlotId,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
        entry_time: OffsetDateTime,
        hourly_rate: f64,
        payment: PaymentInfo,
        user_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            booking_number,
            vehicle,
            slot_id,
            start_time,
            end_time,
            entry_time,
            exit_time: None,
            status: BookingStatus::Active,
            hourly_rate,
            total_amount: None,
            payment,
            user_id,
        }
    }

    /// Returns the surrogate key.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the booking number.
    #[must_use]
    pub fn booking_number(&self) -> &str {
        &self.booking_number
    }

    /// Returns the slot this booking is bound to.
    #[must_use]
    pub const fn slot_id(&self) -> SlotId {
        self.slot_id
    }

    /// Returns the actual check-in instant.
    #[must_use]
    pub const fn entry_time(&self) -> OffsetDateTime {
        self.entry_time
    }

    /// Returns the actual check-out instant, if the booking has left `Active`.
    #[must_use]
    pub const fn exit_time(&self) -> Option<OffsetDateTime> {
        self.exit_time
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns whether the booking is `Active`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// Returns the hourly rate snapshot taken at booking time.
    #[must_use]
    pub const fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    /// Returns the final charge, `None` while `Active`.
    #[must_use]
    pub const fn total_amount(&self) -> Option<f64> {
        self.total_amount
    }

    /// Transitions the booking to `Completed`.
    ///
    /// The caller computes `total_amount` from the actual elapsed time
    /// (`exit_time - entry_time`) using the rate snapshot, and must only
    /// call this while the booking is `Active`.
    pub const fn complete(&mut self, exit_time: OffsetDateTime, total_amount: f64) {
        self.exit_time = Some(exit_time);
        self.total_amount = Some(total_amount);
        self.status = BookingStatus::Completed;
    }

    /// Transitions the booking to `Cancelled` without a fee.
    pub const fn cancel(&mut self, at: OffsetDateTime) {
        self.exit_time = Some(at);
        self.status = BookingStatus::Cancelled;
    }
}
