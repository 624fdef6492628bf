// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry untyped strings where the domain has parse rules
//! (vehicle types, plates, payment methods); translation to domain
//! types happens in the handlers, never in the server.

use park_slot::{NearbySlot, SlotStatistics, SlotView};
use park_slot_domain::Booking;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API request to park a vehicle in a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkRequest {
    /// The slot to park in.
    pub slot_id: i64,
    /// The vehicle's license plate.
    pub license_plate: String,
    /// The vehicle type (BIKE, CAR, SUV, TRUCK).
    pub vehicle_type: String,
    /// The owner's name.
    pub owner_name: String,
    /// The owner's 10-digit phone number.
    pub phone_number: String,
    /// Requested start of the schedule window.
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// Requested end of the schedule window.
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    /// The payment method ('cash' or 'online').
    pub payment_method: String,
    /// Payment reference, required for online payments.
    pub payment_reference: Option<String>,
    /// The owning customer, when known.
    pub user_id: Option<i64>,
}

/// API response for a successful park operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkResponse {
    /// The booking identifier.
    pub booking_id: i64,
    /// The human-readable booking number.
    pub booking_number: String,
    /// The slot number the vehicle was parked in.
    pub slot_number: u32,
    /// The normalized license plate.
    pub license_plate: String,
    /// The hourly rate locked in for this booking.
    pub hourly_rate: f64,
    /// The check-in instant.
    #[serde(with = "time::serde::rfc3339")]
    pub entry_time: OffsetDateTime,
    /// The booking status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to check a vehicle out by plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// The vehicle's license plate.
    pub license_plate: String,
}

/// API response for a checkout or force-removal, with the fee breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// The human-readable booking number.
    pub booking_number: String,
    /// The normalized license plate.
    pub license_plate: String,
    /// The slot number that was vacated.
    pub slot_number: u32,
    /// The check-in instant.
    #[serde(with = "time::serde::rfc3339")]
    pub entry_time: OffsetDateTime,
    /// The check-out instant.
    #[serde(with = "time::serde::rfc3339")]
    pub exit_time: OffsetDateTime,
    /// Billable hours charged.
    pub hours: u64,
    /// Base fee before tax.
    pub base_fee: f64,
    /// Tax applied.
    pub tax: f64,
    /// Final charge.
    pub total_amount: f64,
    /// A success message.
    pub message: String,
}

/// API response for a cancelled booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelResponse {
    /// The human-readable booking number.
    pub booking_number: String,
    /// The booking status after cancellation.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API response for a vehicle search by plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The human-readable booking number.
    pub booking_number: String,
    /// The normalized license plate.
    pub license_plate: String,
    /// The vehicle type.
    pub vehicle_type: String,
    /// The owner's name.
    pub owner_name: String,
    /// The slot number the vehicle occupies.
    pub slot_number: u32,
    /// The floor the slot is on.
    pub floor_number: u16,
    /// The check-in instant.
    #[serde(with = "time::serde::rfc3339")]
    pub entry_time: OffsetDateTime,
    /// The booking status.
    pub status: String,
}

/// API request for a fee quote without a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// The vehicle type (BIKE, CAR, SUV, TRUCK).
    pub vehicle_type: String,
    /// The parking duration in minutes.
    pub duration_minutes: u64,
}

/// API response with a fee quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// The vehicle type quoted for.
    pub vehicle_type: String,
    /// The hourly rate for this vehicle type.
    pub hourly_rate: f64,
    /// Billable hours.
    pub hours: u64,
    /// Base fee before tax.
    pub base_fee: f64,
    /// Tax applied.
    pub tax: f64,
    /// Total fee.
    pub total: f64,
}

/// API response for a proximity search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyResponse {
    /// Matching slots, nearest first.
    pub slots: Vec<NearbySlot>,
}

/// API request to create a slot. The slot number is assigned by the
/// engine and is absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    /// The slot type (SMALL, MEDIUM, LARGE).
    pub slot_type: String,
    /// The floor this slot is on.
    pub floor_number: u16,
    /// Latitude in degrees, if the slot has a location.
    pub latitude: Option<f64>,
    /// Longitude in degrees, if the slot has a location.
    pub longitude: Option<f64>,
    /// Human-readable location name.
    pub location_name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Region or state name.
    pub region: Option<String>,
}

/// API request to update a slot. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateSlotRequest {
    /// New slot type (SMALL, MEDIUM, LARGE).
    pub slot_type: Option<String>,
    /// New floor number.
    pub floor_number: Option<u16>,
    /// New availability flag.
    pub is_available: Option<bool>,
    /// New latitude. Must be paired with `longitude`.
    pub latitude: Option<f64>,
    /// New longitude. Must be paired with `latitude`.
    pub longitude: Option<f64>,
    /// Human-readable location name for the new location.
    pub location_name: Option<String>,
    /// Street address for the new location.
    pub address: Option<String>,
    /// City name for the new location.
    pub city: Option<String>,
    /// Region or state name for the new location.
    pub region: Option<String>,
}

/// API request to set or clear a slot's maintenance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    /// The maintenance reason; `None` returns the slot to service.
    pub reason: Option<String>,
}

/// API response listing a customer's bookings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBookingsResponse {
    /// The customer the bookings belong to.
    pub user_id: i64,
    /// The customer's bookings, newest first.
    pub bookings: Vec<Booking>,
}

/// API response listing slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotListResponse {
    /// The matching slots, ordered by slot number.
    pub slots: Vec<SlotView>,
}

/// API response with registry statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsResponse {
    /// Aggregate counts over the whole registry.
    pub statistics: SlotStatistics,
}

/// API response listing the cities slots are located in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitiesResponse {
    /// Distinct city names, sorted.
    pub cities: Vec<String>,
}
