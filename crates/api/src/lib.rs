// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod payment_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    cancel_booking, checkout_vehicle, create_slot, delete_slot, fee_quote, get_slot, list_cities,
    list_slots, nearby_slots, park_vehicle, parking_report, remove_vehicle, search_vehicle,
    set_slot_maintenance, slot_statistics, toggle_slot_availability, update_slot, user_bookings,
};
pub use payment_policy::{PaymentPolicy, PaymentPolicyError};
pub use request_response::{
    CancelResponse, CheckoutRequest, CheckoutResponse, CitiesResponse, CreateSlotRequest,
    MaintenanceRequest, NearbyResponse, ParkRequest, ParkResponse, QuoteRequest, QuoteResponse,
    SearchResponse, SlotListResponse, StatisticsResponse, UpdateSlotRequest, UserBookingsResponse,
};
