// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary operations.
//!
//! Each function translates an untyped API request into domain types,
//! applies the operation through the engine, and translates any errors
//! to API errors. Domain and core errors never leak past this module.

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::payment_policy::PaymentPolicy;
use crate::request_response::{
    CancelResponse, CheckoutRequest, CheckoutResponse, CitiesResponse, CreateSlotRequest,
    MaintenanceRequest, NearbyResponse, ParkRequest, ParkResponse, QuoteRequest, QuoteResponse,
    SearchResponse, SlotListResponse, StatisticsResponse, UpdateSlotRequest, UserBookingsResponse,
};
use park_slot::{
    CreateSlot, Engine, ParkingReport, ReleaseResult, ReleaseTarget, ReserveRequest, SlotFilter,
    SlotPatch, SlotView, VehicleSearch,
};
use park_slot_audit::{Actor, ReleaseKind};
use park_slot_domain::{
    BookingId, FeeQuote, LicensePlate, Location, PaymentInfo, PaymentMethod, PhoneNumber, SlotId,
    SlotType, Vehicle, VehicleType, quote, rate,
};
use time::OffsetDateTime;
use tracing::debug;

/// Parks a vehicle in a slot via the API boundary.
///
/// This function:
/// - Parses and validates every untyped field of the request
/// - Enforces the payment policy
/// - Reserves the slot through the engine
/// - Translates any errors to API errors
///
/// # Errors
///
/// Returns an error if any field fails validation, the payment details
/// violate policy, or the reservation is refused by the engine.
pub async fn park_vehicle(
    engine: &Engine,
    request: ParkRequest,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<ParkResponse, ApiError> {
    let license_plate: LicensePlate =
        LicensePlate::parse(&request.license_plate).map_err(translate_domain_error)?;
    let vehicle_type: VehicleType =
        VehicleType::parse(&request.vehicle_type).map_err(translate_domain_error)?;
    let phone_number: PhoneNumber =
        PhoneNumber::parse(&request.phone_number).map_err(translate_domain_error)?;
    let payment_method: PaymentMethod =
        PaymentMethod::parse(&request.payment_method).map_err(translate_domain_error)?;

    PaymentPolicy::default().validate(payment_method, request.payment_reference.as_deref())?;

    let reserve_request: ReserveRequest = ReserveRequest {
        slot_id: SlotId::new(request.slot_id),
        vehicle: Vehicle {
            license_plate: license_plate.clone(),
            vehicle_type,
            owner_name: request.owner_name,
            phone_number,
        },
        start_time: request.start_time,
        end_time: request.end_time,
        payment: PaymentInfo {
            method: payment_method,
            reference: request.payment_reference,
        },
        user_id: request.user_id,
    };

    let transition = engine
        .reserve(reserve_request, actor, now)
        .await
        .map_err(translate_core_error)?;
    let slot: SlotView = engine
        .get_slot(transition.booking.slot_id())
        .await
        .map_err(translate_core_error)?;

    debug!(booking_number = transition.booking.booking_number(), "Parked vehicle");

    Ok(ParkResponse {
        booking_id: transition.booking.id().value(),
        booking_number: transition.booking.booking_number().to_owned(),
        slot_number: slot.slot_number,
        license_plate: license_plate.value().to_owned(),
        hourly_rate: transition.booking.hourly_rate(),
        entry_time: transition.booking.entry_time(),
        status: transition.booking.status().as_str().to_owned(),
        message: format!(
            "Vehicle '{license_plate}' parked in slot #{}",
            slot.slot_number
        ),
    })
}

fn checkout_response(result: &ReleaseResult, message: String) -> Result<CheckoutResponse, ApiError> {
    let exit_time: OffsetDateTime = result.booking.exit_time().ok_or_else(|| ApiError::Internal {
        message: String::from("Completed booking is missing its exit time"),
    })?;
    Ok(CheckoutResponse {
        booking_number: result.booking.booking_number().to_owned(),
        license_plate: result.booking.vehicle.license_plate.value().to_owned(),
        slot_number: result.slot_number.value(),
        entry_time: result.booking.entry_time(),
        exit_time,
        hours: result.fee.hours,
        base_fee: result.fee.base_fee,
        tax: result.fee.tax,
        total_amount: result.fee.total,
        message,
    })
}

/// Checks a vehicle out by plate, computing the final fee.
///
/// # Errors
///
/// Returns an error if the plate is malformed or the vehicle is not
/// currently parked.
pub async fn checkout_vehicle(
    engine: &Engine,
    request: CheckoutRequest,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<CheckoutResponse, ApiError> {
    let license_plate: LicensePlate =
        LicensePlate::parse(&request.license_plate).map_err(translate_domain_error)?;
    let result: ReleaseResult = engine
        .release(
            ReleaseTarget::Plate(license_plate.clone()),
            ReleaseKind::Checkout,
            actor,
            now,
        )
        .await
        .map_err(translate_core_error)?;
    checkout_response(
        &result,
        format!(
            "Vehicle '{license_plate}' checked out, charged {:.2}",
            result.fee.total
        ),
    )
}

/// Force-removes a vehicle that never checked out itself.
///
/// State effect and fee are identical to a checkout; only the audit
/// action differs.
///
/// # Errors
///
/// Returns an error if the plate is malformed or the vehicle is not
/// currently parked.
pub async fn remove_vehicle(
    engine: &Engine,
    license_plate: &str,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<CheckoutResponse, ApiError> {
    let license_plate: LicensePlate =
        LicensePlate::parse(license_plate).map_err(translate_domain_error)?;
    let result: ReleaseResult = engine
        .release(
            ReleaseTarget::Plate(license_plate.clone()),
            ReleaseKind::ForceRemove,
            actor,
            now,
        )
        .await
        .map_err(translate_core_error)?;
    checkout_response(
        &result,
        format!(
            "Vehicle '{license_plate}' removed, charged {:.2}",
            result.fee.total
        ),
    )
}

/// Administratively cancels an active booking without a fee.
///
/// # Errors
///
/// Returns an error if the booking does not exist or has already left
/// the active state.
pub async fn cancel_booking(
    engine: &Engine,
    booking_id: i64,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<CancelResponse, ApiError> {
    let transition = engine
        .cancel(BookingId::new(booking_id), actor, now)
        .await
        .map_err(translate_core_error)?;
    Ok(CancelResponse {
        booking_number: transition.booking.booking_number().to_owned(),
        status: transition.booking.status().as_str().to_owned(),
        message: format!("Booking {} cancelled", transition.booking.booking_number()),
    })
}

/// Looks a vehicle up by plate and reports where it is parked.
///
/// # Errors
///
/// Returns an error if the plate is malformed, the vehicle has never
/// been seen, or it is not currently parked.
pub async fn search_vehicle(engine: &Engine, license_plate: &str) -> Result<SearchResponse, ApiError> {
    let license_plate: LicensePlate =
        LicensePlate::parse(license_plate).map_err(translate_domain_error)?;
    let found: VehicleSearch = engine
        .find_by_plate(&license_plate)
        .await
        .map_err(translate_core_error)?;
    Ok(SearchResponse {
        booking_number: found.booking.booking_number().to_owned(),
        license_plate: found.booking.vehicle.license_plate.value().to_owned(),
        vehicle_type: found.booking.vehicle.vehicle_type.as_str().to_owned(),
        owner_name: found.booking.vehicle.owner_name.clone(),
        slot_number: found.slot.slot_number,
        floor_number: found.slot.floor_number,
        entry_time: found.booking.entry_time(),
        status: found.booking.status().as_str().to_owned(),
    })
}

/// Generates the operator report, optionally narrowed to one customer.
pub async fn parking_report(
    engine: &Engine,
    user_id: Option<i64>,
    now: OffsetDateTime,
) -> ParkingReport {
    engine.report(user_id, now).await
}

/// Lists a customer's bookings, newest first. A customer with no
/// bookings gets an empty list, not an error.
pub async fn user_bookings(engine: &Engine, user_id: i64) -> UserBookingsResponse {
    UserBookingsResponse {
        user_id,
        bookings: engine.bookings_for_user(user_id).await,
    }
}

/// Quotes the fee for a vehicle type and duration without booking.
///
/// # Errors
///
/// Returns an error if the vehicle type is not recognized.
pub fn fee_quote(request: &QuoteRequest) -> Result<QuoteResponse, ApiError> {
    let vehicle_type: VehicleType =
        VehicleType::parse(&request.vehicle_type).map_err(translate_domain_error)?;
    let fee: FeeQuote = quote(vehicle_type, request.duration_minutes);
    Ok(QuoteResponse {
        vehicle_type: vehicle_type.as_str().to_owned(),
        hourly_rate: rate(vehicle_type),
        hours: fee.hours,
        base_fee: fee.base_fee,
        tax: fee.tax,
        total: fee.total,
    })
}

/// Finds slots within range of a point, nearest first.
///
/// # Errors
///
/// Returns an error if the coordinates or radius are invalid.
pub async fn nearby_slots(
    engine: &Engine,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Result<NearbyResponse, ApiError> {
    let slots = engine
        .nearby(latitude, longitude, radius_km)
        .await
        .map_err(translate_core_error)?;
    Ok(NearbyResponse { slots })
}

fn location_from_parts(
    latitude: Option<f64>,
    longitude: Option<f64>,
    location_name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    region: Option<String>,
) -> Result<Option<Location>, ApiError> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => {
            let location: Location =
                Location::new(latitude, longitude, location_name, address, city, region)
                    .map_err(translate_domain_error)?;
            Ok(Some(location))
        }
        (None, None) => Ok(None),
        _ => Err(ApiError::InvalidInput {
            field: String::from("coordinates"),
            message: String::from("Latitude and longitude must be provided together"),
        }),
    }
}

/// Creates a slot; the engine assigns the slot number.
///
/// # Errors
///
/// Returns an error if the slot type or location is invalid.
pub async fn create_slot(
    engine: &Engine,
    request: CreateSlotRequest,
    now: OffsetDateTime,
) -> Result<SlotView, ApiError> {
    let slot_type: SlotType = SlotType::parse(&request.slot_type).map_err(translate_domain_error)?;
    let location: Option<Location> = location_from_parts(
        request.latitude,
        request.longitude,
        request.location_name,
        request.address,
        request.city,
        request.region,
    )?;
    engine
        .create_slot(
            CreateSlot {
                slot_type,
                floor_number: request.floor_number,
                location,
            },
            now,
        )
        .await
        .map_err(translate_core_error)
}

/// Applies a partial update to a slot.
///
/// # Errors
///
/// Returns an error if a field is invalid, the slot does not exist, or
/// the slot is occupied.
pub async fn update_slot(
    engine: &Engine,
    slot_id: i64,
    request: UpdateSlotRequest,
) -> Result<SlotView, ApiError> {
    let slot_type: Option<SlotType> = request
        .slot_type
        .as_deref()
        .map(SlotType::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let location: Option<Location> = location_from_parts(
        request.latitude,
        request.longitude,
        request.location_name,
        request.address,
        request.city,
        request.region,
    )?;
    engine
        .update_slot(
            SlotId::new(slot_id),
            SlotPatch {
                slot_type,
                floor_number: request.floor_number,
                location,
                is_available: request.is_available,
            },
        )
        .await
        .map_err(translate_core_error)
}

/// Deletes a slot, freeing its number for reuse.
///
/// # Errors
///
/// Returns an error if the slot does not exist or is occupied.
pub async fn delete_slot(engine: &Engine, slot_id: i64) -> Result<(), ApiError> {
    engine
        .delete_slot(SlotId::new(slot_id))
        .await
        .map_err(translate_core_error)
}

/// Flips a slot's administrative availability flag.
///
/// # Errors
///
/// Returns an error if the slot does not exist or an occupied slot
/// would be disabled.
pub async fn toggle_slot_availability(engine: &Engine, slot_id: i64) -> Result<SlotView, ApiError> {
    engine
        .toggle_availability(SlotId::new(slot_id))
        .await
        .map_err(translate_core_error)
}

/// Sets or clears a slot's maintenance reason.
///
/// Occupancy does not block this: a parked vehicle stays until it
/// checks out, the slot just stops accepting new vehicles.
///
/// # Errors
///
/// Returns an error if the slot does not exist.
pub async fn set_slot_maintenance(
    engine: &Engine,
    slot_id: i64,
    request: MaintenanceRequest,
) -> Result<SlotView, ApiError> {
    engine
        .set_maintenance(SlotId::new(slot_id), request.reason)
        .await
        .map_err(translate_core_error)
}

/// Fetches a single slot with derived occupancy.
///
/// # Errors
///
/// Returns an error if the slot does not exist.
pub async fn get_slot(engine: &Engine, slot_id: i64) -> Result<SlotView, ApiError> {
    engine
        .get_slot(SlotId::new(slot_id))
        .await
        .map_err(translate_core_error)
}

/// Lists slots matching the given filters.
///
/// # Errors
///
/// Returns an error if the slot type filter is not recognized.
pub async fn list_slots(
    engine: &Engine,
    slot_type: Option<&str>,
    floor_number: Option<u16>,
    city: Option<String>,
    only_free: bool,
) -> Result<SlotListResponse, ApiError> {
    let slot_type: Option<SlotType> = slot_type
        .map(SlotType::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let slots: Vec<SlotView> = engine
        .list_slots(&SlotFilter {
            slot_type,
            floor_number,
            city,
            only_free,
        })
        .await;
    Ok(SlotListResponse { slots })
}

/// Computes aggregate counts over the whole registry.
pub async fn slot_statistics(engine: &Engine) -> StatisticsResponse {
    StatisticsResponse {
        statistics: engine.slot_statistics().await,
    }
}

/// Lists the distinct cities slots are located in.
pub async fn list_cities(engine: &Engine) -> CitiesResponse {
    CitiesResponse {
        cities: engine.list_cities().await,
    }
}
