// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries over the registry and the ledger: proximity
//! search, the operator report, and vehicle lookup.

use crate::engine::Engine;
use crate::error::CoreError;
use crate::registry::SlotView;
use park_slot_domain::{
    Booking, BookingId, DomainError, LicensePlate, haversine_km, round2, validate_coordinates,
    validate_radius,
};
use serde::Serialize;
use time::OffsetDateTime;

/// A slot within range of a query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbySlot {
    /// The slot, carrying its own occupancy and maintenance flags.
    pub slot: SlotView,
    /// Great-circle distance from the query point, in kilometres,
    /// rounded to two decimals.
    pub distance_km: f64,
}

/// The operator's snapshot of the whole ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingReport {
    /// When the report was generated.
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// Every booking in scope.
    pub total_bookings: usize,
    /// Bookings currently occupying a slot.
    pub active: usize,
    /// Bookings checked out with a final charge.
    pub completed: usize,
    /// Bookings cancelled without a charge.
    pub cancelled: usize,
    /// Sum of all final charges in scope, rounded to two decimals.
    pub total_revenue: f64,
    /// The bookings in scope, newest first.
    pub bookings: Vec<Booking>,
}

/// The result of looking a vehicle up by plate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSearch {
    /// The vehicle's active booking.
    pub booking: Booking,
    /// The slot it currently occupies.
    pub slot: SlotView,
}

impl Engine {
    /// Finds slots within `radius_km` of a point, nearest first.
    ///
    /// Slots without a location are invisible to this query. Occupied,
    /// disabled, and under-maintenance slots are returned too; the
    /// projected view carries those flags so callers can render them
    /// distinctly. The radius comparison uses the unrounded distance.
    ///
    /// # Errors
    ///
    /// Returns a validation violation if the coordinates are out of
    /// range or the radius is not a positive finite number.
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<NearbySlot>, CoreError> {
        validate_coordinates(latitude, longitude)?;
        validate_radius(radius_km)?;
        let state = self.state().read().await;
        let mut hits: Vec<NearbySlot> = state
            .slots
            .values()
            .filter_map(|slot| {
                let location = slot.location.as_ref()?;
                let distance_km: f64 = haversine_km(
                    latitude,
                    longitude,
                    location.latitude(),
                    location.longitude(),
                );
                (distance_km <= radius_km).then(|| NearbySlot {
                    slot: SlotView::project(slot, &state),
                    distance_km: round2(distance_km),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(hits)
    }

    /// Generates the operator report, over the whole ledger or, when
    /// `user_id` is given, over one customer's bookings.
    pub async fn report(&self, user_id: Option<i64>, now: OffsetDateTime) -> ParkingReport {
        let state = self.state().read().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|booking| user_id.is_none_or(|id| booking.user_id == Some(id)))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| std::cmp::Reverse(booking.id().value()));

        let active: usize = bookings.iter().filter(|b| b.is_active()).count();
        let completed: usize = bookings
            .iter()
            .filter(|b| b.total_amount().is_some() && !b.is_active())
            .count();
        let cancelled: usize = bookings.len() - active - completed;
        let total_revenue: f64 = round2(
            bookings
                .iter()
                .filter_map(park_slot_domain::Booking::total_amount)
                .sum(),
        );

        ParkingReport {
            generated_at: now,
            total_bookings: bookings.len(),
            active,
            completed,
            cancelled,
            total_revenue,
            bookings,
        }
    }

    /// Looks up a vehicle's active booking by plate.
    ///
    /// # Errors
    ///
    /// Returns a vehicle-not-found violation if the plate has never
    /// been seen, or a no-active-booking violation if every booking
    /// for it has already closed.
    pub async fn find_by_plate(&self, plate: &LicensePlate) -> Result<VehicleSearch, CoreError> {
        let state = self.state().read().await;
        let Some(booking) = state.active_booking_for_plate(plate)? else {
            let seen: bool = state
                .bookings
                .values()
                .any(|b| b.vehicle.license_plate == *plate);
            let err: DomainError = if seen {
                DomainError::NoActiveBookingForPlate {
                    license_plate: plate.value().to_owned(),
                }
            } else {
                DomainError::VehicleNotFound {
                    license_plate: plate.value().to_owned(),
                }
            };
            return Err(err.into());
        };
        let slot = state.slots.get(&booking.slot_id()).ok_or_else(|| {
            CoreError::InvariantViolation(format!(
                "active booking {} references missing slot {}",
                booking.booking_number(),
                booking.slot_id()
            ))
        })?;
        Ok(VehicleSearch {
            booking: booking.clone(),
            slot: SlotView::project(slot, &state),
        })
    }

    /// Fetches a single booking by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found violation if the booking does not exist.
    pub async fn get_booking(&self, booking_id: BookingId) -> Result<Booking, CoreError> {
        let state = self.state().read().await;
        state
            .bookings
            .get(&booking_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::BookingNotFound {
                    booking_id: booking_id.value(),
                }
                .into()
            })
    }

    /// Lists all bookings owned by a customer, newest first.
    pub async fn bookings_for_user(&self, user_id: i64) -> Vec<Booking> {
        let state = self.state().read().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|booking| booking.user_id == Some(user_id))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| std::cmp::Reverse(booking.id().value()));
        bookings
    }
}
