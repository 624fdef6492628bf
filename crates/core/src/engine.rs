// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The reservation coordinator.
//!
//! Makes "reserve slot S" and "release slot S" atomic with respect to
//! each other. Exclusion is two-layered: a sharded guard table keyed by
//! slot id (and one keyed by plate) serializes the read-check-write
//! window for a single slot without blocking unrelated slots, and the
//! single state lock makes the check-and-mutate step itself atomic so
//! the registry's occupancy view and the ledger's active set can never
//! be observed half-updated.

use crate::error::CoreError;
use crate::state::EngineState;
use park_slot_audit::{Action, Actor, AuditEvent, ReleaseKind, StateSnapshot};
use park_slot_domain::{
    Booking, BookingId, DomainError, FeeQuote, LicensePlate, PaymentInfo, SlotId, SlotNumber,
    Vehicle, quote_for_rate, rate, validate_owner_name, validate_schedule_window,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use time::{Duration, OffsetDateTime};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Default grace window for requested start times lying in the past.
pub const DEFAULT_GRACE: Duration = Duration::minutes(5);

/// A validated reservation request.
///
/// Field shapes (plate pattern, phone digits, coordinate ranges) are
/// enforced by the domain types; the engine validates the schedule
/// window and everything stateful.
#[derive(Debug, Clone)]
pub struct ReserveRequest {
    /// The slot the customer picked.
    pub slot_id: SlotId,
    /// The vehicle checking in.
    pub vehicle: Vehicle,
    /// Requested window start. Advisory; occupancy begins now.
    pub start_time: OffsetDateTime,
    /// Requested window end. Advisory.
    pub end_time: OffsetDateTime,
    /// Recorded payment details.
    pub payment: PaymentInfo,
    /// The owning customer, when known.
    pub user_id: Option<i64>,
}

/// Identifies the active booking a release or cancel targets.
#[derive(Debug, Clone)]
pub enum ReleaseTarget {
    /// Release whatever is parked on this slot.
    Slot(SlotId),
    /// Release this vehicle wherever it is parked.
    Plate(LicensePlate),
    /// Release this specific booking.
    Booking(BookingId),
}

/// The result of a successful reserve or cancel transition.
#[derive(Debug, Clone)]
pub struct BookingTransition {
    /// The booking after the transition.
    pub booking: Booking,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful checkout or force-removal.
#[derive(Debug, Clone)]
pub struct ReleaseResult {
    /// The completed booking, with `exit_time` and `total_amount` set.
    pub booking: Booking,
    /// The fee breakdown applied, computed from actual elapsed time
    /// against the booking's rate snapshot.
    pub fee: FeeQuote,
    /// The number of the slot that was vacated.
    pub slot_number: SlotNumber,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The slot reservation and tariff engine.
///
/// Owns the slot registry, the booking ledger, and the exclusion
/// machinery. Cheap to share behind an `Arc`; every method takes
/// `&self`.
#[derive(Debug)]
pub struct Engine {
    /// The single shared store (registry + ledger).
    state: RwLock<EngineState>,
    /// Per-slot guards. Two reserves on different slots never contend
    /// on each other's guard.
    slot_guards: Mutex<HashMap<SlotId, Arc<Mutex<()>>>>,
    /// Per-plate guards, enforcing the one-active-booking-per-vehicle
    /// rule under concurrency.
    plate_guards: Mutex<HashMap<LicensePlate, Arc<Mutex<()>>>>,
    /// Surrogate key sequence for slots.
    slot_id_seq: AtomicI64,
    /// Shared sequence for booking ids and booking numbers. Atomic, so
    /// numbers are collision-free under concurrent creation.
    booking_seq: AtomicI64,
    /// Grace window for requested start times lying in the past.
    grace: Duration,
}

impl Engine {
    /// Creates an empty engine with the given grace window.
    #[must_use]
    pub fn new(grace: Duration) -> Self {
        Self {
            state: RwLock::new(EngineState::default()),
            slot_guards: Mutex::new(HashMap::new()),
            plate_guards: Mutex::new(HashMap::new()),
            slot_id_seq: AtomicI64::new(0),
            booking_seq: AtomicI64::new(0),
            grace,
        }
    }

    /// Returns the shared state store for read snapshots and admin
    /// write sections.
    pub(crate) const fn state(&self) -> &RwLock<EngineState> {
        &self.state
    }

    /// Returns the next slot surrogate key.
    pub(crate) fn next_slot_id(&self) -> SlotId {
        SlotId::new(self.slot_id_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Fetches (or creates) the guard for a slot.
    async fn slot_guard(&self, slot_id: SlotId) -> Arc<Mutex<()>> {
        let mut guards = self.slot_guards.lock().await;
        Arc::clone(guards.entry(slot_id).or_default())
    }

    /// Fetches (or creates) the guard for a plate.
    async fn plate_guard(&self, plate: &LicensePlate) -> Arc<Mutex<()>> {
        let mut guards = self.plate_guards.lock().await;
        Arc::clone(guards.entry(plate.clone()).or_default())
    }

    /// Reserves a slot for a vehicle, checking it in immediately.
    ///
    /// Validation happens before any lock is taken, so a rejected
    /// request has no side effects and can be retried freely. The
    /// plate guard is always acquired before the slot guard; `release`
    /// follows the same order, so the two paths cannot deadlock.
    ///
    /// # Arguments
    ///
    /// * `request` - The validated reservation request
    /// * `actor` - Who is performing the reservation, for the audit trail
    /// * `now` - The check-in instant
    ///
    /// # Errors
    ///
    /// Returns a domain violation if the schedule window is invalid,
    /// the slot is missing, disabled, under maintenance, or occupied,
    /// or the vehicle is already parked elsewhere. Exactly one of two
    /// racing reserves for the same slot succeeds; the loser gets the
    /// occupied conflict, never a partial booking record.
    pub async fn reserve(
        &self,
        request: ReserveRequest,
        actor: Actor,
        now: OffsetDateTime,
    ) -> Result<BookingTransition, CoreError> {
        validate_owner_name(&request.vehicle.owner_name)?;
        validate_schedule_window(request.start_time, request.end_time, now, self.grace)?;

        let plate: LicensePlate = request.vehicle.license_plate.clone();
        let plate_guard: Arc<Mutex<()>> = self.plate_guard(&plate).await;
        let slot_guard: Arc<Mutex<()>> = self.slot_guard(request.slot_id).await;
        let _plate_exclusion = plate_guard.lock().await;
        let _slot_exclusion = slot_guard.lock().await;

        let mut state = self.state.write().await;

        let slot = state
            .slots
            .get(&request.slot_id)
            .ok_or(DomainError::SlotNotFound {
                slot_id: request.slot_id.value(),
            })?;
        let slot_number: SlotNumber = slot.slot_number();
        if !slot.is_available {
            return Err(DomainError::SlotUnavailable {
                slot_number: slot_number.value(),
            }
            .into());
        }
        if slot.is_under_maintenance() {
            return Err(DomainError::SlotUnderMaintenance {
                slot_number: slot_number.value(),
            }
            .into());
        }
        if state.is_occupied(request.slot_id) {
            return Err(DomainError::SlotOccupied {
                slot_number: slot_number.value(),
            }
            .into());
        }
        if state.active_booking_for_plate(&plate)?.is_some() {
            return Err(DomainError::VehicleAlreadyParked {
                license_plate: plate.value().to_owned(),
            }
            .into());
        }

        let before: StateSnapshot = state.snapshot(slot_number, &plate);

        let seq: i64 = self.booking_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let booking_number: String = format!("BK-{seq:06}");
        let hourly_rate: f64 = rate(request.vehicle.vehicle_type);
        let booking: Booking = Booking::new(
            BookingId::new(seq),
            booking_number.clone(),
            request.vehicle,
            request.slot_id,
            request.start_time,
            request.end_time,
            now,
            hourly_rate,
            request.payment,
            request.user_id,
        );

        state.insert_active(booking.clone());
        let after: StateSnapshot = state.snapshot(slot_number, &plate);
        drop(state);

        info!(
            booking_number = %booking_number,
            slot_number = %slot_number,
            plate = %plate,
            "Reserved slot"
        );

        let audit_event: AuditEvent = AuditEvent::new(
            actor,
            Action::new(
                String::from("ReserveSlot"),
                Some(format!(
                    "booking {booking_number} on slot #{slot_number} for {plate}"
                )),
            ),
            before,
            after,
        );

        Ok(BookingTransition {
            booking,
            audit_event,
        })
    }

    /// Releases an active booking by checkout or force-removal.
    ///
    /// Both modes have identical state effect (exit now, fee from
    /// actual elapsed time, status `Completed`); they differ only in
    /// the audit action recorded. Runs under the same guard discipline
    /// as `reserve`, so a reservation racing this release observes the
    /// slot as free only after the transition is fully committed.
    ///
    /// # Arguments
    ///
    /// * `target` - Which active booking to release
    /// * `kind` - Checkout or force-removal, for the audit trail
    /// * `actor` - Who is performing the release
    /// * `now` - The check-out instant
    ///
    /// # Errors
    ///
    /// Returns a not-found domain violation if no active booking
    /// matches the target; the state is left unchanged.
    pub async fn release(
        &self,
        target: ReleaseTarget,
        kind: ReleaseKind,
        actor: Actor,
        now: OffsetDateTime,
    ) -> Result<ReleaseResult, CoreError> {
        // First resolution only learns the guard keys; it is repeated
        // under exclusion before anything is mutated.
        let (slot_id, plate) = {
            let state = self.state.read().await;
            let (_, slot_id, plate, _) = resolve_active(&state, &target)?;
            (slot_id, plate)
        };

        let plate_guard: Arc<Mutex<()>> = self.plate_guard(&plate).await;
        let slot_guard: Arc<Mutex<()>> = self.slot_guard(slot_id).await;
        let _plate_exclusion = plate_guard.lock().await;
        let _slot_exclusion = slot_guard.lock().await;

        let mut state = self.state.write().await;
        let (booking_id, slot_id, plate, slot_number) = resolve_active(&state, &target)?;
        let before: StateSnapshot = state.snapshot(slot_number, &plate);

        let booking = state.bookings.get_mut(&booking_id).ok_or_else(|| {
            CoreError::InvariantViolation(format!("resolved booking {booking_id} disappeared"))
        })?;
        let elapsed: i64 = (now - booking.entry_time()).whole_minutes();
        let minutes: u64 = u64::try_from(elapsed.max(0)).unwrap_or(0);
        let fee: FeeQuote = quote_for_rate(booking.hourly_rate(), minutes);
        booking.complete(now, fee.total);
        let completed: Booking = booking.clone();

        state.clear_active(slot_id, &plate);
        let after: StateSnapshot = state.snapshot(slot_number, &plate);
        drop(state);

        info!(
            booking_number = %completed.booking_number(),
            slot_number = %slot_number,
            plate = %plate,
            mode = kind.action_name(),
            total_amount = fee.total,
            "Released slot"
        );

        let audit_event: AuditEvent = AuditEvent::new(
            actor,
            Action::new(
                String::from(kind.action_name()),
                Some(format!(
                    "booking {} on slot #{slot_number} for {plate}, charged {:.2}",
                    completed.booking_number(),
                    fee.total
                )),
            ),
            before,
            after,
        );

        Ok(ReleaseResult {
            booking: completed,
            fee,
            slot_number,
            audit_event,
        })
    }

    /// Administratively cancels an active booking without a fee.
    ///
    /// Cancellation is only reachable from `Active`; completed or
    /// cancelled bookings are terminal.
    ///
    /// # Arguments
    ///
    /// * `booking_id` - The booking to cancel
    /// * `actor` - Who is performing the cancellation
    /// * `now` - The cancellation instant
    ///
    /// # Errors
    ///
    /// Returns a not-found domain violation if the booking does not
    /// exist, or a not-active violation if it already left `Active`.
    pub async fn cancel(
        &self,
        booking_id: BookingId,
        actor: Actor,
        now: OffsetDateTime,
    ) -> Result<BookingTransition, CoreError> {
        let target: ReleaseTarget = ReleaseTarget::Booking(booking_id);
        let (slot_id, plate) = {
            let state = self.state.read().await;
            let (_, slot_id, plate, _) = resolve_active(&state, &target)?;
            (slot_id, plate)
        };

        let plate_guard: Arc<Mutex<()>> = self.plate_guard(&plate).await;
        let slot_guard: Arc<Mutex<()>> = self.slot_guard(slot_id).await;
        let _plate_exclusion = plate_guard.lock().await;
        let _slot_exclusion = slot_guard.lock().await;

        let mut state = self.state.write().await;
        let (booking_id, slot_id, plate, slot_number) = resolve_active(&state, &target)?;
        let before: StateSnapshot = state.snapshot(slot_number, &plate);

        let booking = state.bookings.get_mut(&booking_id).ok_or_else(|| {
            CoreError::InvariantViolation(format!("resolved booking {booking_id} disappeared"))
        })?;
        booking.cancel(now);
        let cancelled: Booking = booking.clone();

        state.clear_active(slot_id, &plate);
        let after: StateSnapshot = state.snapshot(slot_number, &plate);
        drop(state);

        info!(
            booking_number = %cancelled.booking_number(),
            slot_number = %slot_number,
            "Cancelled booking"
        );

        let audit_event: AuditEvent = AuditEvent::new(
            actor,
            Action::new(
                String::from("CancelBooking"),
                Some(format!(
                    "booking {} on slot #{slot_number}",
                    cancelled.booking_number()
                )),
            ),
            before,
            after,
        );

        Ok(BookingTransition {
            booking: cancelled,
            audit_event,
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE)
    }
}

/// Resolves a release target to its active booking.
///
/// # Errors
///
/// Returns the appropriate not-found or not-active domain violation
/// when no active booking matches.
fn resolve_active(
    state: &EngineState,
    target: &ReleaseTarget,
) -> Result<(BookingId, SlotId, LicensePlate, SlotNumber), CoreError> {
    let booking: &Booking = match target {
        ReleaseTarget::Slot(slot_id) => {
            let slot = state.slots.get(slot_id).ok_or(DomainError::SlotNotFound {
                slot_id: slot_id.value(),
            })?;
            state.active_booking_for_slot(*slot_id)?.ok_or(
                DomainError::NoActiveBookingForSlot {
                    slot_number: slot.slot_number().value(),
                },
            )?
        }
        ReleaseTarget::Plate(plate) => match state.active_booking_for_plate(plate)? {
            Some(booking) => booking,
            None => {
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
            }
        },
        ReleaseTarget::Booking(booking_id) => {
            let booking =
                state
                    .bookings
                    .get(booking_id)
                    .ok_or(DomainError::BookingNotFound {
                        booking_id: booking_id.value(),
                    })?;
            if !booking.is_active() {
                return Err(DomainError::BookingNotActive {
                    booking_number: booking.booking_number().to_owned(),
                }
                .into());
            }
            booking
        }
    };

    let slot_id: SlotId = booking.slot_id();
    let slot_number: SlotNumber = state
        .slots
        .get(&slot_id)
        .map(park_slot_domain::ParkingSlot::slot_number)
        .ok_or_else(|| {
            CoreError::InvariantViolation(format!(
                "active booking {} references missing slot {slot_id}",
                booking.booking_number()
            ))
        })?;

    Ok((
        booking.id(),
        slot_id,
        booking.vehicle.license_plate.clone(),
        slot_number,
    ))
}
