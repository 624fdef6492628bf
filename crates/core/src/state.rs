// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use park_slot_audit::StateSnapshot;
use park_slot_domain::{Booking, BookingId, LicensePlate, ParkingSlot, SlotId, SlotNumber};
use std::collections::HashMap;

/// The engine's single shared store.
///
/// The slot registry and the booking ledger are two facets of one
/// resource: occupancy is derived from the active-booking set, so both
/// live behind one lock and are mutated in the same write section.
/// They are deliberately not two independently-lockable stores.
#[derive(Debug, Default)]
pub struct EngineState {
    /// All existing parking slots, keyed by surrogate id.
    pub slots: HashMap<SlotId, ParkingSlot>,
    /// All bookings ever made, keyed by surrogate id.
    pub bookings: HashMap<BookingId, Booking>,
    /// Index: slot id of every `Active` booking. A map keyed by slot,
    /// so a slot can never hold two active bookings.
    pub active_by_slot: HashMap<SlotId, BookingId>,
    /// Index: plate of every `Active` booking. A map keyed by plate,
    /// so a vehicle can never hold two active bookings.
    pub active_by_plate: HashMap<LicensePlate, BookingId>,
}

impl EngineState {
    /// Returns whether a slot currently has an active booking.
    ///
    /// This is the only definition of "occupied" in the system; the
    /// slot itself carries no occupancy field.
    #[must_use]
    pub fn is_occupied(&self, slot_id: SlotId) -> bool {
        self.active_by_slot.contains_key(&slot_id)
    }

    /// Returns the smallest positive slot number not currently in use.
    ///
    /// Numbers freed by deletion are reused: after deleting slot #5,
    /// the next created slot gets 5 again unless a smaller gap exists.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the number space is exhausted,
    /// which cannot happen before `u32::MAX` slots exist.
    pub fn next_slot_number(&self) -> Result<SlotNumber, CoreError> {
        let used: std::collections::HashSet<u32> = self
            .slots
            .values()
            .map(|slot| slot.slot_number().value())
            .collect();
        let candidate: u32 = (1..=u32::MAX)
            .find(|n| !used.contains(n))
            .ok_or_else(|| CoreError::InvariantViolation(String::from("slot number space exhausted")))?;
        SlotNumber::new(candidate).map_err(CoreError::from)
    }

    /// Looks up the active booking on a slot, if any.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the active index points at a
    /// booking that does not exist or is not `Active`.
    pub fn active_booking_for_slot(&self, slot_id: SlotId) -> Result<Option<&Booking>, CoreError> {
        self.active_by_slot
            .get(&slot_id)
            .map(|booking_id| self.checked_active(*booking_id))
            .transpose()
    }

    /// Looks up the active booking for a plate, if any.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the active index points at a
    /// booking that does not exist or is not `Active`.
    pub fn active_booking_for_plate(
        &self,
        plate: &LicensePlate,
    ) -> Result<Option<&Booking>, CoreError> {
        self.active_by_plate
            .get(plate)
            .map(|booking_id| self.checked_active(*booking_id))
            .transpose()
    }

    /// Resolves an active index entry, verifying the booking exists and
    /// really is `Active`.
    fn checked_active(&self, booking_id: BookingId) -> Result<&Booking, CoreError> {
        let booking: &Booking = self.bookings.get(&booking_id).ok_or_else(|| {
            CoreError::InvariantViolation(format!(
                "active index references missing booking {booking_id}"
            ))
        })?;
        if booking.is_active() {
            Ok(booking)
        } else {
            Err(CoreError::InvariantViolation(format!(
                "active index references non-active booking {}",
                booking.booking_number()
            )))
        }
    }

    /// Records a fresh `Active` booking in the ledger and both active
    /// indexes. Must be called inside the same write section that
    /// checked the slot and plate were free.
    pub fn insert_active(&mut self, booking: Booking) {
        let booking_id: BookingId = booking.id();
        self.active_by_slot.insert(booking.slot_id(), booking_id);
        self.active_by_plate
            .insert(booking.vehicle.license_plate.clone(), booking_id);
        self.bookings.insert(booking_id, booking);
    }

    /// Removes a booking from both active indexes after it has left
    /// `Active`. Must run in the same write section as the status
    /// transition.
    pub fn clear_active(&mut self, slot_id: SlotId, plate: &LicensePlate) {
        self.active_by_slot.remove(&slot_id);
        self.active_by_plate.remove(plate);
    }

    /// Captures an occupancy snapshot for the audit trail.
    #[must_use]
    pub fn snapshot(&self, slot_number: SlotNumber, plate: &LicensePlate) -> StateSnapshot {
        StateSnapshot::new(format!(
            "slot=#{slot_number},plate={plate},active_bookings={}",
            self.active_by_slot.len()
        ))
    }
}
