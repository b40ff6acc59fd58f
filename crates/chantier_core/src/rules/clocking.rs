//! Daily clocking state machine.
//!
//! ```text
//! (no entry) --clock_in--> present --clock_out--> completed
//!      ^                                              |
//!      +------------------- reset --------------------+
//! ```
//!
//! # Invariants
//! - At most one entry per member and date.
//! - `reset` deletes the member's entry for the date whatever its status.

use crate::id::{new_id, CLOCKING_PREFIX};
use crate::model::clocking::{ClockingEntry, ClockingStatus};
use crate::model::time::TimeOfDay;
use crate::rules::{InvalidState, RuleResult};
use crate::store::{EntityStore, InsertAt};
use chrono::NaiveDate;

/// Opens a `present` entry starting at `at`.
pub fn clock_in<'a>(
    entries: &'a mut EntityStore<ClockingEntry>,
    member_id: &str,
    date: NaiveDate,
    at: TimeOfDay,
) -> RuleResult<&'a ClockingEntry> {
    if entry_for(entries, member_id, date).is_some() {
        return Err(InvalidState::AlreadyClockedIn.into());
    }
    let entry = ClockingEntry {
        id: new_id(CLOCKING_PREFIX),
        member_id: member_id.to_string(),
        date,
        start_time: Some(at),
        end_time: None,
        status: ClockingStatus::Present,
    };
    Ok(entries.insert(entry, InsertAt::Back)?)
}

/// Closes the member's open entry for `date` at `at`.
pub fn clock_out<'a>(
    entries: &'a mut EntityStore<ClockingEntry>,
    member_id: &str,
    date: NaiveDate,
    at: TimeOfDay,
) -> RuleResult<&'a ClockingEntry> {
    let entry_id = entries
        .iter()
        .find(|entry| entry.belongs_to(member_id, date) && entry.is_open())
        .map(|entry| entry.id.clone())
        .ok_or(InvalidState::NoOpenEntry)?;
    Ok(entries.update(&entry_id, |entry| {
        entry.end_time = Some(at);
        entry.status = ClockingStatus::Completed;
    })?)
}

/// Deletes the member's entry for `date`, returning it when one existed.
pub fn reset(
    entries: &mut EntityStore<ClockingEntry>,
    member_id: &str,
    date: NaiveDate,
) -> RuleResult<Option<ClockingEntry>> {
    let Some(entry_id) = entry_for(entries, member_id, date).map(|entry| entry.id.clone()) else {
        return Ok(None);
    };
    Ok(Some(entries.remove(&entry_id)?))
}

/// Inserts a manually entered record, keeping member and date unique.
pub fn insert_manual<'a>(
    entries: &'a mut EntityStore<ClockingEntry>,
    entry: ClockingEntry,
) -> RuleResult<&'a ClockingEntry> {
    if entry_for(entries, &entry.member_id, entry.date).is_some() {
        return Err(InvalidState::DuplicateClockingEntry.into());
    }
    Ok(entries.insert(entry, InsertAt::Back)?)
}

/// Rejects an edit that would move `entry_id` onto another entry's slot.
pub fn check_slot_free(
    entries: &EntityStore<ClockingEntry>,
    entry_id: &str,
    member_id: &str,
    date: NaiveDate,
) -> RuleResult<()> {
    let taken = entries
        .iter()
        .any(|entry| entry.id != entry_id && entry.belongs_to(member_id, date));
    if taken {
        return Err(InvalidState::DuplicateClockingEntry.into());
    }
    Ok(())
}

pub fn entry_for<'a>(
    entries: &'a EntityStore<ClockingEntry>,
    member_id: &str,
    date: NaiveDate,
) -> Option<&'a ClockingEntry> {
    entries.iter().find(|entry| entry.belongs_to(member_id, date))
}

#[cfg(test)]
mod tests {
    use super::{clock_in, clock_out, entry_for, reset};
    use crate::model::clocking::ClockingStatus;
    use crate::model::time::TimeOfDay;
    use crate::rules::{InvalidState, RuleError};
    use crate::store::EntityStore;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).unwrap()
    }

    #[test]
    fn full_cycle_returns_to_no_entry() {
        let mut entries = EntityStore::new();
        clock_in(&mut entries, "tm-1", day(), at(7, 30)).unwrap();
        let closed = clock_out(&mut entries, "tm-1", day(), at(16, 45)).unwrap();
        assert_eq!(closed.status, ClockingStatus::Completed);
        assert_eq!(closed.end_time, Some(at(16, 45)));

        let removed = reset(&mut entries, "tm-1", day()).unwrap();
        assert!(removed.is_some());
        assert!(entry_for(&entries, "tm-1", day()).is_none());
    }

    #[test]
    fn second_clock_in_same_day_is_rejected() {
        let mut entries = EntityStore::new();
        clock_in(&mut entries, "tm-1", day(), at(7, 30)).unwrap();
        let err = clock_in(&mut entries, "tm-1", day(), at(8, 0)).unwrap_err();
        assert_eq!(err, RuleError::InvalidState(InvalidState::AlreadyClockedIn));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn clock_out_without_open_entry_is_rejected() {
        let mut entries = EntityStore::new();
        let err = clock_out(&mut entries, "tm-1", day(), at(17, 0)).unwrap_err();
        assert_eq!(err, RuleError::InvalidState(InvalidState::NoOpenEntry));
    }
}
