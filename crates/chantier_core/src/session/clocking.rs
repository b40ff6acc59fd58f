//! Daily clocking use cases.

use crate::id::{new_id, CLOCKING_PREFIX};
use crate::model::clocking::{ClockingDraft, ClockingEntry, ClockingPatch};
use crate::model::time::TimeOfDay;
use crate::model::EntityKind;
use crate::report::clocking::{day_stats, group_history, DayStats, HistoryGroup, HistoryGrouping};
use crate::rules::clocking as clocking_rules;
use crate::session::{logged, Session, SessionError, SessionResult};
use chrono::NaiveDate;

impl Session {
    /// Opens a `present` entry for a known member.
    pub fn clock_in(&mut self, member_id: &str, date: NaiveDate, at: TimeOfDay) -> SessionResult<&ClockingEntry> {
        if let Err(err) = self.require_member(member_id) {
            return logged("clock_in", Err(err));
        }
        let result = clocking_rules::clock_in(&mut self.clocking, member_id, date, at)
            .map_err(SessionError::from);
        logged("clock_in", result)
    }

    pub fn clock_out(&mut self, member_id: &str, date: NaiveDate, at: TimeOfDay) -> SessionResult<&ClockingEntry> {
        let result = clocking_rules::clock_out(&mut self.clocking, member_id, date, at)
            .map_err(SessionError::from);
        logged("clock_out", result)
    }

    /// Deletes the member's entry for `date`. A missing entry is not an error.
    pub fn reset_clocking(&mut self, member_id: &str, date: NaiveDate) -> SessionResult<Option<ClockingEntry>> {
        let result = clocking_rules::reset(&mut self.clocking, member_id, date).map_err(SessionError::from);
        logged("clock_reset", result)
    }

    pub fn create_clocking_entry(&mut self, draft: ClockingDraft) -> SessionResult<&ClockingEntry> {
        if let Err(err) = self.require_member(&draft.member_id) {
            return logged("clocking_create", Err(err));
        }
        let entry = draft.into_entry(new_id(CLOCKING_PREFIX));
        let result = clocking_rules::insert_manual(&mut self.clocking, entry).map_err(SessionError::from);
        logged("clocking_create", result)
    }

    /// Edits an entry; moving it onto another entry's member and date is
    /// rejected.
    pub fn update_clocking_entry(&mut self, entry_id: &str, patch: &ClockingPatch) -> SessionResult<&ClockingEntry> {
        if let Err(err) = self.check_clocking_patch(entry_id, patch) {
            return logged("clocking_update", Err(err));
        }
        let result = self
            .clocking
            .update(entry_id, |entry| patch.apply(entry))
            .map_err(SessionError::from);
        logged("clocking_update", result)
    }

    fn check_clocking_patch(&self, entry_id: &str, patch: &ClockingPatch) -> SessionResult<()> {
        let mut preview = self.clocking.require(entry_id)?.clone();
        patch.apply(&mut preview);
        if patch.member_id.is_some() {
            self.require_member(&preview.member_id)?;
        }
        clocking_rules::check_slot_free(&self.clocking, entry_id, &preview.member_id, preview.date)?;
        Ok(())
    }

    pub fn delete_clocking_entry(&mut self, entry_id: &str) -> SessionResult<ClockingEntry> {
        let result = self.clocking.remove(entry_id).map_err(SessionError::from);
        logged("clocking_delete", result)
    }

    pub fn clocking_entry_for(&self, member_id: &str, date: NaiveDate) -> Option<&ClockingEntry> {
        clocking_rules::entry_for(&self.clocking, member_id, date)
    }

    pub fn clocking_on(&self, date: NaiveDate) -> Vec<&ClockingEntry> {
        self.clocking.iter().filter(|entry| entry.date == date).collect()
    }

    pub fn day_stats(&self, date: NaiveDate) -> DayStats {
        day_stats(self.clocking.list(), self.members.len(), date)
    }

    pub fn clocking_history(&self, grouping: HistoryGrouping) -> Vec<HistoryGroup> {
        group_history(self.clocking.list(), grouping)
    }

    fn require_member(&self, member_id: &str) -> SessionResult<()> {
        if self.members.contains(member_id) {
            Ok(())
        } else {
            Err(SessionError::not_found(EntityKind::TeamMember, member_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::clocking::{ClockingDraft, ClockingPatch, ClockingStatus};
    use crate::model::team::MemberDraft;
    use crate::model::time::TimeOfDay;
    use crate::model::EntityKind;
    use crate::rules::InvalidState;
    use crate::session::{Session, SessionError};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    fn at(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).unwrap()
    }

    fn session_with_member() -> (Session, String) {
        let mut session = Session::default();
        let id = session
            .create_member(MemberDraft {
                name: "Awa Traoré".to_string(),
                role: "Électricienne".to_string(),
                email: "awa@chantier.ci".to_string(),
                phone: "+225 07 11 22 33".to_string(),
                avatar_url: None,
            })
            .unwrap()
            .id
            .clone();
        (session, id)
    }

    #[test]
    fn unknown_member_cannot_clock_in() {
        let mut session = Session::default();
        let err = session.clock_in("tm-ghost", day(14), at(8, 0)).unwrap_err();
        assert!(matches!(err, SessionError::NotFound { kind: EntityKind::TeamMember, .. }));
        assert!(session.clocking_entries().is_empty());
    }

    #[test]
    fn manual_entry_cannot_collide_with_existing_day() {
        let (mut session, member) = session_with_member();
        session.clock_in(&member, day(14), at(8, 0)).unwrap();
        let err = session
            .create_clocking_entry(ClockingDraft {
                member_id: member.clone(),
                date: day(14),
                start_time: Some(at(7, 0)),
                end_time: Some(at(16, 0)),
                status: ClockingStatus::Completed,
            })
            .unwrap_err();
        assert_eq!(err, SessionError::InvalidState(InvalidState::DuplicateClockingEntry));
    }

    #[test]
    fn edit_onto_taken_day_is_rejected() {
        let (mut session, member) = session_with_member();
        session.clock_in(&member, day(14), at(8, 0)).unwrap();
        let other = session.clock_in(&member, day(15), at(8, 0)).unwrap().id.clone();

        let patch = ClockingPatch {
            date: Some(day(14)),
            ..ClockingPatch::default()
        };
        let err = session.update_clocking_entry(&other, &patch).unwrap_err();
        assert_eq!(err, SessionError::InvalidState(InvalidState::DuplicateClockingEntry));
        assert_eq!(session.clocking_entry_for(&member, day(15)).unwrap().id, other);
    }

    #[test]
    fn day_stats_counts_absent_members() {
        let (mut session, member) = session_with_member();
        session.clock_in(&member, day(14), at(8, 0)).unwrap();
        let stats = session.day_stats(day(14));
        assert_eq!(stats.present, 1);
        assert_eq!(stats.absent, 0);
        assert_eq!(session.day_stats(day(15)).absent, 1);
    }
}
