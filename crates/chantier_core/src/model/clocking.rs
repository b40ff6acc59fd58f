//! Daily attendance records.
//!
//! # Invariants
//! - `end_time` requires `start_time`.
//! - `present` entries have a start and no end; `completed` entries have both.
//! - An end earlier than the start is tolerated; durations clamp to zero.

use crate::model::team::MemberId;
use crate::model::time::TimeOfDay;
use crate::model::validation::require_time_window;
use crate::model::{Entity, EntityKind, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ClockingId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockingStatus {
    Present,
    Absent,
    Completed,
}

impl ClockingStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockingEntry {
    pub id: ClockingId,
    pub member_id: MemberId,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeOfDay>,
    pub status: ClockingStatus,
}

impl ClockingEntry {
    /// Whether this entry is the member's open clock-in for its date.
    pub fn is_open(&self) -> bool {
        self.status == ClockingStatus::Present && self.end_time.is_none()
    }

    pub fn belongs_to(&self, member_id: &str, date: NaiveDate) -> bool {
        self.member_id == member_id && self.date == date
    }
}

impl Entity for ClockingEntry {
    const KIND: EntityKind = EntityKind::ClockingEntry;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_time_window(self.start_time, self.end_time, false)?;
        match self.status {
            ClockingStatus::Present if self.start_time.is_none() => {
                Err(ValidationError::ClockingStatusMismatch {
                    status: self.status,
                    reason: "requires a start time",
                })
            }
            ClockingStatus::Present if self.end_time.is_some() => {
                Err(ValidationError::ClockingStatusMismatch {
                    status: self.status,
                    reason: "must not have an end time",
                })
            }
            ClockingStatus::Completed if self.end_time.is_none() => {
                Err(ValidationError::ClockingStatusMismatch {
                    status: self.status,
                    reason: "requires an end time",
                })
            }
            _ => Ok(()),
        }
    }
}

/// Manual entry form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockingDraft {
    pub member_id: MemberId,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    pub status: ClockingStatus,
}

impl ClockingDraft {
    pub fn into_entry(self, id: ClockingId) -> ClockingEntry {
        ClockingEntry {
            id,
            member_id: self.member_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockingPatch {
    pub member_id: Option<MemberId>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<Option<TimeOfDay>>,
    pub end_time: Option<Option<TimeOfDay>>,
    pub status: Option<ClockingStatus>,
}

impl ClockingPatch {
    pub fn apply(&self, entry: &mut ClockingEntry) {
        if let Some(member_id) = &self.member_id {
            entry.member_id = member_id.clone();
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(start_time) = self.start_time {
            entry.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            entry.end_time = end_time;
        }
        if let Some(status) = self.status {
            entry.status = status;
        }
    }
}

impl From<ClockingDraft> for ClockingPatch {
    fn from(draft: ClockingDraft) -> Self {
        Self {
            member_id: Some(draft.member_id),
            date: Some(draft.date),
            start_time: Some(draft.start_time),
            end_time: Some(draft.end_time),
            status: Some(draft.status),
        }
    }
}
