//! Single-entity validation errors and shared field checks.

use crate::model::clocking::ClockingStatus;
use crate::model::time::TimeOfDay;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Reason an entity failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is blank after trim.
    BlankField(&'static str),
    /// Period ends before it starts.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// Time window ends before it starts.
    InvalidTimeWindow { start: TimeOfDay, end: TimeOfDay },
    /// An end time was provided without a start time.
    EndWithoutStart,
    /// Email is not shaped `local@domain.tld`.
    InvalidEmail(String),
    /// Supplier rating outside 1..=5.
    RatingOutOfRange(u8),
    /// Invoice line quantity must be at least 1.
    ZeroItemQuantity { item_id: String },
    /// Tax rate must be a finite, non-negative percentage.
    InvalidTaxRate(f64),
    /// An invoice must keep at least one line item.
    EmptyInvoice,
    /// Clocking status disagrees with the recorded times.
    ClockingStatusMismatch {
        status: ClockingStatus,
        reason: &'static str,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "end date ({end}) must be >= start date ({start})")
            }
            Self::InvalidTimeWindow { start, end } => {
                write!(f, "end time ({end}) must be >= start time ({start})")
            }
            Self::EndWithoutStart => write!(f, "end time requires a start time"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::RatingOutOfRange(value) => write!(f, "rating must be 1..=5, got {value}"),
            Self::ZeroItemQuantity { item_id } => {
                write!(f, "invoice item {item_id} must have quantity >= 1")
            }
            Self::InvalidTaxRate(value) => {
                write!(f, "tax rate must be a non-negative percentage, got {value}")
            }
            Self::EmptyInvoice => write!(f, "invoice must contain at least one item"),
            Self::ClockingStatusMismatch { status, reason } => {
                write!(f, "clocking status `{}` {reason}", status.label())
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

pub(crate) fn require_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Rejects an end time without a start time.
///
/// When `ordered` is set, also rejects windows that end before they start.
pub(crate) fn require_time_window(
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
    ordered: bool,
) -> Result<(), ValidationError> {
    match (start, end) {
        (None, Some(_)) => Err(ValidationError::EndWithoutStart),
        (Some(start), Some(end)) if ordered && end < start => {
            Err(ValidationError::InvalidTimeWindow { start, end })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{require_email, require_text, require_time_window, ValidationError};
    use crate::model::time::TimeOfDay;

    #[test]
    fn blank_text_is_rejected_after_trim() {
        assert_eq!(
            require_text("name", "   "),
            Err(ValidationError::BlankField("name"))
        );
        assert!(require_text("name", "Tour A").is_ok());
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(require_email("alice.k@example.com").is_ok());
        assert!(require_email("alice.k@example").is_err());
        assert!(require_email("not an email").is_err());
    }

    #[test]
    fn time_window_rules() {
        let nine = TimeOfDay::from_hm(9, 0);
        let eight = TimeOfDay::from_hm(8, 0);
        assert_eq!(
            require_time_window(None, nine, false),
            Err(ValidationError::EndWithoutStart)
        );
        assert!(require_time_window(nine, eight, false).is_ok());
        assert!(require_time_window(nine, eight, true).is_err());
    }
}
