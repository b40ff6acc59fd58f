//! Attendance figures and history grouping.

use crate::model::clocking::{ClockingEntry, ClockingStatus};
use crate::model::time::TimeOfDay;
use crate::report::locale::{capitalize, long_month, short_month};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Minutes between `start` and `end`; an end before the start yields 0.
pub fn duration_minutes(start: TimeOfDay, end: TimeOfDay) -> u32 {
    end.minutes_since_midnight()
        .saturating_sub(start.minutes_since_midnight())
}

/// Worked minutes for an entry with both times recorded.
pub fn entry_duration(entry: &ClockingEntry) -> Option<u32> {
    match (entry.start_time, entry.end_time) {
        (Some(start), Some(end)) => Some(duration_minutes(start, end)),
        _ => None,
    }
}

/// Formats minutes as `"{h}h {mm}m"`, e.g. `"8h 05m"`.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DayStats {
    pub present: usize,
    pub completed: usize,
    /// Members without a present or completed entry.
    pub absent: usize,
}

pub fn day_stats(entries: &[ClockingEntry], member_count: usize, date: NaiveDate) -> DayStats {
    let on_day = || entries.iter().filter(move |entry| entry.date == date);
    let present = on_day()
        .filter(|entry| entry.status == ClockingStatus::Present)
        .count();
    let completed = on_day()
        .filter(|entry| entry.status == ClockingStatus::Completed)
        .count();
    DayStats {
        present,
        completed,
        absent: member_count.saturating_sub(present + completed),
    }
}

/// Share of members with an entry, as a rounded percentage.
pub fn presence_rate(entry_count: usize, member_count: usize) -> u32 {
    if member_count == 0 {
        return 0;
    }
    ((entry_count as f64 / member_count as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryGrouping {
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryGroup {
    pub label: String,
    /// Newest first.
    pub dates: Vec<NaiveDate>,
}

/// Distinct entry dates, newest first, grouped under week or month labels.
pub fn group_history(entries: &[ClockingEntry], grouping: HistoryGrouping) -> Vec<HistoryGroup> {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let mut groups: Vec<HistoryGroup> = Vec::new();
    for date in dates {
        let label = match grouping {
            HistoryGrouping::Weekly => week_label(date),
            HistoryGrouping::Monthly => month_label(date),
        };
        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.dates.push(date),
            None => groups.push(HistoryGroup {
                label,
                dates: vec![date],
            }),
        }
    }
    groups
}

/// `"Semaine du 14 oct. au 20 oct."` for the Monday-to-Sunday week of `date`.
pub fn week_label(date: NaiveDate) -> String {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let sunday = monday + Duration::days(6);
    format!(
        "Semaine du {} {} au {} {}",
        monday.day(),
        short_month(monday.month()),
        sunday.day(),
        short_month(sunday.month())
    )
}

/// `"Octobre 2024"`.
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", capitalize(long_month(date.month())), date.year())
}

#[cfg(test)]
mod tests {
    use super::{duration_minutes, format_duration, month_label, presence_rate, week_label};
    use crate::model::time::TimeOfDay;
    use chrono::NaiveDate;

    #[test]
    fn duration_clamps_negative() {
        let eight = TimeOfDay::from_hm(8, 0).unwrap();
        let five = TimeOfDay::from_hm(17, 5).unwrap();
        assert_eq!(duration_minutes(eight, five), 545);
        assert_eq!(duration_minutes(five, eight), 0);
        assert_eq!(format_duration(545), "9h 05m");
        assert_eq!(format_duration(0), "0h 00m");
    }

    #[test]
    fn presence_rate_handles_empty_roster() {
        assert_eq!(presence_rate(3, 0), 0);
        assert_eq!(presence_rate(2, 3), 67);
    }

    #[test]
    fn labels_are_french() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        assert_eq!(week_label(wednesday), "Semaine du 14 oct. au 20 oct.");
        assert_eq!(month_label(wednesday), "Octobre 2024");

        let across = NaiveDate::from_ymd_opt(2024, 10, 31).unwrap();
        assert_eq!(week_label(across), "Semaine du 28 oct. au 3 nov.");
    }
}
