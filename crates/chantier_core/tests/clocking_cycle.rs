use chantier_core::model::clocking::{ClockingDraft, ClockingStatus};
use chantier_core::model::team::MemberDraft;
use chantier_core::model::time::TimeOfDay;
use chantier_core::report::clocking::{
    duration_minutes, entry_duration, format_duration, group_history, HistoryGrouping,
};
use chantier_core::{CoreConfig, DemoSeed, InvalidState, Session, SessionError, ValidationError};
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
            name: "Koffi Yao".to_string(),
            role: "Maçon".to_string(),
            email: "koffi.yao@chantier.ci".to_string(),
            phone: "+225 05 44 55 66".to_string(),
            avatar_url: None,
        })
        .unwrap()
        .id
        .clone();
    (session, id)
}

#[test]
fn daily_clock_cycle() {
    let (mut session, member) = session_with_member();
    assert!(session.clocking_entry_for(&member, day(14)).is_none());

    let entry = session.clock_in(&member, day(14), at(7, 55)).unwrap();
    assert_eq!(entry.status, ClockingStatus::Present);
    assert_eq!(entry.start_time, Some(at(7, 55)));

    let err = session.clock_in(&member, day(14), at(8, 0)).unwrap_err();
    assert_eq!(err, SessionError::InvalidState(InvalidState::AlreadyClockedIn));

    let entry = session.clock_out(&member, day(14), at(17, 0)).unwrap();
    assert_eq!(entry.status, ClockingStatus::Completed);
    assert_eq!(entry_duration(entry), Some(545));
    assert_eq!(format_duration(545), "9h 05m");

    let err = session.clock_out(&member, day(14), at(18, 0)).unwrap_err();
    assert_eq!(err, SessionError::InvalidState(InvalidState::NoOpenEntry));

    let removed = session.reset_clocking(&member, day(14)).unwrap();
    assert!(removed.is_some());
    assert!(session.clocking_entry_for(&member, day(14)).is_none());
    assert_eq!(session.reset_clocking(&member, day(14)).unwrap(), None);

    session.clock_in(&member, day(14), at(9, 0)).unwrap();
    assert_eq!(session.clocking_entries().len(), 1);
}

#[test]
fn clock_out_without_entry_is_invalid_state() {
    let (mut session, member) = session_with_member();
    let err = session.clock_out(&member, day(14), at(17, 0)).unwrap_err();
    assert_eq!(err, SessionError::InvalidState(InvalidState::NoOpenEntry));
    assert!(session.clocking_entries().is_empty());
}

#[test]
fn durations_are_never_negative() {
    for (start, end) in [((8, 0), (17, 0)), ((17, 0), (8, 0)), ((0, 0), (0, 0)), ((23, 59), (0, 1))] {
        let minutes = duration_minutes(at(start.0, start.1), at(end.0, end.1));
        assert!(minutes <= 24 * 60);
        if end < start {
            assert_eq!(minutes, 0);
        }
    }
}

#[test]
fn manual_entry_rules() {
    let (mut session, member) = session_with_member();
    let err = session
        .create_clocking_entry(ClockingDraft {
            member_id: member.clone(),
            date: day(10),
            start_time: None,
            end_time: Some(at(17, 0)),
            status: ClockingStatus::Completed,
        })
        .unwrap_err();
    assert_eq!(err, SessionError::Validation(ValidationError::EndWithoutStart));

    session
        .create_clocking_entry(ClockingDraft {
            member_id: member.clone(),
            date: day(10),
            start_time: None,
            end_time: None,
            status: ClockingStatus::Absent,
        })
        .unwrap();
    session
        .create_clocking_entry(ClockingDraft {
            member_id: member,
            date: day(21),
            start_time: Some(at(8, 0)),
            end_time: Some(at(16, 30)),
            status: ClockingStatus::Completed,
        })
        .unwrap();

    let weekly = group_history(session.clocking_entries(), HistoryGrouping::Weekly);
    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[0].label, "Semaine du 21 oct. au 27 oct.");
    let monthly = session.clocking_history(HistoryGrouping::Monthly);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].label, "Octobre 2024");
}

#[test]
fn demo_day_statistics() {
    let today = day(14);
    let session = Session::from_seed(&DemoSeed::new(today), CoreConfig::default()).unwrap();
    let stats = session.day_stats(today);
    assert_eq!(stats.present, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.absent, 2);
    assert_eq!(session.clocking_on(today).len(), 3);
}
