use chantier_core::model::finance::TransactionType;
use chantier_core::model::project::ProjectStatus;
use chantier_core::report::calendar::month_grid;
use chantier_core::report::dashboard::format_budget;
use chantier_core::report::finance::ProjectFilter;
use chantier_core::{CoreConfig, DemoSeed, Session};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn demo() -> Session {
    Session::from_seed(&DemoSeed::new(date(2024, 10, 14)), CoreConfig::default()).unwrap()
}

#[test]
fn project_list_figures() {
    let session = demo();
    let counts: Vec<(ProjectStatus, usize)> = session
        .project_status_counts()
        .iter()
        .map(|bucket| (bucket.status, bucket.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            (ProjectStatus::Planning, 1),
            (ProjectStatus::InProgress, 1),
            (ProjectStatus::Completed, 1),
        ]
    );

    assert_eq!(session.project_progress("proj-1"), Some(33));
    assert_eq!(session.project_progress("proj-2"), Some(50));
    assert_eq!(session.project_progress("proj-3"), Some(100));
    assert_eq!(session.project_progress("proj-ghost"), None);

    assert_eq!(session.search_projects("ABIDJAN", None).len(), 1);
    assert_eq!(session.search_projects("", Some(ProjectStatus::Planning))[0].id, "proj-2");
    assert!(session.search_projects("fatou", Some(ProjectStatus::Completed)).is_empty());
    assert_eq!(format_budget(32_760_000_000, "FCFA"), "32.8 Mrd FCFA");
}

#[test]
fn planning_grid_and_due_tasks() {
    let session = demo();
    let grid = month_grid(2024, 9).unwrap();
    assert_eq!(grid.len(), 42);
    assert!(grid.iter().any(|day| day.date == date(2024, 9, 15) && day.is_current_month));

    let due = session.tasks_due_on(date(2024, 9, 15), None);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].task.id, "task-1-1");
    assert_eq!(due[0].project_id, "proj-1");

    let hidden = vec!["proj-2".to_string()];
    assert!(session.tasks_due_on(date(2024, 9, 15), Some(&hidden)).is_empty());
}

#[test]
fn member_team_lookup_and_roster() {
    let session = demo();
    let ids: Vec<&str> = session
        .teams_of_member("tm-2")
        .iter()
        .map(|team| team.id.as_str())
        .collect();
    assert_eq!(ids, vec!["team-1"]);
    assert_eq!(session.teams_of_member("tm-1")[0].id, "team-2");

    let roster = session.team_roster("team-1").unwrap();
    assert_eq!(roster.leader.unwrap().id, "tm-2");
    assert_eq!(roster.members.len(), 2);
    assert_eq!(roster.project.unwrap().id, "proj-1");
}

#[test]
fn finance_views_respect_project_scope() {
    let session = demo();
    let all = session.financial_summary(&ProjectFilter::All);
    let income: u64 = session
        .financial_records()
        .iter()
        .filter(|record| record.kind == TransactionType::Income)
        .map(|record| record.amount)
        .sum();
    assert_eq!(all.income, income);
    assert_eq!(all.net, income as i64 - all.expense as i64);

    let scoped = session.financial_summary(&ProjectFilter::Only("proj-ghost".to_string()));
    assert_eq!(scoped.income, 0);
    assert_eq!(scoped.expense, 0);
    assert_eq!(session.invoices_for(&ProjectFilter::Only("proj-1".to_string())).len(), 2);

    let breakdown_total: u64 = session
        .expense_breakdown(&ProjectFilter::All)
        .iter()
        .map(|bucket| bucket.amount)
        .sum();
    assert_eq!(breakdown_total, all.expense);
}
