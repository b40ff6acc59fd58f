use chantier_core::model::finance::{
    FinancialRecordDraft, TransactionCategory, TransactionStatus, TransactionType,
};
use chantier_core::model::project::{ProjectDraft, ProjectStatus, TaskDraft};
use chantier_core::model::team::{MemberDraft, TeamColor, TeamDraft};
use chantier_core::report::finance::{project_label, MISSING_PROJECT_LABEL};
use chantier_core::{
    Command, ConfirmationRequest, Dispatched, Dispatcher, EntityKind, FormSubmission, Session,
    SessionError, ToastKind, ToastQueue,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add_project(session: &mut Session, name: &str) -> String {
    session
        .create_project(ProjectDraft {
            name: name.to_string(),
            address: "Abidjan".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            status: ProjectStatus::InProgress,
            manager: "Jean Dupont".to_string(),
            budget: 100_000_000,
            featured_image: None,
        })
        .unwrap()
        .id
        .clone()
}

fn add_member(session: &mut Session, name: &str) -> String {
    session
        .create_member(MemberDraft {
            name: name.to_string(),
            role: "Chef d'équipe".to_string(),
            email: format!("{}@chantier.ci", name.to_lowercase().replace(' ', ".")),
            phone: "+225 07 00 00 00".to_string(),
            avatar_url: None,
        })
        .unwrap()
        .id
        .clone()
}

fn add_team(session: &mut Session, name: &str, leader: &str, members: &[&str]) -> String {
    session
        .create_team(TeamDraft {
            name: name.to_string(),
            leader_id: leader.to_string(),
            member_ids: members.iter().map(|id| id.to_string()).collect(),
            project_id: None,
            color: TeamColor::Emerald,
        })
        .unwrap()
        .id
        .clone()
}

fn holders(session: &Session, project_id: &str) -> usize {
    session
        .teams()
        .iter()
        .filter(|team| team.is_assigned_to(project_id))
        .count()
}

#[test]
fn at_most_one_team_per_project_across_operations() {
    let mut session = Session::default();
    let leader = add_member(&mut session, "Awa Koné");
    let site_a = add_project(&mut session, "Tour A");
    let site_b = add_project(&mut session, "Tour B");
    let teams: Vec<String> = (0..3)
        .map(|i| add_team(&mut session, &format!("Équipe {i}"), &leader, &[]))
        .collect();

    for (team, site) in [
        (&teams[0], &site_a),
        (&teams[1], &site_a),
        (&teams[2], &site_b),
        (&teams[0], &site_b),
        (&teams[2], &site_a),
    ] {
        session.assign_team(team, site).unwrap();
        assert!(holders(&session, &site_a) <= 1);
        assert!(holders(&session, &site_b) <= 1);
    }
    assert_eq!(session.team_for_project(&site_a).unwrap().id, teams[2]);
    assert_eq!(session.team_for_project(&site_b).unwrap().id, teams[0]);
}

#[test]
fn reassigning_a_project_moves_it_between_teams() {
    let mut session = Session::default();
    let leader = add_member(&mut session, "Awa Koné");
    let site = add_project(&mut session, "Pont de Bouaké");
    let first = add_team(&mut session, "Gros œuvre", &leader, &[]);
    let second = add_team(&mut session, "Finitions", &leader, &[]);

    assert!(session.assign_team(&first, &site).unwrap().is_empty());
    let released = session.assign_team(&second, &site).unwrap();

    assert_eq!(released, vec![first.clone()]);
    assert_eq!(session.team(&first).unwrap().project_id, None);
    assert_eq!(session.team(&second).unwrap().project_id.as_deref(), Some(site.as_str()));

    session.unassign_team(&second).unwrap();
    assert!(session.team_for_project(&site).is_none());
}

#[test]
fn assigning_to_unknown_targets_changes_nothing() {
    let mut session = Session::default();
    let leader = add_member(&mut session, "Awa Koné");
    let site = add_project(&mut session, "Tour A");
    let team = add_team(&mut session, "Gros œuvre", &leader, &[]);
    session.assign_team(&team, &site).unwrap();
    let before = session.snapshot();

    let err = session.assign_team(&team, "proj-ghost").unwrap_err();
    assert!(matches!(err, SessionError::NotFound { kind: EntityKind::Project, .. }));
    let err = session.assign_team("team-ghost", &site).unwrap_err();
    assert!(matches!(err, SessionError::NotFound { kind: EntityKind::Team, .. }));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn deleting_a_project_releases_teams_and_keeps_ledger() {
    let mut session = Session::default();
    let leader = add_member(&mut session, "Awa Koné");
    let site = add_project(&mut session, "Tour A");
    let other = add_project(&mut session, "Tour B");
    session
        .add_task(&site, TaskDraft::new("Fondations", "Équipe A", date(2024, 3, 1)))
        .unwrap();
    let team = add_team(&mut session, "Gros œuvre", &leader, &[]);
    session.assign_team(&team, &site).unwrap();
    let record_id = session
        .create_financial_record(FinancialRecordDraft {
            project_id: site.clone(),
            date: date(2024, 3, 2),
            description: "Achat ciment".to_string(),
            amount: 1_200_000,
            kind: TransactionType::Expense,
            category: TransactionCategory::Material,
            status: TransactionStatus::Paid,
            reference: None,
        })
        .unwrap()
        .id
        .clone();

    let removal = session.delete_project(&site).unwrap();
    assert_eq!(removal.project.tasks.len(), 1);
    assert_eq!(removal.released_teams, vec![team.clone()]);

    assert!(session.teams().iter().all(|t| t.project_id.as_deref() != Some(site.as_str())));
    assert!(session.project(&other).is_some());

    let record = session
        .financial_records()
        .iter()
        .find(|record| record.id == record_id)
        .unwrap();
    assert_eq!(record.project_id, site);
    assert_eq!(project_label(session.projects(), &record.project_id), MISSING_PROJECT_LABEL);
}

#[test]
fn deleting_a_member_strips_rosters_but_keeps_leadership_reference() {
    let mut session = Session::default();
    let leader = add_member(&mut session, "Awa Koné");
    let worker = add_member(&mut session, "Koffi Yao");
    let team = add_team(&mut session, "Gros œuvre", &leader, &[&worker]);

    let removal = session.delete_member(&worker).unwrap();
    assert_eq!(removal.updated_teams, vec![team.clone()]);
    assert!(session.team(&team).unwrap().member_ids.is_empty());

    let removal = session.delete_member(&leader).unwrap();
    assert_eq!(removal.orphaned_leaderships, vec![team.clone()]);
    assert_eq!(session.team(&team).unwrap().leader_id, leader);
    assert!(session.team_roster(&team).unwrap().leader.is_none());
}

#[test]
fn team_form_edit_succeeds_after_its_leader_is_deleted() {
    let mut session = Session::default();
    let leader = add_member(&mut session, "Awa Koné");
    let worker = add_member(&mut session, "Koffi Yao");
    let team = add_team(&mut session, "Alpha", &leader, &[&worker]);
    session.delete_member(&leader).unwrap();

    let mut dispatcher = Dispatcher::new(ToastQueue::default(), |_: &ConfirmationRequest| true);
    let draft = TeamDraft {
        name: "Alpha renamed".to_string(),
        leader_id: leader.clone(),
        member_ids: vec![worker.clone()],
        project_id: None,
        color: TeamColor::Emerald,
    };
    let outcome = dispatcher
        .dispatch(&mut session, Command::SubmitTeam(FormSubmission::Update(team.clone(), draft)))
        .unwrap();
    assert!(matches!(outcome, Dispatched::Applied { .. }));

    let stored = session.team(&team).unwrap();
    assert_eq!(stored.name, "Alpha renamed");
    assert_eq!(stored.leader_id, leader);
    assert_eq!(stored.member_ids, vec![worker]);
    let (toasts, _) = dispatcher.into_parts();
    assert_eq!(toasts.active()[0].kind, ToastKind::Success);
}

#[test]
fn team_edit_still_rejects_a_newly_named_unknown_member() {
    let mut session = Session::default();
    let leader = add_member(&mut session, "Awa Koné");
    let team = add_team(&mut session, "Alpha", &leader, &[]);

    let err = session
        .update_team(
            &team,
            &TeamDraft {
                name: "Alpha".to_string(),
                leader_id: leader.clone(),
                member_ids: vec!["mem-ghost".to_string()],
                project_id: None,
                color: TeamColor::Emerald,
            }
            .into(),
        )
        .unwrap_err();
    assert!(matches!(err, SessionError::NotFound { kind: EntityKind::TeamMember, .. }));
    assert!(session.team(&team).unwrap().member_ids.is_empty());
}
