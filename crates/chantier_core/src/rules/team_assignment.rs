//! At most one team per project.

use crate::model::project::Project;
use crate::model::team::{Team, TeamId};
use crate::model::{Entity, EntityKind};
use crate::rules::RuleResult;
use crate::store::{EntityStore, StoreError};

/// Assigns `team_id` to `project_id`, releasing any other holder.
///
/// Returns the IDs of teams that lost the project.
///
/// # Errors
/// - `NotFound(Team)` / `NotFound(Project)`; nothing changes in either case.
pub fn assign_team_to_project(
    teams: &mut EntityStore<Team>,
    projects: &EntityStore<Project>,
    team_id: &str,
    project_id: &str,
) -> RuleResult<Vec<TeamId>> {
    if !teams.contains(team_id) {
        return Err(StoreError::not_found(Team::KIND, team_id).into());
    }
    if !projects.contains(project_id) {
        return Err(StoreError::not_found(EntityKind::Project, project_id).into());
    }

    let released = enforce_exclusive_claim(teams, team_id, project_id);
    if let Some(team) = teams.iter_mut().find(|team| team.id == team_id) {
        team.project_id = Some(project_id.to_string());
    }
    log::info!("event=team_assign module=rules status=ok released={}", released.len());
    Ok(released)
}

/// Clears the team's project. Always permitted for a known team.
pub fn unassign_team(teams: &mut EntityStore<Team>, team_id: &str) -> RuleResult<()> {
    let team = teams
        .iter_mut()
        .find(|team| team.id == team_id)
        .ok_or_else(|| StoreError::not_found(Team::KIND, team_id))?;
    team.project_id = None;
    Ok(())
}

/// Clears `project_id` on every team holding it.
pub fn release_project(teams: &mut EntityStore<Team>, project_id: &str) -> Vec<TeamId> {
    let mut released = Vec::new();
    for team in teams.iter_mut() {
        if team.is_assigned_to(project_id) {
            team.project_id = None;
            released.push(team.id.clone());
        }
    }
    released
}

/// Clears `project_id` on every team other than `claimant`.
///
/// Called after a team is created or updated with a project so the
/// claimant keeps the project exclusively.
pub fn enforce_exclusive_claim(
    teams: &mut EntityStore<Team>,
    claimant: &str,
    project_id: &str,
) -> Vec<TeamId> {
    let mut released = Vec::new();
    for team in teams.iter_mut() {
        if team.id != claimant && team.is_assigned_to(project_id) {
            team.project_id = None;
            released.push(team.id.clone());
        }
    }
    released
}

pub fn team_for_project<'a>(teams: &'a EntityStore<Team>, project_id: &str) -> Option<&'a Team> {
    teams.iter().find(|team| team.is_assigned_to(project_id))
}
