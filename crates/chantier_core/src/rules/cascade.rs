//! Deletion cascades.
//!
//! # Invariants
//! - Deleting a project releases every team assigned to it. Its tasks, logs
//!   and documents go with it.
//! - Financial records and invoices keep a dangling `project_id`; readers
//!   resolve it through `crate::report::finance::project_label`.
//! - Deleting a member strips it from every team roster. A deleted leader
//!   stays referenced by `leader_id`.

use crate::model::project::Project;
use crate::model::team::{Team, TeamId, TeamMember};
use crate::rules::team_assignment::release_project;
use crate::rules::RuleResult;
use crate::store::EntityStore;

/// Outcome of a project deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRemoval {
    pub project: Project,
    pub released_teams: Vec<TeamId>,
}

/// Outcome of a member deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRemoval {
    pub member: TeamMember,
    /// Teams whose roster lost the member.
    pub updated_teams: Vec<TeamId>,
    /// Teams still pointing at the member as leader.
    pub orphaned_leaderships: Vec<TeamId>,
}

pub fn remove_project(
    projects: &mut EntityStore<Project>,
    teams: &mut EntityStore<Team>,
    project_id: &str,
) -> RuleResult<ProjectRemoval> {
    let project = projects.remove(project_id)?;
    let released_teams = release_project(teams, project_id);
    log::info!(
        "event=project_delete module=rules status=ok released_teams={} tasks={}",
        released_teams.len(),
        project.tasks.len()
    );
    Ok(ProjectRemoval {
        project,
        released_teams,
    })
}

pub fn remove_member(
    members: &mut EntityStore<TeamMember>,
    teams: &mut EntityStore<Team>,
    member_id: &str,
) -> RuleResult<MemberRemoval> {
    let member = members.remove(member_id)?;
    let mut updated_teams = Vec::new();
    let mut orphaned_leaderships = Vec::new();
    for team in teams.iter_mut() {
        let before = team.member_ids.len();
        team.member_ids.retain(|id| id != member_id);
        if team.member_ids.len() != before {
            updated_teams.push(team.id.clone());
        }
        if team.leader_id == member_id {
            orphaned_leaderships.push(team.id.clone());
        }
    }
    log::info!(
        "event=member_delete module=rules status=ok updated_teams={} orphaned_leaderships={}",
        updated_teams.len(),
        orphaned_leaderships.len()
    );
    Ok(MemberRemoval {
        member,
        updated_teams,
        orphaned_leaderships,
    })
}
