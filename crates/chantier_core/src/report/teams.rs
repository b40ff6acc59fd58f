//! Resolved team rosters.

use crate::model::project::Project;
use crate::model::team::{Team, TeamMember};
use serde::Serialize;

/// A team with its references resolved. Unknown IDs are skipped or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoster<'a> {
    pub team: &'a Team,
    pub leader: Option<&'a TeamMember>,
    pub members: Vec<&'a TeamMember>,
    pub project: Option<&'a Project>,
}

pub fn team_roster<'a>(
    team: &'a Team,
    members: &'a [TeamMember],
    projects: &'a [Project],
) -> TeamRoster<'a> {
    let find_member = |id: &str| members.iter().find(|member| member.id == id);
    TeamRoster {
        team,
        leader: find_member(&team.leader_id),
        members: team
            .member_ids
            .iter()
            .filter_map(|id| find_member(id))
            .collect(),
        project: team
            .project_id
            .as_deref()
            .and_then(|id| projects.iter().find(|project| project.id == id)),
    }
}

/// Teams the member leads or belongs to.
pub fn teams_for_member<'a>(teams: &'a [Team], member_id: &str) -> Vec<&'a Team> {
    teams.iter().filter(|team| team.includes(member_id)).collect()
}
