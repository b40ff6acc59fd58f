//! Team, member and assignment use cases.

use crate::id::{new_id, MEMBER_PREFIX, TEAM_PREFIX};
use crate::model::team::{MemberDraft, MemberId, MemberPatch, Team, TeamDraft, TeamId, TeamMember, TeamPatch};
use crate::model::EntityKind;
use crate::report::teams::{team_roster, teams_for_member, TeamRoster};
use crate::rules::cascade::{self, MemberRemoval};
use crate::rules::team_assignment;
use crate::session::{logged, Session, SessionError, SessionResult};
use crate::store::InsertAt;

impl Session {
    pub fn create_member(&mut self, draft: MemberDraft) -> SessionResult<&TeamMember> {
        let member = draft.into_member(new_id(MEMBER_PREFIX));
        let result = self
            .members
            .insert(member, InsertAt::Front)
            .map_err(SessionError::from);
        logged("member_create", result)
    }

    pub fn update_member(&mut self, member_id: &str, patch: &MemberPatch) -> SessionResult<&TeamMember> {
        let result = self
            .members
            .update(member_id, |member| patch.apply(member))
            .map_err(SessionError::from);
        logged("member_update", result)
    }

    /// Deletes a member and strips it from every roster.
    pub fn delete_member(&mut self, member_id: &str) -> SessionResult<MemberRemoval> {
        let result = cascade::remove_member(&mut self.members, &mut self.teams, member_id)
            .map_err(SessionError::from);
        logged("member_delete", result)
    }

    /// Creates a team; a team created with a project takes it exclusively.
    pub fn create_team(&mut self, draft: TeamDraft) -> SessionResult<&Team> {
        let result = self.insert_team(draft);
        logged("team_create", result)
    }

    fn insert_team(&mut self, draft: TeamDraft) -> SessionResult<&Team> {
        self.check_member_refs(Some(&draft.leader_id), Some(&draft.member_ids))?;
        if let Some(project_id) = &draft.project_id {
            self.projects.require(project_id)?;
        }
        let team = draft.into_team(new_id(TEAM_PREFIX));
        let team_id = team.id.clone();
        let project_id = team.project_id.clone();
        self.teams.insert(team, InsertAt::Back)?;
        if let Some(project_id) = project_id {
            team_assignment::enforce_exclusive_claim(&mut self.teams, &team_id, &project_id);
        }
        Ok(self.teams.require(&team_id)?)
    }

    /// Updates a team; setting a project releases it from other teams.
    pub fn update_team(&mut self, team_id: &str, patch: &TeamPatch) -> SessionResult<&Team> {
        let result = self.apply_team_patch(team_id, patch);
        logged("team_update", result)
    }

    fn apply_team_patch(&mut self, team_id: &str, patch: &TeamPatch) -> SessionResult<&Team> {
        let current = self.teams.require(team_id)?;
        // Only references the patch changes are checked; a deleted leader may stay.
        let new_leader = patch.leader_id.as_ref().filter(|id| **id != current.leader_id);
        let new_members: Vec<MemberId> = patch
            .member_ids
            .iter()
            .flatten()
            .filter(|id| !current.member_ids.contains(id))
            .cloned()
            .collect();
        let moved_to = match &patch.project_id {
            Some(Some(project_id)) if current.project_id.as_ref() != Some(project_id) => Some(project_id),
            _ => None,
        };
        self.check_member_refs(new_leader, Some(&new_members))?;
        if let Some(project_id) = moved_to {
            self.projects.require(project_id)?;
        }
        let updated = self.teams.update(team_id, |team| patch.apply(team))?;
        if let Some(project_id) = updated.project_id.clone() {
            team_assignment::enforce_exclusive_claim(&mut self.teams, team_id, &project_id);
        }
        Ok(self.teams.require(team_id)?)
    }

    pub fn delete_team(&mut self, team_id: &str) -> SessionResult<Team> {
        let result = self.teams.remove(team_id).map_err(SessionError::from);
        logged("team_delete", result)
    }

    /// Assigns the team to the project, returning the teams that lost it.
    pub fn assign_team(&mut self, team_id: &str, project_id: &str) -> SessionResult<Vec<TeamId>> {
        let result = team_assignment::assign_team_to_project(
            &mut self.teams,
            &self.projects,
            team_id,
            project_id,
        )
        .map_err(SessionError::from);
        logged("team_assign", result)
    }

    pub fn unassign_team(&mut self, team_id: &str) -> SessionResult<()> {
        let result = team_assignment::unassign_team(&mut self.teams, team_id).map_err(SessionError::from);
        logged("team_unassign", result)
    }

    pub fn team_for_project(&self, project_id: &str) -> Option<&Team> {
        team_assignment::team_for_project(&self.teams, project_id)
    }

    pub fn team_roster(&self, team_id: &str) -> Option<TeamRoster<'_>> {
        self.teams
            .get(team_id)
            .map(|team| team_roster(team, self.members.list(), self.projects.list()))
    }

    /// Teams the member leads or belongs to.
    pub fn teams_of_member(&self, member_id: &str) -> Vec<&Team> {
        teams_for_member(self.teams.list(), member_id)
    }

    fn check_member_refs(
        &self,
        leader_id: Option<&MemberId>,
        member_ids: Option<&Vec<MemberId>>,
    ) -> SessionResult<()> {
        let referenced = leader_id
            .into_iter()
            .chain(member_ids.into_iter().flatten());
        for id in referenced {
            if !self.members.contains(id) {
                return Err(SessionError::not_found(EntityKind::TeamMember, id.as_str()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::project::{ProjectDraft, ProjectStatus};
    use crate::model::team::{MemberDraft, TeamColor, TeamDraft, TeamPatch};
    use crate::model::EntityKind;
    use crate::session::{Session, SessionError};
    use chrono::NaiveDate;

    fn member(session: &mut Session, name: &str) -> String {
        session
            .create_member(MemberDraft {
                name: name.to_string(),
                role: "Maçon".to_string(),
                email: format!("{}@chantier.ci", name.to_lowercase()),
                phone: "+225 07 00 00 00".to_string(),
                avatar_url: None,
            })
            .unwrap()
            .id
            .clone()
    }

    fn project(session: &mut Session, name: &str) -> String {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        session
            .create_project(ProjectDraft {
                name: name.to_string(),
                address: "Abidjan".to_string(),
                start_date: start,
                end_date: start,
                status: ProjectStatus::Planning,
                manager: "Awa".to_string(),
                budget: 0,
                featured_image: None,
            })
            .unwrap()
            .id
            .clone()
    }

    fn team_draft(leader: &str, project_id: Option<&str>) -> TeamDraft {
        TeamDraft {
            name: "Gros œuvre".to_string(),
            leader_id: leader.to_string(),
            member_ids: vec![leader.to_string()],
            project_id: project_id.map(str::to_string),
            color: TeamColor::default(),
        }
    }

    #[test]
    fn creating_team_with_taken_project_claims_it() {
        let mut session = Session::default();
        let leader = member(&mut session, "Awa");
        let site = project(&mut session, "Tour A");
        let first = session.create_team(team_draft(&leader, Some(&site))).unwrap().id.clone();
        let second = session.create_team(team_draft(&leader, Some(&site))).unwrap().id.clone();

        assert_eq!(session.team(&first).unwrap().project_id, None);
        assert_eq!(session.team_for_project(&site).unwrap().id, second);
        assert!(session.team(&second).unwrap().member_ids.is_empty());
    }

    #[test]
    fn unknown_references_are_rejected() {
        let mut session = Session::default();
        let err = session.create_team(team_draft("tm-ghost", None)).unwrap_err();
        assert!(matches!(err, SessionError::NotFound { kind: EntityKind::TeamMember, .. }));

        let leader = member(&mut session, "Awa");
        let err = session
            .create_team(team_draft(&leader, Some("proj-ghost")))
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound { kind: EntityKind::Project, .. }));
        assert!(session.teams().is_empty());
    }

    #[test]
    fn patch_to_project_releases_previous_holder() {
        let mut session = Session::default();
        let leader = member(&mut session, "Awa");
        let site = project(&mut session, "Tour A");
        let holder = session.create_team(team_draft(&leader, Some(&site))).unwrap().id.clone();
        let other = session.create_team(team_draft(&leader, None)).unwrap().id.clone();

        let patch = TeamPatch {
            project_id: Some(Some(site.clone())),
            ..TeamPatch::default()
        };
        session.update_team(&other, &patch).unwrap();

        assert_eq!(session.team(&holder).unwrap().project_id, None);
        assert_eq!(session.team(&other).unwrap().project_id.as_deref(), Some(site.as_str()));
    }

    #[test]
    fn roster_skips_deleted_leader() {
        let mut session = Session::default();
        let leader = member(&mut session, "Awa");
        let worker = member(&mut session, "Koffi");
        let mut draft = team_draft(&leader, None);
        draft.member_ids = vec![worker.clone()];
        let team_id = session.create_team(draft).unwrap().id.clone();

        session.delete_member(&leader).unwrap();
        let roster = session.team_roster(&team_id).unwrap();
        assert!(roster.leader.is_none());
        assert_eq!(roster.members.len(), 1);
        assert_eq!(roster.team.leader_id, leader);
    }
}
