//! Teams and the members they reference.
//!
//! # Invariants
//! - `Team::member_ids` never contains the leader and never repeats an ID.
//! - At most one team holds a given `project_id`; enforced by
//!   `crate::rules::team_assignment`, not by this module.

use crate::model::project::ProjectId;
use crate::model::validation::{require_email, require_text};
use crate::model::{Entity, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

pub type TeamId = String;
pub type MemberId = String;

/// Color tag used to tell teams apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    #[default]
    Indigo,
    Emerald,
    Amber,
    Rose,
    Sky,
    Violet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Entity for TeamMember {
    const KIND: EntityKind = EntityKind::TeamMember;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_email(&self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub leader_id: MemberId,
    pub member_ids: Vec<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub color: TeamColor,
}

impl Team {
    /// Whether `member_id` leads or belongs to this team.
    pub fn includes(&self, member_id: &str) -> bool {
        self.leader_id == member_id || self.member_ids.iter().any(|id| id == member_id)
    }

    pub fn is_assigned_to(&self, project_id: &str) -> bool {
        self.project_id.as_deref() == Some(project_id)
    }
}

impl Entity for Team {
    const KIND: EntityKind = EntityKind::Team;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("leader_id", &self.leader_id)
    }
}

/// Drops the leader and duplicate IDs while keeping first-seen order.
pub fn normalize_member_ids(leader_id: &str, member_ids: &[MemberId]) -> Vec<MemberId> {
    let mut normalized: Vec<MemberId> = Vec::with_capacity(member_ids.len());
    for id in member_ids {
        if id != leader_id && !normalized.contains(id) {
            normalized.push(id.clone());
        }
    }
    normalized
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDraft {
    pub name: String,
    pub leader_id: MemberId,
    #[serde(default)]
    pub member_ids: Vec<MemberId>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub color: TeamColor,
}

impl TeamDraft {
    pub fn into_team(self, id: TeamId) -> Team {
        let member_ids = normalize_member_ids(&self.leader_id, &self.member_ids);
        Team {
            id,
            name: self.name,
            leader_id: self.leader_id,
            member_ids,
            project_id: self.project_id,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub leader_id: Option<MemberId>,
    pub member_ids: Option<Vec<MemberId>>,
    pub project_id: Option<Option<ProjectId>>,
    pub color: Option<TeamColor>,
}

impl TeamPatch {
    /// Merges the patch and re-normalizes the member set.
    pub fn apply(&self, team: &mut Team) {
        if let Some(name) = &self.name {
            team.name = name.clone();
        }
        if let Some(leader_id) = &self.leader_id {
            team.leader_id = leader_id.clone();
        }
        if let Some(member_ids) = &self.member_ids {
            team.member_ids = member_ids.clone();
        }
        if let Some(project_id) = &self.project_id {
            team.project_id = project_id.clone();
        }
        if let Some(color) = self.color {
            team.color = color;
        }
        team.member_ids = normalize_member_ids(&team.leader_id, &team.member_ids);
    }
}

impl From<TeamDraft> for TeamPatch {
    fn from(draft: TeamDraft) -> Self {
        Self {
            name: Some(draft.name),
            leader_id: Some(draft.leader_id),
            member_ids: Some(draft.member_ids),
            project_id: Some(draft.project_id),
            color: Some(draft.color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl MemberDraft {
    pub fn into_member(self, id: MemberId) -> TeamMember {
        TeamMember {
            id,
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            avatar_url: self.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<Option<String>>,
}

impl MemberPatch {
    pub fn apply(&self, member: &mut TeamMember) {
        if let Some(name) = &self.name {
            member.name = name.clone();
        }
        if let Some(role) = &self.role {
            member.role = role.clone();
        }
        if let Some(email) = &self.email {
            member.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            member.phone = phone.clone();
        }
        if let Some(avatar_url) = &self.avatar_url {
            member.avatar_url = avatar_url.clone();
        }
    }
}

impl From<MemberDraft> for MemberPatch {
    fn from(draft: MemberDraft) -> Self {
        Self {
            name: Some(draft.name),
            role: Some(draft.role),
            email: Some(draft.email),
            phone: Some(draft.phone),
            avatar_url: Some(draft.avatar_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_member_ids, TeamColor, TeamDraft, TeamPatch};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn leader_and_duplicates_are_dropped_from_members() {
        let normalized = normalize_member_ids("tm-2", &ids(&["tm-4", "tm-2", "tm-4", "tm-5"]));
        assert_eq!(normalized, ids(&["tm-4", "tm-5"]));
    }

    #[test]
    fn changing_leader_through_patch_removes_it_from_members() {
        let mut team = TeamDraft {
            name: "Équipe Alpha".to_string(),
            leader_id: "tm-2".to_string(),
            member_ids: ids(&["tm-4", "tm-5"]),
            project_id: None,
            color: TeamColor::Indigo,
        }
        .into_team("team-x".to_string());

        TeamPatch {
            leader_id: Some("tm-4".to_string()),
            ..TeamPatch::default()
        }
        .apply(&mut team);

        assert_eq!(team.leader_id, "tm-4");
        assert_eq!(team.member_ids, ids(&["tm-5"]));
    }
}
