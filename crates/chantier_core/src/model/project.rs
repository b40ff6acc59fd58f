//! Project aggregate: a construction site with its owned tasks, logs and
//! documents.
//!
//! # Invariants
//! - `end_date` is never earlier than `start_date`.
//! - Tasks, daily logs and documents have no lifecycle outside their project.
//! - A task `end_time` requires a `start_time` and must not precede it.

use crate::model::time::TimeOfDay;
use crate::model::validation::{require_date_range, require_text, require_time_window};
use crate::model::{Entity, EntityKind, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ProjectId = String;
pub type TaskId = String;
pub type DailyLogId = String;
pub type DocumentId = String;

/// Site lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Planification")]
    Planning,
    #[serde(rename = "En Cours")]
    InProgress,
    #[serde(rename = "Terminé")]
    Completed,
    #[serde(rename = "En Attente")]
    OnHold,
}

impl ProjectStatus {
    /// All statuses in display order.
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
    ];

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planification",
            Self::InProgress => "En Cours",
            Self::Completed => "Terminé",
            Self::OnHold => "En Attente",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "À Faire")]
    ToDo,
    #[serde(rename = "En Cours")]
    InProgress,
    #[serde(rename = "Terminé")]
    Done,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::ToDo => "À Faire",
            Self::InProgress => "En Cours",
            Self::Done => "Terminé",
        }
    }
}

/// Planning category shown as a colored chip on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    Meeting,
    Work,
    Review,
    Other,
    Team,
    Planning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Free-text assignee (person, crew or subcontractor).
    pub assigned_to: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Meeting link or room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Task {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_time_window(self.start_time, self.end_time, true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub id: DailyLogId,
    pub date: NaiveDate,
    pub notes: String,
    pub author: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Image,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub url: String,
    pub uploaded_at: NaiveDate,
    /// Human-readable size label such as `2.4 MB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    /// Free-text manager name.
    pub manager: String,
    pub budget: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub daily_logs: Vec<DailyLog>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Project {
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn count_tasks(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|task| task.status == status).count()
    }
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("address", &self.address)?;
        require_text("manager", &self.manager)?;
        require_date_range(self.start_date, self.end_date)?;
        self.tasks.iter().try_for_each(Task::validate)
    }
}

/// Create-form payload for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    pub address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    pub manager: String,
    pub budget: u64,
    #[serde(default)]
    pub featured_image: Option<String>,
}

impl ProjectDraft {
    /// Builds a project with empty task, log and document lists.
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            address: self.address,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            manager: self.manager,
            budget: self.budget,
            featured_image: self.featured_image,
            tasks: Vec::new(),
            daily_logs: Vec::new(),
            documents: Vec::new(),
        }
    }
}

/// Partial project update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
    pub manager: Option<String>,
    pub budget: Option<u64>,
    pub featured_image: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn apply(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(address) = &self.address {
            project.address = address.clone();
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            project.end_date = end_date;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(manager) = &self.manager {
            project.manager = manager.clone();
        }
        if let Some(budget) = self.budget {
            project.budget = budget;
        }
        if let Some(featured_image) = &self.featured_image {
            project.featured_image = featured_image.clone();
        }
    }
}

impl From<ProjectDraft> for ProjectPatch {
    fn from(draft: ProjectDraft) -> Self {
        Self {
            name: Some(draft.name),
            address: Some(draft.address),
            start_date: Some(draft.start_date),
            end_date: Some(draft.end_date),
            status: Some(draft.status),
            manager: Some(draft.manager),
            budget: Some(draft.budget),
            featured_image: Some(draft.featured_image),
        }
    }
}

/// Create-form payload for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub assigned_to: String,
    pub due_date: NaiveDate,
    /// Defaults to `ToDo` when omitted.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    #[serde(default)]
    pub category: Option<TaskCategory>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, assigned_to: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            assigned_to: assigned_to.into(),
            due_date,
            status: None,
            start_time: None,
            end_time: None,
            category: None,
            description: None,
            location: None,
        }
    }

    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            assigned_to: self.assigned_to,
            due_date: self.due_date,
            status: self.status.unwrap_or_default(),
            start_time: self.start_time,
            end_time: self.end_time,
            category: self.category,
            description: self.description,
            location: self.location,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub start_time: Option<Option<TimeOfDay>>,
    pub end_time: Option<Option<TimeOfDay>>,
    pub category: Option<Option<TaskCategory>>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
}

impl TaskPatch {
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            task.assigned_to = assigned_to.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(start_time) = self.start_time {
            task.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            task.end_time = end_time;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(location) = &self.location {
            task.location = location.clone();
        }
    }
}

impl From<TaskDraft> for TaskPatch {
    fn from(draft: TaskDraft) -> Self {
        Self {
            title: Some(draft.title),
            assigned_to: Some(draft.assigned_to),
            due_date: Some(draft.due_date),
            status: draft.status,
            start_time: Some(draft.start_time),
            end_time: Some(draft.end_time),
            category: Some(draft.category),
            description: Some(draft.description),
            location: Some(draft.location),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogDraft {
    pub date: NaiveDate,
    pub notes: String,
    pub author: String,
}

impl DailyLogDraft {
    pub fn into_log(self, id: DailyLogId) -> DailyLog {
        DailyLog {
            id,
            date: self.date,
            notes: self.notes,
            author: self.author,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub url: String,
    pub uploaded_at: NaiveDate,
    #[serde(default)]
    pub size: Option<String>,
}

impl DocumentDraft {
    pub fn into_document(self, id: DocumentId) -> Document {
        Document {
            id,
            name: self.name,
            kind: self.kind,
            url: self.url,
            uploaded_at: self.uploaded_at,
            size: self.size,
        }
    }
}
