//! Project, task, daily log and document use cases.

use crate::id::{new_id, DAILY_LOG_PREFIX, DOCUMENT_PREFIX, PROJECT_PREFIX, TASK_PREFIX};
use crate::model::project::{
    DailyLogDraft, Document, DocumentDraft, DocumentId, DocumentKind, Project, ProjectDraft,
    ProjectId, ProjectPatch, ProjectStatus, Task, TaskDraft, TaskId, TaskPatch,
};
use crate::model::validation::require_text;
use crate::model::EntityKind;
use crate::report::calendar;
use crate::report::dashboard::{self, DashboardSummary, StatusCount};
use crate::report::TaskWithProject;
use crate::rules::cascade::{self, ProjectRemoval};
use crate::session::{logged, Session, SessionError, SessionResult};
use crate::store::InsertAt;
use chrono::NaiveDate;

/// Generated report kept as a project document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    /// Short type label, e.g. `Journalier`.
    pub report_type: String,
    pub period_start: NaiveDate,
    /// Markdown body.
    pub content: String,
    pub saved_on: NaiveDate,
}

impl Session {
    pub fn create_project(&mut self, draft: ProjectDraft) -> SessionResult<&Project> {
        let project = draft.into_project(new_id(PROJECT_PREFIX));
        let result = self
            .projects
            .insert(project, InsertAt::Front)
            .map_err(SessionError::from);
        logged("project_create", result)
    }

    pub fn update_project(&mut self, project_id: &str, patch: &ProjectPatch) -> SessionResult<&Project> {
        let result = self
            .projects
            .update(project_id, |project| patch.apply(project))
            .map_err(SessionError::from);
        logged("project_update", result)
    }

    /// Deletes a project with its tasks, logs and documents, releasing
    /// any team assigned to it.
    pub fn delete_project(&mut self, project_id: &str) -> SessionResult<ProjectRemoval> {
        let result = cascade::remove_project(&mut self.projects, &mut self.teams, project_id)
            .map_err(SessionError::from);
        logged("project_delete", result)
    }

    pub fn add_task(&mut self, project_id: &str, draft: TaskDraft) -> SessionResult<TaskId> {
        let task = draft.into_task(new_id(TASK_PREFIX));
        let task_id = task.id.clone();
        let result = self
            .projects
            .update(project_id, |project| project.tasks.push(task))
            .map(|_| task_id)
            .map_err(SessionError::from);
        logged("task_create", result)
    }

    pub fn update_task(
        &mut self,
        project_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> SessionResult<&Task> {
        let result = self
            .projects
            .try_update(project_id, |project| {
                let task = project
                    .tasks
                    .iter_mut()
                    .find(|task| task.id == task_id)
                    .ok_or_else(|| SessionError::not_found(EntityKind::Task, task_id))?;
                patch.apply(task);
                Ok::<(), SessionError>(())
            })
            .and_then(|project| {
                project
                    .task(task_id)
                    .ok_or_else(|| SessionError::not_found(EntityKind::Task, task_id))
            });
        logged("task_update", result)
    }

    pub fn delete_task(&mut self, project_id: &str, task_id: &str) -> SessionResult<Task> {
        let mut removed = None;
        let result = self
            .projects
            .try_update(project_id, |project| {
                let index = project
                    .tasks
                    .iter()
                    .position(|task| task.id == task_id)
                    .ok_or_else(|| SessionError::not_found(EntityKind::Task, task_id))?;
                removed = Some(project.tasks.remove(index));
                Ok::<(), SessionError>(())
            })
            .and_then(|_| removed.ok_or_else(|| SessionError::not_found(EntityKind::Task, task_id)));
        logged("task_delete", result)
    }

    /// Prepends a daily log to the project journal.
    pub fn add_daily_log(&mut self, project_id: &str, draft: DailyLogDraft) -> SessionResult<String> {
        let log_entry = draft.into_log(new_id(DAILY_LOG_PREFIX));
        let log_id = log_entry.id.clone();
        let result = self
            .projects
            .update(project_id, |project| project.daily_logs.insert(0, log_entry))
            .map(|_| log_id)
            .map_err(SessionError::from);
        logged("daily_log_create", result)
    }

    pub fn add_document(&mut self, project_id: &str, draft: DocumentDraft) -> SessionResult<DocumentId> {
        let result = require_text("name", &draft.name)
            .map_err(SessionError::from)
            .and_then(|_| self.push_document(project_id, draft.into_document(new_id(DOCUMENT_PREFIX))));
        logged("document_create", result)
    }

    pub fn delete_document(&mut self, project_id: &str, document_id: &str) -> SessionResult<Document> {
        let mut removed = None;
        let result = self
            .projects
            .try_update(project_id, |project| {
                let index = project
                    .documents
                    .iter()
                    .position(|document| document.id == document_id)
                    .ok_or_else(|| SessionError::not_found(EntityKind::Document, document_id))?;
                removed = Some(project.documents.remove(index));
                Ok::<(), SessionError>(())
            })
            .and_then(|_| {
                removed.ok_or_else(|| SessionError::not_found(EntityKind::Document, document_id))
            });
        logged("document_delete", result)
    }

    /// Stores generated Markdown as a project document.
    ///
    /// The document is named `Rapport_{type}_{start}_{project}.md`, with
    /// whitespace in the project name replaced by `_`.
    pub fn save_report(&mut self, project_id: &str, report: SavedReport) -> SessionResult<DocumentId> {
        let result = self.build_report_document(project_id, report).and_then(|document| {
            self.push_document(project_id, document)
        });
        logged("report_save", result)
    }

    fn build_report_document(&self, project_id: &str, report: SavedReport) -> SessionResult<Document> {
        require_text("content", &report.content)?;
        require_text("report_type", &report.report_type)?;
        let project = self.projects.require(project_id)?;
        let project_slug = project.name.split_whitespace().collect::<Vec<_>>().join("_");
        let name = format!(
            "Rapport_{}_{}_{}.md",
            report.report_type.trim(),
            report.period_start.format("%Y-%m-%d"),
            project_slug
        );
        Ok(Document {
            id: new_id(DOCUMENT_PREFIX),
            name,
            kind: DocumentKind::Other,
            url: markdown_data_url(&report.content),
            uploaded_at: report.saved_on,
            size: Some(format!("{:.2} KB", report.content.len() as f64 / 1024.0)),
        })
    }

    fn push_document(&mut self, project_id: &str, document: Document) -> SessionResult<DocumentId> {
        let document_id = document.id.clone();
        self.projects
            .update(project_id, |project| project.documents.insert(0, document))
            .map(|_| document_id)
            .map_err(SessionError::from)
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        dashboard::dashboard_summary(self.projects.list())
    }

    /// Pending tasks across projects, soonest first, capped by config.
    pub fn upcoming_tasks(&self) -> Vec<TaskWithProject<'_>> {
        dashboard::upcoming_tasks(self.projects.list(), self.config.upcoming_task_limit)
    }

    pub fn project_status_counts(&self) -> Vec<StatusCount> {
        dashboard::project_status_counts(self.projects.list())
    }

    /// `None` for an unknown project.
    pub fn project_progress(&self, project_id: &str) -> Option<u8> {
        self.projects.get(project_id).map(dashboard::project_progress)
    }

    pub fn search_projects(&self, search: &str, status: Option<ProjectStatus>) -> Vec<&Project> {
        dashboard::filter_projects(self.projects.list(), search, status)
    }

    /// Planning view: tasks due on `date`, optionally only for some projects.
    pub fn tasks_due_on(&self, date: NaiveDate, visible_projects: Option<&[ProjectId]>) -> Vec<TaskWithProject<'_>> {
        calendar::tasks_on(self.projects.list(), date, visible_projects)
    }
}

fn markdown_data_url(content: &str) -> String {
    let mut url = String::from("data:text/markdown;charset=utf-8,");
    for byte in content.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            url.push(byte as char);
        } else {
            url.push_str(&format!("%{byte:02X}"));
        }
    }
    url
}
