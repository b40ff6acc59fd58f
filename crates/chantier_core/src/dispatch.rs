//! Command dispatch from the presentation layer.
//!
//! # Responsibility
//! - Turn UI intents into `Session` calls.
//! - Ask the confirmer before destructive commands.
//! - Report every outcome through the notifier.
//!
//! # Invariants
//! - A cancelled command leaves the session untouched and shows no toast.
//! - A failed command shows one error toast and returns the session error.

use crate::collab::{request_confirmation, ConfirmationRequest, Confirmer, Notifier, ToastKind};
use crate::model::clocking::{ClockingDraft, ClockingId};
use crate::model::finance::{
    FinancialRecordDraft, FinancialRecordId, InvoiceDraft, InvoiceId, InvoiceItemDraft,
    InvoiceItemId, InvoiceItemPatch,
};
use crate::model::inventory::{MaterialDraft, MaterialId, SupplierDraft, SupplierId};
use crate::model::project::{
    DailyLogDraft, DocumentDraft, DocumentId, ProjectDraft, ProjectId, TaskDraft, TaskId,
};
use crate::model::team::{MemberDraft, MemberId, TeamDraft, TeamId};
use crate::model::time::TimeOfDay;
use crate::session::{SavedReport, Session, SessionResult};
use chrono::NaiveDate;

/// A submitted form: a new record, or the full edited state of an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission<D> {
    Create(D),
    Update(String, D),
}

impl<D> FormSubmission<D> {
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(..))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SubmitProject(FormSubmission<ProjectDraft>),
    DeleteProject(ProjectId),
    SubmitTask {
        project_id: ProjectId,
        form: FormSubmission<TaskDraft>,
    },
    DeleteTask {
        project_id: ProjectId,
        task_id: TaskId,
    },
    AddDailyLog {
        project_id: ProjectId,
        draft: DailyLogDraft,
    },
    AddDocument {
        project_id: ProjectId,
        draft: DocumentDraft,
    },
    DeleteDocument {
        project_id: ProjectId,
        document_id: DocumentId,
    },
    SaveReport {
        project_id: ProjectId,
        report: SavedReport,
    },
    SubmitTeam(FormSubmission<TeamDraft>),
    DeleteTeam(TeamId),
    AssignTeam {
        team_id: TeamId,
        project_id: ProjectId,
    },
    UnassignTeam(TeamId),
    SubmitMember(FormSubmission<MemberDraft>),
    DeleteMember(MemberId),
    ClockIn {
        member_id: MemberId,
        date: NaiveDate,
        at: TimeOfDay,
    },
    ClockOut {
        member_id: MemberId,
        date: NaiveDate,
        at: TimeOfDay,
    },
    ResetClocking {
        member_id: MemberId,
        date: NaiveDate,
    },
    SubmitClocking(FormSubmission<ClockingDraft>),
    DeleteClocking(ClockingId),
    SubmitMaterial(FormSubmission<MaterialDraft>),
    DeleteMaterial(MaterialId),
    SubmitSupplier(FormSubmission<SupplierDraft>),
    DeleteSupplier(SupplierId),
    SubmitFinancialRecord(FormSubmission<FinancialRecordDraft>),
    DeleteFinancialRecord(FinancialRecordId),
    SubmitInvoice(FormSubmission<InvoiceDraft>),
    DeleteInvoice(InvoiceId),
    AddInvoiceItem {
        invoice_id: InvoiceId,
        draft: InvoiceItemDraft,
    },
    UpdateInvoiceItem {
        invoice_id: InvoiceId,
        item_id: InvoiceItemId,
        patch: InvoiceItemPatch,
    },
    RemoveInvoiceItem {
        invoice_id: InvoiceId,
        item_id: InvoiceItemId,
    },
    SetInvoiceTaxRate {
        invoice_id: InvoiceId,
        tax_rate: f64,
    },
}

impl Command {
    /// Stable snake_case name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitProject(_) => "submit_project",
            Self::DeleteProject(_) => "delete_project",
            Self::SubmitTask { .. } => "submit_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::AddDailyLog { .. } => "add_daily_log",
            Self::AddDocument { .. } => "add_document",
            Self::DeleteDocument { .. } => "delete_document",
            Self::SaveReport { .. } => "save_report",
            Self::SubmitTeam(_) => "submit_team",
            Self::DeleteTeam(_) => "delete_team",
            Self::AssignTeam { .. } => "assign_team",
            Self::UnassignTeam(_) => "unassign_team",
            Self::SubmitMember(_) => "submit_member",
            Self::DeleteMember(_) => "delete_member",
            Self::ClockIn { .. } => "clock_in",
            Self::ClockOut { .. } => "clock_out",
            Self::ResetClocking { .. } => "reset_clocking",
            Self::SubmitClocking(_) => "submit_clocking",
            Self::DeleteClocking(_) => "delete_clocking",
            Self::SubmitMaterial(_) => "submit_material",
            Self::DeleteMaterial(_) => "delete_material",
            Self::SubmitSupplier(_) => "submit_supplier",
            Self::DeleteSupplier(_) => "delete_supplier",
            Self::SubmitFinancialRecord(_) => "submit_financial_record",
            Self::DeleteFinancialRecord(_) => "delete_financial_record",
            Self::SubmitInvoice(_) => "submit_invoice",
            Self::DeleteInvoice(_) => "delete_invoice",
            Self::AddInvoiceItem { .. } => "add_invoice_item",
            Self::UpdateInvoiceItem { .. } => "update_invoice_item",
            Self::RemoveInvoiceItem { .. } => "remove_invoice_item",
            Self::SetInvoiceTaxRate { .. } => "set_invoice_tax_rate",
        }
    }

    /// Confirmation shown before a destructive command, if any.
    pub fn confirmation(&self) -> Option<ConfirmationRequest> {
        let request = match self {
            Self::DeleteProject(_) => ConfirmationRequest::dangerous(
                "Supprimer le projet ?",
                "Êtes-vous sûr de vouloir supprimer ce projet ? Cette action est irréversible et supprimera toutes les données associées.",
            ),
            Self::DeleteTask { .. } => ConfirmationRequest::dangerous(
                "Supprimer la tâche ?",
                "Êtes-vous sûr de vouloir supprimer cette tâche ?",
            ),
            Self::DeleteDocument { .. } => ConfirmationRequest::dangerous(
                "Supprimer le fichier ?",
                "Voulez-vous vraiment supprimer ce fichier ?",
            ),
            Self::DeleteTeam(_) => ConfirmationRequest::dangerous(
                "Supprimer l'équipe ?",
                "Êtes-vous sûr de vouloir supprimer cette équipe ?",
            ),
            Self::UnassignTeam(_) => ConfirmationRequest::dangerous(
                "Retirer l'équipe ?",
                "Voulez-vous vraiment retirer l'équipe de ce chantier ?",
            ),
            Self::DeleteMember(_) => ConfirmationRequest::dangerous(
                "Supprimer le membre ?",
                "Êtes-vous sûr de vouloir supprimer ce membre ?",
            ),
            Self::ResetClocking { .. } => with_labels(
                ConfirmationRequest::dangerous(
                    "Réinitialiser le pointage",
                    "Êtes-vous sûr de vouloir réinitialiser le pointage de ce membre pour aujourd'hui ? Cette action est irréversible.",
                ),
                "Réinitialiser",
            ),
            Self::DeleteClocking(_) => with_labels(
                ConfirmationRequest::dangerous(
                    "Supprimer le pointage",
                    "Êtes-vous sûr de vouloir supprimer ce pointage ? Cette action est irréversible.",
                ),
                "Supprimer",
            ),
            Self::DeleteMaterial(_) => with_labels(
                ConfirmationRequest::dangerous(
                    "Supprimer le matériel",
                    "Êtes-vous sûr de vouloir supprimer ce matériel ? Cette action est irréversible.",
                ),
                "Supprimer",
            ),
            Self::DeleteSupplier(_) => with_labels(
                ConfirmationRequest::dangerous(
                    "Supprimer le fournisseur",
                    "Êtes-vous sûr de vouloir supprimer ce fournisseur ? Cette action est irréversible.",
                ),
                "Supprimer",
            ),
            Self::DeleteFinancialRecord(_) => with_labels(
                ConfirmationRequest::dangerous(
                    "Supprimer la transaction",
                    "Êtes-vous sûr de vouloir supprimer cette transaction ? Cette action est irréversible.",
                ),
                "Supprimer",
            ),
            Self::DeleteInvoice(_) => with_labels(
                ConfirmationRequest::dangerous(
                    "Supprimer la facture",
                    "Êtes-vous sûr de vouloir supprimer cette facture ? Cette action est irréversible.",
                ),
                "Supprimer",
            ),
            _ => return None,
        };
        Some(request)
    }

    /// Toast text shown after the command succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::SubmitProject(form) if form.is_update() => "Projet mis à jour avec succès",
            Self::SubmitProject(_) => "Nouveau projet créé avec succès",
            Self::DeleteProject(_) => "Projet supprimé avec succès",
            Self::SubmitTask { form, .. } if form.is_update() => "Tâche mise à jour",
            Self::SubmitTask { .. } => "Tâche créée",
            Self::DeleteTask { .. } => "Tâche supprimée",
            Self::AddDailyLog { .. } => "Journal de chantier ajouté",
            Self::AddDocument { .. } => "Fichier ajouté avec succès",
            Self::DeleteDocument { .. } => "Fichier supprimé",
            Self::SaveReport { .. } => "Rapport enregistré avec succès",
            Self::SubmitTeam(form) if form.is_update() => "Équipe mise à jour avec succès",
            Self::SubmitTeam(_) => "Nouvelle équipe créée avec succès",
            Self::DeleteTeam(_) => "Équipe supprimée avec succès",
            Self::AssignTeam { .. } => "Équipe assignée avec succès",
            Self::UnassignTeam(_) => "Équipe retirée du chantier",
            Self::SubmitMember(form) if form.is_update() => "Membre mis à jour avec succès",
            Self::SubmitMember(_) => "Nouveau membre ajouté avec succès",
            Self::DeleteMember(_) => "Membre supprimé avec succès",
            Self::ClockIn { .. } => "Arrivée enregistrée",
            Self::ClockOut { .. } => "Départ enregistré",
            Self::ResetClocking { .. } => "Pointage réinitialisé",
            Self::SubmitClocking(form) if form.is_update() => "Pointage mis à jour",
            Self::SubmitClocking(_) => "Pointage ajouté",
            Self::DeleteClocking(_) => "Pointage supprimé",
            Self::SubmitMaterial(form) if form.is_update() => "Matériel mis à jour avec succès",
            Self::SubmitMaterial(_) => "Nouveau matériel ajouté avec succès",
            Self::DeleteMaterial(_) => "Matériel supprimé avec succès",
            Self::SubmitSupplier(form) if form.is_update() => "Fournisseur mis à jour avec succès",
            Self::SubmitSupplier(_) => "Nouveau fournisseur ajouté avec succès",
            Self::DeleteSupplier(_) => "Fournisseur supprimé avec succès",
            Self::SubmitFinancialRecord(form) if form.is_update() => "Transaction mise à jour",
            Self::SubmitFinancialRecord(_) => "Transaction enregistrée",
            Self::DeleteFinancialRecord(_) => "Transaction supprimée",
            Self::SubmitInvoice(form) if form.is_update() => "Facture mise à jour",
            Self::SubmitInvoice(_) => "Facture créée avec succès",
            Self::DeleteInvoice(_) => "Facture supprimée",
            Self::AddInvoiceItem { .. }
            | Self::UpdateInvoiceItem { .. }
            | Self::RemoveInvoiceItem { .. }
            | Self::SetInvoiceTaxRate { .. } => "Facture mise à jour",
        }
    }
}

fn with_labels(mut request: ConfirmationRequest, confirm_label: &str) -> ConfirmationRequest {
    request.confirm_label = Some(confirm_label.to_string());
    request.cancel_label = Some("Annuler".to_string());
    request
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The command ran; `id` names the created or affected record.
    Applied { id: Option<String> },
    /// The user declined the confirmation.
    Cancelled,
}

/// Applies commands to a session with user feedback.
pub struct Dispatcher<N: Notifier, C: Confirmer> {
    notifier: N,
    confirmer: C,
}

impl<N: Notifier, C: Confirmer> Dispatcher<N, C> {
    pub fn new(notifier: N, confirmer: C) -> Self {
        Self {
            notifier,
            confirmer,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn into_parts(self) -> (N, C) {
        (self.notifier, self.confirmer)
    }

    /// Runs `command`, asking for confirmation first when it is destructive.
    ///
    /// # Errors
    /// The session error of the failed use case, after an error toast.
    pub fn dispatch(&mut self, session: &mut Session, command: Command) -> SessionResult<Dispatched> {
        let name = command.name();
        let success = command.success_message();
        let outcome = match command.confirmation() {
            Some(request) => {
                request_confirmation(&mut self.confirmer, &request, || execute(session, command))
            }
            None => Some(execute(session, command)),
        };

        match outcome {
            None => {
                log::info!("event=dispatch module=dispatch status=cancelled command={name}");
                Ok(Dispatched::Cancelled)
            }
            Some(Ok(id)) => {
                self.notifier.show_toast(success, ToastKind::Success, None);
                log::info!("event=dispatch module=dispatch status=ok command={name}");
                Ok(Dispatched::Applied { id })
            }
            Some(Err(err)) => {
                self.notifier
                    .show_toast(&err.to_string(), ToastKind::Error, None);
                log::warn!(
                    "event=dispatch module=dispatch status=error command={name} error={}",
                    err.category()
                );
                Err(err)
            }
        }
    }
}

fn execute(session: &mut Session, command: Command) -> SessionResult<Option<String>> {
    let id = match command {
        Command::SubmitProject(FormSubmission::Create(draft)) => session.create_project(draft)?.id.clone(),
        Command::SubmitProject(FormSubmission::Update(id, draft)) => {
            session.update_project(&id, &draft.into())?;
            id
        }
        Command::DeleteProject(id) => session.delete_project(&id)?.project.id,
        Command::SubmitTask {
            project_id,
            form: FormSubmission::Create(draft),
        } => session.add_task(&project_id, draft)?,
        Command::SubmitTask {
            project_id,
            form: FormSubmission::Update(task_id, draft),
        } => {
            session.update_task(&project_id, &task_id, &draft.into())?;
            task_id
        }
        Command::DeleteTask {
            project_id,
            task_id,
        } => session.delete_task(&project_id, &task_id)?.id,
        Command::AddDailyLog { project_id, draft } => session.add_daily_log(&project_id, draft)?,
        Command::AddDocument { project_id, draft } => session.add_document(&project_id, draft)?,
        Command::DeleteDocument {
            project_id,
            document_id,
        } => session.delete_document(&project_id, &document_id)?.id,
        Command::SaveReport { project_id, report } => session.save_report(&project_id, report)?,
        Command::SubmitTeam(FormSubmission::Create(draft)) => session.create_team(draft)?.id.clone(),
        Command::SubmitTeam(FormSubmission::Update(id, draft)) => {
            session.update_team(&id, &draft.into())?;
            id
        }
        Command::DeleteTeam(id) => session.delete_team(&id)?.id,
        Command::AssignTeam {
            team_id,
            project_id,
        } => {
            session.assign_team(&team_id, &project_id)?;
            team_id
        }
        Command::UnassignTeam(id) => {
            session.unassign_team(&id)?;
            id
        }
        Command::SubmitMember(FormSubmission::Create(draft)) => session.create_member(draft)?.id.clone(),
        Command::SubmitMember(FormSubmission::Update(id, draft)) => {
            session.update_member(&id, &draft.into())?;
            id
        }
        Command::DeleteMember(id) => session.delete_member(&id)?.member.id,
        Command::ClockIn {
            member_id,
            date,
            at,
        } => session.clock_in(&member_id, date, at)?.id.clone(),
        Command::ClockOut {
            member_id,
            date,
            at,
        } => session.clock_out(&member_id, date, at)?.id.clone(),
        Command::ResetClocking { member_id, date } => {
            return Ok(session.reset_clocking(&member_id, date)?.map(|entry| entry.id));
        }
        Command::SubmitClocking(FormSubmission::Create(draft)) => {
            session.create_clocking_entry(draft)?.id.clone()
        }
        Command::SubmitClocking(FormSubmission::Update(id, draft)) => {
            session.update_clocking_entry(&id, &draft.into())?;
            id
        }
        Command::DeleteClocking(id) => session.delete_clocking_entry(&id)?.id,
        Command::SubmitMaterial(FormSubmission::Create(draft)) => session.create_material(draft)?.id.clone(),
        Command::SubmitMaterial(FormSubmission::Update(id, draft)) => {
            session.update_material(&id, &draft.into())?;
            id
        }
        Command::DeleteMaterial(id) => session.delete_material(&id)?.id,
        Command::SubmitSupplier(FormSubmission::Create(draft)) => session.create_supplier(draft)?.id.clone(),
        Command::SubmitSupplier(FormSubmission::Update(id, draft)) => {
            session.update_supplier(&id, &draft.into())?;
            id
        }
        Command::DeleteSupplier(id) => session.delete_supplier(&id)?.id,
        Command::SubmitFinancialRecord(FormSubmission::Create(draft)) => {
            session.create_financial_record(draft)?.id.clone()
        }
        Command::SubmitFinancialRecord(FormSubmission::Update(id, draft)) => {
            session.update_financial_record(&id, &draft.into())?;
            id
        }
        Command::DeleteFinancialRecord(id) => session.delete_financial_record(&id)?.id,
        Command::SubmitInvoice(FormSubmission::Create(draft)) => session.create_invoice(draft)?.id.clone(),
        Command::SubmitInvoice(FormSubmission::Update(id, draft)) => {
            session.resubmit_invoice(&id, draft)?;
            id
        }
        Command::DeleteInvoice(id) => session.delete_invoice(&id)?.id,
        Command::AddInvoiceItem { invoice_id, draft } => session.add_invoice_item(&invoice_id, draft)?,
        Command::UpdateInvoiceItem {
            invoice_id,
            item_id,
            patch,
        } => {
            session.update_invoice_item(&invoice_id, &item_id, &patch)?;
            item_id
        }
        Command::RemoveInvoiceItem {
            invoice_id,
            item_id,
        } => {
            session.remove_invoice_item(&invoice_id, &item_id)?;
            item_id
        }
        Command::SetInvoiceTaxRate {
            invoice_id,
            tax_rate,
        } => {
            session.set_invoice_tax_rate(&invoice_id, tax_rate)?;
            invoice_id
        }
    };
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::{Command, Dispatched, Dispatcher, FormSubmission};
    use crate::collab::{ConfirmationRequest, ToastKind, ToastQueue};
    use crate::model::project::{ProjectDraft, ProjectStatus};
    use crate::model::EntityKind;
    use crate::session::{Session, SessionError};
    use chrono::NaiveDate;

    fn project_draft(name: &str) -> ProjectDraft {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        ProjectDraft {
            name: name.to_string(),
            address: "Yamoussoukro".to_string(),
            start_date: start,
            end_date: start,
            status: ProjectStatus::Planning,
            manager: "Awa".to_string(),
            budget: 10,
            featured_image: None,
        }
    }

    #[test]
    fn create_then_update_share_one_form_type() {
        let mut session = Session::default();
        let mut dispatcher = Dispatcher::new(ToastQueue::default(), |_: &ConfirmationRequest| true);

        let created = dispatcher
            .dispatch(&mut session, Command::SubmitProject(FormSubmission::Create(project_draft("A"))))
            .unwrap();
        let id = match created {
            Dispatched::Applied { id: Some(id) } => id,
            other => panic!("expected an applied create, got {other:?}"),
        };

        dispatcher
            .dispatch(
                &mut session,
                Command::SubmitProject(FormSubmission::Update(id.clone(), project_draft("B"))),
            )
            .unwrap();
        assert_eq!(session.project(&id).unwrap().name, "B");

        let messages: Vec<&str> = dispatcher
            .notifier()
            .active()
            .iter()
            .map(|toast| toast.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["Nouveau projet créé avec succès", "Projet mis à jour avec succès"]
        );
    }

    #[test]
    fn declined_delete_is_cancelled_without_toast() {
        let mut session = Session::default();
        let id = session.create_project(project_draft("A")).unwrap().id.clone();
        let mut asked = Vec::new();
        let mut dispatcher = Dispatcher::new(ToastQueue::default(), |request: &ConfirmationRequest| {
            asked.push(request.title.clone());
            false
        });

        let outcome = dispatcher
            .dispatch(&mut session, Command::DeleteProject(id.clone()))
            .unwrap();
        assert_eq!(outcome, Dispatched::Cancelled);
        assert!(session.project(&id).is_some());
        assert!(dispatcher.notifier().active().is_empty());
        drop(dispatcher);
        assert_eq!(asked, vec!["Supprimer le projet ?".to_string()]);
    }

    #[test]
    fn failure_shows_error_toast() {
        let mut session = Session::default();
        let mut dispatcher = Dispatcher::new(ToastQueue::default(), |_: &ConfirmationRequest| true);
        let err = dispatcher
            .dispatch(&mut session, Command::DeleteTeam("team-ghost".to_string()))
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound { kind: EntityKind::Team, .. }));
        let toasts = dispatcher.notifier().active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
    }

    #[test]
    fn only_destructive_commands_need_confirmation() {
        assert!(Command::DeleteInvoice("inv-1".to_string()).confirmation().is_some());
        assert!(Command::UnassignTeam("team-1".to_string()).confirmation().is_some());
        assert!(Command::SubmitProject(FormSubmission::Create(project_draft("A")))
            .confirmation()
            .is_none());
    }
}
