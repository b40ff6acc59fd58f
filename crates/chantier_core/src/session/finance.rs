//! Transaction ledger and invoice use cases.
//!
//! Invoice subtotal, tax and total are never written directly: every item
//! or tax change goes through `rules::invoice_totals`, which recomputes them.

use crate::id::{new_id, FINANCE_PREFIX, INVOICE_PREFIX};
use crate::model::finance::{
    FinancialRecord, FinancialRecordDraft, FinancialRecordPatch, Invoice, InvoiceDraft,
    InvoiceHeaderPatch, InvoiceItemDraft, InvoiceItemId, InvoiceItemPatch,
};
use crate::report::finance::{
    expense_breakdown, filter_by_project, financial_summary, monthly_income, next_invoice_number,
    CategoryTotal, FinancialSummary, MonthlyPoint, ProjectFilter,
};
use crate::rules::{invoice_totals, RuleError};
use crate::session::{logged, Session, SessionError, SessionResult};
use crate::store::InsertAt;
use chrono::Datelike;

impl Session {
    pub fn create_financial_record(&mut self, draft: FinancialRecordDraft) -> SessionResult<&FinancialRecord> {
        if let Err(err) = self.require_project(&draft.project_id) {
            return logged("finance_create", Err(err));
        }
        let record = draft.into_record(new_id(FINANCE_PREFIX));
        let result = self
            .finance
            .insert(record, InsertAt::Front)
            .map_err(SessionError::from);
        logged("finance_create", result)
    }

    /// Updates a record. Moving it to another project requires that project
    /// to exist; a record already pointing at a deleted project may keep it.
    pub fn update_financial_record(
        &mut self,
        record_id: &str,
        patch: &FinancialRecordPatch,
    ) -> SessionResult<&FinancialRecord> {
        if let Err(err) = self.check_project_move(
            self.finance.get(record_id).map(|record| record.project_id.as_str()),
            patch.project_id.as_deref(),
        ) {
            return logged("finance_update", Err(err));
        }
        let result = self
            .finance
            .update(record_id, |record| patch.apply(record))
            .map_err(SessionError::from);
        logged("finance_update", result)
    }

    pub fn delete_financial_record(&mut self, record_id: &str) -> SessionResult<FinancialRecord> {
        let result = self.finance.remove(record_id).map_err(SessionError::from);
        logged("finance_delete", result)
    }

    /// Issues an invoice with derived totals.
    ///
    /// A missing number becomes the next `{prefix}-{year}-{seq}` for the
    /// issue year; a missing tax rate uses the configured default.
    pub fn create_invoice(&mut self, draft: InvoiceDraft) -> SessionResult<&Invoice> {
        if let Err(err) = self.require_project(&draft.project_id) {
            return logged("invoice_create", Err(err));
        }
        let invoice = self.build_invoice(draft);
        let result = self
            .invoices
            .insert(invoice, InsertAt::Front)
            .map_err(SessionError::from);
        logged("invoice_create", result)
    }

    fn build_invoice(&self, draft: InvoiceDraft) -> Invoice {
        let number = draft
            .number
            .filter(|number| !number.trim().is_empty())
            .unwrap_or_else(|| {
                next_invoice_number(self.invoices.list(), &self.config.invoice_prefix, draft.date.year())
            });
        let mut invoice = Invoice {
            id: new_id(INVOICE_PREFIX),
            number,
            date: draft.date,
            due_date: draft.due_date,
            project_id: draft.project_id,
            client_name: draft.client_name,
            client_address: draft.client_address,
            items: Vec::new(),
            subtotal: 0,
            tax_rate: draft.tax_rate.unwrap_or(self.config.default_tax_rate),
            tax_amount: 0,
            total: 0,
            status: draft.status,
            notes: draft.notes,
        };
        invoice_totals::replace_items(&mut invoice, draft.items);
        invoice
    }

    pub fn update_invoice_header(&mut self, invoice_id: &str, patch: &InvoiceHeaderPatch) -> SessionResult<&Invoice> {
        if let Err(err) = self.check_project_move(
            self.invoices.get(invoice_id).map(|invoice| invoice.project_id.as_str()),
            patch.project_id.as_deref(),
        ) {
            return logged("invoice_update", Err(err));
        }
        let result = self
            .invoices
            .update(invoice_id, |invoice| patch.apply(invoice))
            .map_err(SessionError::from);
        logged("invoice_update", result)
    }

    /// Applies a resubmitted invoice form: header fields, a fresh item list
    /// and, when given, a new tax rate. The number is kept when omitted.
    pub fn resubmit_invoice(&mut self, invoice_id: &str, draft: InvoiceDraft) -> SessionResult<&Invoice> {
        if let Err(err) = self.check_project_move(
            self.invoices.get(invoice_id).map(|invoice| invoice.project_id.as_str()),
            Some(draft.project_id.as_str()),
        ) {
            return logged("invoice_update", Err(err));
        }
        let header = InvoiceHeaderPatch {
            number: draft.number.filter(|number| !number.trim().is_empty()),
            date: Some(draft.date),
            due_date: Some(draft.due_date),
            project_id: Some(draft.project_id),
            client_name: Some(draft.client_name),
            client_address: Some(draft.client_address),
            status: Some(draft.status),
            notes: Some(draft.notes),
        };
        let items = draft.items;
        let tax_rate = draft.tax_rate;
        let result = self
            .invoices
            .try_update(invoice_id, |invoice| {
                header.apply(invoice);
                if let Some(rate) = tax_rate {
                    invoice_totals::set_tax_rate(invoice, rate)?;
                }
                invoice_totals::replace_items(invoice, items);
                Ok::<(), RuleError>(())
            })
            .map_err(SessionError::from);
        logged("invoice_update", result)
    }

    pub fn add_invoice_item(&mut self, invoice_id: &str, draft: InvoiceItemDraft) -> SessionResult<InvoiceItemId> {
        let mut item_id = None;
        let result = self
            .invoices
            .try_update(invoice_id, |invoice| {
                item_id = Some(invoice_totals::add_item(invoice, draft));
                Ok::<(), RuleError>(())
            })
            .map_err(SessionError::from)
            .map(|_| item_id.unwrap_or_default());
        logged("invoice_item_add", result)
    }

    pub fn update_invoice_item(
        &mut self,
        invoice_id: &str,
        item_id: &str,
        patch: &InvoiceItemPatch,
    ) -> SessionResult<&Invoice> {
        let result = self
            .invoices
            .try_update(invoice_id, |invoice| invoice_totals::update_item(invoice, item_id, patch))
            .map_err(SessionError::from);
        logged("invoice_item_update", result)
    }

    /// Removes a line item. The last remaining item cannot be removed.
    pub fn remove_invoice_item(&mut self, invoice_id: &str, item_id: &str) -> SessionResult<&Invoice> {
        let result = self
            .invoices
            .try_update(invoice_id, |invoice| invoice_totals::remove_item(invoice, item_id))
            .map_err(SessionError::from);
        logged("invoice_item_remove", result)
    }

    pub fn set_invoice_tax_rate(&mut self, invoice_id: &str, tax_rate: f64) -> SessionResult<&Invoice> {
        let result = self
            .invoices
            .try_update(invoice_id, |invoice| invoice_totals::set_tax_rate(invoice, tax_rate))
            .map_err(SessionError::from);
        logged("invoice_tax_update", result)
    }

    pub fn delete_invoice(&mut self, invoice_id: &str) -> SessionResult<Invoice> {
        let result = self.invoices.remove(invoice_id).map_err(SessionError::from);
        logged("invoice_delete", result)
    }

    pub fn financial_summary(&self, filter: &ProjectFilter) -> FinancialSummary {
        financial_summary(filter_by_project(self.finance.list(), filter))
    }

    pub fn expense_breakdown(&self, filter: &ProjectFilter) -> Vec<CategoryTotal> {
        expense_breakdown(filter_by_project(self.finance.list(), filter))
    }

    pub fn monthly_income(&self, filter: &ProjectFilter) -> Vec<MonthlyPoint> {
        monthly_income(filter_by_project(self.finance.list(), filter))
    }

    pub fn invoices_for(&self, filter: &ProjectFilter) -> Vec<&Invoice> {
        filter_by_project(self.invoices.list(), filter)
    }

    fn require_project(&self, project_id: &str) -> SessionResult<()> {
        self.projects.require(project_id)?;
        Ok(())
    }

    fn check_project_move(&self, current: Option<&str>, requested: Option<&str>) -> SessionResult<()> {
        match requested {
            Some(requested) if current != Some(requested) => self.require_project(requested),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::finance::{InvoiceDraft, InvoiceItemDraft, InvoiceItemPatch, InvoiceStatus};
    use crate::model::project::{ProjectDraft, ProjectStatus};
    use crate::model::EntityKind;
    use crate::rules::InvalidState;
    use crate::session::{Session, SessionError};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session_with_project() -> (Session, String) {
        let mut session = Session::default();
        let id = session
            .create_project(ProjectDraft {
                name: "Pont de Bouaké".to_string(),
                address: "Bouaké".to_string(),
                start_date: date(2024, 2, 1),
                end_date: date(2025, 2, 1),
                status: ProjectStatus::InProgress,
                manager: "Koffi".to_string(),
                budget: 900_000_000,
                featured_image: None,
            })
            .unwrap()
            .id
            .clone();
        (session, id)
    }

    fn draft(project_id: &str, items: Vec<InvoiceItemDraft>) -> InvoiceDraft {
        InvoiceDraft {
            number: None,
            date: date(2024, 10, 1),
            due_date: date(2024, 10, 31),
            project_id: project_id.to_string(),
            client_name: "SCI Les Palmiers".to_string(),
            client_address: "Cocody".to_string(),
            items,
            tax_rate: None,
            status: InvoiceStatus::Draft,
            notes: None,
        }
    }

    #[test]
    fn new_invoice_gets_number_default_rate_and_totals() {
        let (mut session, project_id) = session_with_project();
        let invoice = session
            .create_invoice(draft(
                &project_id,
                vec![
                    InvoiceItemDraft::new("Béton", 2, 100),
                    InvoiceItemDraft::new("Transport", 1, 50),
                ],
            ))
            .unwrap();
        assert_eq!(invoice.number, "FAC-2024-001");
        assert_eq!(invoice.tax_rate(), 18.0);
        assert_eq!(invoice.subtotal(), 250);
        assert_eq!(invoice.tax_amount(), 45);
        assert_eq!(invoice.total(), 295);

        let second = session
            .create_invoice(draft(&project_id, vec![InvoiceItemDraft::new("Acier", 1, 10)]))
            .unwrap();
        assert_eq!(second.number, "FAC-2024-002");
    }

    #[test]
    fn invoice_without_items_is_rejected() {
        let (mut session, project_id) = session_with_project();
        let err = session.create_invoice(draft(&project_id, Vec::new())).unwrap_err();
        assert_eq!(err, SessionError::Validation(crate::model::ValidationError::EmptyInvoice));
    }

    #[test]
    fn invoice_for_unknown_project_is_rejected() {
        let mut session = Session::default();
        let err = session
            .create_invoice(draft("proj-ghost", vec![InvoiceItemDraft::new("Béton", 1, 1)]))
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound { kind: EntityKind::Project, .. }));
    }

    #[test]
    fn item_changes_keep_totals_derived() {
        let (mut session, project_id) = session_with_project();
        let invoice_id = session
            .create_invoice(draft(&project_id, vec![InvoiceItemDraft::new("Béton", 2, 100)]))
            .unwrap()
            .id
            .clone();

        let item_id = session
            .add_invoice_item(&invoice_id, InvoiceItemDraft::new("Transport", 1, 50))
            .unwrap();
        assert_eq!(session.invoice(&invoice_id).unwrap().total(), 295);

        let patch = InvoiceItemPatch {
            quantity: Some(3),
            ..InvoiceItemPatch::default()
        };
        let invoice = session.update_invoice_item(&invoice_id, &item_id, &patch).unwrap();
        assert_eq!(invoice.subtotal(), 350);
        assert_eq!(invoice.tax_amount(), 63);

        let invoice = session.set_invoice_tax_rate(&invoice_id, 0.0).unwrap();
        assert_eq!(invoice.total(), 350);

        let first_item = session.invoice(&invoice_id).unwrap().items()[0].id.clone();
        session.remove_invoice_item(&invoice_id, &first_item).unwrap();
        let err = session.remove_invoice_item(&invoice_id, &item_id).unwrap_err();
        assert_eq!(err, SessionError::InvalidState(InvalidState::LastInvoiceItem));
        assert_eq!(session.invoice(&invoice_id).unwrap().total(), 150);
    }

    #[test]
    fn resubmitted_form_replaces_items_and_keeps_number() {
        let (mut session, project_id) = session_with_project();
        let invoice_id = session
            .create_invoice(draft(&project_id, vec![InvoiceItemDraft::new("Béton", 2, 100)]))
            .unwrap()
            .id
            .clone();

        let mut form = draft(&project_id, vec![InvoiceItemDraft::new("Études", 1, 1_000)]);
        form.tax_rate = Some(10.0);
        form.status = InvoiceStatus::Sent;
        let invoice = session.resubmit_invoice(&invoice_id, form).unwrap();
        assert_eq!(invoice.number, "FAC-2024-001");
        assert_eq!(invoice.items().len(), 1);
        assert_eq!(invoice.total(), 1_100);
        assert_eq!(invoice.status, InvoiceStatus::Sent);
    }
}
