//! Financial ledger entries and client invoices.
//!
//! # Invariants
//! - Invoice totals are derived data: `item.total = quantity * unit_price`,
//!   `subtotal = sum(item.total)`, `tax_amount = round(subtotal * rate / 100)`,
//!   `total = subtotal + tax_amount`.
//! - Derived fields are crate-private; only `crate::rules::invoice_totals`
//!   writes them.
//! - An invoice always keeps at least one line item.

use crate::model::project::ProjectId;
use crate::model::validation::require_text;
use crate::model::{Entity, EntityKind, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type FinancialRecordId = String;
pub type InvoiceId = String;
pub type InvoiceItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCategory {
    Material,
    Labor,
    Subcontractor,
    Equipment,
    Invoice,
    Other,
}

impl TransactionCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Material => "Matériel",
            Self::Labor => "Main d'oeuvre",
            Self::Subcontractor => "Sous-traitance",
            Self::Equipment => "Équipement",
            Self::Invoice => "Facture",
            Self::Other => "Autre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: FinancialRecordId,
    /// May dangle after the project is deleted.
    pub project_id: ProjectId,
    pub date: NaiveDate,
    pub description: String,
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: TransactionCategory,
    pub status: TransactionStatus,
    /// Invoice number or other external reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl FinancialRecord {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

impl Entity for FinancialRecord {
    const KIND: EntityKind = EntityKind::FinancialRecord;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("description", &self.description)?;
        require_text("project_id", &self.project_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecordDraft {
    pub project_id: ProjectId,
    pub date: NaiveDate,
    pub description: String,
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: TransactionCategory,
    pub status: TransactionStatus,
    #[serde(default)]
    pub reference: Option<String>,
}

impl FinancialRecordDraft {
    pub fn into_record(self, id: FinancialRecordId) -> FinancialRecord {
        FinancialRecord {
            id,
            project_id: self.project_id,
            date: self.date,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            status: self.status,
            reference: self.reference,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinancialRecordPatch {
    pub project_id: Option<ProjectId>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<u64>,
    pub kind: Option<TransactionType>,
    pub category: Option<TransactionCategory>,
    pub status: Option<TransactionStatus>,
    pub reference: Option<Option<String>>,
}

impl FinancialRecordPatch {
    pub fn apply(&self, record: &mut FinancialRecord) {
        if let Some(project_id) = &self.project_id {
            record.project_id = project_id.clone();
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(reference) = &self.reference {
            record.reference = reference.clone();
        }
    }
}

impl From<FinancialRecordDraft> for FinancialRecordPatch {
    fn from(draft: FinancialRecordDraft) -> Self {
        Self {
            project_id: Some(draft.project_id),
            date: Some(draft.date),
            description: Some(draft.description),
            amount: Some(draft.amount),
            kind: Some(draft.kind),
            category: Some(draft.category),
            status: Some(draft.status),
            reference: Some(draft.reference),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Brouillon",
            Self::Sent => "Envoyée",
            Self::Paid => "Payée",
            Self::Overdue => "En retard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: InvoiceItemId,
    pub description: String,
    pub quantity: u32,
    pub unit_price: u64,
    #[serde(default)]
    pub(crate) total: u64,
}

impl InvoiceItem {
    pub fn total(&self) -> u64 {
        self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    /// Human-readable number such as `FAC-2024-001`.
    pub number: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    /// May dangle after the project is deleted.
    pub project_id: ProjectId,
    pub client_name: String,
    pub client_address: String,
    pub(crate) items: Vec<InvoiceItem>,
    #[serde(default)]
    pub(crate) subtotal: u64,
    pub(crate) tax_rate: f64,
    #[serde(default)]
    pub(crate) tax_amount: u64,
    #[serde(default)]
    pub(crate) total: u64,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Invoice {
    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&InvoiceItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn subtotal(&self) -> u64 {
        self.subtotal
    }

    /// Tax rate as a percentage, e.g. `18.0`.
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn tax_amount(&self) -> u64 {
        self.tax_amount
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Entity for Invoice {
    const KIND: EntityKind = EntityKind::Invoice;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("number", &self.number)?;
        require_text("client_name", &self.client_name)?;
        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            return Err(ValidationError::InvalidTaxRate(self.tax_rate));
        }
        if self.items.is_empty() {
            return Err(ValidationError::EmptyInvoice);
        }
        for item in &self.items {
            require_text("item.description", &item.description)?;
            if item.quantity == 0 {
                return Err(ValidationError::ZeroItemQuantity {
                    item_id: item.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Line item form payload; the line total is always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemDraft {
    pub description: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl InvoiceItemDraft {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: u64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Builds the item with a zero total; callers recompute the invoice.
    pub(crate) fn into_item(self, id: InvoiceItemId) -> InvoiceItem {
        InvoiceItem {
            id,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Generated from the issue year when omitted.
    #[serde(default)]
    pub number: Option<String>,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub project_id: ProjectId,
    pub client_name: String,
    pub client_address: String,
    pub items: Vec<InvoiceItemDraft>,
    /// Falls back to the configured default rate when omitted.
    #[serde(default)]
    pub tax_rate: Option<f64>,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Header-only invoice update. Items and the tax rate change through the
/// dedicated item operations so totals stay derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceHeaderPatch {
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub project_id: Option<ProjectId>,
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub notes: Option<Option<String>>,
}

impl InvoiceHeaderPatch {
    pub fn apply(&self, invoice: &mut Invoice) {
        if let Some(number) = &self.number {
            invoice.number = number.clone();
        }
        if let Some(date) = self.date {
            invoice.date = date;
        }
        if let Some(due_date) = self.due_date {
            invoice.due_date = due_date;
        }
        if let Some(project_id) = &self.project_id {
            invoice.project_id = project_id.clone();
        }
        if let Some(client_name) = &self.client_name {
            invoice.client_name = client_name.clone();
        }
        if let Some(client_address) = &self.client_address {
            invoice.client_address = client_address.clone();
        }
        if let Some(status) = self.status {
            invoice.status = status;
        }
        if let Some(notes) = &self.notes {
            invoice.notes = notes.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceItemPatch {
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<u64>,
}

impl InvoiceItemPatch {
    pub(crate) fn apply(&self, item: &mut InvoiceItem) {
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(unit_price) = self.unit_price {
            item.unit_price = unit_price;
        }
    }
}
