//! Invoice arithmetic.
//!
//! # Invariants
//! - Line totals are recomputed before the invoice totals.
//! - Every mutation here ends with `recompute`.

use crate::id::{new_id, INVOICE_ITEM_PREFIX};
use crate::model::finance::{Invoice, InvoiceItemDraft, InvoiceItemId, InvoiceItemPatch};
use crate::model::{EntityKind, ValidationError};
use crate::rules::{InvalidState, RuleResult};
use crate::store::StoreError;

pub fn item_total(quantity: u32, unit_price: u64) -> u64 {
    u64::from(quantity).saturating_mul(unit_price)
}

/// `round(subtotal * rate / 100)`, halves rounded up.
pub fn tax_amount(subtotal: u64, tax_rate: f64) -> u64 {
    let raw = subtotal as f64 * tax_rate / 100.0;
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.round() as u64
}

/// Rewrites every derived field from quantities, prices and the rate.
pub fn recompute(invoice: &mut Invoice) {
    for item in &mut invoice.items {
        item.total = item_total(item.quantity, item.unit_price);
    }
    invoice.subtotal = invoice
        .items
        .iter()
        .fold(0u64, |sum, item| sum.saturating_add(item.total));
    invoice.tax_amount = tax_amount(invoice.subtotal, invoice.tax_rate);
    invoice.total = invoice.subtotal.saturating_add(invoice.tax_amount);
}

pub fn add_item(invoice: &mut Invoice, draft: InvoiceItemDraft) -> InvoiceItemId {
    let item = draft.into_item(new_id(INVOICE_ITEM_PREFIX));
    let id = item.id.clone();
    invoice.items.push(item);
    recompute(invoice);
    id
}

pub fn update_item(invoice: &mut Invoice, item_id: &str, patch: &InvoiceItemPatch) -> RuleResult<()> {
    let item = invoice
        .items
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or_else(|| StoreError::not_found(EntityKind::InvoiceItem, item_id))?;
    patch.apply(item);
    recompute(invoice);
    Ok(())
}

pub fn remove_item(invoice: &mut Invoice, item_id: &str) -> RuleResult<()> {
    let index = invoice
        .items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or_else(|| StoreError::not_found(EntityKind::InvoiceItem, item_id))?;
    if invoice.items.len() == 1 {
        return Err(InvalidState::LastInvoiceItem.into());
    }
    invoice.items.remove(index);
    recompute(invoice);
    Ok(())
}

pub fn set_tax_rate(invoice: &mut Invoice, tax_rate: f64) -> RuleResult<()> {
    if !tax_rate.is_finite() || tax_rate < 0.0 {
        return Err(ValidationError::InvalidTaxRate(tax_rate).into());
    }
    invoice.tax_rate = tax_rate;
    recompute(invoice);
    Ok(())
}

/// Replaces every line item, e.g. when a whole invoice form is resubmitted.
pub fn replace_items(invoice: &mut Invoice, drafts: Vec<InvoiceItemDraft>) {
    invoice.items = drafts
        .into_iter()
        .map(|draft| draft.into_item(new_id(INVOICE_ITEM_PREFIX)))
        .collect();
    recompute(invoice);
}

#[cfg(test)]
mod tests {
    use super::{item_total, tax_amount};

    #[test]
    fn tax_rounds_half_up() {
        assert_eq!(tax_amount(250, 18.0), 45);
        assert_eq!(tax_amount(5, 10.0), 1);
        assert_eq!(tax_amount(1_000, 0.0), 0);
    }

    #[test]
    fn item_total_saturates() {
        assert_eq!(item_total(3, 50), 150);
        assert_eq!(item_total(u32::MAX, u64::MAX), u64::MAX);
    }
}
