use chantier_core::model::finance::{
    Invoice, InvoiceDraft, InvoiceHeaderPatch, InvoiceItemDraft, InvoiceItemPatch, InvoiceStatus,
};
use chantier_core::model::project::{ProjectDraft, ProjectStatus};
use chantier_core::rules::invoice_totals::tax_amount;
use chantier_core::{CoreConfig, DemoSeed, InvalidState, Session, SessionError, ValidationError};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn assert_totals_consistent(invoice: &Invoice) {
    for item in invoice.items() {
        assert_eq!(item.total(), u64::from(item.quantity) * item.unit_price);
    }
    let subtotal: u64 = invoice.items().iter().map(|item| item.total()).sum();
    assert_eq!(invoice.subtotal(), subtotal);
    assert_eq!(invoice.tax_amount(), tax_amount(subtotal, invoice.tax_rate()));
    assert_eq!(invoice.total(), invoice.subtotal() + invoice.tax_amount());
}

fn session_with_project() -> (Session, String) {
    let mut session = Session::default();
    let id = session
        .create_project(ProjectDraft {
            name: "Centre Commercial Cap Sud".to_string(),
            address: "Marcory, Abidjan".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2025, 6, 30),
            status: ProjectStatus::InProgress,
            manager: "Fatou Diallo".to_string(),
            budget: 1_200_000_000,
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
        client_name: "Ministère de la Construction".to_string(),
        client_address: "Cité Administrative, Abidjan".to_string(),
        items,
        tax_rate: Some(18.0),
        status: InvoiceStatus::Draft,
        notes: None,
    }
}

#[test]
fn invoice_arithmetic_scenario() {
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

    assert_eq!(invoice.subtotal(), 250);
    assert_eq!(invoice.tax_amount(), 45);
    assert_eq!(invoice.total(), 295);
    assert_totals_consistent(invoice);
}

#[test]
fn totals_stay_consistent_across_every_mutation() {
    let (mut session, project_id) = session_with_project();
    let id = session
        .create_invoice(draft(&project_id, vec![InvoiceItemDraft::new("Études", 3, 1_333)]))
        .unwrap()
        .id
        .clone();
    assert_totals_consistent(session.invoice(&id).unwrap());

    let added = session
        .add_invoice_item(&id, InvoiceItemDraft::new("Plans", 7, 999))
        .unwrap();
    assert_totals_consistent(session.invoice(&id).unwrap());

    let patch = InvoiceItemPatch {
        quantity: Some(11),
        unit_price: Some(4_321),
        ..InvoiceItemPatch::default()
    };
    assert_totals_consistent(session.update_invoice_item(&id, &added, &patch).unwrap());
    assert_totals_consistent(session.set_invoice_tax_rate(&id, 7.5).unwrap());

    let header = InvoiceHeaderPatch {
        status: Some(InvoiceStatus::Sent),
        ..InvoiceHeaderPatch::default()
    };
    assert_totals_consistent(session.update_invoice_header(&id, &header).unwrap());

    let first = session.invoice(&id).unwrap().items()[0].id.clone();
    assert_totals_consistent(session.remove_invoice_item(&id, &first).unwrap());
    assert_eq!(session.invoice(&id).unwrap().items().len(), 1);
}

#[test]
fn last_item_cannot_be_removed_and_zero_quantity_is_rejected() {
    let (mut session, project_id) = session_with_project();
    let invoice = session
        .create_invoice(draft(&project_id, vec![InvoiceItemDraft::new("Études", 1, 500)]))
        .unwrap();
    let id = invoice.id.clone();
    let only = invoice.items()[0].id.clone();
    let before = invoice.clone();

    let err = session.remove_invoice_item(&id, &only).unwrap_err();
    assert_eq!(err, SessionError::InvalidState(InvalidState::LastInvoiceItem));

    let patch = InvoiceItemPatch {
        quantity: Some(0),
        ..InvoiceItemPatch::default()
    };
    let err = session.update_invoice_item(&id, &only, &patch).unwrap_err();
    assert!(matches!(err, SessionError::Validation(ValidationError::ZeroItemQuantity { .. })));

    let err = session.set_invoice_tax_rate(&id, -1.0).unwrap_err();
    assert!(matches!(err, SessionError::Validation(ValidationError::InvalidTaxRate(_))));
    assert_eq!(session.invoice(&id).unwrap(), &before);
}

#[test]
fn demo_invoices_are_recomputed_on_load() {
    let session = Session::from_seed(&DemoSeed::new(date(2024, 10, 14)), CoreConfig::default()).unwrap();
    assert_eq!(session.invoices().len(), 2);
    for invoice in session.invoices() {
        assert!(invoice.total() > 0);
        assert_totals_consistent(invoice);
    }
}

#[test]
fn numbering_continues_after_seeded_invoices() {
    let mut session = Session::from_seed(&DemoSeed::new(date(2024, 10, 14)), CoreConfig::default()).unwrap();
    let invoice = session
        .create_invoice(draft("proj-1", vec![InvoiceItemDraft::new("Solde", 1, 10_000)]))
        .unwrap();
    assert_eq!(invoice.number, "FAC-2024-003");
    assert_eq!(session.invoices()[0].number, "FAC-2024-003");
}
