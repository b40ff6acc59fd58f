//! Initial session data.
//!
//! # Responsibility
//! - Define the seed bundle handed to `Session::from_seed`.
//! - Provide the empty and demo data sources.
//!
//! # Invariants
//! - Seeds are consumed once at session start.
//! - Demo clocking entries are dated on the `today` the source was built with.

use crate::model::clocking::{ClockingEntry, ClockingStatus};
use crate::model::finance::{
    FinancialRecord, Invoice, InvoiceItem, InvoiceStatus, TransactionCategory, TransactionStatus,
    TransactionType,
};
use crate::model::inventory::{Material, MaterialStatus, Supplier, SupplierStatus};
use crate::model::project::{
    Document, DocumentKind, Project, ProjectStatus, Task, TaskStatus,
};
use crate::model::team::{Team, TeamColor, TeamMember};
use crate::model::time::TimeOfDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Records for all eight stores, in display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub projects: Vec<Project>,
    pub team_members: Vec<TeamMember>,
    pub teams: Vec<Team>,
    pub clocking_entries: Vec<ClockingEntry>,
    pub suppliers: Vec<Supplier>,
    pub materials: Vec<Material>,
    pub financial_records: Vec<FinancialRecord>,
    pub invoices: Vec<Invoice>,
}

/// Supplies the data a session starts from.
pub trait SeedSource {
    fn load(&self) -> SeedData;
}

impl SeedSource for SeedData {
    fn load(&self) -> SeedData {
        self.clone()
    }
}

/// No records at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySeed;

impl SeedSource for EmptySeed {
    fn load(&self) -> SeedData {
        SeedData::default()
    }
}

/// Demo portfolio: three West African sites with teams, stock and ledger.
#[derive(Debug, Clone, Copy)]
pub struct DemoSeed {
    pub today: NaiveDate,
}

impl DemoSeed {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl SeedSource for DemoSeed {
    fn load(&self) -> SeedData {
        SeedData {
            projects: demo_projects(),
            team_members: demo_members(),
            teams: demo_teams(),
            clocking_entries: demo_clocking(self.today),
            suppliers: demo_suppliers(),
            materials: demo_materials(),
            financial_records: demo_financial_records(),
            invoices: demo_invoices(),
        }
    }
}

// Constant demo dates are known-valid; the fallback is never reached.
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn hm(h: u32, m: u32) -> Option<TimeOfDay> {
    TimeOfDay::from_hm(h, m)
}

fn task(id: &str, title: &str, assigned_to: &str, due: NaiveDate, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        assigned_to: assigned_to.to_string(),
        due_date: due,
        status,
        start_time: None,
        end_time: None,
        category: None,
        description: None,
        location: None,
    }
}

fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "proj-1".to_string(),
            name: "Rénovation Tour Administrative".to_string(),
            address: "Plateau, Abidjan, Côte d'Ivoire".to_string(),
            start_date: date(2024, 8, 1),
            end_date: date(2025, 6, 30),
            status: ProjectStatus::InProgress,
            manager: "Amadou Koné".to_string(),
            budget: 32_750_000_000,
            featured_image: Some(
                "https://images.unsplash.com/photo-1543349689-9a4d426bee8e?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            ),
            tasks: vec![
                task("task-1-1", "Peinture Façade Nord", "Équipe A", date(2024, 9, 15), TaskStatus::InProgress),
                task("task-1-2", "Remplacement des ascenseurs", "CFAO Technologies", date(2025, 3, 1), TaskStatus::ToDo),
                task("task-1-3", "Vérification structurelle", "Bureau Veritas", date(2024, 8, 20), TaskStatus::Done),
            ],
            daily_logs: Vec::new(),
            documents: vec![
                Document {
                    id: "doc-1".to_string(),
                    name: "Plan de structure.pdf".to_string(),
                    kind: DocumentKind::Pdf,
                    url: "#".to_string(),
                    uploaded_at: date(2024, 8, 1),
                    size: Some("2.4 MB".to_string()),
                },
                Document {
                    id: "img-1".to_string(),
                    name: "Vue aérienne chantier".to_string(),
                    kind: DocumentKind::Image,
                    url: "https://images.unsplash.com/photo-1504307651254-35680f356dfd?q=80&w=400&auto=format&fit=crop"
                        .to_string(),
                    uploaded_at: date(2024, 8, 5),
                    size: None,
                },
            ],
        },
        Project {
            id: "proj-2".to_string(),
            name: "Construction Siège \"Le Futur\"".to_string(),
            address: "Diamniadio, Dakar, Sénégal".to_string(),
            start_date: date(2024, 9, 1),
            end_date: date(2026, 12, 31),
            status: ProjectStatus::Planning,
            manager: "Fatou Diop".to_string(),
            budget: 78_600_000_000,
            featured_image: Some(
                "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            ),
            tasks: vec![
                task("task-2-1", "Obtention permis de construire", "Service Juridique", date(2024, 8, 30), TaskStatus::Done),
                task("task-2-2", "Terrassement", "GTM Terrassement", date(2024, 10, 30), TaskStatus::ToDo),
            ],
            daily_logs: Vec::new(),
            documents: Vec::new(),
        },
        Project {
            id: "proj-3".to_string(),
            name: "Extension du Musée National".to_string(),
            address: "Yaoundé, Cameroun".to_string(),
            start_date: date(2023, 1, 10),
            end_date: date(2024, 7, 20),
            status: ProjectStatus::Completed,
            manager: "Jean-Paul Biya".to_string(),
            budget: 58_950_000_000,
            featured_image: Some(
                "https://images.unsplash.com/photo-1558696715-1416a6c52b14?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            ),
            tasks: Vec::new(),
            daily_logs: Vec::new(),
            documents: Vec::new(),
        },
    ]
}

fn member(id: &str, name: &str, role: &str, email: &str, phone: &str, avatar_seed: &str) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        avatar_url: Some(format!("https://picsum.photos/seed/{avatar_seed}/200")),
    }
}

fn demo_members() -> Vec<TeamMember> {
    vec![
        member("tm-1", "Alice Kouassi", "Chef de projet", "alice.k@example.com", "+225 07 12 34 56 78", "alice"),
        member("tm-2", "Moussa Traoré", "Conducteur de travaux", "moussa.t@example.com", "+225 05 23 45 67 89", "bob"),
        member("tm-3", "Carole Petit", "Architecte", "carole.p@example.com", "+225 01 34 56 78 90", "carole"),
        member("tm-4", "David Nguema", "Ingénieur structure", "david.n@example.com", "+225 07 45 67 89 01", "david"),
        member("tm-5", "Eve Moreau", "Responsable HSE", "eve.m@example.com", "+225 05 56 78 90 12", "eve"),
    ]
}

fn demo_teams() -> Vec<Team> {
    vec![
        Team {
            id: "team-1".to_string(),
            name: "Équipe Alpha".to_string(),
            leader_id: "tm-2".to_string(),
            member_ids: vec!["tm-4".to_string(), "tm-5".to_string()],
            project_id: Some("proj-1".to_string()),
            color: TeamColor::Indigo,
        },
        Team {
            id: "team-2".to_string(),
            name: "Équipe Conception".to_string(),
            leader_id: "tm-3".to_string(),
            member_ids: vec!["tm-1".to_string()],
            project_id: Some("proj-2".to_string()),
            color: TeamColor::Emerald,
        },
    ]
}

fn demo_clocking(today: NaiveDate) -> Vec<ClockingEntry> {
    let entry = |id: &str, member_id: &str, start, end, status| ClockingEntry {
        id: id.to_string(),
        member_id: member_id.to_string(),
        date: today,
        start_time: start,
        end_time: end,
        status,
    };
    vec![
        entry("clk-1", "tm-1", hm(7, 55), None, ClockingStatus::Present),
        entry("clk-2", "tm-2", hm(8, 0), None, ClockingStatus::Present),
        entry("clk-3", "tm-4", hm(8, 15), hm(17, 0), ClockingStatus::Completed),
    ]
}

#[allow(clippy::too_many_arguments)]
fn supplier(
    id: &str,
    name: &str,
    category: &str,
    contact_name: &str,
    email: &str,
    phone: &str,
    address: &str,
    status: SupplierStatus,
    rating: u8,
    last_order: NaiveDate,
) -> Supplier {
    Supplier {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        contact_name: contact_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        status,
        rating,
        last_order_date: Some(last_order),
    }
}

fn demo_suppliers() -> Vec<Supplier> {
    vec![
        supplier(
            "sup-1",
            "Béton Express Ivoire",
            "Matériaux de construction",
            "Jean Kaboré",
            "contact@betonexpress.ci",
            "+225 27 21 22 23 24",
            "Zone Industrielle Yopougon, Abidjan",
            SupplierStatus::Active,
            5,
            date(2023, 10, 15),
        ),
        supplier(
            "sup-2",
            "LocaMat Afrique",
            "Location Équipement",
            "Sophie Diarra",
            "sophie@locamatafrique.com",
            "+225 27 22 33 44 55",
            "Boulevard de Marseille, Abidjan",
            SupplierStatus::Active,
            4,
            date(2023, 9, 28),
        ),
        supplier(
            "sup-3",
            "ElecSoluces",
            "Sous-traitant Électricité",
            "Marc Touré",
            "marc@elecsoluces.ci",
            "+225 07 11 22 33 44",
            "Marcory Zone 4, Abidjan",
            SupplierStatus::Inactive,
            3,
            date(2023, 5, 10),
        ),
        supplier(
            "sup-4",
            "Sécurité Totale",
            "Services & Sécurité",
            "Paul Gardien",
            "contact@securitetotale.ci",
            "+225 27 23 45 67 89",
            "Adjamé, Abidjan",
            SupplierStatus::Blacklisted,
            1,
            date(2022, 11, 5),
        ),
    ]
}

fn demo_materials() -> Vec<Material> {
    let image = |photo: &str| {
        Some(format!(
            "https://images.unsplash.com/{photo}?auto=format&fit=crop&q=80&w=200"
        ))
    };
    vec![
        Material {
            id: "mat-1".to_string(),
            name: "Pelleteuse Caterpillar 320".to_string(),
            category: "Engins Lourds".to_string(),
            quantity: 2,
            status: MaterialStatus::InUse,
            location: "Tour Administrative".to_string(),
            serial_number: Some("CAT-320-XC98".to_string()),
            last_maintenance: Some(date(2023, 9, 10)),
            image_url: image("photo-1581093588401-fbb62a02f138"),
        },
        Material {
            id: "mat-2".to_string(),
            name: "Marteau-piqueur Hilti TE 3000".to_string(),
            category: "Outillage".to_string(),
            quantity: 5,
            status: MaterialStatus::Available,
            location: "Entrepôt Central Vridi".to_string(),
            serial_number: Some("HLT-TE3000-554".to_string()),
            last_maintenance: Some(date(2023, 10, 1)),
            image_url: image("photo-1504148455328-c376907d081c"),
        },
        Material {
            id: "mat-3".to_string(),
            name: "Échafaudage Multidirectionnel".to_string(),
            category: "Sécurité & Accès".to_string(),
            quantity: 150,
            status: MaterialStatus::InUse,
            location: "Musée National".to_string(),
            serial_number: Some("ECH-MULTI-001".to_string()),
            last_maintenance: None,
            image_url: image("photo-1541888946425-d81bb19240f5"),
        },
        Material {
            id: "mat-4".to_string(),
            name: "Groupe Électrogène 100kVA".to_string(),
            category: "Énergie".to_string(),
            quantity: 1,
            status: MaterialStatus::Maintenance,
            location: "Atelier Maintenance".to_string(),
            serial_number: Some("GEN-100K-POWER".to_string()),
            last_maintenance: Some(date(2023, 11, 15)),
            image_url: image("photo-1565619624098-e659eb5a8943"),
        },
        Material {
            id: "mat-5".to_string(),
            name: "Kit Casques & Gilets (Lot de 10)".to_string(),
            category: "EPI".to_string(),
            quantity: 20,
            status: MaterialStatus::Available,
            location: "Entrepôt Central Vridi".to_string(),
            serial_number: None,
            last_maintenance: None,
            image_url: image("photo-1523677665006-53692542a68e"),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    project_id: &str,
    on: NaiveDate,
    description: &str,
    amount: u64,
    kind: TransactionType,
    category: TransactionCategory,
    status: TransactionStatus,
    reference: &str,
) -> FinancialRecord {
    FinancialRecord {
        id: id.to_string(),
        project_id: project_id.to_string(),
        date: on,
        description: description.to_string(),
        amount,
        kind,
        category,
        status,
        reference: Some(reference.to_string()),
    }
}

fn demo_financial_records() -> Vec<FinancialRecord> {
    use TransactionCategory as Cat;
    use TransactionStatus as St;
    use TransactionType as Ty;
    vec![
        record("fin-1", "proj-1", date(2024, 8, 5), "Acompte Client #1", 325_000_000, Ty::Income, Cat::Invoice, St::Paid, "FAC-2024-001"),
        record("fin-2", "proj-1", date(2024, 8, 10), "Achat Peinture Industrielle", 9_800_000, Ty::Expense, Cat::Material, St::Paid, "EXP-MAT-884"),
        record("fin-3", "proj-1", date(2024, 8, 15), "Location Grue 1 semaine", 2_950_000, Ty::Expense, Cat::Equipment, St::Paid, "EXP-LOC-221"),
        record("fin-4", "proj-1", date(2024, 9, 1), "Facture intermédiaire #2", 163_750_000, Ty::Income, Cat::Invoice, St::Pending, "FAC-2024-002"),
        record("fin-5", "proj-2", date(2024, 9, 2), "Étude de sol", 5_500_000, Ty::Expense, Cat::Subcontractor, St::Paid, "EXP-SUB-112"),
        record("fin-6", "proj-2", date(2024, 9, 5), "Acompte Démarrage", 786_000_000, Ty::Income, Cat::Invoice, St::Paid, "FAC-2024-003"),
        record("fin-7", "proj-3", date(2023, 6, 15), "Solde Final", 98_250_000, Ty::Income, Cat::Invoice, St::Overdue, "FAC-2023-099"),
    ]
}

fn single_item(id: &str, description: &str, unit_price: u64) -> Vec<InvoiceItem> {
    vec![InvoiceItem {
        id: id.to_string(),
        description: description.to_string(),
        quantity: 1,
        unit_price,
        total: unit_price,
    }]
}

/// Totals here are placeholders; `Session::from_seed` recomputes them.
fn demo_invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: "inv-1".to_string(),
            number: "FAC-2024-001".to_string(),
            date: date(2024, 8, 5),
            due_date: date(2024, 9, 5),
            project_id: "proj-1".to_string(),
            client_name: "Ministère de la Construction".to_string(),
            client_address: "Cité Administrative, Abidjan".to_string(),
            items: single_item("item-1", "Acompte démarrage chantier (20%)", 270_833_333),
            subtotal: 0,
            tax_rate: 18.0,
            tax_amount: 0,
            total: 0,
            status: InvoiceStatus::Paid,
            notes: Some("Virement reçu le 10/08/2024".to_string()),
        },
        Invoice {
            id: "inv-2".to_string(),
            number: "FAC-2024-002".to_string(),
            date: date(2024, 9, 1),
            due_date: date(2024, 10, 1),
            project_id: "proj-1".to_string(),
            client_name: "Ministère de la Construction".to_string(),
            client_address: "Cité Administrative, Abidjan".to_string(),
            items: single_item("item-2", "Avancement Phase 1 - Peinture", 138_771_186),
            subtotal: 0,
            tax_rate: 18.0,
            tax_amount: 0,
            total: 0,
            status: InvoiceStatus::Sent,
            notes: None,
        },
    ]
}
