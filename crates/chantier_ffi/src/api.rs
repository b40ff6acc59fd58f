//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-wide portfolio session and serialize access to it.
//! - Turn every core outcome into an envelope or a JSON document.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Destructive calls are already confirmed by the UI shell; the dispatcher
//!   here always approves.
//! - Drafts and snapshots travel as camelCase JSON.

use chantier_core::model::clocking::ClockingDraft;
use chantier_core::model::finance::{
    FinancialRecordDraft, InvoiceDraft, InvoiceItemDraft, InvoiceItemPatch,
};
use chantier_core::model::inventory::{MaterialDraft, MaterialStatus, SupplierDraft};
use chantier_core::model::project::{DailyLogDraft, DocumentDraft, ProjectDraft, TaskDraft};
use chantier_core::model::team::{MemberDraft, TeamDraft};
use chantier_core::model::time::TimeOfDay;
use chantier_core::report::clocking::HistoryGrouping;
use chantier_core::report::finance::ProjectFilter;
use chantier_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Command, ConfirmationRequest, CoreConfig, DemoSeed, Dispatched, Dispatcher, EmptySeed,
    FormSubmission, SavedReport, Session, ToastQueue,
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

const SEED_ENV: &str = "CHANTIER_SEED";
const DATE_FORMAT: &str = "%Y-%m-%d";

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope for command flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// ID of the created or affected record, when the command has one.
    pub id: Option<String>,
    /// Toast text for the UI, or the failure reason.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// JSON view envelope; `json` is empty when `ok` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    pub ok: bool,
    pub json: String,
    pub message: String,
}

impl JsonResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            json: String::new(),
            message: message.into(),
        }
    }
}

/// Replaces the session with a fresh one built from `seed` (`empty|demo`).
///
/// An empty `seed` falls back to `CHANTIER_SEED`, then to `demo`.
#[flutter_rust_bridge::frb(sync)]
pub fn session_reset(seed: String) -> ActionResponse {
    let session = match resolve_seed(&seed).and_then(load_session) {
        Ok(session) => session,
        Err(err) => {
            log::warn!("event=session_reset module=ffi status=error");
            return ActionResponse::failure(format!("session_reset failed: {err}"));
        }
    };
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = Some(session);
    log::info!("event=session_reset module=ffi status=ok");
    ActionResponse::success("Session initialisée", None)
}

/// Every record of the session, shaped like the seed bundle.
#[flutter_rust_bridge::frb(sync)]
pub fn portfolio_snapshot() -> JsonResponse {
    view("portfolio_snapshot", |session| serde_json::to_string(&session.snapshot()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardView<'a> {
    summary: chantier_core::report::dashboard::DashboardSummary,
    upcoming_tasks: Vec<chantier_core::report::TaskWithProject<'a>>,
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_overview() -> JsonResponse {
    view("dashboard_overview", |session| {
        serde_json::to_string(&DashboardView {
            summary: session.dashboard_summary(),
            upcoming_tasks: session.upcoming_tasks(),
        })
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClockingView<'a> {
    stats: chantier_core::report::clocking::DayStats,
    entries: Vec<&'a chantier_core::model::clocking::ClockingEntry>,
    history: Vec<chantier_core::report::clocking::HistoryGroup>,
}

/// Attendance for `date` (`YYYY-MM-DD`) and history grouped `weekly|monthly`.
#[flutter_rust_bridge::frb(sync)]
pub fn clocking_overview(date: String, grouping: String) -> JsonResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(err) => return JsonResponse::failure(format!("clocking_overview failed: {err}")),
    };
    let grouping = match grouping.trim().to_ascii_lowercase().as_str() {
        "monthly" => HistoryGrouping::Monthly,
        _ => HistoryGrouping::Weekly,
    };
    view("clocking_overview", |session| {
        serde_json::to_string(&ClockingView {
            stats: session.day_stats(date),
            entries: session.clocking_on(date),
            history: session.clocking_history(grouping),
        })
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinanceView<'a> {
    summary: chantier_core::report::finance::FinancialSummary,
    expense_breakdown: Vec<chantier_core::report::finance::CategoryTotal>,
    monthly_income: Vec<chantier_core::report::finance::MonthlyPoint>,
    invoices: Vec<&'a chantier_core::model::finance::Invoice>,
}

/// Ledger figures for one project, or for all when `project_id` is `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn finance_overview(project_id: Option<String>) -> JsonResponse {
    let filter = match project_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => ProjectFilter::Only(id),
        None => ProjectFilter::All,
    };
    view("finance_overview", |session| {
        serde_json::to_string(&FinanceView {
            summary: session.financial_summary(&filter),
            expense_breakdown: session.expense_breakdown(&filter),
            monthly_income: session.monthly_income(&filter),
            invoices: session.invoices_for(&filter),
        })
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InventoryView<'a> {
    stats: chantier_core::report::inventory::MaterialStats,
    materials: Vec<&'a chantier_core::model::inventory::Material>,
    suppliers: Vec<&'a chantier_core::model::inventory::Supplier>,
    supplier_categories: Vec<&'a str>,
}

/// Materials and suppliers matching `search`; `status` uses the wire tag.
#[flutter_rust_bridge::frb(sync)]
pub fn inventory_overview(search: String, status: Option<String>) -> JsonResponse {
    let status = match status.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => match parse_json::<MaterialStatus>(&format!("\"{}\"", raw.trim())) {
            Ok(status) => Some(status),
            Err(err) => return JsonResponse::failure(format!("inventory_overview failed: {err}")),
        },
        None => None,
    };
    view("inventory_overview", |session| {
        serde_json::to_string(&InventoryView {
            stats: session.material_stats(),
            materials: session.search_materials(&search, status),
            suppliers: session.search_suppliers(&search, None),
            supplier_categories: session.supplier_categories(),
        })
    })
}

/// Creates (`project_id = None`) or replaces a project from its form JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_project(project_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form::<ProjectDraft>(project_id, &draft_json, Command::SubmitProject)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_project(project_id: String) -> ActionResponse {
    run(Command::DeleteProject(project_id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn submit_task(project_id: String, task_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form(task_id, &draft_json, |form: FormSubmission<TaskDraft>| Command::SubmitTask {
        project_id,
        form,
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(project_id: String, task_id: String) -> ActionResponse {
    run(Command::DeleteTask {
        project_id,
        task_id,
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_daily_log(project_id: String, draft_json: String) -> ActionResponse {
    match parse_json::<DailyLogDraft>(&draft_json) {
        Ok(draft) => run(Command::AddDailyLog { project_id, draft }),
        Err(err) => ActionResponse::failure(err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_document(project_id: String, draft_json: String) -> ActionResponse {
    match parse_json::<DocumentDraft>(&draft_json) {
        Ok(draft) => run(Command::AddDocument { project_id, draft }),
        Err(err) => ActionResponse::failure(err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_document(project_id: String, document_id: String) -> ActionResponse {
    run(Command::DeleteDocument {
        project_id,
        document_id,
    })
}

/// Stores a generated Markdown report as a project document dated today.
#[flutter_rust_bridge::frb(sync)]
pub fn save_report(
    project_id: String,
    report_type: String,
    period_start: String,
    content: String,
) -> ActionResponse {
    let period_start = match parse_date(&period_start) {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(format!("save_report failed: {err}")),
    };
    run(Command::SaveReport {
        project_id,
        report: SavedReport {
            report_type,
            period_start,
            content,
            saved_on: today(),
        },
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn submit_team(team_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form::<TeamDraft>(team_id, &draft_json, Command::SubmitTeam)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_team(team_id: String) -> ActionResponse {
    run(Command::DeleteTeam(team_id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn assign_team(team_id: String, project_id: String) -> ActionResponse {
    run(Command::AssignTeam {
        team_id,
        project_id,
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn unassign_team(team_id: String) -> ActionResponse {
    run(Command::UnassignTeam(team_id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn submit_member(member_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form::<MemberDraft>(member_id, &draft_json, Command::SubmitMember)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_member(member_id: String) -> ActionResponse {
    run(Command::DeleteMember(member_id))
}

/// Clock-in at `time` (`HH:mm`) on `date` (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn clock_in(member_id: String, date: String, time: String) -> ActionResponse {
    match parse_date_time(&date, &time) {
        Ok((date, at)) => run(Command::ClockIn {
            member_id,
            date,
            at,
        }),
        Err(err) => ActionResponse::failure(format!("clock_in failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn clock_out(member_id: String, date: String, time: String) -> ActionResponse {
    match parse_date_time(&date, &time) {
        Ok((date, at)) => run(Command::ClockOut {
            member_id,
            date,
            at,
        }),
        Err(err) => ActionResponse::failure(format!("clock_out failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn reset_clocking(member_id: String, date: String) -> ActionResponse {
    match parse_date(&date) {
        Ok(date) => run(Command::ResetClocking { member_id, date }),
        Err(err) => ActionResponse::failure(format!("reset_clocking failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn submit_clocking(entry_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form::<ClockingDraft>(entry_id, &draft_json, Command::SubmitClocking)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_clocking(entry_id: String) -> ActionResponse {
    run(Command::DeleteClocking(entry_id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn submit_material(material_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form::<MaterialDraft>(material_id, &draft_json, Command::SubmitMaterial)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_material(material_id: String) -> ActionResponse {
    run(Command::DeleteMaterial(material_id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn submit_supplier(supplier_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form::<SupplierDraft>(supplier_id, &draft_json, Command::SubmitSupplier)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_supplier(supplier_id: String) -> ActionResponse {
    run(Command::DeleteSupplier(supplier_id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn submit_financial_record(record_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form::<FinancialRecordDraft>(record_id, &draft_json, Command::SubmitFinancialRecord)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_financial_record(record_id: String) -> ActionResponse {
    run(Command::DeleteFinancialRecord(record_id))
}

/// Creates or resubmits a whole invoice form, line items included.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_invoice(invoice_id: Option<String>, draft_json: String) -> ActionResponse {
    run_form::<InvoiceDraft>(invoice_id, &draft_json, Command::SubmitInvoice)
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_invoice(invoice_id: String) -> ActionResponse {
    run(Command::DeleteInvoice(invoice_id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_invoice_item(invoice_id: String, description: String, quantity: u32, unit_price: u64) -> ActionResponse {
    run(Command::AddInvoiceItem {
        invoice_id,
        draft: InvoiceItemDraft::new(description, quantity, unit_price),
    })
}

/// Partial line edit; `None` keeps the current value.
#[flutter_rust_bridge::frb(sync)]
pub fn update_invoice_item(
    invoice_id: String,
    item_id: String,
    description: Option<String>,
    quantity: Option<u32>,
    unit_price: Option<u64>,
) -> ActionResponse {
    run(Command::UpdateInvoiceItem {
        invoice_id,
        item_id,
        patch: InvoiceItemPatch {
            description,
            quantity,
            unit_price,
        },
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_invoice_item(invoice_id: String, item_id: String) -> ActionResponse {
    run(Command::RemoveInvoiceItem {
        invoice_id,
        item_id,
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_invoice_tax_rate(invoice_id: String, tax_rate: f64) -> ActionResponse {
    run(Command::SetInvoiceTaxRate {
        invoice_id,
        tax_rate,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeedChoice {
    Empty,
    Demo,
}

fn resolve_seed(requested: &str) -> Result<SeedChoice, String> {
    let raw = if requested.trim().is_empty() {
        std::env::var(SEED_ENV).unwrap_or_default()
    } else {
        requested.to_string()
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "demo" => Ok(SeedChoice::Demo),
        "empty" => Ok(SeedChoice::Empty),
        other => Err(format!("unsupported seed `{other}`; expected empty|demo")),
    }
}

fn load_session(choice: SeedChoice) -> Result<Session, String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    let session = match choice {
        SeedChoice::Empty => Session::from_seed(&EmptySeed, config),
        SeedChoice::Demo => Session::from_seed(&DemoSeed::new(today()), config),
    };
    session.map_err(|err| err.to_string())
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Result<T, String> {
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    if guard.is_none() {
        *guard = Some(resolve_seed("").and_then(load_session)?);
        log::info!("event=session_load module=ffi status=ok");
    }
    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err("session unavailable".to_string()),
    }
}

fn run(command: Command) -> ActionResponse {
    let name = command.name();
    let outcome = with_session(|session| {
        let mut dispatcher =
            Dispatcher::new(ToastQueue::from_config(session.config()), |_: &ConfirmationRequest| true);
        let result = dispatcher.dispatch(session, command);
        let (mut toasts, _) = dispatcher.into_parts();
        let message = toasts
            .drain()
            .pop()
            .map(|toast| toast.message)
            .unwrap_or_default();
        (result, message)
    });
    match outcome {
        Ok((Ok(Dispatched::Applied { id }), message)) => ActionResponse::success(message, id),
        Ok((Ok(Dispatched::Cancelled), _)) => ActionResponse::failure(format!("{name} cancelled")),
        Ok((Err(_), message)) => ActionResponse::failure(message),
        Err(err) => ActionResponse::failure(format!("{name} failed: {err}")),
    }
}

fn run_form<D: DeserializeOwned>(
    id: Option<String>,
    draft_json: &str,
    command: impl FnOnce(FormSubmission<D>) -> Command,
) -> ActionResponse {
    let draft = match parse_json::<D>(draft_json) {
        Ok(draft) => draft,
        Err(err) => return ActionResponse::failure(err),
    };
    let form = match id.filter(|id| !id.trim().is_empty()) {
        Some(id) => FormSubmission::Update(id, draft),
        None => FormSubmission::Create(draft),
    };
    run(command(form))
}

fn view(name: &str, render: impl FnOnce(&Session) -> serde_json::Result<String>) -> JsonResponse {
    let rendered = with_session(|session| render(session));
    match rendered {
        Ok(Ok(json)) => JsonResponse {
            ok: true,
            json,
            message: String::new(),
        },
        Ok(Err(err)) => JsonResponse::failure(format!("{name} failed: {err}")),
        Err(err) => JsonResponse::failure(format!("{name} failed: {err}")),
    }
}

fn parse_json<D: DeserializeOwned>(raw: &str) -> Result<D, String> {
    serde_json::from_str(raw).map_err(|err| format!("invalid form payload: {err}"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date `{raw}`; expected YYYY-MM-DD"))
}

fn parse_date_time(date: &str, time: &str) -> Result<(NaiveDate, TimeOfDay), String> {
    let date = parse_date(date)?;
    let at = time.parse::<TimeOfDay>().map_err(|err| err.to_string())?;
    Ok((date, at))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
