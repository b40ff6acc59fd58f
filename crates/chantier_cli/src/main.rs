//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `chantier_core` linkage.
//! - Load the demo portfolio and print a deterministic summary of it.

use chantier_core::report::dashboard::format_budget;
use chantier_core::report::finance::ProjectFilter;
use chantier_core::report::locale::format_amount;
use chantier_core::{CoreConfig, DemoSeed, Session};

fn main() {
    println!("chantier_core ping={}", chantier_core::ping());
    println!("chantier_core version={}", chantier_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            std::process::exit(2);
        }
    };
    let today = chrono::Local::now().date_naive();
    let session = match Session::from_seed(&DemoSeed::new(today), config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("demo seed rejected: {err}");
            std::process::exit(1);
        }
    };

    let currency = session.config().currency_label.as_str();
    let dashboard = session.dashboard_summary();
    println!(
        "projects={} in_progress={} budget={}",
        session.projects().len(),
        dashboard.in_progress_projects,
        format_budget(dashboard.total_budget, currency)
    );
    println!(
        "tasks to_do={} done={}",
        dashboard.tasks_to_do, dashboard.completed_tasks
    );

    let attendance = session.day_stats(today);
    println!(
        "clocking date={today} present={} completed={} absent={}",
        attendance.present, attendance.completed, attendance.absent
    );

    let finance = session.financial_summary(&ProjectFilter::All);
    println!(
        "finance income={} expense={} net={}",
        format_amount(finance.income),
        format_amount(finance.expense),
        finance.net
    );
    for invoice in session.invoices() {
        println!(
            "invoice {} subtotal={} tax={} total={}",
            invoice.number,
            format_amount(invoice.subtotal()),
            format_amount(invoice.tax_amount()),
            format_amount(invoice.total())
        );
    }
}
