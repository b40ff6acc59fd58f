//! Ledger totals, chart series and project scoping.

use crate::model::finance::{
    FinancialRecord, Invoice, TransactionCategory, TransactionStatus, TransactionType,
};
use crate::model::project::{Project, ProjectId};
use crate::report::locale::short_month;
use chrono::Datelike;
use serde::Serialize;

/// Label shown for a project reference that no longer resolves.
pub const MISSING_PROJECT_LABEL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub income: u64,
    pub expense: u64,
    /// `income - expense`, negative when spending exceeds income.
    pub net: i64,
    /// Income records still awaiting payment.
    pub pending_income: u64,
}

pub fn financial_summary<'a, I>(records: I) -> FinancialSummary
where
    I: IntoIterator<Item = &'a FinancialRecord>,
{
    let mut summary = FinancialSummary::default();
    for record in records {
        match record.kind {
            TransactionType::Income => {
                summary.income = summary.income.saturating_add(record.amount);
                if record.status == TransactionStatus::Pending {
                    summary.pending_income = summary.pending_income.saturating_add(record.amount);
                }
            }
            TransactionType::Expense => {
                summary.expense = summary.expense.saturating_add(record.amount);
            }
        }
    }
    summary.net = clamp_i64(summary.income) - clamp_i64(summary.expense);
    summary
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: TransactionCategory,
    pub amount: u64,
}

/// Expense sums per category in first-seen order.
pub fn expense_breakdown<'a, I>(records: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a FinancialRecord>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for record in records.into_iter().filter(|r| r.kind == TransactionType::Expense) {
        match totals.iter_mut().find(|t| t.category == record.category) {
            Some(total) => total.amount = total.amount.saturating_add(record.amount),
            None => totals.push(CategoryTotal {
                category: record.category,
                amount: record.amount,
            }),
        }
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    /// Abbreviated French month name, e.g. `"oct."`.
    pub label: &'static str,
    pub value: u64,
}

/// Income per calendar month, oldest first.
///
/// Buckets are keyed by year and month so the same month of two years stays
/// separate. A month with only expenses still gets a zero bucket.
pub fn monthly_income<'a, I>(records: I) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = &'a FinancialRecord>,
{
    let mut points: Vec<MonthlyPoint> = Vec::new();
    for record in records {
        let (year, month) = (record.date.year(), record.date.month());
        let income = if record.is_income() { record.amount } else { 0 };
        match points.iter_mut().find(|p| p.year == year && p.month == month) {
            Some(point) => point.value = point.value.saturating_add(income),
            None => points.push(MonthlyPoint {
                year,
                month,
                label: short_month(month),
                value: income,
            }),
        }
    }
    points.sort_by_key(|point| (point.year, point.month));
    points
}

/// Scope selector for the finance views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Only(ProjectId),
}

impl ProjectFilter {
    pub fn matches(&self, project_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == project_id,
        }
    }
}

/// Record that references a project by ID.
pub trait ProjectScoped {
    fn project_id(&self) -> &str;
}

impl ProjectScoped for FinancialRecord {
    fn project_id(&self) -> &str {
        &self.project_id
    }
}

impl ProjectScoped for Invoice {
    fn project_id(&self) -> &str {
        &self.project_id
    }
}

pub fn filter_by_project<'a, T: ProjectScoped>(items: &'a [T], filter: &ProjectFilter) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| filter.matches(item.project_id()))
        .collect()
}

/// Project name for `project_id`, or `"-"` when it no longer exists.
pub fn project_label<'a>(projects: &'a [Project], project_id: &str) -> &'a str {
    projects
        .iter()
        .find(|project| project.id == project_id)
        .map_or(MISSING_PROJECT_LABEL, |project| project.name.as_str())
}

/// Next invoice number for `year`: `{prefix}-{year}-{seq:03}` where `seq`
/// follows the highest sequence already issued that year.
pub fn next_invoice_number(invoices: &[Invoice], prefix: &str, year: i32) -> String {
    let stem = format!("{prefix}-{year}-");
    let highest = invoices
        .iter()
        .filter_map(|invoice| invoice.number.strip_prefix(stem.as_str()))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{stem}{:03}", highest + 1)
}

#[cfg(test)]
mod tests {
    use super::{expense_breakdown, financial_summary, monthly_income, ProjectFilter};
    use crate::model::finance::{
        FinancialRecord, TransactionCategory, TransactionStatus, TransactionType,
    };
    use chrono::NaiveDate;

    fn record(
        date: (i32, u32, u32),
        amount: u64,
        kind: TransactionType,
        category: TransactionCategory,
        status: TransactionStatus,
    ) -> FinancialRecord {
        FinancialRecord {
            id: format!("fin-{}-{}-{amount}", date.0, date.1),
            project_id: "proj-1".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: "Ligne".to_string(),
            amount,
            kind,
            category,
            status,
            reference: None,
        }
    }

    #[test]
    fn summary_nets_income_against_expense() {
        let records = vec![
            record((2024, 9, 1), 500, TransactionType::Income, TransactionCategory::Invoice, TransactionStatus::Paid),
            record((2024, 9, 2), 300, TransactionType::Income, TransactionCategory::Invoice, TransactionStatus::Pending),
            record((2024, 9, 3), 1_000, TransactionType::Expense, TransactionCategory::Labor, TransactionStatus::Paid),
        ];
        let summary = financial_summary(&records);
        assert_eq!(summary.income, 800);
        assert_eq!(summary.expense, 1_000);
        assert_eq!(summary.net, -200);
        assert_eq!(summary.pending_income, 300);
    }

    #[test]
    fn breakdown_keeps_first_seen_order() {
        let records = vec![
            record((2024, 9, 1), 10, TransactionType::Expense, TransactionCategory::Labor, TransactionStatus::Paid),
            record((2024, 9, 2), 20, TransactionType::Expense, TransactionCategory::Material, TransactionStatus::Paid),
            record((2024, 9, 3), 5, TransactionType::Expense, TransactionCategory::Labor, TransactionStatus::Paid),
            record((2024, 9, 4), 99, TransactionType::Income, TransactionCategory::Invoice, TransactionStatus::Paid),
        ];
        let breakdown = expense_breakdown(&records);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, TransactionCategory::Labor);
        assert_eq!(breakdown[0].amount, 15);
        assert_eq!(breakdown[1].amount, 20);
    }

    #[test]
    fn same_month_of_two_years_stays_separate() {
        let records = vec![
            record((2025, 1, 10), 70, TransactionType::Income, TransactionCategory::Invoice, TransactionStatus::Paid),
            record((2024, 1, 10), 30, TransactionType::Income, TransactionCategory::Invoice, TransactionStatus::Paid),
            record((2024, 2, 1), 40, TransactionType::Expense, TransactionCategory::Other, TransactionStatus::Paid),
        ];
        let series = monthly_income(&records);
        let flat: Vec<(i32, u32, &str, u64)> = series
            .iter()
            .map(|p| (p.year, p.month, p.label, p.value))
            .collect();
        assert_eq!(
            flat,
            vec![
                (2024, 1, "janv.", 30),
                (2024, 2, "févr.", 0),
                (2025, 1, "janv.", 70),
            ]
        );
    }

    #[test]
    fn filter_matches_all_or_one_project() {
        assert!(ProjectFilter::All.matches("proj-9"));
        assert!(ProjectFilter::Only("proj-1".to_string()).matches("proj-1"));
        assert!(!ProjectFilter::Only("proj-1".to_string()).matches("proj-2"));
    }
}
