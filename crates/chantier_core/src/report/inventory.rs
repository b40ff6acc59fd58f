//! Equipment and supplier list views.

use crate::model::inventory::{Material, MaterialStatus, Supplier};
use crate::report::matches_search;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialStats {
    /// Sum of quantities across every record.
    pub total_quantity: u64,
    pub in_maintenance: usize,
    pub available: usize,
}

pub fn material_stats(materials: &[Material]) -> MaterialStats {
    MaterialStats {
        total_quantity: materials.iter().map(|m| u64::from(m.quantity)).sum(),
        in_maintenance: materials
            .iter()
            .filter(|m| m.status == MaterialStatus::Maintenance)
            .count(),
        available: materials
            .iter()
            .filter(|m| m.status == MaterialStatus::Available)
            .count(),
    }
}

/// Search on name, location and serial number.
pub fn filter_materials<'a>(
    materials: &'a [Material],
    search: &str,
    status: Option<MaterialStatus>,
) -> Vec<&'a Material> {
    materials
        .iter()
        .filter(|m| status.map_or(true, |status| m.status == status))
        .filter(|m| {
            matches_search(
                search,
                &[
                    Some(m.name.as_str()),
                    Some(m.location.as_str()),
                    m.serial_number.as_deref(),
                ],
            )
        })
        .collect()
}

/// Search on name, contact name and email; `category` must match exactly.
pub fn filter_suppliers<'a>(
    suppliers: &'a [Supplier],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a Supplier> {
    suppliers
        .iter()
        .filter(|s| category.map_or(true, |category| s.category == category))
        .filter(|s| {
            matches_search(
                search,
                &[
                    Some(s.name.as_str()),
                    Some(s.contact_name.as_str()),
                    Some(s.email.as_str()),
                ],
            )
        })
        .collect()
}

/// Distinct supplier categories in first-seen order.
pub fn supplier_categories(suppliers: &[Supplier]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for supplier in suppliers {
        if !categories.contains(&supplier.category.as_str()) {
            categories.push(&supplier.category);
        }
    }
    categories
}
