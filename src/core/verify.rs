//! Consistency checks for a written document.

use crate::core::aggregate;
use crate::domain::model::{ScanData, TOP_LEVEL_KEYS};
use crate::utils::error::{ReportError, Result};
use std::collections::BTreeSet;

/// Relative tolerance for comparing float sums.
pub const COST_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    pub total_resources: usize,
    pub resource_types: usize,
    pub accounts: usize,
    pub total_monthly_cost: f64,
}

fn violation(message: impl Into<String>) -> ReportError {
    ReportError::VerificationError {
        message: message.into(),
    }
}

/// Checks the raw JSON first so a missing key is reported by name.
pub fn verify_document(raw: &[u8]) -> Result<VerificationReport> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    let object = value
        .as_object()
        .ok_or_else(|| violation("document is not a JSON object"))?;

    for key in TOP_LEVEL_KEYS {
        if !object.contains_key(key) {
            return Err(violation(format!("missing top-level key '{}'", key)));
        }
    }

    let data: ScanData = serde_json::from_value(value)?;
    verify_scan_data(&data)
}

pub fn verify_scan_data(data: &ScanData) -> Result<VerificationReport> {
    let resources = &data.unused_resources;

    if data.scan_metrics.total_resources != resources.len() {
        return Err(violation(format!(
            "TotalResources is {} but UnusedResources holds {}",
            data.scan_metrics.total_resources,
            resources.len()
        )));
    }

    let counted: usize = data.scan_metrics.resources_by_type.values().sum();
    if counted != resources.len() {
        return Err(violation(format!(
            "ResourcesByType adds up to {} but UnusedResources holds {}",
            counted,
            resources.len()
        )));
    }

    let by_type = aggregate::resources_by_type(resources);
    if data.scan_metrics.resources_by_type != by_type {
        return Err(violation(format!(
            "ResourcesByType {:?} does not match the resources listed ({:?})",
            data.scan_metrics.resources_by_type, by_type
        )));
    }

    for resource in resources {
        let in_account_regions = data
            .accounts_and_regions
            .get(&resource.account_id)
            .is_some_and(|regions| regions.contains(&resource.region));
        if !in_account_regions {
            return Err(violation(format!(
                "resource {} is in {} which account {} was not scanned in",
                resource.id, resource.region, resource.account_id
            )));
        }
    }

    let expected = aggregate::cost_breakdown(resources);
    let mut seen = BTreeSet::new();
    for listed in &data.cost_breakdown {
        if !seen.insert(listed.resource_type) {
            return Err(violation(format!(
                "CostBreakdown lists {} more than once",
                listed.resource_type
            )));
        }
        let entry = expected
            .iter()
            .find(|e| e.resource_type == listed.resource_type)
            .ok_or_else(|| {
                violation(format!(
                    "CostBreakdown has an entry for {} but no such resources exist",
                    listed.resource_type
                ))
            })?;
        if !listed.costs.approx_eq(&entry.costs, COST_TOLERANCE) {
            return Err(violation(format!(
                "CostBreakdown for {} does not match its resources",
                listed.resource_type
            )));
        }
    }
    if let Some(missing) = expected.iter().find(|e| !seen.contains(&e.resource_type)) {
        return Err(violation(format!(
            "CostBreakdown has no entry for {}",
            missing.resource_type
        )));
    }

    let total = aggregate::total_costs(resources);
    if !data.total_costs.approx_eq(&total, COST_TOLERANCE) {
        return Err(violation("TotalCosts does not match the sum of all resources"));
    }

    Ok(VerificationReport {
        total_resources: resources.len(),
        resource_types: expected.len(),
        accounts: data.account_names.len(),
        total_monthly_cost: total.monthly,
    })
}
