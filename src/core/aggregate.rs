use crate::domain::catalog::ResourceType;
use crate::domain::model::{
    CostBreakdown, GeneratedBatch, Resource, ResourceCosts, ScanData, ScanMetrics,
};
use rand::Rng;
use std::collections::BTreeMap;

pub const MAX_WORKERS: u32 = 10;
pub const RUN_TIME_SECONDS: f64 = 60.0;
pub const RUN_TIME_LABEL: &str = "1m0s";

pub fn resources_by_type(resources: &[Resource]) -> BTreeMap<ResourceType, usize> {
    let mut counts = BTreeMap::new();
    for resource in resources {
        *counts.entry(resource.resource_type).or_insert(0) += 1;
    }
    counts
}

/// Worker and throughput figures for a pretend one-minute scan.
pub fn scan_metrics<R: Rng>(
    rng: &mut R,
    completed_at: String,
    resources_by_type: BTreeMap<ResourceType, usize>,
) -> ScanMetrics {
    let total_resources = resources_by_type.values().sum();

    let peak_workers = rng.gen_range(7..=MAX_WORKERS);
    let worker_utilization = f64::from(peak_workers) / f64::from(MAX_WORKERS) * 100.0;
    let tasks_per_second = rng.gen::<f64>() * 3.0 + 5.0;
    let total_scans = (tasks_per_second * RUN_TIME_SECONDS) as u32;
    let failed_scans = rng.gen_range(1..=3);
    let total_cost = rng.gen::<f64>() * 10000.0 + 5000.0;

    ScanMetrics {
        completed_at,
        total_resources,
        resources_by_type,
        total_cost,
        total_scans,
        completed_scans: total_scans - failed_scans,
        failed_scans,
        tasks_per_second,
        avg_execution_time_ms: RUN_TIME_SECONDS * 1000.0 / f64::from(total_scans),
        worker_utilization,
        peak_workers,
        max_workers: MAX_WORKERS,
        total_run_time: RUN_TIME_LABEL.to_string(),
    }
}

/// Per-type sums, one entry per type present, in catalog order.
pub fn cost_breakdown(resources: &[Resource]) -> Vec<CostBreakdown> {
    let mut by_type: BTreeMap<ResourceType, ResourceCosts> = BTreeMap::new();
    for resource in resources {
        by_type
            .entry(resource.resource_type)
            .or_default()
            .accumulate(&resource.costs);
    }

    by_type
        .into_iter()
        .map(|(resource_type, costs)| CostBreakdown {
            resource_type,
            costs,
        })
        .collect()
}

pub fn total_costs(resources: &[Resource]) -> ResourceCosts {
    let mut total = ResourceCosts::default();
    for resource in resources {
        total.accumulate(&resource.costs);
    }
    total
}

pub fn assemble(batch: GeneratedBatch, scan_metrics: ScanMetrics) -> ScanData {
    let cost_breakdown = cost_breakdown(&batch.resources);
    let total_costs = total_costs(&batch.resources);

    ScanData {
        scan_metrics,
        accounts_and_regions: batch.accounts_and_regions,
        account_names: batch.account_names,
        unused_resources: batch.resources,
        cost_breakdown,
        total_costs,
    }
}
