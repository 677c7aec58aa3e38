use crate::domain::catalog::ResourceType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timestamp layout used for every date field in the document.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Account id -> region names the account was "scanned" in.
pub type AccountsAndRegions = BTreeMap<String, Vec<String>>;

/// Account id -> display name.
pub type AccountNames = BTreeMap<String, String>;

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: String,
}

impl SecurityGroup {
    pub fn new(group_id: &str, group_name: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            group_name: group_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInterface {
    pub network_interface_id: String,
    pub private_ip_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Endpoint {
    pub address: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PerformanceInsights {
    pub enabled: bool,
    pub retention_period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    pub read_capacity_units: u32,
    pub write_capacity_units: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterConfig {
    pub dedicated_master_enabled: bool,
    pub instance_count: u32,
    pub instance_type: String,
    pub warm_enabled: bool,
    pub zone_awareness_enabled: bool,
}

/// Sparse, type-specific attributes of a resource. Unset fields, zero counts and
/// `false` flags are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<SecurityGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub network_interfaces: Vec<NetworkInterface>,
    #[serde(rename = "DBInstanceClass", skip_serializing_if = "Option::is_none")]
    pub db_instance_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    #[serde(rename = "DBInstanceIdentifier", skip_serializing_if = "Option::is_none")]
    pub db_instance_identifier: Option<String>,
    #[serde(rename = "DBInstanceStatus", skip_serializing_if = "Option::is_none")]
    pub db_instance_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocated_storage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_retention_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_backup_window: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vpc_security_groups: Vec<SecurityGroup>,
    #[serde(rename = "MultiAZ", skip_serializing_if = "is_false")]
    pub multi_az: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub publicly_accessible: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub storage_encrypted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_insights: Option<PerformanceInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_id: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub encrypted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub multi_attach: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<ProvisionedThroughput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub stream_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_last_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attached_policies: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_config: Option<ClusterConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceCosts {
    pub hourly: f64,
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub lifetime: f64,
}

impl ResourceCosts {
    pub fn accumulate(&mut self, other: &ResourceCosts) {
        self.hourly += other.hourly;
        self.daily += other.daily;
        self.monthly += other.monthly;
        self.yearly += other.yearly;
        self.lifetime += other.lifetime;
    }

    /// `(name, value)` pairs in document order.
    pub fn periods(&self) -> [(&'static str, f64); 5] {
        [
            ("hourly", self.hourly),
            ("daily", self.daily),
            ("monthly", self.monthly),
            ("yearly", self.yearly),
            ("lifetime", self.lifetime),
        ]
    }

    /// Relative comparison; sums of a few hundred floats drift in the last bits.
    pub fn approx_eq(&self, other: &ResourceCosts, tolerance: f64) -> bool {
        self.periods()
            .iter()
            .zip(other.periods().iter())
            .all(|((_, a), (_, b))| (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub account_id: String,
    pub account_name: String,
    pub region: String,
    pub last_used: String,
    pub estimated_monthly_savings: f64,
    pub reasons: Vec<String>,
    pub details: ResourceDetails,
    pub costs: ResourceCosts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(flatten)]
    pub costs: ResourceCosts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanMetrics {
    pub completed_at: String,
    pub total_resources: usize,
    pub resources_by_type: BTreeMap<ResourceType, usize>,
    pub total_cost: f64,
    pub total_scans: u32,
    pub completed_scans: u32,
    pub failed_scans: u32,
    pub tasks_per_second: f64,
    pub avg_execution_time_ms: f64,
    pub worker_utilization: f64,
    pub peak_workers: u32,
    pub max_workers: u32,
    pub total_run_time: String,
}

/// The whole generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanData {
    pub scan_metrics: ScanMetrics,
    pub accounts_and_regions: AccountsAndRegions,
    pub account_names: AccountNames,
    pub unused_resources: Vec<Resource>,
    pub cost_breakdown: Vec<CostBreakdown>,
    pub total_costs: ResourceCosts,
}

/// Output of the generation stage, before any aggregate is computed.
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub accounts_and_regions: AccountsAndRegions,
    pub account_names: AccountNames,
    pub resources: Vec<Resource>,
}

/// Top-level keys every document must carry.
pub const TOP_LEVEL_KEYS: [&str; 6] = [
    "ScanMetrics",
    "AccountsAndRegions",
    "AccountNames",
    "UnusedResources",
    "CostBreakdown",
    "TotalCosts",
];
