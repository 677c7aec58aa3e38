//! Fixed lookup tables the generator draws from.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "EC2 Instance")]
    Ec2Instance,
    #[serde(rename = "RDS Instance")]
    RdsInstance,
    #[serde(rename = "ELB")]
    Elb,
    #[serde(rename = "EBS Volume")]
    EbsVolume,
    #[serde(rename = "EBS Snapshot")]
    EbsSnapshot,
    #[serde(rename = "DynamoDB Table")]
    DynamoDbTable,
    #[serde(rename = "IAM User")]
    IamUser,
    #[serde(rename = "IAM Role")]
    IamRole,
    #[serde(rename = "Elastic IP")]
    ElasticIp,
    #[serde(rename = "OpenSearch Domain")]
    OpenSearchDomain,
}

impl ResourceType {
    /// Catalog order; generation and the cost breakdown both follow it.
    pub const ALL: [ResourceType; 10] = [
        ResourceType::Ec2Instance,
        ResourceType::RdsInstance,
        ResourceType::Elb,
        ResourceType::EbsVolume,
        ResourceType::EbsSnapshot,
        ResourceType::DynamoDbTable,
        ResourceType::IamUser,
        ResourceType::IamRole,
        ResourceType::ElasticIp,
        ResourceType::OpenSearchDomain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Ec2Instance => "EC2 Instance",
            ResourceType::RdsInstance => "RDS Instance",
            ResourceType::Elb => "ELB",
            ResourceType::EbsVolume => "EBS Volume",
            ResourceType::EbsSnapshot => "EBS Snapshot",
            ResourceType::DynamoDbTable => "DynamoDB Table",
            ResourceType::IamUser => "IAM User",
            ResourceType::IamRole => "IAM Role",
            ResourceType::ElasticIp => "Elastic IP",
            ResourceType::OpenSearchDomain => "OpenSearch Domain",
        }
    }

    /// `"EBS Volume"` -> `"ebs-volume"`.
    pub fn id_prefix(&self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }

    /// Base name for everything but RDS, whose name depends on a drawn engine.
    pub fn base_name(&self) -> Option<&'static str> {
        match self {
            ResourceType::Ec2Instance => Some("app-server"),
            ResourceType::RdsInstance => None,
            ResourceType::Elb => Some("load-balancer"),
            ResourceType::EbsVolume => Some("data-volume"),
            ResourceType::EbsSnapshot => Some("backup"),
            ResourceType::DynamoDbTable => Some("user-data"),
            ResourceType::IamUser => Some("system-user"),
            ResourceType::IamRole => Some("service-role"),
            ResourceType::ElasticIp => Some("static-ip"),
            ResourceType::OpenSearchDomain => Some("search-cluster"),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const REGIONS: [&str; 7] = [
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "eu-central-1",
    "eu-west-1",
    "ap-southeast-1",
];

pub const DEFAULT_ACCOUNTS: [(&str, &str); 3] = [
    ("123456789012", "Production"),
    ("234567890123", "Staging"),
    ("345678901234", "Development"),
];

pub const ENVIRONMENTS: [&str; 3] = ["dev", "stg", "prod"];
pub const TEAMS: [&str; 3] = ["platform", "backend", "frontend"];

/// Engines used to name RDS instances.
pub const RDS_NAME_ENGINES: [&str; 3] = ["mysql", "postgres", "aurora-postgresql"];
/// Engines written into RDS details.
pub const RDS_ENGINES: [&str; 3] = ["mysql", "postgres", "aurora"];

/// On-demand hourly price per EC2 instance type. Only the first
/// `EC2_DRAWN_TYPES` entries are ever drawn.
pub const EC2_HOURLY_RATES: [(&str, f64); 7] = [
    ("t3.micro", 0.0104),
    ("t3.small", 0.0208),
    ("t3.medium", 0.0416),
    ("t3.large", 0.0832),
    ("r5.xlarge", 0.252),
    ("r5.2xlarge", 0.504),
    ("r5.4xlarge", 1.008),
];
pub const EC2_DRAWN_TYPES: usize = 5;

pub const RDS_HOURLY_RATES: [(&str, f64); 4] = [
    ("db.t3.micro", 0.017),
    ("db.t3.small", 0.034),
    ("db.t3.medium", 0.068),
    ("db.r5.large", 0.29),
];

/// Per GB-month.
pub const EBS_VOLUME_RATES: [(&str, f64); 2] = [("gp2", 0.10), ("gp3", 0.08)];
pub const EBS_SNAPSHOT_RATE: f64 = 0.05;

pub const DYNAMODB_READ_UNIT_HOURLY: f64 = 0.00013;
pub const DYNAMODB_WRITE_UNIT_HOURLY: f64 = 0.00065;

pub const ELB_HOURLY: f64 = 0.0225;
pub const ELASTIC_IP_HOURLY: f64 = 0.005;
pub const OPENSEARCH_HOURLY: f64 = 0.0138;

pub const HOURS_PER_MONTH: f64 = 730.0;
pub const DAYS_PER_MONTH: f64 = 30.44;

pub fn lookup_rate(table: &[(&str, f64)], key: &str) -> f64 {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rate)| *rate)
        .unwrap_or(0.0)
}
