use crate::domain::catalog::{self, ResourceType};
use crate::domain::model::{
    AccountNames, AccountsAndRegions, ClusterConfig, Endpoint, GeneratedBatch, NetworkInterface,
    PerformanceInsights, ProvisionedThroughput, Resource, ResourceCosts, ResourceDetails,
    SecurityGroup, Tag, TIMESTAMP_FORMAT,
};
use chrono::{Duration, NaiveDateTime};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub min_per_type: usize,
    pub max_per_type: usize,
    pub accounts: Vec<(String, String)>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_per_type: 5,
            max_per_type: 15,
            accounts: catalog::DEFAULT_ACCOUNTS
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }
}

/// Where a resource lives; fed into the type-specific details.
#[derive(Debug, Clone)]
pub struct Placement<'a> {
    pub name: &'a str,
    pub account_id: &'a str,
    pub region: &'a str,
}

pub struct SampleGenerator<R: Rng> {
    rng: R,
    now: NaiveDateTime,
}

impl SampleGenerator<ChaCha8Rng> {
    /// Same seed and `now` give the same document.
    pub fn seeded(seed: Option<u64>, now: NaiveDateTime) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(rng, now)
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn new(rng: R, now: NaiveDateTime) -> Self {
        Self { rng, now }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn timestamp(&self) -> String {
        self.now.format(TIMESTAMP_FORMAT).to_string()
    }

    fn days_ago(&self, days: i64) -> String {
        (self.now - Duration::days(days))
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    /// A date uniformly within the last `span` days (today included).
    fn recent_date(&mut self, span: i64) -> String {
        let days = self.rng.gen_range(0..span);
        self.days_ago(days)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.gen_range(0..items.len())]
    }

    fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// `<prefix>-%08x` over a non-negative 31-bit draw.
    fn hex_id(&mut self, prefix: &str) -> String {
        format!("{}-{:08x}", prefix, self.rng.gen_range(0..1u32 << 31))
    }

    fn environment_tag(&mut self) -> Tag {
        let env = self.pick(&catalog::ENVIRONMENTS);
        Tag::new("Environment", env)
    }

    /// The first N catalog regions, N in 3..=7.
    pub fn random_regions(&mut self) -> Vec<String> {
        let count = self.rng.gen_range(3..=catalog::REGIONS.len());
        catalog::REGIONS[..count]
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    pub fn resource_name(&mut self, resource_type: ResourceType) -> String {
        match resource_type.base_name() {
            Some(name) => name.to_string(),
            None => format!("{}-db", self.pick(&catalog::RDS_NAME_ENGINES)),
        }
    }

    /// Between three and five reasons the resource looks unused.
    pub fn reasons(&mut self, resource_type: ResourceType) -> Vec<String> {
        let cpu_util = self.rng.gen::<f64>() * 4.0 + 1.0;
        let memory_util = self.rng.gen::<f64>() * 7.0 + 1.0;
        let network_util = self.rng.gen::<f64>() * 1.9 + 0.1;

        let mut reasons: Vec<String> = match resource_type {
            ResourceType::Ec2Instance => vec![
                format!(
                    "Low CPU utilization (average {:.2}%) in the last 180 days",
                    cpu_util
                ),
                format!("Low memory utilization (average {:.2}%)", memory_util),
                format!("Minimal network traffic ({:.2} KB/s average)", network_util),
                "No active SSH sessions in past 90 days".into(),
                "Instance has been running continuously without maintenance window".into(),
            ],
            ResourceType::RdsInstance => {
                let connections = self.rng.gen_range(0..=5);
                let storage_used = self.rng.gen::<f64>() * 15.0 + 5.0;
                vec![
                    format!(
                        "Low connection count (average {} active connections/day)",
                        connections
                    ),
                    format!("Low storage utilization ({:.1}% used)", storage_used),
                    "Minimal query activity in the last 180 days".into(),
                    "No database parameter changes in past 90 days".into(),
                    "Backup retention period longer than necessary".into(),
                ]
            }
            ResourceType::Elb => vec![
                format!(
                    "Low request count (average {:.1} requests/minute)",
                    network_util
                ),
                "No healthy backend instances".into(),
                "SSL certificate expiring soon".into(),
                "Cross-zone load balancing disabled".into(),
                "Access logs disabled".into(),
            ],
            ResourceType::EbsVolume => {
                let iops = self.rng.gen::<f64>() * 10.0 + 1.0;
                vec![
                    format!("Low I/O activity (average {:.1} IOPS)", iops),
                    "Volume not attached to any instance".into(),
                    "Volume type may be over-provisioned".into(),
                    "Snapshot schedule not configured".into(),
                    "Volume encryption not enabled".into(),
                ]
            }
            ResourceType::EbsSnapshot => {
                let age_in_days = self.rng.gen_range(180..360);
                vec![
                    format!("Snapshot is {} days old", age_in_days),
                    "Source volume has been deleted".into(),
                    "Multiple redundant snapshots exist".into(),
                    "No tags present".into(),
                    "Created from terminated instance".into(),
                ]
            }
            ResourceType::DynamoDbTable => {
                let read_capacity = self.rng.gen::<f64>() * 1.9 + 0.1;
                let write_capacity = self.rng.gen::<f64>() * 0.9 + 0.1;
                vec![
                    format!(
                        "Low read capacity utilization ({:.2}% of provisioned)",
                        read_capacity
                    ),
                    format!(
                        "Low write capacity utilization ({:.2}% of provisioned)",
                        write_capacity
                    ),
                    "No table updates in past month".into(),
                    "Auto-scaling not configured".into(),
                    "Backup older than retention policy".into(),
                ]
            }
            ResourceType::IamUser => vec![
                "No console or API activity in past 180 days".into(),
                "Access keys not rotated in past year".into(),
                "MFA not enabled".into(),
                "Attached policies provide excessive permissions".into(),
                "Direct policy attachments instead of group-based".into(),
            ],
            ResourceType::IamRole => vec![
                "No service activity in past 90 days".into(),
                "Overly permissive trust relationship".into(),
                "Unused service permissions".into(),
                "Policy allows full administrative access".into(),
                "No boundary policy configured".into(),
            ],
            ResourceType::ElasticIp => vec![
                "Not associated with any running instance".into(),
                "Associated instance in stopped state".into(),
                "No DNS records pointing to this IP".into(),
                "In unused region".into(),
                "No tags present".into(),
            ],
            ResourceType::OpenSearchDomain => vec![
                format!("Low search traffic ({:.2} requests/second)", network_util),
                format!("Low CPU utilization (average {:.2}%)", cpu_util),
                "Instance type may be over-provisioned".into(),
                "Unused index replicas".into(),
                "Snapshot retention longer than necessary".into(),
            ],
        };

        let keep = self.rng.gen_range(3..=5);
        reasons.truncate(keep);
        reasons
    }

    pub fn details(
        &mut self,
        resource_type: ResourceType,
        placement: &Placement<'_>,
    ) -> ResourceDetails {
        let mut details = ResourceDetails::default();

        match resource_type {
            ResourceType::Ec2Instance => {
                let instance_type =
                    catalog::EC2_HOURLY_RATES[self.rng.gen_range(0..catalog::EC2_DRAWN_TYPES)].0;
                details.instance_type = Some(instance_type.to_string());
                details.state = Some(self.pick(&["running", "stopped"]).to_string());
                details.launch_time = Some(self.recent_date(365));
                let name = self.resource_name(resource_type);
                let environment = self.environment_tag();
                let team = self.pick(&catalog::TEAMS);
                details.tags = vec![
                    Tag::new("Name", format!("{}-01", name)),
                    environment,
                    Tag::new("Team", team),
                ];
                details.security_groups = vec![
                    SecurityGroup::new("sg-0123456789abcdef0", "default"),
                    SecurityGroup::new("sg-0123456789abcdef1", "web-servers"),
                ];
                details.network_interfaces = vec![NetworkInterface {
                    network_interface_id: "eni-0123456789abcdef0".to_string(),
                    private_ip_address: "172.31.16.100".to_string(),
                }];
            }

            ResourceType::RdsInstance => {
                let class = catalog::RDS_HOURLY_RATES
                    [self.rng.gen_range(0..catalog::RDS_HOURLY_RATES.len())]
                .0;
                let engine = self.pick(&catalog::RDS_ENGINES);
                details.db_instance_class = Some(class.to_string());
                details.engine = Some(engine.to_string());
                details.engine_version = Some("8.0.28".to_string());
                details.db_instance_identifier = Some(placement.name.to_string());
                details.db_instance_status = Some("available".to_string());
                details.master_username = Some("admin".to_string());
                details.allocated_storage = Some(self.rng.gen_range(50..=1000));
                details.backup_retention_period = Some(self.rng.gen_range(5..=35));
                details.preferred_backup_window = Some("03:00-04:00".to_string());
                details.multi_az = self.coin();
                details.publicly_accessible = self.coin();
                details.storage_encrypted = self.coin();
                details.vpc_security_groups =
                    vec![SecurityGroup::new("sg-0123456789abcdef2", "rds-security-group")];
                details.endpoint = Some(Endpoint {
                    address: format!(
                        "{}.{}.{}.rds.amazonaws.com",
                        placement.name, placement.account_id, placement.region
                    ),
                    port: if engine == "postgres" { 5432 } else { 3306 },
                });
                details.performance_insights = Some(PerformanceInsights {
                    enabled: true,
                    retention_period: 7,
                });
            }

            ResourceType::Elb => {
                details.state = Some("active".to_string());
                let name = self.resource_name(resource_type);
                let environment = self.environment_tag();
                details.tags = vec![Tag::new("Name", name), environment];
                details.security_groups =
                    vec![SecurityGroup::new("sg-0123456789abcdef3", "elb-security-group")];
            }

            ResourceType::EbsVolume => {
                let volume_type = catalog::EBS_VOLUME_RATES
                    [self.rng.gen_range(0..catalog::EBS_VOLUME_RATES.len())]
                .0;
                details.volume_type = Some(volume_type.to_string());
                details.size = Some(self.rng.gen_range(10..=110));
                details.volume_id = Some(self.hex_id("vol"));
                details.state = Some(self.pick(&["available", "in-use"]).to_string());
                details.encrypted = self.coin();
                details.iops = Some(self.rng.gen_range(4000..=20000));
                details.multi_attach = self.coin();
                let name = self.resource_name(resource_type);
                details.tags = vec![Tag::new("Name", name)];
            }

            ResourceType::EbsSnapshot => {
                details.volume_id = Some(self.hex_id("vol"));
                details.size = Some(self.rng.gen_range(10..=110));
                details.state = Some("completed".to_string());
                details.encrypted = self.coin();
                details.create_date = Some(self.recent_date(365));
            }

            ResourceType::DynamoDbTable => {
                details.table_name = Some(self.resource_name(resource_type));
                details.table_status = Some("ACTIVE".to_string());
                details.creation_date_time = Some(self.recent_date(365));
                details.table_size_bytes = Some(self.rng.gen_range(1_000_000..11_000_000));
                details.item_count = Some(self.rng.gen_range(1000..11000));
                details.stream_enabled = self.coin();
                details.provisioned_throughput = Some(ProvisionedThroughput {
                    read_capacity_units: self.rng.gen_range(10..=100),
                    write_capacity_units: self.rng.gen_range(5..=50),
                });
            }

            ResourceType::IamUser => {
                details.create_date = Some(self.recent_date(730));
                details.password_last_used = Some(self.recent_date(365));
                details.groups = Some(self.rng.gen_range(1..=4));
                details.attached_policies = Some(self.rng.gen_range(1..=6));
            }

            ResourceType::IamRole => {
                details.create_date = Some(self.recent_date(730));
                details.last_used_date = Some(self.recent_date(365));
                details.attached_policies = Some(self.rng.gen_range(1..=6));
            }

            ResourceType::ElasticIp => {
                let (a, b, c): (u8, u8, u8) = self.rng.gen();
                details.public_ip = Some(format!("54.{}.{}.{}", a, b, c));
                details.allocation_id = Some(self.hex_id("eipalloc"));
                details.domain = Some("vpc".to_string());
            }

            ResourceType::OpenSearchDomain => {
                details.engine = Some("OpenSearch".to_string());
                details.engine_version = Some("2.5".to_string());
                details.cluster_config = Some(ClusterConfig {
                    dedicated_master_enabled: false,
                    instance_count: 2,
                    instance_type: "t3.small.search".to_string(),
                    warm_enabled: false,
                    zone_awareness_enabled: true,
                });
                details.storage_encrypted = true;
                let name = self.resource_name(resource_type);
                let environment = self.environment_tag();
                details.tags = vec![Tag::new("Name", name), environment];
            }
        }

        details
    }

    /// Hourly price from the rate tables, extrapolated to the longer periods.
    /// Lifetime covers one to three years.
    pub fn costs(
        &mut self,
        resource_type: ResourceType,
        details: &ResourceDetails,
    ) -> ResourceCosts {
        let hourly = match resource_type {
            ResourceType::Ec2Instance => catalog::lookup_rate(
                &catalog::EC2_HOURLY_RATES,
                details.instance_type.as_deref().unwrap_or_default(),
            ),
            ResourceType::RdsInstance => {
                let base = catalog::lookup_rate(
                    &catalog::RDS_HOURLY_RATES,
                    details.db_instance_class.as_deref().unwrap_or_default(),
                );
                if details.multi_az {
                    base * 2.0
                } else {
                    base
                }
            }
            ResourceType::Elb => catalog::ELB_HOURLY,
            ResourceType::EbsVolume => {
                let rate = catalog::lookup_rate(
                    &catalog::EBS_VOLUME_RATES,
                    details.volume_type.as_deref().unwrap_or_default(),
                );
                rate * f64::from(details.size.unwrap_or(0)) / catalog::HOURS_PER_MONTH
            }
            ResourceType::EbsSnapshot => {
                f64::from(details.size.unwrap_or(0)) * catalog::EBS_SNAPSHOT_RATE
                    / catalog::HOURS_PER_MONTH
            }
            ResourceType::DynamoDbTable => details
                .provisioned_throughput
                .as_ref()
                .map(|t| {
                    f64::from(t.read_capacity_units) * catalog::DYNAMODB_READ_UNIT_HOURLY
                        + f64::from(t.write_capacity_units) * catalog::DYNAMODB_WRITE_UNIT_HOURLY
                })
                .unwrap_or(0.0),
            ResourceType::IamUser | ResourceType::IamRole => 0.0,
            ResourceType::ElasticIp => catalog::ELASTIC_IP_HOURLY,
            ResourceType::OpenSearchDomain => catalog::OPENSEARCH_HOURLY,
        };

        let daily = hourly * 24.0;
        let monthly = daily * catalog::DAYS_PER_MONTH;
        let yearly = monthly * 12.0;
        let lifetime_years = self.rng.gen_range(1..=3);

        ResourceCosts {
            hourly,
            daily,
            monthly,
            yearly,
            lifetime: yearly * f64::from(lifetime_years),
        }
    }

    /// One record of `resource_type`; `index` is its position within the type.
    pub fn resource(
        &mut self,
        resource_type: ResourceType,
        index: usize,
        account: &(String, String),
        regions: &AccountsAndRegions,
    ) -> Resource {
        let (account_id, account_name) = account;
        let region = match regions.get(account_id).filter(|r| !r.is_empty()) {
            Some(list) => list[self.rng.gen_range(0..list.len())].clone(),
            None => catalog::REGIONS[0].to_string(),
        };

        let id = format!(
            "{}-{:08}",
            resource_type.id_prefix(),
            self.rng.gen_range(10_000_000..100_000_000u32)
        );
        let name = format!("{}-{:02}", self.resource_name(resource_type), index + 1);

        let placement = Placement {
            name: &name,
            account_id,
            region: &region,
        };
        let details = self.details(resource_type, &placement);

        let last_used = {
            let days = self.rng.gen_range(30..=180);
            self.days_ago(days)
        };
        let estimated_monthly_savings = self.rng.gen::<f64>() * 900.0 + 100.0;
        let reasons = self.reasons(resource_type);
        let costs = self.costs(resource_type, &details);

        Resource {
            id,
            name,
            resource_type,
            account_id: account_id.clone(),
            account_name: account_name.clone(),
            region,
            last_used,
            estimated_monthly_savings,
            reasons,
            details,
            costs,
        }
    }

    /// Accounts, their regions and every resource, in catalog order.
    pub fn generate(&mut self, settings: &GeneratorSettings) -> GeneratedBatch {
        let mut accounts_and_regions = AccountsAndRegions::new();
        let mut account_names = AccountNames::new();
        for (id, name) in &settings.accounts {
            let regions = self.random_regions();
            accounts_and_regions.insert(id.clone(), regions);
            account_names.insert(id.clone(), name.clone());
        }

        let mut resources = Vec::new();
        if settings.accounts.is_empty() {
            tracing::warn!("No accounts configured, generating an empty inventory");
        } else {
            let max = settings.max_per_type;
            let min = settings.min_per_type.min(max);
            for resource_type in ResourceType::ALL {
                let count = self.rng.gen_range(min..=max);
                tracing::debug!("Generating {} x {}", count, resource_type);
                for index in 0..count {
                    let account =
                        &settings.accounts[self.rng.gen_range(0..settings.accounts.len())];
                    resources.push(self.resource(
                        resource_type,
                        index,
                        account,
                        &accounts_and_regions,
                    ));
                }
            }
        }

        GeneratedBatch {
            accounts_and_regions,
            account_names,
            resources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn generator(seed: u64) -> SampleGenerator<ChaCha8Rng> {
        SampleGenerator::seeded(Some(seed), fixed_now())
    }

    fn placement() -> Placement<'static> {
        Placement {
            name: "mysql-db-01",
            account_id: "123456789012",
            region: "eu-west-1",
        }
    }

    #[test]
    fn test_random_regions_are_catalog_prefix() {
        let mut gen = generator(1);
        for _ in 0..50 {
            let regions = gen.random_regions();
            assert!((3..=7).contains(&regions.len()));
            for (i, region) in regions.iter().enumerate() {
                assert_eq!(region, catalog::REGIONS[i]);
            }
        }
    }

    #[test]
    fn test_reasons_count_between_three_and_five() {
        let mut gen = generator(2);
        for resource_type in ResourceType::ALL {
            for _ in 0..20 {
                let reasons = gen.reasons(resource_type);
                assert!((3..=5).contains(&reasons.len()), "{:?}", reasons);
            }
        }
    }

    #[test]
    fn test_ec2_reasons_format_utilization() {
        let mut gen = generator(3);
        let reasons = gen.reasons(ResourceType::Ec2Instance);
        assert!(reasons[0].starts_with("Low CPU utilization (average "));
        assert!(reasons[0].ends_with("%) in the last 180 days"));
        assert!(reasons[1].starts_with("Low memory utilization"));
    }

    #[test]
    fn test_rds_name_uses_engine() {
        let mut gen = generator(4);
        for _ in 0..20 {
            let name = gen.resource_name(ResourceType::RdsInstance);
            assert!(
                ["mysql-db", "postgres-db", "aurora-postgresql-db"].contains(&name.as_str()),
                "{}",
                name
            );
        }
        assert_eq!(gen.resource_name(ResourceType::ElasticIp), "static-ip");
    }

    #[test]
    fn test_ec2_costs_follow_rate_table() {
        let mut gen = generator(5);
        let details = ResourceDetails {
            instance_type: Some("t3.medium".to_string()),
            ..Default::default()
        };
        let costs = gen.costs(ResourceType::Ec2Instance, &details);

        assert_eq!(costs.hourly, 0.0416);
        assert!((costs.daily - 0.0416 * 24.0).abs() < 1e-12);
        assert!((costs.monthly - costs.daily * 30.44).abs() < 1e-12);
        assert!((costs.yearly - costs.monthly * 12.0).abs() < 1e-12);
        let years = costs.lifetime / costs.yearly;
        assert!([1.0, 2.0, 3.0].iter().any(|y| (years - y).abs() < 1e-9));
    }

    #[test]
    fn test_rds_multi_az_doubles_price() {
        let mut gen = generator(6);
        let mut details = ResourceDetails {
            db_instance_class: Some("db.r5.large".to_string()),
            ..Default::default()
        };
        assert_eq!(gen.costs(ResourceType::RdsInstance, &details).hourly, 0.29);

        details.multi_az = true;
        assert_eq!(gen.costs(ResourceType::RdsInstance, &details).hourly, 0.58);
    }

    #[test]
    fn test_storage_and_throughput_costs() {
        let mut gen = generator(7);
        let volume = ResourceDetails {
            volume_type: Some("gp2".to_string()),
            size: Some(73),
            ..Default::default()
        };
        let hourly = gen.costs(ResourceType::EbsVolume, &volume).hourly;
        assert!((hourly - 0.10 * 73.0 / 730.0).abs() < 1e-12);

        let snapshot = ResourceDetails {
            size: Some(100),
            ..Default::default()
        };
        let hourly = gen.costs(ResourceType::EbsSnapshot, &snapshot).hourly;
        assert!((hourly - 100.0 * 0.05 / 730.0).abs() < 1e-12);

        let table = ResourceDetails {
            provisioned_throughput: Some(ProvisionedThroughput {
                read_capacity_units: 10,
                write_capacity_units: 5,
            }),
            ..Default::default()
        };
        let hourly = gen.costs(ResourceType::DynamoDbTable, &table).hourly;
        assert!((hourly - (10.0 * 0.00013 + 5.0 * 0.00065)).abs() < 1e-12);

        let costs = gen.costs(ResourceType::IamRole, &ResourceDetails::default());
        assert_eq!(costs, ResourceCosts::default());
    }

    #[test]
    fn test_rds_details_use_placement() {
        let mut gen = generator(8);
        let details = gen.details(ResourceType::RdsInstance, &placement());
        let endpoint = details.endpoint.expect("endpoint");

        assert_eq!(
            endpoint.address,
            "mysql-db-01.123456789012.eu-west-1.rds.amazonaws.com"
        );
        let expected_port = if details.engine.as_deref() == Some("postgres") {
            5432
        } else {
            3306
        };
        assert_eq!(endpoint.port, expected_port);
        assert_eq!(details.db_instance_identifier.as_deref(), Some("mysql-db-01"));
        assert!((50..=1000).contains(&details.allocated_storage.unwrap()));
        assert!((5..=35).contains(&details.backup_retention_period.unwrap()));
    }

    #[test]
    fn test_generated_rds_endpoint_names_its_own_placement() {
        let mut gen = generator(7);
        let batch = gen.generate(&GeneratorSettings::default());
        let rds: Vec<_> = batch
            .resources
            .iter()
            .filter(|r| r.resource_type == ResourceType::RdsInstance)
            .collect();
        assert!(!rds.is_empty());

        for resource in rds {
            let endpoint = resource.details.endpoint.as_ref().unwrap();
            assert_eq!(
                endpoint.address,
                format!(
                    "{}.{}.{}.rds.amazonaws.com",
                    resource.name, resource.account_id, resource.region
                )
            );
            assert!(!endpoint.address.starts_with("mydb."));
        }
    }

    #[test]
    fn test_ebs_volume_details_ranges() {
        let mut gen = generator(9);
        for _ in 0..30 {
            let details = gen.details(ResourceType::EbsVolume, &placement());
            assert!((10..=110).contains(&details.size.unwrap()));
            assert!((4000..=20000).contains(&details.iops.unwrap()));
            let volume_id = details.volume_id.unwrap();
            assert!(volume_id.starts_with("vol-"));
            assert_eq!(volume_id.len(), "vol-".len() + 8);
        }
    }

    #[test]
    fn test_dates_are_in_the_past() {
        let mut gen = generator(10);
        let now = fixed_now();
        for _ in 0..20 {
            let details = gen.details(ResourceType::IamUser, &placement());
            let created = NaiveDateTime::parse_from_str(
                details.create_date.as_deref().unwrap(),
                TIMESTAMP_FORMAT,
            )
            .unwrap();
            assert!(created <= now);
            assert!(now - created < Duration::days(730));
        }
    }

    #[test]
    fn test_resource_identity_fields() {
        let mut gen = generator(11);
        let account = ("234567890123".to_string(), "Staging".to_string());
        let mut regions = AccountsAndRegions::new();
        regions.insert(
            account.0.clone(),
            vec!["us-east-1".to_string(), "us-east-2".to_string()],
        );

        let resource = gen.resource(ResourceType::EbsSnapshot, 6, &account, &regions);

        assert!(resource.id.starts_with("ebs-snapshot-"));
        assert_eq!(resource.id.len(), "ebs-snapshot-".len() + 8);
        assert_eq!(resource.name, "backup-07");
        assert_eq!(resource.account_name, "Staging");
        assert!(regions[&account.0].contains(&resource.region));
        assert!((100.0..1000.0).contains(&resource.estimated_monthly_savings));

        let last_used =
            NaiveDateTime::parse_from_str(&resource.last_used, TIMESTAMP_FORMAT).unwrap();
        let age = fixed_now() - last_used;
        assert!(age >= Duration::days(30) && age <= Duration::days(180));
    }

    #[test]
    fn test_generate_respects_bounds() {
        let mut gen = generator(12);
        let settings = GeneratorSettings {
            min_per_type: 2,
            max_per_type: 4,
            ..Default::default()
        };
        let batch = gen.generate(&settings);

        assert_eq!(batch.account_names.len(), 3);
        assert_eq!(batch.accounts_and_regions.len(), 3);
        for resource_type in ResourceType::ALL {
            let count = batch
                .resources
                .iter()
                .filter(|r| r.resource_type == resource_type)
                .count();
            assert!((2..=4).contains(&count), "{} x {}", count, resource_type);
        }
    }

    #[test]
    fn test_generate_without_accounts_is_empty() {
        let mut gen = generator(13);
        let settings = GeneratorSettings {
            accounts: vec![],
            ..Default::default()
        };
        let batch = gen.generate(&settings);
        assert!(batch.resources.is_empty());
        assert!(batch.account_names.is_empty());
    }

    #[test]
    fn test_same_seed_same_batch() {
        let settings = GeneratorSettings::default();
        let first = generator(42).generate(&settings);
        let second = generator(42).generate(&settings);
        assert_eq!(first.resources, second.resources);
        assert_eq!(first.accounts_and_regions, second.accounts_and_regions);
    }
}
