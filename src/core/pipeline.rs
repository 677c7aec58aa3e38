use crate::core::aggregate;
use crate::core::generator::{GeneratorSettings, SampleGenerator};
use crate::core::{ConfigProvider, GeneratedBatch, Pipeline, ScanData, Storage};
use crate::domain::model::Resource;
use crate::utils::error::{ReportError, Result};
use chrono::{Local, NaiveDateTime};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::Path;
use tokio::sync::Mutex;

/// Generates a fake inventory, aggregates it and writes it through `storage`.
pub struct SamplePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    generator: Mutex<SampleGenerator<ChaCha8Rng>>,
}

impl<S: Storage, C: ConfigProvider> SamplePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::new_at(storage, config, Local::now().naive_local())
    }

    /// Pins the clock so seeded runs produce identical documents.
    pub fn new_at(storage: S, config: C, now: NaiveDateTime) -> Self {
        let generator = SampleGenerator::seeded(config.seed(), now);
        Self {
            storage,
            config,
            generator: Mutex::new(generator),
        }
    }

    fn settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            min_per_type: self.config.min_per_type(),
            max_per_type: self.config.max_per_type(),
            accounts: self.config.accounts(),
        }
    }

    fn csv_file_name(&self) -> String {
        let stem = Path::new(self.config.file_name())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sample_scan_data");
        format!("{}.csv", stem)
    }
}

#[derive(Debug, Serialize)]
struct ResourceRow<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    resource_type: &'a str,
    account_id: &'a str,
    account_name: &'a str,
    region: &'a str,
    last_used: &'a str,
    estimated_monthly_savings: f64,
    hourly: f64,
    daily: f64,
    monthly: f64,
    yearly: f64,
    lifetime: f64,
    reasons: String,
}

impl<'a> From<&'a Resource> for ResourceRow<'a> {
    fn from(resource: &'a Resource) -> Self {
        Self {
            id: &resource.id,
            name: &resource.name,
            resource_type: resource.resource_type.label(),
            account_id: &resource.account_id,
            account_name: &resource.account_name,
            region: &resource.region,
            last_used: &resource.last_used,
            estimated_monthly_savings: resource.estimated_monthly_savings,
            hourly: resource.costs.hourly,
            daily: resource.costs.daily,
            monthly: resource.costs.monthly,
            yearly: resource.costs.yearly,
            lifetime: resource.costs.lifetime,
            reasons: resource.reasons.join("; "),
        }
    }
}

/// Flat one-row-per-resource table of the inventory.
pub fn resources_to_csv(resources: &[Resource]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for resource in resources {
        writer.serialize(ResourceRow::from(resource))?;
    }
    writer.into_inner().map_err(|e| ReportError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SamplePipeline<S, C> {
    async fn extract(&self) -> Result<GeneratedBatch> {
        let settings = self.settings();
        tracing::debug!(
            "Generating {}..={} resources per type across {} accounts",
            settings.min_per_type,
            settings.max_per_type,
            settings.accounts.len()
        );

        let mut generator = self.generator.lock().await;
        Ok(generator.generate(&settings))
    }

    async fn transform(&self, batch: GeneratedBatch) -> Result<ScanData> {
        let by_type = aggregate::resources_by_type(&batch.resources);
        let mut generator = self.generator.lock().await;
        let completed_at = generator.timestamp();
        let metrics = aggregate::scan_metrics(generator.rng_mut(), completed_at, by_type);
        drop(generator);

        let data = aggregate::assemble(batch, metrics);
        tracing::debug!(
            "Aggregated {} cost breakdown entries, monthly total {:.2}",
            data.cost_breakdown.len(),
            data.total_costs.monthly
        );
        Ok(data)
    }

    async fn load(&self, data: ScanData) -> Result<String> {
        let json = serde_json::to_vec_pretty(&data)?;
        tracing::debug!("Writing {} bytes of JSON", json.len());
        self.storage
            .write_file(self.config.file_name(), &json)
            .await?;

        if self.config.csv_export() {
            let csv_name = self.csv_file_name();
            let csv = resources_to_csv(&data.unused_resources)?;
            self.storage.write_file(&csv_name, &csv).await?;
            tracing::info!(
                "CSV export written to {}",
                Path::new(self.config.output_path()).join(&csv_name).display()
            );
        }

        Ok(Path::new(self.config.output_path())
            .join(self.config.file_name())
            .display()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verify;
    use crate::domain::catalog::ResourceType;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ReportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        seed: Option<u64>,
        min_per_type: usize,
        max_per_type: usize,
        csv_export: bool,
    }

    impl MockConfig {
        fn new(seed: u64) -> Self {
            Self {
                seed: Some(seed),
                min_per_type: 5,
                max_per_type: 15,
                csv_export: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn output_path(&self) -> &str {
            "test_output"
        }

        fn file_name(&self) -> &str {
            "scan.json"
        }

        fn seed(&self) -> Option<u64> {
            self.seed
        }

        fn min_per_type(&self) -> usize {
            self.min_per_type
        }

        fn max_per_type(&self) -> usize {
            self.max_per_type
        }

        fn accounts(&self) -> Vec<(String, String)> {
            vec![
                ("111111111111".to_string(), "Sandbox".to_string()),
                ("222222222222".to_string(), "Shared".to_string()),
            ]
        }

        fn csv_export(&self) -> bool {
            self.csv_export
        }
    }

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_extract_uses_configured_accounts() {
        let pipeline = SamplePipeline::new_at(MockStorage::new(), MockConfig::new(1), fixed_now());
        let batch = pipeline.extract().await.unwrap();

        assert_eq!(batch.account_names.len(), 2);
        assert_eq!(batch.account_names["111111111111"], "Sandbox");
        assert!(batch
            .resources
            .iter()
            .all(|r| r.account_id == "111111111111" || r.account_id == "222222222222"));
        assert!(batch.resources.len() >= 50 && batch.resources.len() <= 150);
    }

    #[tokio::test]
    async fn test_transform_fills_aggregates() {
        let pipeline = SamplePipeline::new_at(MockStorage::new(), MockConfig::new(2), fixed_now());
        let batch = pipeline.extract().await.unwrap();
        let count = batch.resources.len();
        let data = pipeline.transform(batch).await.unwrap();

        assert_eq!(data.scan_metrics.total_resources, count);
        assert_eq!(data.scan_metrics.completed_at, "2025-01-15T09:00:00");
        assert_eq!(data.cost_breakdown.len(), ResourceType::ALL.len());
        assert!(verify::verify_scan_data(&data).is_ok());
    }

    #[tokio::test]
    async fn test_load_writes_pretty_json() {
        let storage = MockStorage::new();
        let pipeline = SamplePipeline::new_at(storage.clone(), MockConfig::new(3), fixed_now());
        let batch = pipeline.extract().await.unwrap();
        let data = pipeline.transform(batch).await.unwrap();
        let output_path = pipeline.load(data).await.unwrap();

        assert_eq!(
            output_path,
            Path::new("test_output").join("scan.json").display().to_string()
        );
        let written = storage.get_file("scan.json").await.unwrap();
        let text = String::from_utf8(written.clone()).unwrap();
        assert!(text.starts_with("{\n  \"ScanMetrics\": {"));
        assert!(verify::verify_document(&written).is_ok());
        assert!(storage.get_file("scan.csv").await.is_none());
    }

    #[tokio::test]
    async fn test_load_with_csv_export() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new(4);
        config.csv_export = true;
        let pipeline = SamplePipeline::new_at(storage.clone(), config, fixed_now());
        let batch = pipeline.extract().await.unwrap();
        let data = pipeline.transform(batch).await.unwrap();
        let resource_count = data.unused_resources.len();
        pipeline.load(data).await.unwrap();

        let csv_bytes = storage.get_file("scan.csv").await.unwrap();
        let mut reader = csv::Reader::from_reader(csv_bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "id");
        assert_eq!(&headers[2], "type");
        assert_eq!(reader.records().count(), resource_count);
    }

    #[tokio::test]
    async fn test_same_seed_same_document() {
        let first = MockStorage::new();
        let second = MockStorage::new();
        for storage in [&first, &second] {
            let pipeline =
                SamplePipeline::new_at(storage.clone(), MockConfig::new(99), fixed_now());
            let batch = pipeline.extract().await.unwrap();
            let data = pipeline.transform(batch).await.unwrap();
            pipeline.load(data).await.unwrap();
        }

        assert_eq!(
            first.get_file("scan.json").await,
            second.get_file("scan.json").await
        );
    }
}
