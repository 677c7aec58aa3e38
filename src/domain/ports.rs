use crate::domain::model::{GeneratedBatch, ScanData};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Everything the generator needs to know, whichever way it was configured.
pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn file_name(&self) -> &str;
    fn seed(&self) -> Option<u64>;
    fn min_per_type(&self) -> usize;
    fn max_per_type(&self) -> usize;
    /// `(account id, display name)` pairs.
    fn accounts(&self) -> Vec<(String, String)>;
    fn csv_export(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<GeneratedBatch>;
    async fn transform(&self, batch: GeneratedBatch) -> Result<ScanData>;
    async fn load(&self, data: ScanData) -> Result<String>;
}
