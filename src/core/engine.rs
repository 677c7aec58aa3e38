use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::StageMonitor;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: StageMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: StageMonitor::new(monitor_enabled),
        }
    }

    /// Generate, aggregate, write. Returns the path of the JSON document.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Generating sample scan report...");

        let batch = self.pipeline.extract().await?;
        tracing::info!(
            "Generated {} resources across {} accounts",
            batch.resources.len(),
            batch.account_names.len()
        );
        self.monitor.log_stage("extract");

        let data = self.pipeline.transform(batch).await?;
        tracing::info!(
            "Aggregated {} resource types, estimated monthly cost ${:.2}",
            data.cost_breakdown.len(),
            data.total_costs.monthly
        );
        self.monitor.log_stage("transform");

        let output_path = self.pipeline.load(data).await?;
        tracing::info!("Report written to {}", output_path);
        self.monitor.log_stage("load");
        self.monitor.log_summary();

        Ok(output_path)
    }
}
