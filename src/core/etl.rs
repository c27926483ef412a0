use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Fetch, build every table, then write. Any phase error aborts the run
    /// before output is written.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting table generation");

        // Extract
        let source = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched {} bytes from {}",
            source.text.len(),
            source.origin
        );
        self.monitor.log_phase("extract");

        // Transform
        let result = self.pipeline.transform(source).await?;
        tracing::info!(
            "Merged {} raw ranges into {} tables",
            result.raw_range_count,
            result.tables.len()
        );
        self.monitor.log_phase("transform");

        // Load
        let location = self.pipeline.load(result).await?;
        tracing::info!("Tables written to {}", location);
        self.monitor.log_phase("load");

        self.monitor.log_final_stats();
        Ok(location)
    }
}
