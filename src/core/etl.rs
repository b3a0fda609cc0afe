use crate::core::{Pipeline, TripInfo};
use crate::utils::error::Result;

/// What a finished run hands back to the binaries.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub records: Vec<TripInfo>,
    pub output_path: String,
}

pub struct TripEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> TripEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<EngineOutput> {
        tracing::info!("🚀 Starting trip extraction");

        // Extract
        tracing::info!("📥 Collecting sentences...");
        let sentences = self.pipeline.extract().await?;
        tracing::info!("📥 Collected {} sentences", sentences.len());

        // Transform
        tracing::info!("🔄 Extracting trip details...");
        let result = self.pipeline.transform(sentences).await?;
        tracing::info!("🔄 Built {} records", result.records.len());

        // Load
        tracing::info!("💾 Writing output...");
        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("💾 Output: {}", output_path);

        Ok(EngineOutput {
            records: result.records,
            output_path,
        })
    }
}
