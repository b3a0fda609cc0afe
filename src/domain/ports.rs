use crate::domain::model::{
    ExtractionSettings, NerSettings, NerToken, Sentence, TransformResult,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Human-readable location of `path` once written.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn sentences(&self) -> &[String];
    fn input_file(&self) -> Option<&str>;
    fn extraction_settings(&self) -> ExtractionSettings;
    fn ner_settings(&self) -> Option<NerSettings>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn compress_output(&self) -> bool;
    fn archive_name(&self) -> &str {
        "trip_output.zip"
    }
}

/// Token-classification model behind the `ner` and `hybrid` strategies.
#[async_trait]
pub trait NerBackend: Send + Sync {
    async fn tag(&self, text: &str) -> Result<Vec<NerToken>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Sentence>>;
    async fn transform(&self, data: Vec<Sentence>) -> Result<TransformResult>;
    async fn load(&self, result: &TransformResult) -> Result<String>;
}
