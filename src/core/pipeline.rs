use crate::adapters::ner_http::HttpNerBackend;
use crate::core::{ConfigProvider, NerBackend, Pipeline, Sentence, Storage, TransformResult, TripInfo};
use crate::core::samples::SAMPLE_SENTENCES;
use crate::domain::model::{MergedEntity, SentenceEntities, Strategy, CSV_HEADERS};
use crate::extract::ner::merge_tokens;
use crate::extract::TripExtractor;
use crate::utils::error::{Result, TripError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use zip::write::{FileOptions, ZipWriter};

pub const RECORDS_JSON: &str = "trip_records.json";
pub const RECORDS_CSV: &str = "trip_records.csv";
pub const ENTITIES_JSON: &str = "ner_entities.json";

pub struct TripPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    extractor: TripExtractor,
    ner: Option<Arc<dyn NerBackend>>,
}

impl<S: Storage, C: ConfigProvider> TripPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let settings = config.extraction_settings();
        let extractor = TripExtractor::new(&settings)?;

        let ner = match config.ner_settings() {
            Some(ner_settings) if settings.strategy.needs_ner() => {
                tracing::debug!("Using NER endpoint: {}", ner_settings.endpoint);
                Some(Arc::new(HttpNerBackend::new(&ner_settings)) as Arc<dyn NerBackend>)
            }
            _ => None,
        };

        Ok(Self {
            storage,
            config,
            extractor,
            ner,
        })
    }

    /// Replaces the HTTP backend, e.g. with a locally hosted model.
    pub fn with_ner_backend(mut self, backend: Arc<dyn NerBackend>) -> Self {
        self.ner = Some(backend);
        self
    }

    async fn entities_for(&self, sentence: &Sentence) -> Result<Vec<MergedEntity>> {
        let strategy = self.extractor.strategy();
        if !strategy.needs_ner() {
            return Ok(Vec::new());
        }

        let backend = self.ner.as_ref().ok_or_else(|| TripError::MissingConfigError {
            field: "ner.endpoint".to_string(),
        })?;

        match backend.tag(&sentence.text).await {
            Ok(tokens) => Ok(merge_tokens(&tokens)),
            // hybrid keeps going on rules alone
            Err(e) if strategy == Strategy::Hybrid => {
                tracing::warn!(
                    "⚠️ NER failed for sentence {}, using rules only: {}",
                    sentence.id,
                    e
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

async fn read_input_file(path: &str) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await?;

    let lines: Vec<String> = match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => content.lines().map(str::to_string).collect(),
    };

    Ok(lines)
}

fn build_csv(records: &[TripInfo]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.write_record(record.csv_row())?;
    }

    let bytes = writer.into_inner().map_err(|e| TripError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })?;

    String::from_utf8(bytes).map_err(|e| TripError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TripPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Sentence>> {
        let mut texts: Vec<String> = self.config.sentences().to_vec();

        if let Some(file) = self.config.input_file() {
            tracing::debug!("Reading sentences from: {}", file);
            texts.extend(read_input_file(file).await?);
        }

        let mut texts: Vec<String> = texts
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if texts.is_empty() {
            tracing::warn!("No input sentences, using bundled samples");
            texts = SAMPLE_SENTENCES.iter().map(|s| s.to_string()).collect();
        }

        Ok(texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Sentence { id: i + 1, text })
            .collect())
    }

    async fn transform(&self, data: Vec<Sentence>) -> Result<TransformResult> {
        let mut records = Vec::with_capacity(data.len());
        let mut entities = Vec::new();

        for sentence in data {
            let merged = self.entities_for(&sentence).await?;
            for entity in &merged {
                tracing::debug!(
                    "🏷️ [{}] {} {} (score {:.3}, {}..{})",
                    sentence.id,
                    entity.label,
                    entity.word,
                    entity.score,
                    entity.start,
                    entity.end
                );
            }

            let record = self
                .extractor
                .extract_with_entities(&sentence.text, &merged);
            tracing::debug!("Sentence {}: {:?}", sentence.id, record);
            records.push(record);

            if self.extractor.strategy().needs_ner() {
                entities.push(SentenceEntities {
                    sentence_id: sentence.id,
                    text: sentence.text,
                    entities: merged,
                });
            }
        }

        Ok(TransformResult {
            json_output: serde_json::to_string_pretty(&records)?,
            csv_output: build_csv(&records)?,
            records,
            entities,
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<String> {
        let mut files: Vec<(&str, &[u8])> = Vec::new();
        for format in self.config.output_formats() {
            let file = match format.as_str() {
                "json" => (RECORDS_JSON, result.json_output.as_bytes()),
                "csv" => (RECORDS_CSV, result.csv_output.as_bytes()),
                other => {
                    return Err(TripError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format".to_string(),
                    })
                }
            };
            if !files.iter().any(|(name, _)| *name == file.0) {
                files.push(file);
            }
        }

        if files.is_empty() {
            tracing::debug!("No output formats configured, records go to stdout only");
            return Ok("stdout".to_string());
        }

        if self.config.compress_output() {
            let archive_name = self.config.archive_name();
            let entities_json = if result.entities.is_empty() {
                None
            } else {
                Some(serde_json::to_string_pretty(&result.entities)?)
            };

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                for (name, data) in &files {
                    zip.start_file::<_, ()>(*name, FileOptions::default())?;
                    zip.write_all(data)?;
                }

                if let Some(json) = &entities_json {
                    zip.start_file::<_, ()>(ENTITIES_JSON, FileOptions::default())?;
                    zip.write_all(json.as_bytes())?;
                }

                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(archive_name, &zip_data).await?;
            return Ok(self.storage.location(archive_name));
        }

        let mut written = Vec::new();
        for (name, data) in &files {
            self.storage.write_file(name, data).await?;
            tracing::debug!("Wrote {} ({} bytes)", name, data.len());
            written.push(self.storage.location(name));
        }

        Ok(written.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ExtractionSettings, NerSettings, NerToken};
    use std::collections::HashMap;
    use tokio::sync::Mutex;

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

        async fn file_count(&self) -> usize {
            self.files.lock().await.len()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn location(&self, path: &str) -> String {
            format!("test_output/{}", path)
        }
    }

    struct MockConfig {
        sentences: Vec<String>,
        input_file: Option<String>,
        strategy: Strategy,
        output_path: String,
        output_formats: Vec<String>,
        compress: bool,
    }

    impl MockConfig {
        fn new(sentences: &[&str]) -> Self {
            Self {
                sentences: sentences.iter().map(|s| s.to_string()).collect(),
                input_file: None,
                strategy: Strategy::Rules,
                output_path: "test_output".to_string(),
                output_formats: vec![],
                compress: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn sentences(&self) -> &[String] {
            &self.sentences
        }

        fn input_file(&self) -> Option<&str> {
            self.input_file.as_deref()
        }

        fn extraction_settings(&self) -> ExtractionSettings {
            ExtractionSettings {
                strategy: self.strategy,
                ..ExtractionSettings::default()
            }
        }

        fn ner_settings(&self) -> Option<NerSettings> {
            None
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn compress_output(&self) -> bool {
            self.compress
        }
    }

    struct MockNer {
        tokens: Vec<NerToken>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl NerBackend for MockNer {
        async fn tag(&self, _text: &str) -> Result<Vec<NerToken>> {
            if self.fail {
                return Err(TripError::NerError {
                    status: 503,
                    message: "Model is currently loading".to_string(),
                });
            }
            Ok(self.tokens.clone())
        }
    }

    fn token(entity: &str, word: &str, start: usize, end: usize) -> NerToken {
        NerToken {
            entity: entity.to_string(),
            score: 0.9,
            index: 0,
            word: word.to_string(),
            start,
            end,
        }
    }

    const TRIP: &str = "김민수와 정혜진이 서울에서 부산으로 출장 간다. 3월 15일부터 3월 17일까지.";

    fn trip_tokens() -> Vec<NerToken> {
        vec![
            token("B-PS", "김민", 0, 2),
            token("I-PS", "##수", 2, 3),
            token("B-PS", "정혜", 5, 7),
            token("I-PS", "##진", 7, 8),
            token("B-LC", "서울", 10, 12),
            token("B-LC", "부산", 15, 17),
        ]
    }

    fn pipeline(config: MockConfig) -> TripPipeline<MockStorage, MockConfig> {
        TripPipeline::new(MockStorage::new(), config).unwrap()
    }

    #[tokio::test]
    async fn test_extract_numbers_and_trims_sentences() {
        let pipeline = pipeline(MockConfig::new(&["  부산 출장  ", "", "제주 출장"]));

        let sentences = pipeline.extract().await.unwrap();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].id, 1);
        assert_eq!(sentences[0].text, "부산 출장");
        assert_eq!(sentences[1].id, 2);
    }

    #[tokio::test]
    async fn test_extract_falls_back_to_samples() {
        let pipeline = pipeline(MockConfig::new(&[]));

        let sentences = pipeline.extract().await.unwrap();

        assert_eq!(sentences.len(), SAMPLE_SENTENCES.len());
        assert_eq!(sentences[0].text, SAMPLE_SENTENCES[0]);
    }

    #[tokio::test]
    async fn test_extract_reads_txt_and_json_files() {
        let mut txt = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(txt, "부산 출장\n\n제주 출장").unwrap();

        let mut config = MockConfig::new(&["서울 출장"]);
        config.input_file = Some(txt.path().to_str().unwrap().to_string());
        let sentences = pipeline(config).extract().await.unwrap();
        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["서울 출장", "부산 출장", "제주 출장"]);

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"["도쿄 출장", "오사카 출장"]"#).unwrap();

        let mut config = MockConfig::new(&[]);
        config.input_file = Some(json.path().to_str().unwrap().to_string());
        let sentences = pipeline(config).extract().await.unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].text, "오사카 출장");
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_io_error() {
        let mut config = MockConfig::new(&[]);
        config.input_file = Some("/nonexistent/sentences.txt".to_string());

        let err = pipeline(config).extract().await.unwrap_err();
        assert!(matches!(err, TripError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_rules_builds_json_and_csv() {
        let pipeline = pipeline(MockConfig::new(&[]));
        let sentences = vec![Sentence {
            id: 1,
            text: TRIP.to_string(),
        }];

        let result = pipeline.transform(sentences).await.unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].travelers, vec!["김민수", "정혜진"]);
        assert!(result.entities.is_empty());

        let json: serde_json::Value = serde_json::from_str(&result.json_output).unwrap();
        assert_eq!(json[0]["출발지"], "서울");
        assert_eq!(json[0]["최대 예산"], "정보 없음");

        let mut lines = result.csv_output.lines();
        assert_eq!(
            lines.next(),
            Some("문장,출장자,출장 인원,출발지,출장지,출장 시작일,출장 종료일,최대 예산")
        );
        let row = lines.next().unwrap();
        assert!(row.contains("\"김민수, 정혜진\""));
        assert!(row.contains("20250315"));
    }

    #[tokio::test]
    async fn test_transform_ner_uses_backend_entities() {
        let mut config = MockConfig::new(&[]);
        config.strategy = Strategy::Ner;
        let pipeline = pipeline(config).with_ner_backend(Arc::new(MockNer {
            tokens: trip_tokens(),
            fail: false,
        }));

        let result = pipeline
            .transform(vec![Sentence {
                id: 7,
                text: TRIP.to_string(),
            }])
            .await
            .unwrap();

        let record = &result.records[0];
        assert_eq!(record.travelers, vec!["김민수", "정혜진"]);
        assert_eq!(record.origin.as_deref(), Some("서울"));
        assert_eq!(record.destination.as_deref(), Some("부산"));

        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].sentence_id, 7);
        assert_eq!(result.entities[0].entities.len(), 4);
    }

    #[tokio::test]
    async fn test_transform_ner_without_backend_fails() {
        let mut config = MockConfig::new(&[]);
        config.strategy = Strategy::Ner;

        let err = pipeline(config)
            .transform(vec![Sentence {
                id: 1,
                text: TRIP.to_string(),
            }])
            .await
            .unwrap_err();

        assert!(matches!(err, TripError::MissingConfigError { .. }));
    }

    #[tokio::test]
    async fn test_transform_ner_failure_is_fatal_but_hybrid_recovers() {
        let failing = || {
            Arc::new(MockNer {
                tokens: vec![],
                fail: true,
            })
        };
        let sentences = || {
            vec![Sentence {
                id: 1,
                text: TRIP.to_string(),
            }]
        };

        let mut config = MockConfig::new(&[]);
        config.strategy = Strategy::Ner;
        let ner = pipeline(config).with_ner_backend(failing());
        assert!(matches!(
            ner.transform(sentences()).await,
            Err(TripError::NerError { status: 503, .. })
        ));

        let mut config = MockConfig::new(&[]);
        config.strategy = Strategy::Hybrid;
        let hybrid = pipeline(config).with_ner_backend(failing());
        let result = hybrid.transform(sentences()).await.unwrap();
        assert_eq!(result.records[0].travelers, vec!["김민수", "정혜진"]);
        assert_eq!(result.records[0].destination.as_deref(), Some("부산"));
    }

    #[tokio::test]
    async fn test_load_without_formats_writes_nothing() {
        let storage = MockStorage::new();
        let pipeline = TripPipeline::new(storage.clone(), MockConfig::new(&[])).unwrap();
        let result = pipeline.transform(vec![]).await.unwrap();

        let output = pipeline.load(&result).await.unwrap();

        assert_eq!(output, "stdout");
        assert_eq!(storage.file_count().await, 0);
    }

    #[tokio::test]
    async fn test_load_writes_each_format() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new(&[]);
        config.output_formats = vec!["json".to_string(), "csv".to_string(), "json".to_string()];
        let pipeline = TripPipeline::new(storage.clone(), config).unwrap();
        let result = pipeline
            .transform(vec![Sentence {
                id: 1,
                text: TRIP.to_string(),
            }])
            .await
            .unwrap();

        let output = pipeline.load(&result).await.unwrap();

        assert_eq!(
            output,
            "test_output/trip_records.json, test_output/trip_records.csv"
        );
        assert_eq!(storage.file_count().await, 2);
        let json = storage.get_file(RECORDS_JSON).await.unwrap();
        assert_eq!(json, result.json_output.as_bytes());
    }

    #[tokio::test]
    async fn test_load_zip_contains_entities() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new(&[]);
        config.strategy = Strategy::Hybrid;
        config.output_formats = vec!["csv".to_string()];
        config.compress = true;
        let pipeline = TripPipeline::new(storage.clone(), config)
            .unwrap()
            .with_ner_backend(Arc::new(MockNer {
                tokens: trip_tokens(),
                fail: false,
            }));
        let result = pipeline
            .transform(vec![Sentence {
                id: 1,
                text: TRIP.to_string(),
            }])
            .await
            .unwrap();

        let output = pipeline.load(&result).await.unwrap();
        assert_eq!(output, "test_output/trip_output.zip");

        let zip_bytes = storage.get_file("trip_output.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();

        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();
        assert_eq!(file_names, vec![ENTITIES_JSON, RECORDS_CSV]);

        let entities_read = {
            let mut file = archive.by_name(ENTITIES_JSON).unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut file, &mut content).unwrap();
            content
        };
        assert!(entities_read.contains("김민수"));
    }
}
