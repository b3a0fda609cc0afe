use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Placeholder emitted for any field an extractor could not fill.
pub const ABSENT_MARKER: &str = "정보 없음";

pub const DEFAULT_YEAR: i32 = 2025;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: usize,
    pub text: String,
}

/// Which signals feed the extracted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Regular expressions and keyword lists only
    #[default]
    Rules,
    /// People, places and dates from the NER model
    Ner,
    /// NER entities merged with rule-based results
    Hybrid,
}

impl Strategy {
    pub fn needs_ner(&self) -> bool {
        !matches!(self, Strategy::Rules)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Rules => "rules",
            Strategy::Ner => "ner",
            Strategy::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexicon and strategy knobs shared by every extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSettings {
    pub strategy: Strategy,
    pub default_year: i32,
    pub extra_locations: Vec<String>,
    pub extra_stop_words: Vec<String>,
    pub extra_titles: Vec<String>,
    pub extra_triggers: Vec<String>,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::Rules,
            default_year: DEFAULT_YEAR,
            extra_locations: Vec::new(),
            extra_stop_words: Vec::new(),
            extra_titles: Vec::new(),
            extra_triggers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NerSettings {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout_seconds: u64,
}

/// One subword token as produced by a token-classification pipeline.
/// Offsets are character indices into the tagged text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NerToken {
    #[serde(alias = "entity_group")]
    pub entity: String,
    pub score: f64,
    #[serde(default)]
    pub index: usize,
    pub word: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedEntity {
    pub label: String,
    pub word: String,
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

/// Merged entities of one sentence, kept for the archive output.
#[derive(Debug, Clone, Serialize)]
pub struct SentenceEntities {
    pub sentence_id: usize,
    pub text: String,
    pub entities: Vec<MergedEntity>,
}

/// Extraction result for a single sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripInfo {
    #[serde(rename = "문장")]
    pub sentence: String,
    #[serde(rename = "출장자")]
    pub travelers: Vec<String>,
    #[serde(rename = "출장 인원", serialize_with = "serialize_or_absent")]
    pub headcount: Option<u32>,
    #[serde(rename = "출발지", serialize_with = "serialize_or_absent")]
    pub origin: Option<String>,
    #[serde(rename = "출장지", serialize_with = "serialize_or_absent")]
    pub destination: Option<String>,
    #[serde(rename = "출장 시작일", serialize_with = "serialize_compact_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "출장 종료일", serialize_with = "serialize_compact_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "최대 예산", serialize_with = "serialize_or_absent")]
    pub budget: Option<u64>,
}

pub const CSV_HEADERS: [&str; 8] = [
    "문장",
    "출장자",
    "출장 인원",
    "출발지",
    "출장지",
    "출장 시작일",
    "출장 종료일",
    "최대 예산",
];

impl TripInfo {
    pub fn empty(sentence: &str) -> Self {
        Self {
            sentence: sentence.to_string(),
            travelers: Vec::new(),
            headcount: None,
            origin: None,
            destination: None,
            start_date: None,
            end_date: None,
            budget: None,
        }
    }

    /// Flat row matching [`CSV_HEADERS`], absent fields rendered as the marker.
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.sentence.clone(),
            self.travelers.join(", "),
            display_or_absent(&self.headcount),
            display_or_absent(&self.origin),
            display_or_absent(&self.destination),
            compact_date_or_absent(&self.start_date),
            compact_date_or_absent(&self.end_date),
            display_or_absent(&self.budget),
        ]
    }
}

pub fn display_or_absent<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => ABSENT_MARKER.to_string(),
    }
}

pub fn compact_date_or_absent(value: &Option<NaiveDate>) -> String {
    match value {
        Some(date) => date.format("%Y%m%d").to_string(),
        None => ABSENT_MARKER.to_string(),
    }
}

fn serialize_or_absent<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(ABSENT_MARKER),
    }
}

fn serialize_compact_date<S: Serializer>(
    value: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&compact_date_or_absent(value))
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<TripInfo>,
    pub json_output: String,
    pub csv_output: String,
    pub entities: Vec<SentenceEntities>,
}
