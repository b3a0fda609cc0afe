// Adapters layer: concrete implementations for external systems (filesystem, NER service).

pub mod ner_http;
pub mod storage;
