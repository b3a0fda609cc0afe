//! Reassembles subword NER output into whole entities.

use crate::domain::model::{MergedEntity, NerToken};

const CONTINUATION_PREFIX: &str = "##";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BioTag<'a> {
    Begin(&'a str),
    Inside(&'a str),
    Outside,
}

fn parse_tag(tag: &str) -> BioTag<'_> {
    if tag == "O" || tag.is_empty() {
        BioTag::Outside
    } else if let Some(label) = tag.strip_prefix("B-") {
        BioTag::Begin(label)
    } else if let Some(label) = tag.strip_prefix("I-") {
        BioTag::Inside(label)
    } else {
        // Aggregated pipelines emit bare labels
        BioTag::Inside(tag)
    }
}

struct OpenEntity {
    label: String,
    word: String,
    start: usize,
    end: usize,
    score_sum: f64,
    count: usize,
}

impl OpenEntity {
    fn begin(label: &str, token: &NerToken) -> Self {
        let (_, piece) = split_continuation(&token.word);
        Self {
            label: label.to_string(),
            word: piece.to_string(),
            start: token.start,
            end: token.end,
            score_sum: token.score,
            count: 1,
        }
    }

    fn extend(&mut self, token: &NerToken) {
        let (continuation, piece) = split_continuation(&token.word);
        if !continuation && token.start > self.end {
            self.word.push(' ');
        }
        self.word.push_str(piece);
        self.end = token.end;
        self.score_sum += token.score;
        self.count += 1;
    }

    fn finish(self) -> MergedEntity {
        MergedEntity {
            label: self.label,
            word: self.word,
            score: self.score_sum / self.count as f64,
            start: self.start,
            end: self.end,
        }
    }
}

fn split_continuation(word: &str) -> (bool, &str) {
    match word.strip_prefix(CONTINUATION_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, word),
    }
}

/// Merges each maximal contiguous BIO run into one entity.
///
/// The entity score is the arithmetic mean of its token scores, independent
/// of token order.
pub fn merge_tokens(tokens: &[NerToken]) -> Vec<MergedEntity> {
    let mut entities = Vec::new();
    let mut current: Option<OpenEntity> = None;

    for token in tokens {
        match parse_tag(&token.entity) {
            BioTag::Begin(label) => {
                if let Some(entity) = current.take() {
                    entities.push(entity.finish());
                }
                current = Some(OpenEntity::begin(label, token));
            }
            BioTag::Inside(label) => match current.as_mut() {
                Some(entity) if entity.label == label => entity.extend(token),
                _ => {
                    // An I- tag with a new label opens its own run
                    if let Some(entity) = current.take() {
                        entities.push(entity.finish());
                    }
                    current = Some(OpenEntity::begin(label, token));
                }
            },
            BioTag::Outside => {
                if let Some(entity) = current.take() {
                    entities.push(entity.finish());
                }
            }
        }
    }

    if let Some(entity) = current {
        entities.push(entity.finish());
    }

    entities
}

/// Merged entities split by coarse category, de-duplicated in order of appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityGroups {
    pub people: Vec<MergedEntity>,
    pub locations: Vec<MergedEntity>,
    pub dates: Vec<MergedEntity>,
    pub quantities: Vec<MergedEntity>,
}

impl EntityGroups {
    pub fn people_names(&self) -> Vec<&str> {
        self.people.iter().map(|e| e.word.as_str()).collect()
    }

    /// Date fragments joined in sentence order, ready for the date extractor.
    pub fn date_text(&self) -> String {
        self.dates
            .iter()
            .map(|e| e.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn push_unique(bucket: &mut Vec<MergedEntity>, entity: &MergedEntity) {
    if !bucket.iter().any(|e| e.word == entity.word) {
        bucket.push(entity.clone());
    }
}

pub fn group_entities(entities: &[MergedEntity]) -> EntityGroups {
    let mut groups = EntityGroups::default();

    for entity in entities {
        match entity.label.as_str() {
            "PS" | "PER" | "PERSON" => push_unique(&mut groups.people, entity),
            "LC" | "LOC" | "LOCATION" | "GPE" => push_unique(&mut groups.locations, entity),
            // Dates keep repeats: "3월" may open both ends of a range
            "DT" | "DAT" | "DATE" => groups.dates.push(entity.clone()),
            "QT" | "QTY" | "MONEY" => push_unique(&mut groups.quantities, entity),
            other => tracing::trace!("Ignoring entity label {}", other),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(entity: &str, score: f64, word: &str, start: usize, end: usize) -> NerToken {
        NerToken {
            entity: entity.to_string(),
            score,
            index: 0,
            word: word.to_string(),
            start,
            end,
        }
    }

    /// Token-level output for "김민수와 정혜진이 서울에서 부산으로 출장 간다. 3월 15일부터 3월 17일까지."
    fn sample_tokens() -> Vec<NerToken> {
        vec![
            token("B-PS", 0.98651475, "김민", 0, 2),
            token("I-PS", 0.9643779, "##수", 2, 3),
            token("B-PS", 0.9851303, "정혜", 5, 7),
            token("I-PS", 0.9753617, "##진", 7, 8),
            token("B-LC", 0.96146035, "서울", 10, 12),
            token("B-LC", 0.94671685, "부산", 15, 17),
            token("B-DT", 0.9254558, "3", 20, 21),
            token("I-DT", 0.9526009, "##월", 21, 22),
            token("I-DT", 0.963946, "15", 23, 25),
            token("I-DT", 0.9655288, "##일", 25, 26),
            token("I-DT", 0.93977803, "##부터", 26, 28),
            token("I-DT", 0.86626637, "3", 29, 30),
            token("I-DT", 0.8294799, "##월", 30, 31),
            token("I-DT", 0.82268816, "17", 32, 34),
            token("I-DT", 0.76479125, "##일", 34, 35),
            token("I-DT", 0.7750262, "##까", 35, 36),
            token("I-DT", 0.7814053, "##지", 36, 37),
        ]
    }

    #[test]
    fn test_begin_inside_pair_merges_into_one_entity() {
        let merged = merge_tokens(&[
            token("B-PS", 0.9, "김민", 0, 2),
            token("I-PS", 0.7, "##수", 2, 3),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].label, "PS");
        assert_eq!(merged[0].word, "김민수");
        assert_eq!(merged[0].start, 0);
        assert_eq!(merged[0].end, 3);
    }

    #[test]
    fn test_score_is_true_mean() {
        let merged = merge_tokens(&[
            token("B-DT", 0.9, "3", 0, 1),
            token("I-DT", 0.6, "##월", 1, 2),
            token("I-DT", 0.3, "##일", 2, 3),
        ]);

        // A pairwise running average would give 0.45
        assert!((merged[0].score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_sample_sentence_merging() {
        let merged = merge_tokens(&sample_tokens());
        let words: Vec<&str> = merged.iter().map(|e| e.word.as_str()).collect();

        assert_eq!(
            words,
            vec!["김민수", "정혜진", "서울", "부산", "3월 15일부터 3월 17일까지"]
        );
        assert_eq!(merged[4].start, 20);
        assert_eq!(merged[4].end, 37);
    }

    #[test]
    fn test_outside_tag_closes_entity() {
        let merged = merge_tokens(&[
            token("B-LC", 0.9, "서울", 0, 2),
            token("O", 0.99, "에서", 2, 4),
            token("I-LC", 0.8, "부산", 5, 7),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].word, "부산");
    }

    #[test]
    fn test_inside_with_different_label_starts_new_entity() {
        let merged = merge_tokens(&[
            token("B-PS", 0.9, "김민수", 0, 3),
            token("I-LC", 0.8, "서울", 4, 6),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].label, "LC");
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(merge_tokens(&[]).is_empty());
    }

    #[test]
    fn test_grouping_splits_categories() {
        let groups = group_entities(&merge_tokens(&sample_tokens()));

        assert_eq!(groups.people_names(), vec!["김민수", "정혜진"]);
        assert_eq!(groups.locations.len(), 2);
        assert_eq!(groups.date_text(), "3월 15일부터 3월 17일까지");
        assert!(groups.quantities.is_empty());
    }

    #[test]
    fn test_grouping_deduplicates_people() {
        let entities = merge_tokens(&[
            token("B-PS", 0.9, "김민수", 0, 3),
            token("B-PS", 0.9, "김민수", 10, 13),
        ]);
        assert_eq!(group_entities(&entities).people.len(), 1);
    }
}
