use crate::domain::model::ABSENT_MARKER;
use crate::extract::lexicon::SPEAKER_MARKERS;
use crate::utils::error::Result;
use regex::Regex;

const NUMERAL_WORDS: &[(&str, u32)] = &[
    ("한", 1),
    ("두", 2),
    ("세", 3),
    ("네", 4),
    ("다섯", 5),
    ("여섯", 6),
    ("일곱", 7),
    ("여덟", 8),
    ("아홉", 9),
    ("열", 10),
];

#[derive(Debug, Clone)]
pub struct HeadcountExtractor {
    digits: Regex,
    words: Regex,
    alone: Regex,
    speaker: Regex,
}

impl HeadcountExtractor {
    pub fn new() -> Result<Self> {
        let numerals = NUMERAL_WORDS
            .iter()
            .map(|(word, _)| *word)
            .collect::<Vec<_>>()
            .join("|");
        let speakers = SPEAKER_MARKERS.join("|");

        Ok(Self {
            digits: Regex::new(r"(?P<count>[0-9]+)\s*명")?,
            words: Regex::new(&format!(r"(?:^|[^가-힣])(?P<count>{})\s*명", numerals))?,
            alone: Regex::new(r"(?:^|[^가-힣])(?:나|저)?\s*혼자")?,
            speaker: Regex::new(&format!(r"(?:^|[^가-힣])(?:{})(?:\s|$)", speakers))?,
        })
    }

    /// A headcount stated in the text (`3명`, `두 명`, `혼자`).
    pub fn explicit(&self, text: &str) -> Option<u32> {
        if let Some(caps) = self.digits.captures(text) {
            return caps.name("count")?.as_str().parse().ok();
        }
        if let Some(caps) = self.words.captures(text) {
            let word = caps.name("count")?.as_str();
            return NUMERAL_WORDS
                .iter()
                .find(|(w, _)| *w == word)
                .map(|(_, n)| *n);
        }
        if self.alone.is_match(text) {
            return Some(1);
        }
        None
    }

    /// Whether the speaker counts as a traveler (`나와 함께 ...`).
    pub fn speaker_joins(&self, text: &str) -> bool {
        self.speaker.is_match(text)
    }

    /// Explicit count first, otherwise the named travelers plus the speaker.
    pub fn resolve(&self, text: &str, travelers: &[String]) -> Option<u32> {
        if let Some(count) = self.explicit(text) {
            return Some(count);
        }
        if travelers.is_empty() {
            return None;
        }
        let named = u32::try_from(travelers.len()).ok()?;
        Some(named + u32::from(self.speaker_joins(text)))
    }

    pub fn describe(&self, text: &str, travelers: &[String]) -> String {
        match self.resolve(text, travelers) {
            Some(count) => count.to_string(),
            None => ABSENT_MARKER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> HeadcountExtractor {
        HeadcountExtractor::new().unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(extractor().explicit("총 4명이 대전에서 제주로"), Some(4));
    }

    #[test]
    fn test_numeral_word_count() {
        assert_eq!(extractor().explicit("팀원 세 명이 간다"), Some(3));
        assert_eq!(extractor().explicit("다섯명 출장"), Some(5));
    }

    #[test]
    fn test_full_width_digits_are_ignored() {
        assert_eq!(extractor().explicit("３명 출장"), None);
    }

    #[test]
    fn test_numeral_inside_word_is_ignored() {
        assert_eq!(extractor().explicit("세종 출장 예정"), None);
    }

    #[test]
    fn test_alone_counts_one() {
        assert_eq!(extractor().explicit("나 혼자 부산 출장"), Some(1));
    }

    #[test]
    fn test_explicit_count_wins_over_names() {
        let count = extractor().resolve("김민수와 정혜진 외 총 5명", &names(&["김민수", "정혜진"]));
        assert_eq!(count, Some(5));
    }

    #[test]
    fn test_named_travelers_plus_speaker() {
        let text = "나와 함께 박지훈 과장이 하노이로 출장 가요.";
        assert_eq!(extractor().resolve(text, &names(&["박지훈"])), Some(2));

        let text = "최명재 팀장, 신예준 팀장이 도쿄로 출장";
        assert_eq!(extractor().resolve(text, &names(&["최명재", "신예준"])), Some(2));
    }

    #[test]
    fn test_nothing_known_is_absent() {
        assert_eq!(extractor().describe("", &[]), ABSENT_MARKER);
    }
}
