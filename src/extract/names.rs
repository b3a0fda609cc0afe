//! Traveler-name heuristics: titled names, keyword-triggered spans and
//! enumerations, all filtered through one whitelist and blacklist.

use crate::extract::lexicon::{NAME_FINAL_SUFFIXES, NAME_SUFFIXES};
use crate::utils::error::Result;
use regex::Regex;
use std::collections::HashSet;

const NAME_PATTERN: &str = r"^[가-힣]{1,4}$";
const ENUMERATION_PATTERN: &str =
    r"[가-힣]{2,5}(?:(?:\s*,\s*|(?:와|과|랑|이랑|하고)\s+|\s+및\s+)[가-힣]{2,5})+";

fn alternation(words: &[String]) -> Option<String> {
    let mut sorted: Vec<&String> = words.iter().filter(|w| !w.trim().is_empty()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    sorted.dedup();
    Some(
        sorted
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

#[derive(Debug, Clone)]
pub struct NameExtractor {
    titles: Vec<String>,
    blacklist: HashSet<String>,
    whitelist: Regex,
    hangul_word: Regex,
    enumeration: Regex,
    titled: Option<Regex>,
    triggered: Option<Regex>,
}

impl NameExtractor {
    /// `stop_words` and `locations` together form the blacklist.
    pub fn new(
        titles: &[String],
        stop_words: &[String],
        locations: &[String],
        triggers: &[String],
    ) -> Result<Self> {
        let titled = match alternation(titles) {
            Some(alt) => Some(Regex::new(&format!(
                r"(?P<name>[가-힣]{{2,4}})\s*(?:{})(?:님)?",
                alt
            ))?),
            None => None,
        };
        let triggered = match alternation(triggers) {
            Some(alt) => Some(Regex::new(&format!(r"(?:{})\s*(?P<span>[가-힣\s,]+)", alt))?),
            None => None,
        };

        let mut sorted_titles: Vec<String> = titles.to_vec();
        sorted_titles.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));

        Ok(Self {
            titles: sorted_titles,
            blacklist: stop_words.iter().chain(locations).cloned().collect(),
            whitelist: Regex::new(NAME_PATTERN)?,
            hangul_word: Regex::new(r"[가-힣]+")?,
            enumeration: Regex::new(ENUMERATION_PATTERN)?,
            titled,
            triggered,
        })
    }

    /// Names in order of first appearance.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();

        if let Some(titled) = &self.titled {
            for caps in titled.captures_iter(text) {
                if let Some(m) = caps.name("name") {
                    if let Some(name) = self.candidate(m.as_str()) {
                        found.push((m.start(), name));
                    }
                }
            }
        }

        if let Some(triggered) = &self.triggered {
            for caps in triggered.captures_iter(text) {
                let Some(span) = caps.name("span") else {
                    continue;
                };
                let mut accepted = 0;
                for word in self.hangul_word.find_iter(span.as_str()) {
                    match self.candidate(word.as_str()) {
                        Some(name) => {
                            found.push((span.start() + word.start(), name));
                            accepted += 1;
                        }
                        // The span ends once the listed names run out
                        None if accepted > 0 => break,
                        None => {}
                    }
                }
            }
        }

        for list in self.enumeration.find_iter(text) {
            for word in self.hangul_word.find_iter(list.as_str()) {
                if let Some(name) = self.candidate(word.as_str()) {
                    found.push((list.start() + word.start(), name));
                }
            }
        }

        found.sort_by_key(|(position, _)| *position);
        dedup_in_order(found.into_iter().map(|(_, name)| name))
    }

    /// Runs externally produced names (e.g. NER people) through the same filters.
    pub fn filter<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        dedup_in_order(names.into_iter().filter_map(|n| self.candidate(n)))
    }

    pub fn is_blacklisted(&self, word: &str) -> bool {
        self.blacklist.contains(word) || self.titles.iter().any(|t| t == word)
    }

    fn candidate(&self, raw: &str) -> Option<String> {
        let word = raw.trim_matches(|c: char| !('가'..='힣').contains(&c));
        if word.is_empty() || self.is_blacklisted(word) {
            return None;
        }

        // "과장이" must not survive as a three-letter name
        if self.is_blacklisted(&self.strip(word, true)) {
            return None;
        }

        let name = self.strip(word, false);
        if !self.whitelist.is_match(&name) || self.is_blacklisted(&name) {
            return None;
        }
        Some(name)
    }

    /// Peels particles and titles off the end of `word`. The loose form strips
    /// down to a single character; the strict form keeps at least two, and
    /// three when the particle commonly ends a given name.
    fn strip(&self, word: &str, loose: bool) -> String {
        let mut current = word.to_string();
        loop {
            let before = current.len();

            for suffix in NAME_SUFFIXES {
                if let Some(rest) = current.strip_suffix(suffix) {
                    let min_len = if loose {
                        1
                    } else if NAME_FINAL_SUFFIXES.contains(suffix) {
                        3
                    } else {
                        2
                    };
                    if rest.chars().count() >= min_len {
                        current = rest.to_string();
                        break;
                    }
                }
            }

            for title in &self.titles {
                if let Some(rest) = current.strip_suffix(title.as_str()) {
                    if rest.chars().count() >= if loose { 1 } else { 2 } {
                        current = rest.to_string();
                        break;
                    }
                }
            }

            if current.len() == before {
                return current;
            }
        }
    }
}

fn dedup_in_order<I: IntoIterator<Item = String>>(names: I) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
