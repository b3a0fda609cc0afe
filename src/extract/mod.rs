pub mod cost;
pub mod date;
pub mod headcount;
pub mod lexicon;
pub mod location;
pub mod names;
pub mod ner;

use crate::domain::model::{ExtractionSettings, MergedEntity, Strategy, TripInfo};
use crate::utils::error::Result;
use cost::CostExtractor;
use date::{DateRange, DateRangeExtractor};
use headcount::HeadcountExtractor;
use location::{split_route, LocationExtractor, LocationMatch, Route};
use names::NameExtractor;
use ner::{group_entities, EntityGroups};

fn with_extras(defaults: &[&str], extras: &[String]) -> Vec<String> {
    defaults
        .iter()
        .map(|s| s.to_string())
        .chain(extras.iter().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Character offset to byte offset, clamped to the end of `text`.
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// All extractors for one configuration. Holds no per-sentence state, so the
/// same input always produces the same record.
#[derive(Debug, Clone)]
pub struct TripExtractor {
    strategy: Strategy,
    dates: DateRangeExtractor,
    cost: CostExtractor,
    names: NameExtractor,
    locations: LocationExtractor,
    headcount: HeadcountExtractor,
}

impl TripExtractor {
    pub fn new(settings: &ExtractionSettings) -> Result<Self> {
        let locations = with_extras(lexicon::LOCATIONS, &settings.extra_locations);
        let stop_words = with_extras(lexicon::STOP_WORDS, &settings.extra_stop_words);
        let titles = with_extras(lexicon::TITLES, &settings.extra_titles);
        let triggers = with_extras(lexicon::COMPANION_TRIGGERS, &settings.extra_triggers);

        tracing::debug!(
            "Building extractors: {} locations, {} stop words, {} titles, {} triggers",
            locations.len(),
            stop_words.len(),
            titles.len(),
            triggers.len()
        );

        Ok(Self {
            strategy: settings.strategy,
            dates: DateRangeExtractor::new(settings.default_year)?,
            cost: CostExtractor::new()?,
            names: NameExtractor::new(&titles, &stop_words, &locations, &triggers)?,
            locations: LocationExtractor::new(locations),
            headcount: HeadcountExtractor::new()?,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn dates(&self) -> &DateRangeExtractor {
        &self.dates
    }

    pub fn cost(&self) -> &CostExtractor {
        &self.cost
    }

    pub fn names(&self) -> &NameExtractor {
        &self.names
    }

    pub fn locations(&self) -> &LocationExtractor {
        &self.locations
    }

    pub fn headcount(&self) -> &HeadcountExtractor {
        &self.headcount
    }

    /// Rule-based extraction, no model involved.
    pub fn extract(&self, text: &str) -> TripInfo {
        let travelers = self.names.extract(text);
        let route = self.locations.route(text);
        self.assemble(text, travelers, route, self.dates.extract(text))
    }

    /// Extraction for the configured strategy given the sentence's merged
    /// NER entities. The rules strategy ignores `entities`.
    pub fn extract_with_entities(&self, text: &str, entities: &[MergedEntity]) -> TripInfo {
        match self.strategy {
            Strategy::Rules => self.extract(text),
            Strategy::Ner => {
                let groups = group_entities(entities);
                let travelers = self.names.filter(groups.people_names());
                let route = self.ner_route(text, &groups);
                let dates = self.dates.extract(&groups.date_text());
                self.assemble(text, travelers, route, dates)
            }
            Strategy::Hybrid => {
                let groups = group_entities(entities);
                let mut travelers = self.names.filter(groups.people_names());
                for name in self.names.extract(text) {
                    if !travelers.contains(&name) {
                        travelers.push(name);
                    }
                }

                let route = if groups.locations.is_empty() {
                    self.locations.route(text)
                } else {
                    self.ner_route(text, &groups)
                };

                let dates = self
                    .dates
                    .extract(text)
                    .or_else(|| self.dates.extract(&groups.date_text()));

                self.assemble(text, travelers, route, dates)
            }
        }
    }

    fn ner_route(&self, text: &str, groups: &EntityGroups) -> Route {
        let matches: Vec<LocationMatch> = groups
            .locations
            .iter()
            .filter(|e| !self.names.is_blacklisted(&e.word) || self.is_known_location(&e.word))
            .map(|e| LocationMatch {
                name: e.word.clone(),
                start: byte_offset(text, e.start),
                end: byte_offset(text, e.end),
            })
            .collect();
        split_route(text, &matches)
    }

    fn is_known_location(&self, word: &str) -> bool {
        self.locations.locations().iter().any(|l| l == word)
    }

    fn assemble(
        &self,
        text: &str,
        travelers: Vec<String>,
        route: Route,
        dates: Option<DateRange>,
    ) -> TripInfo {
        TripInfo {
            sentence: text.to_string(),
            headcount: self.headcount.resolve(text, &travelers),
            travelers,
            origin: route.origin,
            destination: route.destination,
            start_date: dates.map(|d| d.start),
            end_date: dates.map(|d| d.end),
            budget: self.cost.extract(text),
        }
    }
}
