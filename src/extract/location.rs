//! Closed-list location matching and the origin/destination split.

use crate::domain::model::ABSENT_MARKER;

const ORIGIN_PARTICLE: &str = "에서";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMatch {
    pub name: String,
    /// Byte offsets into the searched text.
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LocationExtractor {
    locations: Vec<String>,
}

impl LocationExtractor {
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut locations: Vec<String> = locations
            .into_iter()
            .map(Into::into)
            .filter(|l| !l.trim().is_empty())
            .collect();
        // Longer literals first so 인도네시아 wins over 인도
        locations.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        locations.dedup();
        Self { locations }
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Non-overlapping matches in order of position; a location seen twice
    /// is reported once.
    pub fn find(&self, text: &str) -> Vec<LocationMatch> {
        let mut hits: Vec<LocationMatch> = Vec::new();
        for location in &self.locations {
            for (start, _) in text.match_indices(location.as_str()) {
                let end = start + location.len();
                let overlaps = hits.iter().any(|h| start < h.end && h.start < end);
                if !overlaps {
                    hits.push(LocationMatch {
                        name: location.clone(),
                        start,
                        end,
                    });
                }
            }
        }

        hits.sort_by_key(|h| h.start);

        let mut unique: Vec<LocationMatch> = Vec::new();
        for hit in hits {
            if !unique.iter().any(|u| u.name == hit.name) {
                unique.push(hit);
            }
        }
        unique
    }

    /// Comma-joined matches or the absence marker.
    pub fn describe(&self, text: &str) -> String {
        let names: Vec<String> = self.find(text).into_iter().map(|m| m.name).collect();
        if names.is_empty() {
            ABSENT_MARKER.to_string()
        } else {
            names.join(", ")
        }
    }

    pub fn route(&self, text: &str) -> Route {
        split_route(text, &self.find(text))
    }
}

/// A location directly followed by `에서` is the origin as long as some other
/// location remains for the destination.
pub fn split_route(text: &str, matches: &[LocationMatch]) -> Route {
    if matches.is_empty() {
        return Route::default();
    }

    let origin_index = if matches.len() > 1 {
        matches.iter().position(|m| {
            text.get(m.end..)
                .map(|rest| rest.starts_with(ORIGIN_PARTICLE))
                .unwrap_or(false)
        })
    } else {
        None
    };

    let destinations: Vec<&str> = matches
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != origin_index)
        .map(|(_, m)| m.name.as_str())
        .collect();

    Route {
        origin: origin_index.map(|i| matches[i].name.clone()),
        destination: if destinations.is_empty() {
            None
        } else {
            Some(destinations.join(", "))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::lexicon::LOCATIONS;

    fn extractor() -> LocationExtractor {
        LocationExtractor::new(LOCATIONS.iter().copied())
    }

    #[test]
    fn test_common_nouns_are_not_places() {
        assert_eq!(extractor().describe("신제품 선전 회의 준비"), ABSENT_MARKER);
    }

    #[test]
    fn test_country_and_city_are_joined() {
        let text = "IT부서의 최명재 팀장, 신예준 팀장이 2월1일-2월5일 일본 도쿄로 출장을 갈려고해.";
        assert_eq!(extractor().describe(text), "일본, 도쿄");

        let route = extractor().route(text);
        assert_eq!(route.origin, None);
        assert_eq!(route.destination.as_deref(), Some("일본, 도쿄"));
    }

    #[test]
    fn test_origin_followed_by_eseo() {
        let route = extractor().route("김민수와 정혜진이 서울에서 부산으로 출장 간다.");
        assert_eq!(route.origin.as_deref(), Some("서울"));
        assert_eq!(route.destination.as_deref(), Some("부산"));
    }

    #[test]
    fn test_single_location_with_eseo_is_destination() {
        let route = extractor().route("부산에서 고객 미팅이 있어");
        assert_eq!(route.origin, None);
        assert_eq!(route.destination.as_deref(), Some("부산"));
    }

    #[test]
    fn test_longer_literal_wins_overlap() {
        assert_eq!(extractor().describe("인도네시아 자카르타 출장"), "인도네시아, 자카르타");
    }

    #[test]
    fn test_repeated_location_reported_once() {
        assert_eq!(extractor().describe("도쿄 갔다가 다시 도쿄로"), "도쿄");
    }

    #[test]
    fn test_extra_locations_are_matched() {
        let extractor = LocationExtractor::new(["송도", "서울"]);
        assert_eq!(extractor.describe("송도에서 회의"), "송도");
    }

    #[test]
    fn test_no_location_is_absent() {
        assert_eq!(extractor().describe(""), ABSENT_MARKER);
        assert_eq!(extractor().route(""), Route::default());
    }
}
