//! Korean date-range extraction normalised to `YYYYMMDD`.

use crate::domain::model::ABSENT_MARKER;
use crate::utils::error::Result;
use chrono::NaiveDate;
use regex::{Captures, Regex};

/// Ordered surface forms; the first pattern that matches decides the result.
const DATE_PATTERNS: &[&str] = &[
    // 2월 1일부터 2월 5일까지 / 2025년 2월1일-5일 / 11월 4일에서 11월 6일까지
    r"(?:(?P<sy>[0-9]{4})\s*년\s*)?(?P<sm>[0-9]{1,2})\s*월\s*(?P<sd>[0-9]{1,2})\s*일?\s*(?:부터|에서|~|∼|〜|-|–)\s*(?:(?P<ey>[0-9]{4})\s*년\s*)?(?:(?P<em>[0-9]{1,2})\s*월\s*)?(?P<ed>[0-9]{1,2})\s*일",
    // 2/1-2/5 / 2025/2/1 ~ 2/5 / 4/10~12
    r"(?:(?P<sy>[0-9]{4})[./])?(?P<sm>[0-9]{1,2})/(?P<sd>[0-9]{1,2})\s*(?:부터|에서|~|∼|〜|-|–)\s*(?:(?P<ey>[0-9]{4})[./])?(?:(?P<em>[0-9]{1,2})/)?(?P<ed>[0-9]{1,2})",
    // 2025.2.1 ~ 2025.2.5 / 2025-02-01 ~ 02-05
    r"(?P<sy>[0-9]{4})[.-]\s*(?P<sm>[0-9]{1,2})[.-]\s*(?P<sd>[0-9]{1,2})\.?\s*(?:부터|에서|~|∼|〜|–|-)\s*(?:(?P<ey>[0-9]{4})[.-]\s*)?(?:(?P<em>[0-9]{1,2})[.-]\s*)?(?P<ed>[0-9]{1,2})",
    // 6월 3일: a one-day trip
    r"(?:(?P<sy>[0-9]{4})\s*년\s*)?(?P<sm>[0-9]{1,2})\s*월\s*(?P<sd>[0-9]{1,2})\s*일",
    // 2025-02-01 / 2025.2.1 / 2025/2/1
    r"(?P<sy>[0-9]{4})[./-](?P<sm>[0-9]{1,2})[./-](?P<sd>[0-9]{1,2})",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }
}

#[derive(Debug, Clone)]
pub struct DateRangeExtractor {
    default_year: i32,
    patterns: Vec<Regex>,
}

impl DateRangeExtractor {
    pub fn new(default_year: i32) -> Result<Self> {
        let patterns = DATE_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            default_year,
            patterns,
        })
    }

    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    /// Returns the range of the first matching pattern, or `None` when no
    /// pattern matches or the matched dates do not exist on the calendar.
    /// Chronological order is not checked.
    pub fn extract(&self, text: &str) -> Option<DateRange> {
        let caps = self.patterns.iter().find_map(|re| re.captures(text))?;
        let range = self.resolve(&caps);
        if range.is_none() {
            tracing::debug!("Discarding invalid date match '{}'", &caps[0]);
        }
        range
    }

    /// `"YYYYMMDD - YYYYMMDD"` or the absence marker.
    pub fn describe(&self, text: &str) -> String {
        match self.extract(text) {
            Some(range) => range.to_string(),
            None => ABSENT_MARKER.to_string(),
        }
    }

    fn resolve(&self, caps: &Captures<'_>) -> Option<DateRange> {
        let number = |name: &str| -> Option<Option<u32>> {
            match caps.name(name) {
                Some(m) => m.as_str().parse::<u32>().ok().map(Some),
                None => Some(None),
            }
        };

        let start_year = match number("sy")? {
            Some(year) => i32::try_from(year).ok()?,
            None => self.default_year,
        };
        let start_month = number("sm")??;
        let start_day = number("sd")??;

        let end_year = match number("ey")? {
            Some(year) => i32::try_from(year).ok()?,
            None => start_year,
        };
        let end_month = number("em")?.unwrap_or(start_month);
        let end_day = number("ed")?.unwrap_or(start_day);

        let start = NaiveDate::from_ymd_opt(start_year, start_month, start_day)?;
        let end = NaiveDate::from_ymd_opt(end_year, end_month, end_day)?;
        Some(DateRange { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DateRangeExtractor {
        DateRangeExtractor::new(2025).unwrap()
    }

    #[test]
    fn test_korean_particles_with_hyphen() {
        let text = "IT부서의 최명재 팀장, 신예준 팀장이 2월1일-2월5일 일본 도쿄로 출장을 갈려고해. 예산은 최대 500만원이야.";
        assert_eq!(extractor().describe(text), "20250201 - 20250205");
    }

    #[test]
    fn test_from_until_particles() {
        let text = "김민수와 정혜진이 서울에서 부산으로 출장 간다. 3월 15일부터 3월 17일까지.";
        assert_eq!(extractor().describe(text), "20250315 - 20250317");
    }

    #[test]
    fn test_end_month_inherits_start_month() {
        let range = extractor().extract("2025년 5월 20일부터 23일까지 뉴욕").unwrap();
        assert_eq!(range.to_string(), "20250520 - 20250523");
    }

    #[test]
    fn test_explicit_year_overrides_default() {
        let range = extractor().extract("2024년 12월 30일 ~ 2025년 1월 2일").unwrap();
        assert_eq!(range.to_string(), "20241230 - 20250102");
    }

    #[test]
    fn test_slash_form() {
        assert_eq!(extractor().describe("4/10~4/12 하노이"), "20250410 - 20250412");
        assert_eq!(extractor().describe("2/1-5 출장"), "20250201 - 20250205");
    }

    #[test]
    fn test_dotted_form() {
        assert_eq!(
            extractor().describe("2025.07.01 ~ 2025.07.04 싱가포르"),
            "20250701 - 20250704"
        );
    }

    #[test]
    fn test_single_date_is_one_day_range() {
        assert_eq!(extractor().describe("6월 3일 하루 출장"), "20250603 - 20250603");
        assert_eq!(extractor().describe("2025-02-01 도쿄 출장"), "20250201 - 20250201");
        assert_eq!(extractor().describe("2025.9.8 당일 출장"), "20250908 - 20250908");
    }

    #[test]
    fn test_from_origin_particle_range() {
        let text = "나랑 김하늘 대리가 2025년 11월 4일에서 11월 6일까지 광주로 출장 가요. 경비는 80만원.";
        assert_eq!(extractor().describe(text), "20251104 - 20251106");
        assert_eq!(
            extractor().describe("11월 4일에서 11월 6일까지 광주 출장"),
            "20251104 - 20251106"
        );
    }

    #[test]
    fn test_full_width_digits_are_not_dates() {
        assert_eq!(extractor().describe("２월１일-２월５일 도쿄"), ABSENT_MARKER);
    }

    #[test]
    fn test_invalid_calendar_date_is_absent() {
        assert_eq!(extractor().describe("2월 30일부터 3월 2일까지"), ABSENT_MARKER);
    }

    #[test]
    fn test_reversed_range_is_not_rejected() {
        let range = extractor().extract("3월 10일부터 3월 5일까지").unwrap();
        assert!(range.end < range.start);
    }

    #[test]
    fn test_default_year_is_configurable() {
        let extractor = DateRangeExtractor::new(2030).unwrap();
        assert_eq!(extractor.describe("1월 2일-1월 3일"), "20300102 - 20300103");
    }

    #[test]
    fn test_no_date_is_absent() {
        assert_eq!(extractor().describe(""), ABSENT_MARKER);
        assert_eq!(extractor().describe("예산은 최대 500만원"), ABSENT_MARKER);
    }
}
