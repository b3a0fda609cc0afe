//! Budget phrases (`예산은 최대 500만원`) converted to whole won.

use crate::domain::model::ABSENT_MARKER;
use crate::utils::error::Result;
use regex::Regex;

const NUMBER: &str = r"[0-9][0-9,]*(?:\.[0-9]+)?";
const UNIT: &str = "천만|백만|억|만|천";

#[derive(Debug, Clone)]
pub struct CostExtractor {
    patterns: Vec<Regex>,
    /// One `<number><unit>` piece of a compound amount such as `1억 5천만`.
    part: Regex,
}

impl CostExtractor {
    pub fn new() -> Result<Self> {
        let amount = format!(
            r"(?P<amount>(?:{n}\s*(?:{u})\s*)*{n}\s*(?:{u})?)\s*원",
            n = NUMBER,
            u = UNIT
        );
        let keyword = format!(
            r"(?:예산|경비|비용|출장비|한도)\s*(?:은|는|이|가|을|를)?\s*(?:최대|최고|많아야|최소|약|대략|총)?\s*{}",
            amount
        );
        let ceiling = format!(r"(?:최대|최고|많아야)\s*{}", amount);

        Ok(Self {
            patterns: vec![Regex::new(&keyword)?, Regex::new(&ceiling)?],
            part: Regex::new(&format!(r"(?P<number>{})\s*(?P<unit>{})?", NUMBER, UNIT))?,
        })
    }

    /// Sum of all parts of the first budget phrase, `None` on overflow.
    pub fn extract(&self, text: &str) -> Option<u64> {
        let caps = self.patterns.iter().find_map(|re| re.captures(text))?;
        let amount = caps.name("amount")?.as_str();

        self.part
            .captures_iter(amount)
            .try_fold(0u64, |total, part| {
                let number = part.name("number")?.as_str();
                let unit = part.name("unit").map(|m| m.as_str());
                total.checked_add(to_won(number, unit)?)
            })
    }

    pub fn describe(&self, text: &str) -> String {
        match self.extract(text) {
            Some(won) => won.to_string(),
            None => ABSENT_MARKER.to_string(),
        }
    }
}

fn unit_multiplier(unit: Option<&str>) -> u64 {
    match unit {
        Some("억") => 100_000_000,
        Some("천만") => 10_000_000,
        Some("백만") => 1_000_000,
        Some("만") => 10_000,
        Some("천") => 1_000,
        _ => 1,
    }
}

/// Integer-only conversion so `1.5억` stays exact.
fn to_won(amount: &str, unit: Option<&str>) -> Option<u64> {
    let digits: String = amount.chars().filter(|c| *c != ',').collect();
    let multiplier = unit_multiplier(unit);

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits.as_str(), ""),
    };

    let mut won = whole.parse::<u64>().ok()?.checked_mul(multiplier)?;

    if !fraction.is_empty() {
        let scale = 10u64.checked_pow(u32::try_from(fraction.len()).ok()?)?;
        let fractional = fraction.parse::<u64>().ok()?.checked_mul(multiplier)? / scale;
        won = won.checked_add(fractional)?;
    }

    Some(won)
}
