//! English date expressions, relative ("yesterday", "last monday",
//! "3 days ago") and absolute ("2024-03-05", "march 5th", "5/3").
//!
//! Ambiguous expressions are resolved towards the requested [`DateBias`].
//! Under [`DateBias::Past`] anything that lands after the reference day is
//! reported as uninterpretable.

use crate::domain::model::DateBias;
use crate::domain::ports::DateInterpreter;
use crate::utils::error::Result;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const COUNT_WORDS: &str =
    r"\d+|an?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve";
pub(crate) const WEEKDAY_NAMES: &str =
    r"monday|tuesday|wednesday|thursday|friday|saturday|sunday";
pub(crate) const MONTH_NAMES: &str = concat!(
    r"january|february|march|april|may|june|july|august|september|october|november|december|",
    r"jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec"
);

static AGO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({})\s+(day|week|month|year)s?\s+ago$",
        COUNT_WORDS
    ))
    .unwrap()
});

static IN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^in\s+({})\s+(day|week|month|year)s?$", COUNT_WORDS)).unwrap()
});

static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(last|this|next)\s+(week|month|year)$").unwrap());

static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(last|past|previous|this|next|coming)\s+)?",
        r"(mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)",
        r"(?:day|sday|nesday|rsday|urday)?$"
    ))
    .unwrap()
});

static SLASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?$").unwrap());

static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:,?\s+(\d{{4}}))?$",
        MONTH_NAMES
    ))
    .unwrap()
});

static DAY_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({})\.?(?:,?\s+(\d{{4}}))?$",
        MONTH_NAMES
    ))
    .unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeDateInterpreter;

impl RelativeDateInterpreter {
    pub fn new() -> Self {
        Self
    }

    fn resolve(&self, text: &str, reference: NaiveDate, bias: DateBias) -> Option<NaiveDate> {
        let text = normalize(text);
        if text.is_empty() {
            return None;
        }

        match text.as_str() {
            "today" | "now" | "tonight" | "this morning" | "this afternoon" | "this evening" => {
                return Some(reference)
            }
            "yesterday" | "last night" => return reference.checked_sub_days(Days::new(1)),
            "day before yesterday" => return reference.checked_sub_days(Days::new(2)),
            "tomorrow" => return reference.checked_add_days(Days::new(1)),
            "day after tomorrow" => return reference.checked_add_days(Days::new(2)),
            _ => {}
        }

        if let Some(caps) = AGO_RE.captures(&text) {
            let count = parse_count(&caps[1])?;
            return shift(reference, &caps[2], -i64::from(count));
        }

        if let Some(caps) = IN_RE.captures(&text) {
            let count = parse_count(&caps[1])?;
            return shift(reference, &caps[2], i64::from(count));
        }

        if let Some(caps) = PERIOD_RE.captures(&text) {
            let step = match &caps[1] {
                "last" => -1,
                "next" => 1,
                _ => 0,
            };
            return shift(reference, &caps[2], step);
        }

        if let Some(caps) = WEEKDAY_RE.captures(&text) {
            let weekday = parse_weekday(&caps[2])?;
            return Some(match caps.get(1).map(|m| m.as_str()) {
                Some("last" | "past" | "previous") => previous_weekday(reference, weekday, false),
                Some("next" | "coming") => next_weekday(reference, weekday, false),
                _ => match bias {
                    DateBias::Past => previous_weekday(reference, weekday, true),
                    DateBias::Future => next_weekday(reference, weekday, true),
                },
            });
        }

        if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
            return Some(date);
        }

        if let Some(caps) = SLASH_RE.captures(&text) {
            let month: u32 = caps[1].parse().ok()?;
            let day: u32 = caps[2].parse().ok()?;
            return match caps.get(3) {
                Some(year) => {
                    let mut year: i32 = year.as_str().parse().ok()?;
                    if year < 100 {
                        year += 2000;
                    }
                    NaiveDate::from_ymd_opt(year, month, day)
                }
                None => resolve_without_year(month, day, reference, bias),
            };
        }

        if let Some(caps) = MONTH_DAY_RE.captures(&text) {
            let month = parse_month(&caps[1])?;
            let day: u32 = caps[2].parse().ok()?;
            return with_optional_year(month, day, caps.get(3).map(|m| m.as_str()), reference, bias);
        }

        if let Some(caps) = DAY_MONTH_RE.captures(&text) {
            let day: u32 = caps[1].parse().ok()?;
            let month = parse_month(&caps[2])?;
            return with_optional_year(month, day, caps.get(3).map(|m| m.as_str()), reference, bias);
        }

        None
    }
}

impl DateInterpreter for RelativeDateInterpreter {
    fn interpret(
        &self,
        text: &str,
        reference: NaiveDate,
        bias: DateBias,
    ) -> Result<Option<NaiveDate>> {
        let resolved = self.resolve(text, reference, bias);

        match resolved {
            Some(date) if bias == DateBias::Past && date > reference => {
                tracing::debug!(
                    "Rejecting '{}' -> {}: after reference day {}",
                    text,
                    date,
                    reference
                );
                Ok(None)
            }
            other => Ok(other),
        }
    }
}

fn normalize(text: &str) -> String {
    let lowered = text
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
        .to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut rest = collapsed.as_str();
    for prefix in ["on ", "the "] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
        }
    }
    rest.to_string()
}

fn parse_count(word: &str) -> Option<u32> {
    let count = match word {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        digits => return digits.parse().ok(),
    };
    Some(count)
}

fn parse_weekday(prefix: &str) -> Option<Weekday> {
    let weekday = match prefix {
        "mon" => Weekday::Mon,
        "tue" | "tues" => Weekday::Tue,
        "wed" => Weekday::Wed,
        "thu" | "thur" | "thurs" => Weekday::Thu,
        "fri" => Weekday::Fri,
        "sat" => Weekday::Sat,
        "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

fn parse_month(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// 月份運算會把日期夾到該月最後一天（3/31 往前一個月 = 2/29 或 2/28）
fn shift(reference: NaiveDate, unit: &str, amount: i64) -> Option<NaiveDate> {
    let magnitude = u32::try_from(amount.unsigned_abs()).ok()?;
    let forward = amount >= 0;

    match unit {
        "day" | "week" => {
            let days = if unit == "week" {
                u64::from(magnitude) * 7
            } else {
                u64::from(magnitude)
            };
            if forward {
                reference.checked_add_days(Days::new(days))
            } else {
                reference.checked_sub_days(Days::new(days))
            }
        }
        "month" | "year" => {
            let months = if unit == "year" {
                magnitude.checked_mul(12)?
            } else {
                magnitude
            };
            if forward {
                reference.checked_add_months(Months::new(months))
            } else {
                reference.checked_sub_months(Months::new(months))
            }
        }
        _ => None,
    }
}

fn previous_weekday(reference: NaiveDate, weekday: Weekday, inclusive: bool) -> NaiveDate {
    let mut back = (7 + reference.weekday().num_days_from_monday()
        - weekday.num_days_from_monday())
        % 7;
    if back == 0 && !inclusive {
        back = 7;
    }
    reference - chrono::Duration::days(i64::from(back))
}

fn next_weekday(reference: NaiveDate, weekday: Weekday, inclusive: bool) -> NaiveDate {
    let mut ahead = (7 + weekday.num_days_from_monday()
        - reference.weekday().num_days_from_monday())
        % 7;
    if ahead == 0 && !inclusive {
        ahead = 7;
    }
    reference + chrono::Duration::days(i64::from(ahead))
}

fn with_optional_year(
    month: u32,
    day: u32,
    year: Option<&str>,
    reference: NaiveDate,
    bias: DateBias,
) -> Option<NaiveDate> {
    match year {
        Some(year) => NaiveDate::from_ymd_opt(year.parse().ok()?, month, day),
        None => resolve_without_year(month, day, reference, bias),
    }
}

/// 沒寫年份時，依偏好往前或往後找最近的合法日期（2/29 最多要跨四年）
fn resolve_without_year(
    month: u32,
    day: u32,
    reference: NaiveDate,
    bias: DateBias,
) -> Option<NaiveDate> {
    (0..8).find_map(|offset| {
        let year = match bias {
            DateBias::Past => reference.year() - offset,
            DateBias::Future => reference.year() + offset,
        };
        NaiveDate::from_ymd_opt(year, month, day).filter(|date| match bias {
            DateBias::Past => *date <= reference,
            DateBias::Future => *date >= reference,
        })
    })
}
