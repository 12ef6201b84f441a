use crate::core::amount::{parse_number, NUMBER_RE};
use crate::domain::model::CategoryVocabulary;
use crate::utils::error::{ExpenseError, Result};
use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;

/// Strips the resolved amount and category keyword out of the utterance.
#[derive(Debug, Clone)]
pub struct DescriptionSanitizer {
    keyword_patterns: Vec<(String, Regex)>,
}

impl DescriptionSanitizer {
    pub fn new(vocabulary: &CategoryVocabulary) -> Result<Self> {
        let keyword_patterns = vocabulary
            .categories()
            .iter()
            .map(|category| Ok((category.clone(), keyword_pattern(category)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keyword_patterns })
    }

    pub fn sanitize(&self, text: &str, amount: Option<Decimal>, category: &str) -> String {
        let mut description = text.to_string();

        if let Some(amount) = amount {
            let ranges: Vec<(usize, usize)> = NUMBER_RE
                .find_iter(&description)
                .filter(|m| is_standalone(&description, m.start(), m.end()))
                .filter(|m| parse_number(m.as_str()) == Some(amount))
                .map(|m| (m.start(), m.end()))
                .collect();
            description = remove_ranges(&description, &ranges);
        }

        let ranges: Vec<(usize, usize)> = match self.pattern_for(category) {
            Some(pattern) => pattern
                .find_iter(&description)
                .map(|m| (m.start(), m.end()))
                .collect(),
            None => match keyword_pattern(category) {
                Ok(pattern) => pattern
                    .find_iter(&description)
                    .map(|m| (m.start(), m.end()))
                    .collect(),
                Err(e) => {
                    tracing::warn!("Skipping category removal: {}", e);
                    Vec::new()
                }
            },
        };
        description = remove_ranges(&description, &ranges);

        description.trim().to_string()
    }

    fn pattern_for(&self, category: &str) -> Option<&Regex> {
        self.keyword_patterns
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(category))
            .map(|(_, pattern)| pattern)
    }
}

fn keyword_pattern(keyword: &str) -> Result<Regex> {
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .map_err(|e| ExpenseError::ConfigValidationError {
            field: "categories.vocabulary".to_string(),
            message: format!("cannot build pattern for '{}': {}", keyword, e),
        })
}

/// A number is standalone when no other digit is glued to it, so "50" never
/// matches inside "150" but "500rs" and "Rs.500" still yield "500".
fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let mut before = text[..start].chars().rev();
    let glued_before = match before.next() {
        Some(c) if c.is_numeric() => true,
        Some('.') | Some(',') => before.next().is_some_and(char::is_numeric),
        _ => false,
    };
    let glued_after = text[end..].chars().next().is_some_and(char::is_numeric);
    !glued_before && !glued_after
}

/// 刪除指定區段；刪除處兩側都是空白時只保留一側
fn remove_ranges(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for &(start, end) in ranges {
        out.push_str(&text[last..start]);
        last = end;
        if out.ends_with(char::is_whitespace) && text[end..].starts_with(char::is_whitespace) {
            let kept = out.trim_end().len();
            out.truncate(kept);
        }
    }
    out.push_str(&text[last..]);
    out
}
