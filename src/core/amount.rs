use crate::domain::model::{Annotation, EntityLabel};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 一段數字，逗號分組不限位數（1,200、1,00,000、12,34 皆可）
pub(crate) static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:,\d+)*(?:\.\d+)?").unwrap());

/// Resolves the expense amount.
///
/// The first `MONEY` span that yields a number wins. Without one, the first
/// number anywhere in the utterance is used. `None` when the text has no
/// usable number at all.
pub fn resolve_amount(text: &str, annotation: &Annotation) -> Option<Decimal> {
    for span in annotation.spans_labeled(&EntityLabel::Money) {
        if let Some(amount) = first_number(&span.text.replace(',', "")) {
            tracing::debug!("Amount {} from MONEY span '{}'", amount, span.text);
            return Some(amount);
        }
        tracing::debug!("MONEY span '{}' has no digits, trying next", span.text);
    }

    let amount = first_number(text);
    match amount {
        Some(value) => tracing::debug!("Amount {} from numeric fallback", value),
        None => tracing::debug!("No numeric evidence in utterance"),
    }
    amount
}

/// Parses the first number in `text`, ignoring thousands separators.
pub fn first_number(text: &str) -> Option<Decimal> {
    let token = NUMBER_RE.find(text)?;
    parse_number(token.as_str())
}

pub(crate) fn parse_number(token: &str) -> Option<Decimal> {
    let digits = token.replace(',', "");
    match Decimal::from_str(&digits) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Could not parse numeric token '{}': {}", token, e);
            None
        }
    }
}
