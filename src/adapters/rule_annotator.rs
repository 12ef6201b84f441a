//! Regex entity tagger for short spoken expense sentences.
//!
//! Emits `MONEY` and `DATE` spans plus `CARDINAL` for any other bare number.
//! Money and date spans win over cardinals; spans never overlap.

use crate::adapters::relative_date::{COUNT_WORDS, MONTH_NAMES, WEEKDAY_NAMES};
use crate::domain::model::{Annotation, EntityLabel, EntitySpan};
use crate::domain::ports::Annotator;
use crate::utils::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;

const NUMBER: &str = r"\d+(?:,\d+)*(?:\.\d+)?";
const CURRENCY_WORDS: &str = r"rupees?|rs|dollars?|bucks|euros?|pounds?|inr|usd";
const SPELLED_NUMBERS: &str = concat!(
    r"a|and|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|",
    r"thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|",
    r"twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety|",
    r"hundred|thousand|lakh|million"
);

static MONEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        concat!(
            r"(?i)(?:[₹$€£]|\b(?:rs\.?|inr|usd))\s*(?:{num})",
            r"|\b(?:{num})\s*(?:{cur})\b",
            r"|\b(?:(?:{words})\s+)+(?:{cur})\b"
        ),
        num = NUMBER,
        cur = CURRENCY_WORDS,
        words = SPELLED_NUMBERS,
    ))
    .unwrap()
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        concat!(
            r"(?i)\b(?:",
            r"(?:the\s+)?day\s+before\s+yesterday",
            r"|(?:the\s+)?day\s+after\s+tomorrow",
            r"|yesterday|today|tonight|tomorrow|last\s+night",
            r"|this\s+(?:morning|afternoon|evening)",
            r"|(?:{count})\s+(?:day|week|month|year)s?\s+ago",
            r"|in\s+(?:{count})\s+(?:day|week|month|year)s?",
            r"|(?:last|this|next)\s+(?:week|month|year)",
            r"|(?:(?:last|past|previous|this|next|coming)\s+)?(?:{weekday})",
            r"|\d{{4}}-\d{{2}}-\d{{2}}",
            r"|\d{{1,2}}/\d{{1,2}}(?:/(?:\d{{4}}|\d{{2}}))?",
            r"|(?:{month})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?",
            r"|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:{month})(?:\s+\d{{4}})?",
            r")\b"
        ),
        count = COUNT_WORDS,
        weekday = WEEKDAY_NAMES,
        month = MONTH_NAMES,
    ))
    .unwrap()
});

static CARDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b(?:{})\b", NUMBER)).unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleAnnotator;

impl RuleAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Result<Annotation> {
        let mut spans = Vec::new();

        add_non_overlapping(&mut spans, text, &MONEY_RE, EntityLabel::Money);
        add_non_overlapping(&mut spans, text, &DATE_RE, EntityLabel::Date);
        add_non_overlapping(
            &mut spans,
            text,
            &CARDINAL_RE,
            EntityLabel::Other("CARDINAL".to_string()),
        );

        let annotation = Annotation::new(spans);
        tracing::trace!("Annotated {} spans: {:?}", annotation.spans().len(), annotation);
        Ok(annotation)
    }
}

fn add_non_overlapping(spans: &mut Vec<EntitySpan>, text: &str, re: &Regex, label: EntityLabel) {
    for m in re.find_iter(text) {
        let overlaps = spans
            .iter()
            .any(|s| m.start() < s.end && m.end() > s.start);
        if !overlaps {
            spans.push(EntitySpan {
                label: label.clone(),
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            });
        }
    }
}
