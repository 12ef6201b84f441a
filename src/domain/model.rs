use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_one_of, validate_unique_keywords,
    Validate,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 標註器給出的實體標籤；`MONEY`、`DATE` 以外的標籤對管線沒有意義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Money,
    Date,
    Other(String),
}

impl EntityLabel {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "MONEY" => EntityLabel::Money,
            "DATE" => EntityLabel::Date,
            other => EntityLabel::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Money => write!(f, "MONEY"),
            EntityLabel::Date => write!(f, "DATE"),
            EntityLabel::Other(tag) => write!(f, "{}", tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub text: String,
    /// Byte offsets into the utterance.
    pub start: usize,
    pub end: usize,
}

/// One utterance's entity spans, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    spans: Vec<EntitySpan>,
}

impl Annotation {
    pub fn new(mut spans: Vec<EntitySpan>) -> Self {
        spans.sort_by_key(|s| s.start);
        Self { spans }
    }

    pub fn spans(&self) -> &[EntitySpan] {
        &self.spans
    }

    pub fn spans_labeled<'a>(
        &'a self,
        label: &'a EntityLabel,
    ) -> impl Iterator<Item = &'a EntitySpan> + 'a {
        self.spans.iter().filter(move |s| &s.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// 解析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExpense {
    /// `None` means no number was found; the caller has to ask for it.
    pub amount: Option<Decimal>,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl ParsedExpense {
    pub fn needs_amount(&self) -> bool {
        self.amount.is_none()
    }

    /// ISO 8601 (`YYYY-MM-DD`)
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBias {
    #[default]
    Past,
    Future,
}

pub const DEFAULT_CATEGORIES: [&str; 6] =
    ["food", "transport", "shopping", "bills", "entertainment", "other"];
pub const DEFAULT_CATEGORY: &str = "other";

/// Ordered, closed set of category keywords. Order is the match priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryVocabulary {
    categories: Vec<String>,
    default_category: String,
}

impl CategoryVocabulary {
    pub fn new<I, S>(categories: I, default_category: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary = Self {
            categories: categories
                .into_iter()
                .map(|c| c.into().trim().to_lowercase())
                .collect(),
            default_category: default_category.trim().to_lowercase(),
        };
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

impl Default for CategoryVocabulary {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl Validate for CategoryVocabulary {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("categories.vocabulary", &self.categories)?;
        for category in &self.categories {
            validate_non_empty_string("categories.vocabulary", category)?;
        }
        validate_unique_keywords("categories.vocabulary", &self.categories)?;
        validate_one_of("categories.default", &self.default_category, &self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(label: EntityLabel, text: &str, start: usize) -> EntitySpan {
        EntitySpan {
            label,
            text: text.to_string(),
            start,
            end: start + text.len(),
        }
    }

    #[test]
    fn test_annotation_orders_spans_by_offset() {
        let annotation = Annotation::new(vec![
            span(EntityLabel::Date, "yesterday", 20),
            span(EntityLabel::Money, "$5", 2),
        ]);
        let starts: Vec<usize> = annotation.spans().iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![2, 20]);
        assert_eq!(annotation.spans_labeled(&EntityLabel::Date).count(), 1);
    }

    #[test]
    fn test_label_from_tag() {
        assert_eq!(EntityLabel::from_tag("money"), EntityLabel::Money);
        assert_eq!(EntityLabel::from_tag("DATE"), EntityLabel::Date);
        assert_eq!(EntityLabel::from_tag("cardinal").to_string(), "CARDINAL");
    }

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = CategoryVocabulary::default();
        assert_eq!(vocabulary.categories()[0], "food");
        assert_eq!(vocabulary.default_category(), "other");
        assert!(vocabulary.validate().is_ok());
    }

    #[test]
    fn test_vocabulary_normalizes_case() {
        let vocabulary = CategoryVocabulary::new(["Food", " Rent "], "rent").unwrap();
        assert_eq!(vocabulary.categories(), &["food".to_string(), "rent".to_string()]);
        assert!(vocabulary.contains("rent"));
    }

    #[test]
    fn test_vocabulary_rejects_bad_input() {
        assert!(CategoryVocabulary::new(Vec::<String>::new(), "other").is_err());
        assert!(CategoryVocabulary::new(["food", "FOOD"], "food").is_err());
        assert!(CategoryVocabulary::new(["food", ""], "food").is_err());
        assert!(CategoryVocabulary::new(["food", "bills"], "other").is_err());
    }

    #[test]
    fn test_parsed_expense_serializes_iso_date() {
        let expense = ParsedExpense {
            amount: None,
            category: "other".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert!(json["amount"].is_null());
        assert!(expense.needs_amount());
        assert_eq!(expense.date_iso(), "2024-03-09");
    }
}
