use crate::adapters::clock::SystemClock;
use crate::adapters::relative_date::RelativeDateInterpreter;
use crate::adapters::rule_annotator::RuleAnnotator;
use crate::config::toml_config::ParserConfig;
use crate::core::amount::resolve_amount;
use crate::core::category::CategoryClassifier;
use crate::core::date::resolve_date;
use crate::core::sanitize::DescriptionSanitizer;
use crate::domain::model::{CategoryVocabulary, DateBias, ParsedExpense};
use crate::domain::ports::{Annotator, Clock, DateInterpreter};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Utterance → [`ParsedExpense`]: annotate, amount, date, category, sanitize.
///
/// Holds no per-call state; one parser can serve many threads as long as
/// its collaborators can.
pub struct ExpenseParser<A: Annotator, D: DateInterpreter, C: Clock> {
    annotator: A,
    interpreter: D,
    clock: C,
    bias: DateBias,
    classifier: CategoryClassifier,
    sanitizer: DescriptionSanitizer,
}

pub type RuleBasedParser = ExpenseParser<RuleAnnotator, RelativeDateInterpreter, SystemClock>;

impl<A: Annotator, D: DateInterpreter, C: Clock> ExpenseParser<A, D, C> {
    pub fn new(
        annotator: A,
        interpreter: D,
        clock: C,
        vocabulary: CategoryVocabulary,
        bias: DateBias,
    ) -> Result<Self> {
        let sanitizer = DescriptionSanitizer::new(&vocabulary)?;
        Ok(Self {
            annotator,
            interpreter,
            clock,
            bias,
            classifier: CategoryClassifier::new(vocabulary),
            sanitizer,
        })
    }

    pub fn vocabulary(&self) -> &CategoryVocabulary {
        self.classifier.vocabulary()
    }

    pub fn bias(&self) -> DateBias {
        self.bias
    }

    pub fn parse(&self, text: &str) -> Result<ParsedExpense> {
        self.parse_on(text, self.clock.today())
    }

    /// Same as [`parse`](Self::parse) with an explicit "today".
    pub fn parse_on(&self, text: &str, today: NaiveDate) -> Result<ParsedExpense> {
        tracing::debug!("Parsing utterance: {:?}", text);

        let annotation = self.annotator.annotate(text)?;
        tracing::debug!("Annotator returned {} spans", annotation.spans().len());

        let amount = resolve_amount(text, &annotation);
        let date = resolve_date(&annotation, &self.interpreter, today, self.bias)?;
        let category = self.classifier.classify(text).to_string();
        let description = self.sanitizer.sanitize(text, amount, &category);

        let expense = ParsedExpense {
            amount,
            category,
            description,
            date,
        };
        tracing::debug!("Parsed expense: {:?}", expense);
        Ok(expense)
    }
}

impl RuleBasedParser {
    pub fn rule_based(config: &ParserConfig) -> Result<Self> {
        ExpenseParser::new(
            RuleAnnotator::new(),
            RelativeDateInterpreter::new(),
            SystemClock,
            config.vocabulary()?,
            config.date_bias(),
        )
    }
}

/// Parses one utterance with the bundled collaborators and default vocabulary.
pub fn parse_expense(text: &str) -> Result<ParsedExpense> {
    RuleBasedParser::rule_based(&ParserConfig::default())?.parse(text)
}
