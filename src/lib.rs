pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, OutputFormat};

pub use crate::adapters::{
    clock::{FixedClock, SystemClock},
    relative_date::RelativeDateInterpreter,
    rule_annotator::RuleAnnotator,
};
pub use crate::config::toml_config::ParserConfig;
pub use crate::core::pipeline::{parse_expense, ExpenseParser, RuleBasedParser};
pub use crate::domain::model::{
    Annotation, CategoryVocabulary, DateBias, EntityLabel, EntitySpan, ParsedExpense,
};
pub use crate::domain::ports::{Annotator, Clock, DateInterpreter};
pub use crate::utils::error::{ExpenseError, Result};
