pub mod amount;
pub mod category;
pub mod date;
pub mod pipeline;
pub mod sanitize;

pub use crate::domain::model::{Annotation, CategoryVocabulary, DateBias, ParsedExpense};
pub use crate::domain::ports::{Annotator, Clock, DateInterpreter};
pub use crate::utils::error::Result;
