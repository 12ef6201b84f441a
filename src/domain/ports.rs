use crate::domain::model::{Annotation, DateBias};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Tags an utterance with entity spans.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Annotation>;
}

/// Turns the surface text of a date span into a calendar date.
///
/// `Ok(None)` means the text could not be interpreted; `Err` means the
/// interpreter itself failed.
pub trait DateInterpreter: Send + Sync {
    fn interpret(&self, text: &str, reference: NaiveDate, bias: DateBias)
        -> Result<Option<NaiveDate>>;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
