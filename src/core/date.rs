use crate::domain::model::{Annotation, DateBias, EntityLabel};
use crate::domain::ports::DateInterpreter;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Resolves the expense date from the `DATE` spans, in document order.
///
/// A span the interpreter cannot read is skipped; when none can be read the
/// date is `today`. Interpreter errors are returned as-is.
pub fn resolve_date<D: DateInterpreter + ?Sized>(
    annotation: &Annotation,
    interpreter: &D,
    today: NaiveDate,
    bias: DateBias,
) -> Result<NaiveDate> {
    for span in annotation.spans_labeled(&EntityLabel::Date) {
        match interpreter.interpret(&span.text, today, bias)? {
            Some(date) => {
                tracing::debug!("Date {} from DATE span '{}'", date, span.text);
                return Ok(date);
            }
            None => tracing::debug!("Could not interpret DATE span '{}'", span.text),
        }
    }

    tracing::debug!("No usable DATE span, defaulting to {}", today);
    Ok(today)
}
