// Adapters layer: bundled implementations of the collaborator ports.

pub mod clock;
pub mod relative_date;
pub mod rule_annotator;
