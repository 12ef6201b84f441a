// Domain layer: data model and the collaborator ports the pipeline consumes.

pub mod model;
pub mod ports;
