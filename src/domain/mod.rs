// Domain layer: models, vocabulary and ports (collaborator interfaces).

pub mod model;
pub mod ports;
pub mod vocab;
