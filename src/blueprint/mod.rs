//! Blueprints and stamping requests

pub mod catalog;
pub mod queue;

pub use catalog::{BlueprintCatalog, BlueprintPattern, BlueprintRecord, Orientation};
pub use queue::{StampEvent, StampQueue};
