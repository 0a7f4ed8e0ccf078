pub mod band;
pub mod filters;

pub use band::{BandRecord, BandStatus, RelationLink};
pub use filters::FilterSelection;
