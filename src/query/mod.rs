//! Query building: request input to BSON filter, sort and update documents.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
