//! HTTP handlers for collection CRUD and the course endpoints.

pub mod collection;
pub mod course;
pub use collection::*;
pub use course::*;
