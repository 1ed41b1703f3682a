//! CollectionService: generic record operations on top of a DocumentStore.

mod crud;
mod validation;
pub use crud::CollectionService;
pub use validation::RequestValidator;
