//! Common types and traits shared by aggregates

pub mod aggregate_id;
pub mod aggregate_root;
pub mod entity_metadata;

// Re-exports
pub use aggregate_id::AggregateId;
pub use aggregate_root::AggregateRoot;
pub use entity_metadata::EntityMetadata;
