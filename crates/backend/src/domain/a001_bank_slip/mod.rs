//! Bank slip lifecycle: validation, penalty computation, storage and the service
//! that drives status transitions.

pub mod error;
pub mod in_memory;
pub mod penalty;
pub mod repository;
pub mod service;
pub mod validation;
