//! Typed repositories over the JSON record store.
//!
//! # Responsibility
//! - Define id-keyed CRUD contracts for typed entities.
//! - Keep raw JSON handling inside the storage boundary.
//!
//! # Invariants
//! - Write paths call `Entity::validate()` before touching the file.
//! - Strict reads reject invalid persisted records instead of masking them;
//!   lenient reads skip them and report how many were skipped.
//! - Records a write does not target keep their raw form and position.

pub mod json_repo;

pub use json_repo::{JsonRepository, LenientList, RepoError, RepoResult, Repository};
