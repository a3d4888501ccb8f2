//! Flutter bridge for the Sonolight core.
//! All exported functions live in [`api`].

pub mod api;
