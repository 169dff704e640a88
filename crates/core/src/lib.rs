//! Campus domain core.
//!
//! Pure domain logic shared by the API server and the native client:
//! roles and their privilege relation, the error taxonomy, the access
//! guard, registration validation, the approval rules, and the static
//! navigation tables. Nothing in this crate performs I/O.

pub mod approval;
pub mod error;
pub mod guard;
pub mod nav;
pub mod profile;
pub mod registration;
pub mod roles;
pub mod session;
pub mod types;
