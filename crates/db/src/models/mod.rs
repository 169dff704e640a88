//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod attendance;
pub mod fee;
pub mod mark;
pub mod material;
pub mod salary;
pub mod session;
pub mod user;
