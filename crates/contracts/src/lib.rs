//! Wire types shared between the CSMS dashboard and its REST backend.
//!
//! Every record mirrors the backend JSON (camelCase keys). Nothing here
//! enforces invariants beyond shape.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
