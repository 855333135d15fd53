//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped redirect behavior and delegates session
//! rendering details to `components`.

pub mod account;
pub mod dashboard;
pub mod landing;
pub mod login;
