//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read session state from the `SessionContext` provider and
//! route user actions back through it.

pub mod access_gate;
pub mod navbar;
