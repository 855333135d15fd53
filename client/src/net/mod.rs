//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity_provider` talks to the auth endpoints of the portfolio API and
//! adapts them to the `session` crate's provider interface.

pub mod identity_provider;
