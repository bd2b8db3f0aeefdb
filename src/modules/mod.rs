//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the key-value store abstraction and its backends.

pub mod kv;
