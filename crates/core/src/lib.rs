//! Copper Kettle Core - Shared types library.
//!
//! This crate provides the domain types used across the cart service
//! components:
//! - `server` - HTTP API for cart operations
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! handlers. The optional `postgres` feature adds sqlx encode/decode support
//! so the types can be bound directly in queries.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
