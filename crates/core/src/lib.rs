//! Order Desk Core - Shared types library.
//!
//! This crate provides the domain types used across all Order Desk components:
//! - `api` - The HTTP service (products, orders, login)
//! - `cli` - Command-line tools for migrations and seeding
//! - `integration-tests` - End-to-end tests against a live database
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. Enable the `postgres` feature to get `sqlx`
//! encode/decode support for the ID types.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, dynamic rows, order payloads and login credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
