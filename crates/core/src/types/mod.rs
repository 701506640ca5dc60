//! Core types for Order Desk.
//!
//! This module provides type-safe wrappers for the domain concepts that cross
//! crate boundaries.

pub mod credentials;
pub mod email;
pub mod id;
pub mod order;
pub mod payload;
pub mod row;

pub use credentials::Credentials;
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{NewOrder, OrderPayloadError};
pub use row::{Row, UserSummary};
