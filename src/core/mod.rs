//! Core payment model, validation rules and aggregation.
//!
//! This module provides the ISO 20022 payment initiation entities
//! (message, group header, payment info, transactions) with validating
//! setters backed by a single rule table.

mod error;
mod group_header;
mod message;
mod payment_info;
mod transaction;
mod types;
pub mod validation;

pub use error::*;
pub use group_header::*;
pub use message::*;
pub use payment_info::*;
pub use transaction::*;
pub use types::*;
pub use validation::{Field, Rule};
