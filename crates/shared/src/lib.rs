//! Types shared between the contest client core and its backend.

pub mod domain;
pub mod error;
pub mod protocol;
