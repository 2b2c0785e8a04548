//! Route definitions for the analytics API.

pub mod dashboard;
pub mod health;
