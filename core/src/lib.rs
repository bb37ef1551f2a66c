//! Core library for sous: recipe generation requests, fencing of overlapping
//! requests, and the persisted recipe history.

pub mod coordinator;
pub mod error;
pub mod generation;
pub mod ingredients;
pub mod ledger;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod store;
