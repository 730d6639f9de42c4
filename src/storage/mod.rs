//! Storage layer for insight
//!
//! Holds loaded datasets in memory. Nothing is persisted: a new process
//! starts with an empty store.

pub mod dataset;
pub mod source;
pub mod store;
