//! This module acts as a central hub for all persistence logic: the store
//! and directory seams, the Postgres implementations behind them, and the
//! in-memory implementations used by tests and store-less local runs.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;
