//! EV charging map server.
//!
//! Serves station pages for the reconciled EV charging station data:
//! given a network code and that network's ID for a station, find the
//! station and render it.

pub mod cache;
pub mod config;
pub mod domain;
pub mod stations;
pub mod web;
