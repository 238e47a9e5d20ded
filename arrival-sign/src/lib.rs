//! CTA "L" arrival sign.
//!
//! Polls Train Tracker for one station, arranges the arrivals into the
//! rows of that station's sign layout, and serves the result.

pub mod board;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod payload_log;
pub mod tracker;
pub mod web;

#[cfg(test)]
mod testing;
