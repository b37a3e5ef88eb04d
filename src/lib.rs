//! truestory - an incremental true-story movie enrichment pipeline
//!
//! This crate provides:
//! - A SQLite store used as a durable work queue and result cache
//! - Batch enrichment stages (TMDB metadata, Wikipedia plots, subject
//!   classification) that commit per movie and resume after interruption
//! - An ordered keyword classifier mapping plot text and genre tags to a
//!   subject category
//! - Aggregated statistics rendered as a text report

pub mod classify;
pub mod commands;
pub mod config;
pub mod enrich;
pub mod error;
pub mod report;
pub mod store;
pub mod tmdb;
pub mod wiki;

pub use config::Config;
pub use error::{Error, Result};
