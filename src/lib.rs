//! addoncat - addon catalog client library
//!
//! This library provides:
//! - A client for the remote addon catalog (listing, dependencies, files,
//!   update records, details)
//! - The addon record model
//! - A cache of module updates known to be available
//! - A log of pending install/remove/update changes for an external updater

pub mod catalog;
pub mod changes;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod persist;
pub mod progress;
pub mod updates;
