//! # Shardmap Viewer
//!
//! IO shell around [`shardmap_core`]: loads configuration, polls the
//! backend for settlement and entity snapshots, drives the 1-second phase
//! tick, and glues the command console to the command endpoint. Rendering
//! is a log-based stand-in behind the core's sink traits.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod app;
pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod view;
