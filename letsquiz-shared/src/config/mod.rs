//! # Configuration
//!
//! Client configuration shared by the web bundle and native tooling.

pub mod client;
