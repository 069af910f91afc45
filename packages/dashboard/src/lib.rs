#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One dashboard render pass.
//!
//! Wires configuration, retrieval, aggregation, and chart construction
//! into a single sequential pass whose output is a serializable
//! document of chart descriptions. Nothing here holds state beyond the
//! pass except the load cache handed in by the caller.

pub mod render;

pub use render::{DashboardOutput, LoadStatus, LoadSummary, render_pass};
