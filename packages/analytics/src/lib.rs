#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure aggregation functions over incident record sets.
//!
//! Every function borrows the record set read-only and is deterministic
//! in its parameters; an empty input always yields an empty (or
//! all-zero) aggregate rather than an error, which is how load failures
//! surface downstream as a "no data" chart.

pub mod districts;
pub mod spatial;
pub mod temporal;

mod sample;
