//! # tem-cli — Operator CLI for the TEM Stack
//!
//! Command handlers for the `tem` binary. Every command loads the JSON
//! state snapshot, runs against the same engine the API serves, and
//! writes the snapshot back if it mutated anything — there is no separate
//! "script" path into the data.

pub mod assess;
pub mod context;
pub mod landing;
pub mod recompute;
pub mod serve;
pub mod status;
pub mod vessel;
