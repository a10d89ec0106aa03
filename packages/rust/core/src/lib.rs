//! Core pipeline orchestration for artifactview.
//!
//! This crate ties together the GitHub client, zip extraction, and the
//! external file server into the end-to-end fetch workflow (`fetch_run`).

pub mod extract;
pub mod pipeline;
pub mod serve;
