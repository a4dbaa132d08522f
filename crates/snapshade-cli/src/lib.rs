//! snapshade CLI library.
//!
//! This crate provides the core functionality for the snapshade CLI:
//! recipe loading and the `apply`, `batch`, `list` and `validate` commands.

pub mod commands;
pub mod input;
