//! CLI command implementations

pub mod apply;
pub mod batch;
pub mod json_output;
pub mod list;
pub mod validate;
