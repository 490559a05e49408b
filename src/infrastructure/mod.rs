//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`; user-supplied paths and the
//! trace directory are mapped onto it here.

pub mod paths;

pub use paths::{data_dir, expand_tilde};
