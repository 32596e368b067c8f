//! # Application Layer
//!
//! The submission engine orchestrating sign, submit, confirm.

pub mod engine;

pub use engine::SubmissionEngine;
