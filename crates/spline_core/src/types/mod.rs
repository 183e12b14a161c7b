//! Core scalar and error types.
//!
//! This module provides:
//! - `sample`: The [`SampleValue`] trait implemented by real and complex node values
//! - `error`: Structured error type for validation, evaluation and linear solves
//!
//! # Re-exports
//!
//! - [`SampleValue`] from `sample`
//! - [`InterpolationError`], [`Result`] from `error`

pub mod error;
pub mod sample;

pub use error::{InterpolationError, Result};
pub use sample::SampleValue;

pub(crate) use sample::{real_const, real_from_usize, sign};
