// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the RUM core crate.
//!
//! The tracker itself is a fire-and-forget telemetry producer and defines no
//! operational errors; the only failures here are parse failures on the
//! string-typed surfaces.

use thiserror::Error;

/// RUM core errors.
#[derive(Debug, Error)]
pub enum RumError {
	/// Unknown event category string.
	#[error("invalid event category: {0}")]
	InvalidCategory(String),
}

/// Result type alias for RUM core operations.
pub type Result<T> = std::result::Result<T, RumError>;
