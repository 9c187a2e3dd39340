// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Navigation location type.

use serde::{Deserialize, Serialize};

/// A decomposed navigation location.
///
/// Only the pathname participates in page view transition detection; the
/// query string and fragment are carried for completeness but ignored by
/// the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
	pub pathname: String,
	#[serde(default)]
	pub search: String,
	#[serde(default)]
	pub hash: String,
}

impl Location {
	/// Creates a location with an empty query string and fragment.
	pub fn new(pathname: impl Into<String>) -> Self {
		Self {
			pathname: pathname.into(),
			search: String::new(),
			hash: String::new(),
		}
	}

	/// Sets the query string (builder pattern). Expects a leading `?`.
	#[must_use]
	pub fn with_search(mut self, search: impl Into<String>) -> Self {
		self.search = search.into();
		self
	}

	/// Sets the fragment (builder pattern). Expects a leading `#`.
	#[must_use]
	pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
		self.hash = hash.into();
		self
	}

	/// True if `other` represents a different page view than this location.
	///
	/// This is the single source of truth for "is this a new page view":
	/// pathnames are compared, query string and fragment are ignored.
	#[must_use]
	pub fn is_different_page(&self, other: &Location) -> bool {
		self.pathname != other.pathname
	}
}

impl std::fmt::Display for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}{}", self.pathname, self.search, self.hash)
	}
}
