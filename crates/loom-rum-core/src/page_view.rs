// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Page view identity and accumulator types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::performance::{PerformanceEntry, FIRST_CONTENTFUL_PAINT};

/// Unique identifier for a page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageViewId(pub Uuid);

impl PageViewId {
	#[must_use]
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}

	#[must_use]
	pub fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl Default for PageViewId {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Display for PageViewId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for PageViewId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}

/// Counters accumulated over the life of one page view.
///
/// Each counter starts at zero and is monotonically non-decreasing; the
/// tracker increments them in place rather than recomputing from history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewSummary {
	pub custom_event_count: u32,
	pub error_count: u32,
	pub long_task_count: u32,
}

/// Partial snapshot of navigation timing, nanosecond-scaled.
///
/// Fields are set once and retained: a merge only adds or replaces fields
/// present in the incoming entry, it never clears an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageViewPerformance {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_contentful_paint: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dom_interactive: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dom_content_loaded: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dom_complete: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub load_event_end: Option<u64>,
}

impl PageViewPerformance {
	/// Merges a performance entry into the snapshot.
	///
	/// Only `navigation` entries and the `first-contentful-paint` paint
	/// entry contribute; every other shape is ignored. Returns true if the
	/// snapshot changed.
	pub fn merge_entry(&mut self, entry: &PerformanceEntry) -> bool {
		match entry {
			PerformanceEntry::Navigation {
				dom_complete,
				dom_content_loaded_event_end,
				dom_interactive,
				load_event_end,
			} => {
				self.dom_complete = Some(ms_to_ns(*dom_complete));
				self.dom_content_loaded = Some(ms_to_ns(*dom_content_loaded_event_end));
				self.dom_interactive = Some(ms_to_ns(*dom_interactive));
				self.load_event_end = Some(ms_to_ns(*load_event_end));
				true
			}
			PerformanceEntry::Paint { name, start_time } if name == FIRST_CONTENTFUL_PAINT => {
				self.first_contentful_paint = Some(ms_to_ns(*start_time));
				true
			}
			_ => false,
		}
	}
}

/// Converts a millisecond timing (as reported by the performance feed) to
/// nanoseconds. Negative or non-finite inputs clamp to zero.
#[must_use]
pub fn ms_to_ns(ms: f64) -> u64 {
	if !ms.is_finite() || ms <= 0.0 {
		return 0;
	}
	(ms * 1_000_000.0).round() as u64
}
