// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Performance entry payloads delivered over the life cycle bus.
//!
//! Timings are raw milliseconds as reported by the host's performance feed;
//! conversion to nanoseconds happens when an entry is merged into a page
//! view snapshot.

use serde::{Deserialize, Serialize};

/// Name of the paint entry that contributes to the page view snapshot.
pub const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";

/// A single performance entry from the host environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entryType", rename_all = "lowercase")]
pub enum PerformanceEntry {
	/// Document navigation timing.
	#[serde(rename_all = "camelCase")]
	Navigation {
		dom_complete: f64,
		dom_content_loaded_event_end: f64,
		dom_interactive: f64,
		load_event_end: f64,
	},
	/// A paint timing mark, e.g. `first-contentful-paint`.
	#[serde(rename_all = "camelCase")]
	Paint { name: String, start_time: f64 },
	/// A task that blocked the main thread.
	#[serde(rename_all = "camelCase")]
	Longtask { start_time: f64, duration: f64 },
	/// A resource fetch timing. Not consumed by page view tracking.
	#[serde(rename_all = "camelCase")]
	Resource { name: String, duration: f64 },
}

impl PerformanceEntry {
	/// True for entries counted by the long task summary counter.
	#[must_use]
	pub fn is_long_task(&self) -> bool {
		matches!(self, PerformanceEntry::Longtask { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_entry_type_tag_on_wire() {
		let entry = PerformanceEntry::Longtask {
			start_time: 100.0,
			duration: 80.0,
		};
		let json = serde_json::to_value(&entry).unwrap();
		assert_eq!(json["entryType"], "longtask");
		assert_eq!(json["startTime"], 100.0);
	}

	#[test]
	fn test_navigation_entry_deserializes_from_camel_case() {
		let entry: PerformanceEntry = serde_json::from_value(serde_json::json!({
			"entryType": "navigation",
			"domComplete": 456.0,
			"domContentLoadedEventEnd": 345.0,
			"domInteractive": 234.0,
			"loadEventEnd": 567.0,
		}))
		.unwrap();
		assert!(matches!(entry, PerformanceEntry::Navigation { .. }));
	}

	#[test]
	fn test_is_long_task() {
		let long_task = PerformanceEntry::Longtask {
			start_time: 0.0,
			duration: 120.0,
		};
		let paint = PerformanceEntry::Paint {
			name: FIRST_CONTENTFUL_PAINT.to_string(),
			start_time: 123.0,
		};
		assert!(long_task.is_long_task());
		assert!(!paint.is_long_task());
	}
}
