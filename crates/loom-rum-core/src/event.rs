// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire-contract RUM event types.
//!
//! A [`RumEvent`] is a point-in-time snapshot of a page view. Once built it
//! must never change, even if the live page view keeps accumulating; the
//! tracker therefore copies the summary and performance snapshot into each
//! event before handing it to the delivery sink.

use serde::{Deserialize, Serialize};

use crate::error::RumError;
use crate::page_view::{PageViewPerformance, PageViewSummary};

/// A telemetry record emitted for one page view snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RumEvent {
	/// Session start, epoch milliseconds. Fixed for the page view's life.
	pub date: i64,
	/// Nanoseconds elapsed since the page view started.
	pub duration: u64,
	pub evt: EventAttributes,
	pub rum: RumAttributes,
	pub screen: ScreenAttributes,
}

/// Event classification attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttributes {
	pub category: RumEventCategory,
}

/// RUM protocol attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RumAttributes {
	/// Count of snapshots emitted for the current page view, starting at 1.
	pub document_version: u64,
}

/// Per-screen accumulated state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenAttributes {
	pub summary: PageViewSummary,
	pub performance: PageViewPerformance,
}

/// Category tag carried on every emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RumEventCategory {
	PageView,
}

impl std::fmt::Display for RumEventCategory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			RumEventCategory::PageView => write!(f, "page_view"),
		}
	}
}

impl std::str::FromStr for RumEventCategory {
	type Err = RumError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"page_view" => Ok(RumEventCategory::PageView),
			_ => Err(RumError::InvalidCategory(s.to_string())),
		}
	}
}
