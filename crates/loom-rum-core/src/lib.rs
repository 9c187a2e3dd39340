// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Loom real-user-monitoring (RUM) page view tracking.
//!
//! This crate holds the wire-contract event types emitted for every page
//! view snapshot, the page view identity and accumulator types, and the
//! performance entry payloads delivered over the life cycle bus. It is
//! runtime-free; the tracker itself lives in `loom-rum`.

mod error;
mod event;
mod location;
mod page_view;
mod performance;

pub use error::{Result, RumError};
pub use event::{EventAttributes, RumAttributes, RumEvent, RumEventCategory, ScreenAttributes};
pub use location::Location;
pub use page_view::{ms_to_ns, PageViewId, PageViewPerformance, PageViewSummary};
pub use performance::{PerformanceEntry, FIRST_CONTENTFUL_PAINT};
