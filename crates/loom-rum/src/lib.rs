// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Real-user-monitoring page view tracker.
//!
//! Tracks page views inside a long-lived single-page session and emits
//! telemetry events summarizing navigation timing, accumulated errors,
//! custom events and long tasks. Updates are throttled to at most one
//! emission per window; navigation and unload force an immediate final
//! flush so every superseded page view gets a terminal event.
//!
//! The host wires tracking up once via [`track_page_views`], passing its
//! delivery sink, the shared [`NavigationObserver`] and the [`LifeCycle`]
//! bus it publishes notifications on. The tracker expects a single-threaded
//! cooperative runtime: handlers run to completion without preemption.

mod batch;
mod life_cycle;
mod monitor;
mod navigation;
mod page_view;
mod throttle;

pub use batch::{EventBatch, UnloadHook};
pub use life_cycle::{CustomEvent, ErrorReport, LifeCycle, LifeCycleEvent, LifeCycleEventType};
pub use monitor::isolate;
pub use navigation::NavigationObserver;
pub use page_view::{
	track_page_views, AddRumEvent, PageViewTracker, PAGE_VIEW_UPDATE_PERIOD,
};
pub use throttle::UpdateScheduler;

pub use loom_rum_core::{
	Location, PageViewId, PageViewPerformance, PageViewSummary, PerformanceEntry, RumEvent,
	RumEventCategory,
};
