// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Page view lifecycle tracking.
//!
//! Exactly one page view is live at any time. It is created when tracking
//! starts and on every detected pathname change; performance entries and
//! summary notifications mutate it throughout its life, and each emitted
//! event snapshots it with a strictly increasing `documentVersion` starting
//! at 1. A superseded page view always gets one final forced event before
//! its successor's version-1 event.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use loom_rum_core::{
	EventAttributes, Location, PageViewId, PageViewPerformance, PageViewSummary, PerformanceEntry,
	RumAttributes, RumEvent, RumEventCategory, ScreenAttributes,
};
use tokio::time::Instant;
use tracing::debug;

use crate::batch::EventBatch;
use crate::life_cycle::{LifeCycle, LifeCycleEvent, LifeCycleEventType};
use crate::monitor;
use crate::navigation::NavigationObserver;
use crate::throttle::UpdateScheduler;

/// Window over which scheduled page view updates coalesce.
pub const PAGE_VIEW_UPDATE_PERIOD: Duration = Duration::from_secs(3);

/// Callback receiving every emitted event, typically forwarding into the
/// delivery sink after upstream enrichment.
pub type AddRumEvent = Arc<dyn Fn(RumEvent) + Send + Sync>;

/// The single live page view.
struct PageViewState {
	id: PageViewId,
	start_timestamp: DateTime<Utc>,
	start_origin: Instant,
	document_version: u64,
	active_location: Location,
	summary: PageViewSummary,
	performance: PageViewPerformance,
}

impl PageViewState {
	fn new(location: Location) -> Self {
		Self {
			id: PageViewId::new(),
			start_timestamp: Utc::now(),
			start_origin: Instant::now(),
			document_version: 1,
			active_location: location,
			summary: PageViewSummary::default(),
			performance: PageViewPerformance::default(),
		}
	}

	/// Snapshots the live state into an immutable event. Summary and
	/// performance are copied, so the record never changes after handoff.
	fn to_event(&self) -> RumEvent {
		RumEvent {
			date: self.start_timestamp.timestamp_millis(),
			duration: duration_to_ns(self.start_origin.elapsed()),
			evt: EventAttributes {
				category: RumEventCategory::PageView,
			},
			rum: RumAttributes {
				document_version: self.document_version,
			},
			screen: ScreenAttributes {
				summary: self.summary.clone(),
				performance: self.performance,
			},
		}
	}
}

/// Tracks the live page view and emits snapshot events to the sink.
pub struct PageViewTracker {
	state: Mutex<PageViewState>,
	add_rum_event: AddRumEvent,
}

impl PageViewTracker {
	fn new(location: Location, add_rum_event: AddRumEvent) -> Self {
		Self {
			state: Mutex::new(PageViewState::new(location)),
			add_rum_event,
		}
	}

	/// Starts a fresh page view on `location` and emits its version-1
	/// event. The previous page view is superseded atomically: no handler
	/// can observe a half-replaced state.
	pub fn start(&self, location: Location) {
		let event = {
			let mut state = self.lock();
			*state = PageViewState::new(location);
			debug!(
				page_view_id = %state.id,
				pathname = %state.active_location.pathname,
				"starting page view"
			);
			state.to_event()
		};
		(self.add_rum_event)(event);
	}

	/// Emits an event reflecting the accumulated state, incrementing the
	/// document version. Reached only through the scheduler, a forced
	/// flush, or the unload hook.
	pub fn record_update(&self) {
		let event = {
			let mut state = self.lock();
			state.document_version += 1;
			debug!(
				page_view_id = %state.id,
				document_version = state.document_version,
				"page view update"
			);
			state.to_event()
		};
		(self.add_rum_event)(event);
	}

	/// Merges a performance entry into the live snapshot. Returns true if
	/// the entry contributed, i.e. an update should be scheduled.
	pub fn merge_performance_entry(&self, entry: &PerformanceEntry) -> bool {
		self.lock().performance.merge_entry(entry)
	}

	pub fn record_error(&self) {
		self.lock().summary.error_count += 1;
	}

	pub fn record_custom_event(&self) {
		self.lock().summary.custom_event_count += 1;
	}

	pub fn record_long_task(&self) {
		self.lock().summary.long_task_count += 1;
	}

	/// True if `location` belongs to a different page view than the live
	/// one. Query string and fragment are ignored.
	#[must_use]
	pub fn is_different_page(&self, location: &Location) -> bool {
		self.lock().active_location.is_different_page(location)
	}

	/// Identifier of the live page view.
	#[must_use]
	pub fn page_view_id(&self) -> PageViewId {
		self.lock().id
	}

	/// Document version of the live page view.
	#[must_use]
	pub fn document_version(&self) -> u64 {
		self.lock().document_version
	}

	fn lock(&self) -> MutexGuard<'_, PageViewState> {
		self.state.lock().expect("page view state lock poisoned")
	}
}

/// Wires page view tracking together and emits the initial event.
///
/// The returned tracker owns the live page view; the host only mutates it
/// through the life cycle bus, the navigation observer and the sink's
/// unload hook. Designed for a single-threaded cooperative runtime: every
/// handler runs to completion before the next is delivered.
pub fn track_page_views(
	batch: &Arc<dyn EventBatch>,
	location: Location,
	life_cycle: &Arc<LifeCycle>,
	navigation: &Arc<NavigationObserver>,
	add_rum_event: AddRumEvent,
) -> Arc<PageViewTracker> {
	let tracker = Arc::new(PageViewTracker::new(location.clone(), add_rum_event));

	let scheduler = {
		let tracker = Arc::clone(&tracker);
		Arc::new(UpdateScheduler::new(PAGE_VIEW_UPDATE_PERIOD, move || {
			monitor::isolate("page view update", || tracker.record_update());
		}))
	};

	tracker.start(location);
	watch_navigation(navigation, &tracker, &scheduler);
	collect_performance(life_cycle, &tracker, &scheduler);
	aggregate_summary(life_cycle, &tracker, &scheduler);

	{
		let scheduler = Arc::clone(&scheduler);
		batch.before_flush_on_unload(Box::new(move || scheduler.force_flush()));
	}

	tracker
}

/// On a pathname change, force a final event for the outgoing page view,
/// then start a new one. Hash-only or query-only changes are ignored.
fn watch_navigation(
	navigation: &NavigationObserver,
	tracker: &Arc<PageViewTracker>,
	scheduler: &Arc<UpdateScheduler>,
) {
	let tracker = Arc::clone(tracker);
	let scheduler = Arc::clone(scheduler);
	navigation.subscribe(move |new_location| {
		if tracker.is_different_page(new_location) {
			scheduler.force_flush();
			tracker.start(new_location.clone());
		}
	});
}

/// Merge navigation and first-contentful-paint entries into the snapshot,
/// requesting a scheduled (never forced) update per contributing entry.
fn collect_performance(
	life_cycle: &LifeCycle,
	tracker: &Arc<PageViewTracker>,
	scheduler: &Arc<UpdateScheduler>,
) {
	let tracker = Arc::clone(tracker);
	let scheduler = Arc::clone(scheduler);
	life_cycle.subscribe(LifeCycleEventType::Performance, move |event| {
		if let LifeCycleEvent::Performance(entry) = event {
			if tracker.merge_performance_entry(entry) {
				scheduler.request();
			}
		}
	});
}

/// Count errors, custom events and long tasks on the current page view,
/// requesting a scheduled update per occurrence.
fn aggregate_summary(
	life_cycle: &LifeCycle,
	tracker: &Arc<PageViewTracker>,
	scheduler: &Arc<UpdateScheduler>,
) {
	{
		let tracker = Arc::clone(tracker);
		let scheduler = Arc::clone(scheduler);
		life_cycle.subscribe(LifeCycleEventType::Error, move |_| {
			tracker.record_error();
			scheduler.request();
		});
	}
	{
		let tracker = Arc::clone(tracker);
		let scheduler = Arc::clone(scheduler);
		life_cycle.subscribe(LifeCycleEventType::CustomEvent, move |_| {
			tracker.record_custom_event();
			scheduler.request();
		});
	}
	{
		let tracker = Arc::clone(tracker);
		let scheduler = Arc::clone(scheduler);
		life_cycle.subscribe(LifeCycleEventType::Performance, move |event| {
			if let LifeCycleEvent::Performance(entry) = event {
				if entry.is_long_task() {
					tracker.record_long_task();
					scheduler.request();
				}
			}
		});
	}
}

fn duration_to_ns(duration: Duration) -> u64 {
	u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
