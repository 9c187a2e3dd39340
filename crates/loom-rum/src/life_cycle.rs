// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed publish/subscribe bus for tracker notifications.
//!
//! The host environment publishes performance entries, error occurrences
//! and custom events here; the tracker subscribes per event type. Each
//! subscriber runs to completion inside the panic-isolating wrapper before
//! the next one is invoked.

use std::collections::HashMap;
use std::sync::Mutex;

use loom_rum_core::PerformanceEntry;

use crate::monitor;

/// A notification delivered over the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum LifeCycleEvent {
	/// A performance entry from the host's performance feed.
	Performance(PerformanceEntry),
	/// An error occurrence.
	Error(ErrorReport),
	/// A user-defined custom event.
	CustomEvent(CustomEvent),
}

impl LifeCycleEvent {
	/// The subscription key this event is delivered under.
	#[must_use]
	pub fn event_type(&self) -> LifeCycleEventType {
		match self {
			LifeCycleEvent::Performance(_) => LifeCycleEventType::Performance,
			LifeCycleEvent::Error(_) => LifeCycleEventType::Error,
			LifeCycleEvent::CustomEvent(_) => LifeCycleEventType::CustomEvent,
		}
	}
}

/// Subscription key for [`LifeCycle::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifeCycleEventType {
	Performance,
	Error,
	CustomEvent,
}

/// An error occurrence observed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
	pub message: String,
}

/// A user-defined custom event.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent {
	pub name: String,
	pub context: serde_json::Value,
}

type Subscriber = Box<dyn Fn(&LifeCycleEvent) + Send + Sync>;

/// The notification bus shared between the host and the tracker.
#[derive(Default)]
pub struct LifeCycle {
	subscribers: Mutex<HashMap<LifeCycleEventType, Vec<Subscriber>>>,
}

impl LifeCycle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a subscriber for one event type.
	pub fn subscribe<F>(&self, event_type: LifeCycleEventType, subscriber: F)
	where
		F: Fn(&LifeCycleEvent) + Send + Sync + 'static,
	{
		self.subscribers
			.lock()
			.expect("life cycle subscriber lock poisoned")
			.entry(event_type)
			.or_default()
			.push(Box::new(subscriber));
	}

	/// Delivers an event to every subscriber registered for its type.
	pub fn notify(&self, event: &LifeCycleEvent) {
		let subscribers = self
			.subscribers
			.lock()
			.expect("life cycle subscriber lock poisoned");
		if let Some(matching) = subscribers.get(&event.event_type()) {
			for subscriber in matching {
				monitor::isolate("life cycle subscriber", || subscriber(event));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};
	use std::sync::Arc;

	fn error_event() -> LifeCycleEvent {
		LifeCycleEvent::Error(ErrorReport {
			message: "boom".to_string(),
		})
	}

	#[test]
	fn test_subscriber_receives_matching_events_only() {
		let life_cycle = LifeCycle::new();
		let errors = Arc::new(AtomicU32::new(0));

		let seen = Arc::clone(&errors);
		life_cycle.subscribe(LifeCycleEventType::Error, move |_| {
			seen.fetch_add(1, Ordering::SeqCst);
		});

		life_cycle.notify(&error_event());
		life_cycle.notify(&LifeCycleEvent::CustomEvent(CustomEvent {
			name: "checkout".to_string(),
			context: serde_json::json!({}),
		}));

		assert_eq!(errors.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_all_subscribers_of_a_type_are_invoked() {
		let life_cycle = LifeCycle::new();
		let calls = Arc::new(AtomicU32::new(0));

		for _ in 0..3 {
			let calls = Arc::clone(&calls);
			life_cycle.subscribe(LifeCycleEventType::Error, move |_| {
				calls.fetch_add(1, Ordering::SeqCst);
			});
		}

		life_cycle.notify(&error_event());
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[test]
	fn test_panicking_subscriber_does_not_block_others() {
		let life_cycle = LifeCycle::new();
		let calls = Arc::new(AtomicU32::new(0));

		life_cycle.subscribe(LifeCycleEventType::Error, |_| {
			panic!("subscriber exploded");
		});
		let calls_seen = Arc::clone(&calls);
		life_cycle.subscribe(LifeCycleEventType::Error, move |_| {
			calls_seen.fetch_add(1, Ordering::SeqCst);
		});

		life_cycle.notify(&error_event());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_notify_without_subscribers_is_a_no_op() {
		let life_cycle = LifeCycle::new();
		life_cycle.notify(&error_event());
	}
}
