// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Navigation change notifications.
//!
//! The host environment owns a single shared [`NavigationObserver`] and
//! calls [`NavigationObserver::push_state`], [`replace_state`] or
//! [`pop_state`] whenever navigation state changes without a full reload.
//! Trackers subscribe to the observer instead of patching global navigation
//! functions, so multiple tracker instances can coexist without clobbering
//! each other's interception.
//!
//! [`replace_state`]: NavigationObserver::replace_state
//! [`pop_state`]: NavigationObserver::pop_state

use std::sync::Mutex;

use loom_rum_core::Location;
use tracing::debug;

use crate::monitor;

type NavigationSubscriber = Box<dyn Fn(&Location) + Send + Sync>;

/// Shared holder of the current location, notifying subscribers on change.
pub struct NavigationObserver {
	current: Mutex<Location>,
	subscribers: Mutex<Vec<NavigationSubscriber>>,
}

impl NavigationObserver {
	/// Creates an observer holding the given initial location.
	pub fn new(initial: Location) -> Self {
		Self {
			current: Mutex::new(initial),
			subscribers: Mutex::new(Vec::new()),
		}
	}

	/// The current location.
	#[must_use]
	pub fn location(&self) -> Location {
		self.current
			.lock()
			.expect("navigation location lock poisoned")
			.clone()
	}

	/// Registers a subscriber invoked on every navigation change.
	///
	/// Subscriptions last for the observer's whole lifetime; there is no
	/// teardown.
	pub fn subscribe<F>(&self, subscriber: F)
	where
		F: Fn(&Location) + Send + Sync + 'static,
	{
		self.subscribers
			.lock()
			.expect("navigation subscriber lock poisoned")
			.push(Box::new(subscriber));
	}

	/// Reports a navigation performed via history push.
	pub fn push_state(&self, location: Location) {
		self.navigate(location);
	}

	/// Reports a navigation performed via history replace.
	pub fn replace_state(&self, location: Location) {
		self.navigate(location);
	}

	/// Reports a back/forward navigation.
	pub fn pop_state(&self, location: Location) {
		self.navigate(location);
	}

	fn navigate(&self, location: Location) {
		debug!(location = %location, "navigation change");
		{
			let mut current = self
				.current
				.lock()
				.expect("navigation location lock poisoned");
			*current = location.clone();
		}
		let subscribers = self
			.subscribers
			.lock()
			.expect("navigation subscriber lock poisoned");
		for subscriber in subscribers.iter() {
			monitor::isolate("navigation subscriber", || subscriber(&location));
		}
	}
}
