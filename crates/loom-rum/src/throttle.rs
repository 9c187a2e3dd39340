// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Trailing-edge update scheduler.
//!
//! Rate limits page view update emission to at most one handler execution
//! per window. The scheduler is an explicit two-state machine: `Idle`, or
//! `Pending` with a deferred fire armed `period` after the first request of
//! the current window. Any number of requests arriving while pending
//! collapse into that single fire, which reads live state at fire time.
//!
//! A forced flush runs the handler synchronously and cancels any pending
//! fire, so navigation and unload can guarantee a final emission without a
//! stale duplicate arriving afterwards.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

type UpdateHandler = Arc<dyn Fn() + Send + Sync>;

enum SchedulerState {
	Idle,
	Pending(JoinHandle<()>),
}

struct Inner {
	state: SchedulerState,
	/// Bumped on every arm and cancel; a deferred fire only executes if the
	/// generation it was armed with is still current.
	generation: u64,
}

/// Throttles update requests to one trailing execution per window.
pub struct UpdateScheduler {
	period: Duration,
	handler: UpdateHandler,
	inner: Arc<Mutex<Inner>>,
}

impl UpdateScheduler {
	/// Creates a scheduler that invokes `handler` at most once per `period`.
	pub fn new<F>(period: Duration, handler: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		Self {
			period,
			handler: Arc::new(handler),
			inner: Arc::new(Mutex::new(Inner {
				state: SchedulerState::Idle,
				generation: 0,
			})),
		}
	}

	/// Requests an update. Arms a deferred fire if none is pending;
	/// otherwise the request coalesces into the pending one.
	///
	/// Must be called from within a tokio runtime.
	pub fn request(&self) {
		let mut inner = self.lock();
		if let SchedulerState::Pending(_) = inner.state {
			return;
		}

		inner.generation += 1;
		let generation = inner.generation;
		let period = self.period;
		let handler = Arc::clone(&self.handler);
		let shared = Arc::clone(&self.inner);

		trace!(generation, "arming deferred page view update");
		let handle = tokio::spawn(async move {
			tokio::time::sleep(period).await;
			let due = {
				let mut inner = shared.lock().expect("update scheduler lock poisoned");
				if inner.generation == generation {
					inner.state = SchedulerState::Idle;
					true
				} else {
					false
				}
			};
			if due {
				handler();
			}
		});
		inner.state = SchedulerState::Pending(handle);
	}

	/// Runs the handler synchronously, cancelling any pending fire first so
	/// no duplicate or stale execution follows.
	pub fn force_flush(&self) {
		self.cancel_pending();
		(self.handler)();
	}

	/// Discards any pending deferred fire without running the handler.
	pub fn cancel_pending(&self) {
		let mut inner = self.lock();
		inner.generation += 1;
		if let SchedulerState::Pending(handle) =
			std::mem::replace(&mut inner.state, SchedulerState::Idle)
		{
			handle.abort();
		}
	}

	fn lock(&self) -> MutexGuard<'_, Inner> {
		self.inner.lock().expect("update scheduler lock poisoned")
	}
}
