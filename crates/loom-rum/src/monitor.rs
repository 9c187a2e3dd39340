// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Panic isolation for externally delivered callbacks.
//!
//! Every handler the tracker hangs off the life cycle bus, the navigation
//! observer or the scheduler runs inside [`isolate`], so one failing
//! handler cannot corrupt page view state for the others or take down the
//! host.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::error;

/// Runs a callback, swallowing and logging any panic.
pub fn isolate<F>(task: &str, f: F)
where
	F: FnOnce(),
{
	if let Err(panic) = catch_unwind(AssertUnwindSafe(f)) {
		error!(task, panic = panic_message(&panic), "isolated handler panic");
	}
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
	if let Some(message) = panic.downcast_ref::<&str>() {
		message
	} else if let Some(message) = panic.downcast_ref::<String>() {
		message
	} else {
		"unknown panic payload"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicBool, Ordering};

	#[test]
	fn test_isolate_runs_the_callback() {
		let ran = AtomicBool::new(false);
		isolate("test", || ran.store(true, Ordering::SeqCst));
		assert!(ran.load(Ordering::SeqCst));
	}

	#[test]
	fn test_isolate_swallows_panics() {
		isolate("test", || panic!("handler exploded"));
	}

	#[test]
	fn test_callbacks_after_a_panic_still_run() {
		let ran = AtomicBool::new(false);
		isolate("test", || panic!("first handler exploded"));
		isolate("test", || ran.store(true, Ordering::SeqCst));
		assert!(ran.load(Ordering::SeqCst));
	}
}
