// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Delivery sink contract.
//!
//! Batching, transport, retry and durability are entirely the sink's
//! concern; the tracker only needs to hand events over and to register a
//! hook that runs once before the host tears the page down, so the final
//! page view state is flushed.

use loom_rum_core::RumEvent;

/// Hook invoked exactly once before the host discards the page.
pub type UnloadHook = Box<dyn Fn() + Send + Sync>;

/// The batched delivery sink consumed by the tracker.
pub trait EventBatch: Send + Sync {
	/// Accepts an emitted event for delivery.
	fn add(&self, event: RumEvent);

	/// Registers a hook to run before the final flush on unload.
	fn before_flush_on_unload(&self, hook: UnloadHook);
}
