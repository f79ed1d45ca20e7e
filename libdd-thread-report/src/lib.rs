// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Renders a point-in-time snapshot of a single runtime thread (identity,
//! scheduling state, call stack, and the lock records the introspection
//! facility reported for it) into a deterministic plain-text diagnostic
//! report.
//!
//! The snapshot itself is captured elsewhere; this crate neither walks
//! stacks nor decides when a dump happens. A caller hands it a
//! [`ThreadSnapshot`] and gets a text block back, suitable for a log or
//! console sink. Rendering is pure: no I/O, no retained state, and
//! identical input always yields byte-identical output, so independent
//! snapshots may be formatted concurrently without coordination.
//!
//! The tricky part of the format is correlating the unordered
//! per-thread lock records against the stack: each locked monitor is
//! tagged with the frame index at which it was acquired, and its line
//! must appear directly beneath that frame's `at` line. Block/wait
//! details describe the thread's *current* condition and are therefore
//! only attributed to the innermost frame.

mod report;
mod snapshot;

pub use report::format_thread_report;
pub use snapshot::*;
