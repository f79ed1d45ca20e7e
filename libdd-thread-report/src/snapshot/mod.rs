// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod builder;
mod frame;
mod locks;
mod test_utils;
mod thread_state;

pub use builder::*;
pub use frame::*;
pub use locks::*;
pub use thread_state::*;

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fs::File, path::Path, time::Duration};

/// An immutable view of one thread's state at one instant, as reported by
/// the host runtime's introspection facility. The formatter reads it
/// defensively: every optional field may be absent and every collection may
/// be empty without affecting any other part of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ThreadSnapshot {
    pub id: u64,
    pub name: String,
    pub state: ThreadState,
    pub suspended: bool,
    pub in_native: bool,
    pub daemon: bool,
    /// The lock this thread is currently blocked on or waiting for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<LockRecord>,
    /// Identity of the thread holding [`Self::lock`]. Only rendered when
    /// the lock itself is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_owner: Option<LockOwner>,
    /// Cumulative time spent blocked. Meaningful only when `state` is
    /// BLOCKED.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_time: Option<Duration>,
    /// Cumulative time spent waiting. Meaningful only when `state` is
    /// WAITING or TIMED_WAITING.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waited_time: Option<Duration>,
    /// The lock object behind the thread's current block/wait condition,
    /// attributable to the innermost frame only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_frame_lock: Option<LockRecord>,
    /// Call stack, index 0 = innermost frame.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack: Vec<Frame>,
    /// Monitors held by this thread, each tagged with the frame index at
    /// which it was acquired. Unordered; a record whose index is out of
    /// range for `stack` is simply never rendered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locked_monitors: Vec<MonitorRecord>,
    /// Ownable synchronizers held by this thread, with no frame
    /// association.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locked_synchronizers: Vec<LockRecord>,
    /// Capture time, when the introspection facility supplied one.
    /// Serialized only; the text report does not render it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ThreadSnapshot {
    /// Emit the snapshot as structured json in file `path`.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("Failed to write json to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
impl test_utils::TestInstance for ThreadSnapshot {
    fn test_instance(seed: u64) -> Self {
        let stack = (0..5).map(Frame::test_instance).collect();
        Self {
            id: seed,
            name: format!("worker-{seed}"),
            state: ThreadState::BLOCKED,
            suspended: false,
            in_native: false,
            daemon: true,
            lock: Some(LockRecord::test_instance(seed)),
            lock_owner: Some(LockOwner {
                name: "main".to_string(),
                id: 1,
            }),
            blocked_time: Some(Duration::from_secs(seed)),
            waited_time: None,
            top_frame_lock: Some(LockRecord::test_instance(seed)),
            stack,
            locked_monitors: vec![MonitorRecord {
                lock: LockRecord::test_instance(seed + 1),
                frame_index: 2,
            }],
            locked_synchronizers: vec![LockRecord::test_instance(seed + 2)],
            timestamp: Some(
                chrono::DateTime::from_timestamp(1568898000 /* Datadog IPO */, 0)
                    .unwrap()
                    .to_string(),
            ),
        }
    }
}
