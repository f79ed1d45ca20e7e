// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use std::time::Duration;

use anyhow::Context;

use super::*;

/// Assembles a [`ThreadSnapshot`] from whatever the introspection facility
/// hands over, in whatever order it arrives. Everything except the thread
/// name and state is optional and defaults to absent/empty.
#[derive(Debug, Default, PartialEq)]
pub struct ThreadSnapshotBuilder {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub state: Option<ThreadState>,
    pub suspended: Option<bool>,
    pub in_native: Option<bool>,
    pub daemon: Option<bool>,
    pub lock: Option<LockRecord>,
    pub lock_owner: Option<LockOwner>,
    pub blocked_time: Option<Duration>,
    pub waited_time: Option<Duration>,
    pub top_frame_lock: Option<LockRecord>,
    pub stack: Option<Vec<Frame>>,
    pub locked_monitors: Option<Vec<MonitorRecord>>,
    pub locked_synchronizers: Option<Vec<LockRecord>>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ThreadSnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> anyhow::Result<ThreadSnapshot> {
        let id = self.id.unwrap_or_default();
        let name = self.name.context("required field 'name' missing")?;
        let state = self.state.context("required field 'state' missing")?;
        let suspended = self.suspended.unwrap_or(false);
        let in_native = self.in_native.unwrap_or(false);
        let daemon = self.daemon.unwrap_or(false);
        let lock = self.lock;
        let lock_owner = self.lock_owner;
        let blocked_time = self.blocked_time;
        let waited_time = self.waited_time;
        let top_frame_lock = self.top_frame_lock;
        let stack = self.stack.unwrap_or_default();
        let locked_monitors = self.locked_monitors.unwrap_or_default();
        let locked_synchronizers = self.locked_synchronizers.unwrap_or_default();
        let timestamp = Some(self.timestamp.unwrap_or_else(Utc::now).to_string());
        Ok(ThreadSnapshot {
            id,
            name,
            state,
            suspended,
            in_native,
            daemon,
            lock,
            lock_owner,
            blocked_time,
            waited_time,
            top_frame_lock,
            stack,
            locked_monitors,
            locked_synchronizers,
            timestamp,
        })
    }

    pub fn with_id(&mut self, id: u64) -> anyhow::Result<()> {
        self.id = Some(id);
        Ok(())
    }

    pub fn with_name(&mut self, name: String) -> anyhow::Result<()> {
        if name.trim().is_empty() {
            return Ok(());
        }
        self.name = Some(name);
        Ok(())
    }

    pub fn with_state(&mut self, state: ThreadState) -> anyhow::Result<()> {
        self.state = Some(state);
        Ok(())
    }

    pub fn with_suspended(&mut self, suspended: bool) -> anyhow::Result<()> {
        self.suspended = Some(suspended);
        Ok(())
    }

    pub fn with_in_native(&mut self, in_native: bool) -> anyhow::Result<()> {
        self.in_native = Some(in_native);
        Ok(())
    }

    pub fn with_daemon(&mut self, daemon: bool) -> anyhow::Result<()> {
        self.daemon = Some(daemon);
        Ok(())
    }

    pub fn with_lock(&mut self, lock: LockRecord) -> anyhow::Result<()> {
        self.lock = Some(lock);
        Ok(())
    }

    /// Owner name and id arrive as a pair; an empty name means the runtime
    /// had no owner to report.
    pub fn with_lock_owner(&mut self, name: String, id: u64) -> anyhow::Result<()> {
        if name.trim().is_empty() {
            return Ok(());
        }
        self.lock_owner = Some(LockOwner { name, id });
        Ok(())
    }

    pub fn with_blocked_time(&mut self, blocked_time: Duration) -> anyhow::Result<()> {
        self.blocked_time = Some(blocked_time);
        Ok(())
    }

    pub fn with_waited_time(&mut self, waited_time: Duration) -> anyhow::Result<()> {
        self.waited_time = Some(waited_time);
        Ok(())
    }

    pub fn with_top_frame_lock(&mut self, lock: LockRecord) -> anyhow::Result<()> {
        self.top_frame_lock = Some(lock);
        Ok(())
    }

    pub fn with_stack(&mut self, stack: Vec<Frame>) -> anyhow::Result<()> {
        self.stack = Some(stack);
        Ok(())
    }

    /// Appends one frame in caller direction (first call gives the
    /// innermost frame).
    pub fn with_frame(&mut self, frame: Frame) -> anyhow::Result<()> {
        if let Some(stack) = &mut self.stack {
            stack.push(frame);
        } else {
            self.stack = Some(vec![frame]);
        }
        Ok(())
    }

    pub fn with_locked_monitor(&mut self, monitor: MonitorRecord) -> anyhow::Result<()> {
        if let Some(monitors) = &mut self.locked_monitors {
            monitors.push(monitor);
        } else {
            self.locked_monitors = Some(vec![monitor]);
        }
        Ok(())
    }

    pub fn with_locked_synchronizer(&mut self, synchronizer: LockRecord) -> anyhow::Result<()> {
        if let Some(synchronizers) = &mut self.locked_synchronizers {
            synchronizers.push(synchronizer);
        } else {
            self.locked_synchronizers = Some(vec![synchronizer]);
        }
        Ok(())
    }

    pub fn with_timestamp(&mut self, timestamp: DateTime<Utc>) -> anyhow::Result<()> {
        self.timestamp = Some(timestamp);
        Ok(())
    }

    pub fn has_data(&self) -> bool {
        *self != Self::default()
    }
}
