// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling state of a thread, as the host runtime reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[allow(non_camel_case_types)]
#[repr(C)]
pub enum ThreadState {
    RUNNABLE,
    BLOCKED,
    WAITING,
    TIMED_WAITING,
    NEW,
    TERMINATED,
}

impl ThreadState {
    /// True for the states in which the thread is stalled on a condition or
    /// timed wait (as opposed to contending on a monitor).
    pub fn is_waiting(&self) -> bool {
        matches!(self, ThreadState::WAITING | ThreadState::TIMED_WAITING)
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThreadState::RUNNABLE => "RUNNABLE",
            ThreadState::BLOCKED => "BLOCKED",
            ThreadState::WAITING => "WAITING",
            ThreadState::TIMED_WAITING => "TIMED_WAITING",
            ThreadState::NEW => "NEW",
            ThreadState::TERMINATED => "TERMINATED",
        };
        write!(f, "{name}")
    }
}
