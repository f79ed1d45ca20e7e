// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lock-like object: class name plus identity hash. Serves both for the
/// lock a thread is blocked on and for the ownable synchronizers it holds,
/// which the host runtime models as the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LockRecord {
    pub class_name: String,
    pub identity_hash_code: u64,
}

/// Renders as the host runtime renders lock objects: `class@hexhash`.
impl fmt::Display for LockRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:x}", self.class_name, self.identity_hash_code)
    }
}

/// Identity of the thread holding a contended lock. Name and id always
/// come as a pair, so absence of the owner is absence of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LockOwner {
    pub name: String,
    pub id: u64,
}

/// A monitor held by the thread, tagged with the stack-frame index at which
/// it was acquired. An index out of range for the snapshot's stack means
/// the record never matches a frame and is silently not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MonitorRecord {
    pub lock: LockRecord,
    pub frame_index: usize,
}

#[cfg(test)]
impl super::test_utils::TestInstance for LockRecord {
    fn test_instance(seed: u64) -> Self {
        Self {
            class_name: "java.lang.Object".to_string(),
            identity_hash_code: 0x1000 + seed,
        }
    }
}
