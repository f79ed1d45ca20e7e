// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Turns a [`ThreadSnapshot`] into its plain-text diagnostic report.
//!
//! The report is assembled from four stages, each appending to the same
//! output buffer: the identity/state header, the per-frame stack render
//! (with block/wait and locked-monitor annotations interleaved beneath the
//! frame they belong to), and the thread-wide synchronizer summary. Every
//! stage reads optional fields defensively and emits nothing for what is
//! absent; none of them can fail.

use crate::snapshot::{LockRecord, MonitorRecord, ThreadSnapshot, ThreadState};

/// Formats the full report for one thread. Pure and deterministic:
/// identical snapshots yield byte-identical output.
///
/// ```
/// use libdd_thread_report::{format_thread_report, ThreadSnapshot};
///
/// let snapshot: ThreadSnapshot = serde_json::from_str(
///     r#"{"id": 1, "name": "main", "state": "RUNNABLE",
///         "suspended": false, "in_native": false, "daemon": false}"#,
/// )
/// .unwrap();
/// let report = format_thread_report(&snapshot);
/// assert!(report.starts_with("\"main\"\n"));
/// ```
pub fn format_thread_report(snapshot: &ThreadSnapshot) -> String {
    let mut out = String::new();
    append_header(&mut out, snapshot);
    out.push_str("\nStack Traces:\n");
    append_stack(&mut out, snapshot);
    append_locked_synchronizers(&mut out, &snapshot.locked_synchronizers);
    out
}

/// Identity and state lines, then the contended lock and its owner when
/// present. The owner pair is nested beneath the LOCK line and is never
/// rendered without it.
fn append_header(out: &mut String, snapshot: &ThreadSnapshot) {
    out.push_str(&format!("\"{}\"\n", snapshot.name));
    out.push_str(&format!("\tID: {}\n", snapshot.id));
    out.push_str(&format!("\tSTATE: {}\n", snapshot.state));
    out.push_str(&format!("\tSUSPENDED: {}\n", snapshot.suspended));
    out.push_str(&format!("\tIN NATIVE: {}\n", snapshot.in_native));
    out.push_str(&format!("\tIS DAEMON: {}\n", snapshot.daemon));

    if let Some(lock) = &snapshot.lock {
        out.push('\n');
        out.push_str(&format!("\tLOCK: {lock}\n"));
        if let Some(owner) = &snapshot.lock_owner {
            out.push_str(&format!("\t\tOWNER: {}\n", owner.name));
            out.push_str(&format!("\t\tOWNER ID: {}\n", owner.id));
        }
    }
}

/// One `at` line per frame, innermost first, each immediately followed by
/// its block/wait annotation and its locked-monitor lines. Annotations for
/// a frame never interleave with another frame's lines.
fn append_stack(out: &mut String, snapshot: &ThreadSnapshot) {
    for (frame_index, frame) in snapshot.stack.iter().enumerate() {
        out.push_str(&format!("\tat {frame}\n"));
        append_state_annotation(out, snapshot, frame_index);
        append_locked_monitors(out, &snapshot.locked_monitors, frame_index);
    }
}

/// Block/wait details describe the thread's current condition, which is
/// only attributable to the innermost frame, so every other index emits
/// nothing. Durations render as whole seconds, truncated toward zero.
fn append_state_annotation(out: &mut String, snapshot: &ThreadSnapshot, frame_index: usize) {
    if frame_index != 0 {
        return;
    }
    if snapshot.state == ThreadState::BLOCKED {
        let lock = lock_description(&snapshot.top_frame_lock);
        let secs = snapshot.blocked_time.map_or(0, |t| t.as_secs());
        out.push_str(&format!("\t- BLOCKED on {lock}\n"));
        out.push_str(&format!("\t- BLOCKED for {secs}s\n"));
    } else if snapshot.state.is_waiting() {
        let lock = lock_description(&snapshot.top_frame_lock);
        let secs = snapshot.waited_time.map_or(0, |t| t.as_secs());
        out.push_str(&format!("\t- WAITING on {lock}\n"));
        out.push_str(&format!("\t- WAITED for {secs}s\n"));
    }
}

fn lock_description(lock: &Option<LockRecord>) -> String {
    match lock {
        Some(lock) => lock.to_string(),
        None => "unknown".to_string(),
    }
}

/// Renders the monitors acquired at `frame_index`, in input order, under a
/// `LOCKED Monitors` heading. The heading only appears for frames with at
/// least one matching record. Records tagged with an index that matches no
/// rendered frame are dropped silently.
fn append_locked_monitors(out: &mut String, monitors: &[MonitorRecord], frame_index: usize) {
    let mut matching = monitors
        .iter()
        .filter(|monitor| monitor.frame_index == frame_index)
        .peekable();
    if matching.peek().is_none() {
        return;
    }
    out.push_str("\tLOCKED Monitors\n");
    for monitor in matching {
        out.push_str(&format!("\t\t- {}\n", monitor.lock));
    }
}

/// Thread-wide summary, appended once after the stack. An empty set closes
/// the report with a single blank line; otherwise a count line is followed
/// by one block per record in input order.
fn append_locked_synchronizers(out: &mut String, synchronizers: &[LockRecord]) {
    if synchronizers.is_empty() {
        out.push('\n');
        return;
    }

    out.push_str(&format!(
        "\tNumber of LOCKED Synchronizers: {}\n",
        synchronizers.len()
    ));
    for lock in synchronizers {
        out.push_str(&format!("\t\tClass Name: {}\n", lock.class_name));
        out.push_str(&format!("\t\tHash Code: {}\n", lock.identity_hash_code));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Frame, LockOwner};
    use std::time::Duration;

    fn frame(name: &str) -> Frame {
        Frame {
            type_name: Some("com.example.Worker".to_string()),
            function: Some(name.to_string()),
            file: Some("Worker.java".to_string()),
            line: Some(42),
            native: false,
        }
    }

    fn runnable_snapshot(name: &str, frames: usize) -> ThreadSnapshot {
        ThreadSnapshot {
            id: 1,
            name: name.to_string(),
            state: ThreadState::RUNNABLE,
            suspended: false,
            in_native: false,
            daemon: false,
            lock: None,
            lock_owner: None,
            blocked_time: None,
            waited_time: None,
            top_frame_lock: None,
            stack: (0..frames).map(|i| frame(&format!("step{i}"))).collect(),
            locked_monitors: vec![],
            locked_synchronizers: vec![],
            timestamp: None,
        }
    }

    fn object_lock(hash: u64) -> LockRecord {
        LockRecord {
            class_name: "java.lang.Object".to_string(),
            identity_hash_code: hash,
        }
    }

    #[test]
    fn test_runnable_report_exact() {
        let report = format_thread_report(&runnable_snapshot("main", 2));
        assert_eq!(
            report,
            "\"main\"\n\
             \tID: 1\n\
             \tSTATE: RUNNABLE\n\
             \tSUSPENDED: false\n\
             \tIN NATIVE: false\n\
             \tIS DAEMON: false\n\
             \nStack Traces:\n\
             \tat com.example.Worker.step0(Worker.java:42)\n\
             \tat com.example.Worker.step1(Worker.java:42)\n\
             \n"
        );
    }

    #[test]
    fn test_deterministic() {
        let mut snapshot = runnable_snapshot("worker", 3);
        snapshot.state = ThreadState::BLOCKED;
        snapshot.lock = Some(object_lock(0xabc));
        snapshot.locked_synchronizers = vec![object_lock(0xdef)];
        assert_eq!(
            format_thread_report(&snapshot),
            format_thread_report(&snapshot)
        );
    }

    #[test]
    fn test_lock_line_iff_lock_present() {
        let mut snapshot = runnable_snapshot("worker", 1);
        let report = format_thread_report(&snapshot);
        assert!(!report.contains("LOCK:"));

        snapshot.lock = Some(object_lock(0x1f2e3d));
        let report = format_thread_report(&snapshot);
        assert_eq!(report.matches("\tLOCK: ").count(), 1);
        assert!(report.contains("\tLOCK: java.lang.Object@1f2e3d\n"));
    }

    #[test]
    fn test_owner_never_rendered_without_lock() {
        let mut snapshot = runnable_snapshot("worker", 1);
        snapshot.lock_owner = Some(LockOwner {
            name: "main".to_string(),
            id: 1,
        });
        let report = format_thread_report(&snapshot);
        assert!(!report.contains("OWNER"));

        snapshot.lock = Some(object_lock(0xabc));
        let report = format_thread_report(&snapshot);
        assert!(report.contains("\tLOCK: java.lang.Object@abc\n\t\tOWNER: main\n\t\tOWNER ID: 1\n"));
    }

    #[test]
    fn test_blocked_annotation_at_top_frame() {
        let mut snapshot = runnable_snapshot("worker", 1);
        snapshot.state = ThreadState::BLOCKED;
        snapshot.top_frame_lock = Some(object_lock(0x1f2e3d));
        snapshot.blocked_time = Some(Duration::from_nanos(2_000_000_000));
        let report = format_thread_report(&snapshot);
        assert!(report.contains(
            "\tat com.example.Worker.step0(Worker.java:42)\n\
             \t- BLOCKED on java.lang.Object@1f2e3d\n\
             \t- BLOCKED for 2s\n"
        ));
    }

    #[test]
    fn test_blocked_duration_truncates() {
        let mut snapshot = runnable_snapshot("worker", 1);
        snapshot.state = ThreadState::BLOCKED;
        snapshot.blocked_time = Some(Duration::from_nanos(2_999_999_999));
        let report = format_thread_report(&snapshot);
        assert!(report.contains("\t- BLOCKED for 2s\n"));
    }

    #[test]
    fn test_blocked_defaults_when_details_absent() {
        let mut snapshot = runnable_snapshot("worker", 1);
        snapshot.state = ThreadState::BLOCKED;
        let report = format_thread_report(&snapshot);
        assert!(report.contains("\t- BLOCKED on unknown\n"));
        assert!(report.contains("\t- BLOCKED for 0s\n"));
    }

    #[test]
    fn test_waiting_annotation() {
        for state in [ThreadState::WAITING, ThreadState::TIMED_WAITING] {
            let mut snapshot = runnable_snapshot("worker", 2);
            snapshot.state = state;
            snapshot.top_frame_lock = Some(object_lock(0x77));
            snapshot.waited_time = Some(Duration::from_secs(5));
            let report = format_thread_report(&snapshot);
            assert!(report.contains("\t- WAITING on java.lang.Object@77\n"));
            assert!(report.contains("\t- WAITED for 5s\n"));
            assert!(!report.contains("BLOCKED"));
        }
    }

    #[test]
    fn test_annotation_only_once_and_only_at_frame_zero() {
        let mut snapshot = runnable_snapshot("worker", 4);
        snapshot.state = ThreadState::BLOCKED;
        snapshot.top_frame_lock = Some(object_lock(0xabc));
        let report = format_thread_report(&snapshot);
        assert_eq!(report.matches("BLOCKED on").count(), 1);
        // The annotation sits directly beneath the innermost frame's line.
        let at = report.find("\tat ").unwrap();
        let annotation = report.find("\t- BLOCKED on").unwrap();
        let second_at = report[at + 1..].find("\tat ").unwrap() + at + 1;
        assert!(at < annotation && annotation < second_at);
    }

    #[test]
    fn test_runnable_has_no_annotation() {
        let report = format_thread_report(&runnable_snapshot("worker", 2));
        assert!(!report.contains("BLOCKED"));
        assert!(!report.contains("WAITING"));
    }

    #[test]
    fn test_monitor_rendered_under_its_frame_only() {
        let mut snapshot = runnable_snapshot("worker", 3);
        snapshot.locked_monitors = vec![MonitorRecord {
            lock: object_lock(0x9abc),
            frame_index: 1,
        }];
        let report = format_thread_report(&snapshot);
        assert_eq!(report.matches("LOCKED Monitors").count(), 1);
        assert!(report.contains(
            "\tat com.example.Worker.step1(Worker.java:42)\n\
             \tLOCKED Monitors\n\
             \t\t- java.lang.Object@9abc\n\
             \tat com.example.Worker.step2(Worker.java:42)\n"
        ));
    }

    #[test]
    fn test_monitors_keep_input_order_within_frame() {
        let mut snapshot = runnable_snapshot("worker", 1);
        snapshot.locked_monitors = vec![
            MonitorRecord {
                lock: object_lock(0xb),
                frame_index: 0,
            },
            MonitorRecord {
                lock: object_lock(0xa),
                frame_index: 0,
            },
        ];
        let report = format_thread_report(&snapshot);
        assert!(report.contains(
            "\tLOCKED Monitors\n\
             \t\t- java.lang.Object@b\n\
             \t\t- java.lang.Object@a\n"
        ));
    }

    #[test]
    fn test_out_of_range_monitor_dropped() {
        let mut snapshot = runnable_snapshot("worker", 2);
        snapshot.locked_monitors = vec![MonitorRecord {
            lock: object_lock(0x9abc),
            frame_index: 5,
        }];
        let report = format_thread_report(&snapshot);
        assert!(!report.contains("LOCKED Monitors"));
    }

    #[test]
    fn test_empty_synchronizers_trailing_blank_line() {
        let report = format_thread_report(&runnable_snapshot("worker", 1));
        assert!(!report.contains("Number of LOCKED Synchronizers"));
        assert!(report.ends_with("(Worker.java:42)\n\n"));
    }

    #[test]
    fn test_synchronizer_summary() {
        let mut snapshot = runnable_snapshot("worker", 1);
        snapshot.locked_synchronizers = vec![
            LockRecord {
                class_name: "java.util.concurrent.locks.ReentrantLock$NonfairSync".to_string(),
                identity_hash_code: 12345678,
            },
            object_lock(0x42),
        ];
        let report = format_thread_report(&snapshot);
        assert_eq!(
            report.matches("Number of LOCKED Synchronizers: 2").count(),
            1
        );
        assert!(report.ends_with(
            "\tNumber of LOCKED Synchronizers: 2\n\
             \t\tClass Name: java.util.concurrent.locks.ReentrantLock$NonfairSync\n\
             \t\tHash Code: 12345678\n\
             \n\
             \t\tClass Name: java.lang.Object\n\
             \t\tHash Code: 66\n\
             \n"
        ));
    }

    #[test]
    fn test_empty_stack_still_renders_header_and_summary() {
        let snapshot = runnable_snapshot("idle", 0);
        let report = format_thread_report(&snapshot);
        assert!(report.contains("\nStack Traces:\n"));
        assert!(!report.contains("\tat "));
        assert!(report.ends_with("Stack Traces:\n\n"));
    }
}
