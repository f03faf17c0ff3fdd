//! Cross-thread admission guards.
//!
//! Two flags keep at most one journey in flight:
//!
//! | Flag           | Set by                          | Cleared by                                      |
//! |----------------|---------------------------------|-------------------------------------------------|
//! | `initializing` | a request thread, on admission  | the simulation thread once the request is applied, the init timeout |
//! | `in_progress`  | the simulation thread, on start | journey completion, cancel, reset, idle timeout, status resync |
//!
//! Every flag is an atomic with a single writer at a time; the simulation
//! thread never blocks on them.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{debug, warn};

use vn_core::CommandConfig;

/// Result of asking the gate to admit a new travel request.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Admission {
    Accepted,
    /// A journey is running and has shown recent activity.
    Busy,
    /// Another request is between admission and the simulation thread.
    Initializing,
}

#[derive(Debug)]
pub struct CommandGate {
    in_progress:   AtomicBool,
    initializing:  AtomicBool,
    /// Last value published by the simulation thread.
    engine_active: AtomicBool,
    last_activity: AtomicU64,
    init_since:    AtomicU64,
    init_timeout:  u64,
    idle_timeout:  u64,
}

impl CommandGate {
    pub fn new(config: &CommandConfig) -> Self {
        Self {
            in_progress:   AtomicBool::new(false),
            initializing:  AtomicBool::new(false),
            engine_active: AtomicBool::new(false),
            last_activity: AtomicU64::new(0),
            init_since:    AtomicU64::new(0),
            init_timeout:  config.init_timeout_ms,
            idle_timeout:  config.idle_timeout_ms,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing.load(Ordering::SeqCst)
    }

    /// Whether the navigator had a journey at the end of its last tick.
    pub fn engine_active(&self) -> bool {
        self.engine_active.load(Ordering::SeqCst)
    }

    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity.load(Ordering::SeqCst)
    }

    /// Try to claim the gate for a new travel request.
    ///
    /// A busy guard whose journey has been silent for longer than the idle
    /// timeout is treated as stale and cleared instead of rejecting.
    pub fn admit(&self, now_ms: u64) -> Admission {
        if self.is_initializing() {
            return Admission::Initializing;
        }
        if self.is_busy() {
            let idle = now_ms.saturating_sub(self.last_activity_ms());
            if idle <= self.idle_timeout {
                return Admission::Busy;
            }
            warn!(idle_ms = idle, "command gate: clearing stale journey guard");
            self.in_progress.store(false, Ordering::SeqCst);
        }
        if self
            .initializing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Admission::Initializing;
        }
        self.init_since.store(now_ms, Ordering::SeqCst);
        self.touch(now_ms);
        Admission::Accepted
    }

    /// Record journey activity.
    pub fn touch(&self, now_ms: u64) {
        self.last_activity.store(now_ms, Ordering::SeqCst);
    }

    /// Clear both guards.
    pub fn clear(&self) {
        self.in_progress.store(false, Ordering::SeqCst);
        self.initializing.store(false, Ordering::SeqCst);
    }

    /// Answer a status query from the engine's last published state, and
    /// bring the busy guard back in line with it.
    pub fn sync_status(&self, now_ms: u64) -> bool {
        let active = self.engine_active();
        if active {
            self.touch(now_ms);
            if !self.in_progress.swap(true, Ordering::SeqCst) {
                debug!("command gate: engine active without busy guard, corrected");
            }
        } else if self.in_progress.swap(false, Ordering::SeqCst) {
            warn!("command gate: engine inactive but busy guard set, cleared");
        }
        active
    }

    // ── Simulation-thread side ────────────────────────────────────────────

    /// An admitted request never reached the simulation thread.
    pub(crate) fn abandon(&self) {
        self.initializing.store(false, Ordering::SeqCst);
    }

    /// Marks the engine active ahead of the end-of-tick publish, so a
    /// status query in between cannot clear the new guard.
    pub(crate) fn journey_started(&self, now_ms: u64) {
        self.engine_active.store(true, Ordering::SeqCst);
        self.in_progress.store(true, Ordering::SeqCst);
        self.touch(now_ms);
        self.initializing.store(false, Ordering::SeqCst);
    }

    pub(crate) fn start_failed(&self) {
        self.clear();
    }

    /// Journey-complete notification.
    pub(crate) fn release(&self) {
        self.in_progress.store(false, Ordering::SeqCst);
    }

    pub(crate) fn publish(&self, active: bool) {
        self.engine_active.store(active, Ordering::SeqCst);
    }

    /// Clear guards that outlived their timeouts, and a busy guard left
    /// behind by an engine that is no longer active.
    pub fn expire_stale(&self, now_ms: u64) {
        if self.is_initializing() {
            let age = now_ms.saturating_sub(self.init_since.load(Ordering::SeqCst));
            if age > self.init_timeout {
                warn!(age_ms = age, "command gate: initializing guard timed out");
                self.initializing.store(false, Ordering::SeqCst);
            }
        }
        if self.is_busy() {
            let idle = now_ms.saturating_sub(self.last_activity_ms());
            if idle > self.idle_timeout {
                warn!(idle_ms = idle, "command gate: journey guard idle too long");
                self.in_progress.store(false, Ordering::SeqCst);
            } else if !self.engine_active() {
                warn!("command gate: stale journey guard with inactive engine");
                self.in_progress.store(false, Ordering::SeqCst);
            }
        }
    }
}
