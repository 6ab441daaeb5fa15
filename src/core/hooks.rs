//! Lifecycle hook slots.
//!
//! Each slot holds at most one handler. Handlers run synchronously inside the
//! scheduling loop; a panicking handler is caught and logged so it can never
//! stall or abort a run.

use std::panic::{self, AssertUnwindSafe};

use super::timeout::panic_message;
use super::{PoolStats, TaskError};

type StatsHook = Box<dyn Fn(PoolStats) + Send + Sync>;
type ErrorHook = Box<dyn Fn(&TaskError, PoolStats) + Send + Sync>;

/// The four optional observer callbacks of a pool.
#[derive(Default)]
pub struct Hooks {
    on_start: Option<StatsHook>,
    on_progress: Option<StatsHook>,
    on_error: Option<ErrorHook>,
    on_done: Option<StatsHook>,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_done", &self.on_done.is_some())
            .finish()
    }
}

impl Hooks {
    pub(crate) fn set_start(&mut self, f: impl Fn(PoolStats) + Send + Sync + 'static) {
        self.on_start = Some(Box::new(f));
    }

    pub(crate) fn set_progress(&mut self, f: impl Fn(PoolStats) + Send + Sync + 'static) {
        self.on_progress = Some(Box::new(f));
    }

    pub(crate) fn set_error(&mut self, f: impl Fn(&TaskError, PoolStats) + Send + Sync + 'static) {
        self.on_error = Some(Box::new(f));
    }

    pub(crate) fn set_done(&mut self, f: impl Fn(PoolStats) + Send + Sync + 'static) {
        self.on_done = Some(Box::new(f));
    }

    pub(crate) fn start(&self, stats: PoolStats) {
        if let Some(hook) = &self.on_start {
            isolate("on_start", || hook(stats));
        }
    }

    pub(crate) fn progress(&self, stats: PoolStats) {
        if let Some(hook) = &self.on_progress {
            isolate("on_progress", || hook(stats));
        }
    }

    pub(crate) fn error(&self, error: &TaskError, stats: PoolStats) {
        if let Some(hook) = &self.on_error {
            isolate("on_error", || hook(error, stats));
        }
    }

    pub(crate) fn done(&self, stats: PoolStats) {
        if let Some(hook) = &self.on_done {
            isolate("on_done", || hook(stats));
        }
    }
}

fn isolate(slot: &'static str, f: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        tracing::error!(hook = slot, panic = %panic_message(payload.as_ref()), "hook panicked");
    }
}
