use log::debug;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("A task is already running. Please wait.")]
pub struct Busy;

/// Admits at most one background task at a time. Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct TaskSerializer {
    running: Arc<AtomicBool>,
}

impl TaskSerializer {
    /// Claim the slot without waiting. The returned token frees it when
    /// released or dropped, so a panicking task still lets the next one in.
    pub fn try_acquire(&self) -> Result<TaskToken, Busy> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Busy)?;
        debug!("task slot acquired");
        Ok(TaskToken {
            running: Arc::clone(&self.running),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct TaskToken {
    running: Arc<AtomicBool>,
}

impl TaskToken {
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for TaskToken {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        debug!("task slot released");
    }
}
