//! A minimal structured task abstraction: a unit of work spawned on a thread pool with
//! an explicit join.

#[cfg(test)]
#[path = "../../tests/unit/utils/task_test.rs"]
mod task_test;

use crate::utils::{GenericError, GenericResult, ThreadPool};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// A handle of a task running on a thread pool.
pub struct Task<T> {
    state: Mutex<TaskState<T>>,
}

enum TaskState<T> {
    Pending(oneshot::Receiver<GenericResult<T>>),
    Finished(GenericResult<T>),
}

impl<T: Send + 'static> Task<T> {
    /// Spawns a new task on the given thread pool. A panic inside the action is captured and
    /// reported as an error on join.
    pub fn spawn<F>(pool: &ThreadPool, action: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();

        pool.spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(action)).map_err(panic_to_error);
            // NOTE the receiver is gone only when the task handle was dropped
            let _ = sender.send(result);
        });

        Self { state: Mutex::new(TaskState::Pending(receiver)) }
    }

    /// Creates an already finished task with the given value.
    pub fn ready(value: T) -> Self {
        Self { state: Mutex::new(TaskState::Finished(Ok(value))) }
    }

    /// Returns true if the task has finished its work. Never blocks for longer than
    /// the time needed to inspect the task state.
    pub fn is_finished(&self) -> bool {
        let mut state = self.lock();

        let result = match &mut *state {
            TaskState::Finished(_) => return true,
            TaskState::Pending(receiver) => match receiver.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Closed) => Err(abandoned()),
            },
        };

        *state = TaskState::Finished(result);

        true
    }

    /// Blocks the calling thread till the task is finished and returns its result.
    pub fn join(self) -> GenericResult<T> {
        match self.state.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()) {
            TaskState::Finished(result) => result,
            TaskState::Pending(receiver) => receiver.blocking_recv().unwrap_or_else(|_| Err(abandoned())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TaskState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn abandoned() -> GenericError {
    "task is abandoned without a result".into()
}

/// Converts panic payload into an error.
pub(crate) fn panic_to_error(payload: Box<dyn Any + Send>) -> GenericError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|msg| msg.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown reason".to_string());

    format!("task panicked: {message}").into()
}
