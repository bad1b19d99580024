use crate::runtime::error::Error;
use crate::runtime::handle::TaskHandle;
use crate::runtime::result_source::LocalResultSource;
use crate::runtime::task::Task;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{error, trace, warn};
use uuid::Uuid;

pub trait Scheduler: Send + Sync {
    type Handle<T>: Future<Output = Result<T, Error>> + Send
    where
        T: Send + 'static;

    fn submit<T>(&self, task: T) -> Self::Handle<T::Output>
    where
        T: Task;
}

/// Runs tasks on the blocking pool of a tokio runtime, one thread per task.
/// Each task owns its environment, so no locking is involved.
#[derive(Debug, Clone)]
pub struct LocalScheduler {
    runtime: Handle,
}

impl LocalScheduler {
    /// Binds to the runtime the caller is running inside.
    pub fn new() -> Result<Self, Error> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self { runtime })
    }

    pub fn with_handle(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for LocalScheduler {
    type Handle<T>
        = TaskHandle<T, LocalResultSource<T>>
    where
        T: Send + 'static;

    fn submit<T>(&self, task: T) -> Self::Handle<T::Output>
    where
        T: Task,
    {
        let task_id = Uuid::new_v4();
        let (sender, receiver) = oneshot::channel();

        trace!(%task_id, "submitting task");
        self.runtime.spawn_blocking(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| task.run())).map_err(|payload| {
                let msg = panic_message(payload.as_ref());
                error!(%task_id, %msg, "task panicked");
                Error::Panicked(msg)
            });
            if sender.send(result).is_err() {
                warn!(%task_id, "task finished after its handle was dropped");
            }
        });

        TaskHandle::new(task_id, LocalResultSource::new(receiver))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "task panicked with a non-string payload".to_string()
    }
}
