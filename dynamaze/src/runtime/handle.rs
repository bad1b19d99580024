use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::runtime::error::Error;
use crate::runtime::result_source::{LocalResultSource, ResultSource};
use uuid::Uuid;

/// An awaitable handle to a submitted task.
pub struct TaskHandle<T, S = LocalResultSource<T>>
where
    T: Send + 'static,
    S: ResultSource<T>,
{
    id: Uuid,
    source: S,
    _result: std::marker::PhantomData<fn() -> T>,
}

impl<T, S> fmt::Debug for TaskHandle<T, S>
where
    T: Send + 'static,
    S: ResultSource<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("output", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T, S> TaskHandle<T, S>
where
    T: Send + 'static,
    S: ResultSource<T>,
{
    pub(crate) fn new(id: Uuid, source: S) -> Self {
        Self {
            id,
            source,
            _result: std::marker::PhantomData,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl<T, S> Future for TaskHandle<T, S>
where
    T: Send + 'static,
    S: ResultSource<T>,
{
    type Output = Result<T, Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.source).poll(cx)
    }
}

pub type LocalTaskHandle<T> = TaskHandle<T, LocalResultSource<T>>;
