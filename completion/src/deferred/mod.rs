// Copyright 2024 tison <wander4096@gmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Completion handlers whose success path runs on an executor.
//!
//! [`DeferredHandler`] hands every successful completion to an [`Executor`] instead of running
//! the underlying handler on the producer's thread. Failures are not deferred: they reach the
//! underlying handler synchronously.
//!
//! # Examples
//!
//! ```
//! use std::sync::mpsc;
//!
//! use completion::CompletionHandler;
//! use completion::executor::InlineExecutor;
//!
//! let (tx, rx) = mpsc::channel();
//! let handler = completion::deferred(InlineExecutor, completion::from_fn(move |value: u64| {
//!     tx.send(value).unwrap();
//! }));
//!
//! handler.on_success(7);
//! assert_eq!(rx.recv().unwrap(), 7);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::executor::Executor;
use crate::handler::BoxError;
use crate::handler::CompletionHandler;
use crate::safe::SafeHandler;


/// Wraps `underlying` so that its success path is submitted to `executor`.
///
/// See [`DeferredHandler`] for the exact semantics.
pub fn deferred<A, E, H>(executor: E, underlying: H) -> DeferredHandler<E, H>
where
    E: Executor,
    H: CompletionHandler<A>,
{
    DeferredHandler::new(executor, underlying)
}

/// A [`CompletionHandler`] that dispatches successes through an [`Executor`].
///
/// Each call to [`on_success`] is an independent submission: it wraps the underlying handler
/// in a fresh [`SafeHandler`], moves that wrapper and the value into a [`Job`], submits the job
/// and returns without waiting for it. Two calls therefore deliver two values; use
/// [`safe`](crate::safe) around the `DeferredHandler` when the outer handler must fire once.
///
/// [`on_error`] runs on the calling thread and forwards straight to the underlying handler,
/// whose default reports the failure to the diagnostic stream.
///
/// [`on_success`]: CompletionHandler::on_success
/// [`on_error`]: CompletionHandler::on_error
/// [`Job`]: crate::executor::Job
pub struct DeferredHandler<E, H> {
    executor: E,
    underlying: Arc<H>,
}

impl<E: fmt::Debug, H> fmt::Debug for DeferredHandler<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredHandler")
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl<E, H> DeferredHandler<E, H> {
    /// Creates a new `DeferredHandler`.
    pub fn new(executor: E, underlying: H) -> Self {
        Self {
            executor,
            underlying: Arc::new(underlying),
        }
    }

    /// Returns a reference to the executor jobs are submitted to.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns a reference to the underlying handler.
    pub fn handler(&self) -> &H {
        &self.underlying
    }
}

impl<A, E, H> CompletionHandler<A> for DeferredHandler<E, H>
where
    A: Send + 'static,
    E: Executor,
    H: CompletionHandler<A> + Send + Sync + 'static,
{
    fn on_success(&self, value: A) {
        let handler = SafeHandler::new(Arc::clone(&self.underlying));
        self.executor.execute(Box::new(move || handler.on_success(value)));
    }

    fn on_error(&self, failure: BoxError) {
        <H as CompletionHandler<A>>::on_error(&self.underlying, failure);
    }
}
