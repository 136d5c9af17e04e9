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

//! The executor collaborator.
//!
//! An [`Executor`] accepts a [`Job`] and runs it later, exactly once, possibly on another
//! thread. The crate does not ship a thread pool; it only adapts the executors applications
//! already have:
//!
//! - [`InlineExecutor`] runs the job on the submitting thread.
//! - With the `tokio` feature, a [`tokio::runtime::Handle`] runs the job on the runtime's
//!   blocking pool.
//!
//! Implement the trait directly for anything else.
//!
//! # Examples
//!
//! ```
//! use std::sync::mpsc;
//!
//! use completion::executor::Executor;
//! use completion::executor::Job;
//!
//! struct Queue(mpsc::Sender<Job>);
//!
//! impl Executor for Queue {
//!     fn execute(&self, job: Job) {
//!         // The receiving worker is gone during shutdown; the job is dropped with it.
//!         let _ = self.0.send(job);
//!     }
//! }
//!
//! let (tx, rx) = mpsc::channel();
//! let worker = std::thread::spawn(move || rx.into_iter().for_each(|job: Job| job()));
//!
//! Queue(tx).execute(Box::new(|| println!("ran on the worker")));
//! worker.join().unwrap();
//! ```

use std::sync::Arc;


/// A unit of work submitted to an [`Executor`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs submitted jobs, eventually and exactly once each.
///
/// `execute` must return without waiting for the job to finish, unless the executor is
/// explicitly synchronous like [`InlineExecutor`].
pub trait Executor {
    /// Submits `job` for execution.
    fn execute(&self, job: Job);
}

impl<E> Executor for &E
where
    E: Executor + ?Sized,
{
    fn execute(&self, job: Job) {
        (**self).execute(job)
    }
}

impl<E> Executor for Box<E>
where
    E: Executor + ?Sized,
{
    fn execute(&self, job: Job) {
        (**self).execute(job)
    }
}

impl<E> Executor for Arc<E>
where
    E: Executor + ?Sized,
{
    fn execute(&self, job: Job) {
        (**self).execute(job)
    }
}

/// An [`Executor`] that runs every job on the calling thread before `execute` returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, job: Job) {
        job()
    }
}

/// Runs jobs on the runtime's blocking thread pool.
///
/// Completion handlers are plain synchronous code that may block, so they are kept off the
/// runtime's worker threads. If the runtime is shutting down the job is dropped without
/// running.
#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
impl Executor for tokio::runtime::Handle {
    fn execute(&self, job: Job) {
        drop(self.spawn_blocking(job));
    }
}
