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

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

//! # Completion - single-fire completion handlers
//!
//! `completion` provides a two-outcome callback, [`CompletionHandler`], that an asynchronous
//! producer calls exactly once with either a success value or a failure, together with two
//! decorators that make such handlers safe to share:
//!
//! * [`SafeHandler`]: wraps a handler so that only the first of any number of concurrent
//!   `on_success` / `on_error` calls is delivered.
//! * [`DeferredHandler`]: wraps a handler so that its success path is submitted to an
//!   [`Executor`] instead of running on the producer's thread.
//!
//! ## Diagnostics
//!
//! Failures that no handler takes care of are never dropped silently. They are reported as
//! [`tracing`] error events, so they end up wherever the application's subscriber sends them.
//!
//! ## Thread Safety
//!
//! Wrappers are `Send` and `Sync` whenever the handlers and executors they hold are, so a single
//! wrapped handler can be handed to many producer threads at once.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicUsize;
//! use std::sync::atomic::Ordering;
//!
//! use completion::CompletionHandler;
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let handler = completion::safe(completion::from_fn({
//!     let calls = calls.clone();
//!     move |_: u32| {
//!         calls.fetch_add(1, Ordering::SeqCst);
//!     }
//! }));
//!
//! std::thread::scope(|s| {
//!     for i in 0..4u32 {
//!         let handler = &handler;
//!         s.spawn(move || handler.on_success(i));
//!     }
//! });
//!
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```
//!
//! [`CompletionHandler`]: handler::CompletionHandler
//! [`SafeHandler`]: safe::SafeHandler
//! [`DeferredHandler`]: deferred::DeferredHandler
//! [`Executor`]: executor::Executor

mod diagnostic;

pub mod deferred;
pub mod executor;
pub mod handler;
pub mod safe;

pub use self::deferred::deferred;
pub use self::handler::BoxError;
pub use self::handler::CompletionHandler;
pub use self::handler::from_fn;
pub use self::safe::safe;

#[cfg(test)]
mod testing;
