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

//! The completion handler contract.
//!
//! A [`CompletionHandler`] is told the terminal outcome of an asynchronous operation: either a
//! success value through [`on_success`], or a failure through [`on_error`]. Only `on_success`
//! has to be written; failures are reported to the diagnostic stream unless the handler
//! overrides `on_error`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Mutex;
//!
//! use completion::BoxError;
//! use completion::CompletionHandler;
//!
//! #[derive(Default)]
//! struct Collect {
//!     outcome: Mutex<Option<Result<String, String>>>,
//! }
//!
//! impl CompletionHandler<String> for Collect {
//!     fn on_success(&self, value: String) {
//!         *self.outcome.lock().unwrap() = Some(Ok(value));
//!     }
//!
//!     fn on_error(&self, failure: BoxError) {
//!         *self.outcome.lock().unwrap() = Some(Err(failure.to_string()));
//!     }
//! }
//!
//! let handler = Collect::default();
//! handler.on_error("disk full".into());
//! assert_eq!(
//!     *handler.outcome.lock().unwrap(),
//!     Some(Err("disk full".to_string()))
//! );
//! ```
//!
//! [`on_success`]: CompletionHandler::on_success
//! [`on_error`]: CompletionHandler::on_error

use std::fmt;
use std::sync::Arc;

use crate::diagnostic;


/// The failure carried by [`CompletionHandler::on_error`].
///
/// The crate never inspects it beyond rendering it for the diagnostic stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Receives the outcome of an asynchronous operation.
///
/// Producers call exactly one of the two methods once the result is ready. Nothing in the trait
/// itself enforces that; wrap the handler with [`safe`](crate::safe) when several callers may
/// race to complete it.
pub trait CompletionHandler<A> {
    /// Signals that the operation completed with `value`.
    fn on_success(&self, value: A);

    /// Signals that the operation failed.
    ///
    /// The default implementation reports `failure`, including its chain of sources, as a
    /// [`tracing`] error event and returns.
    fn on_error(&self, failure: BoxError) {
        diagnostic::report(&*failure, "unhandled completion failure");
    }
}

impl<A, H> CompletionHandler<A> for &H
where
    H: CompletionHandler<A> + ?Sized,
{
    fn on_success(&self, value: A) {
        (**self).on_success(value)
    }

    fn on_error(&self, failure: BoxError) {
        (**self).on_error(failure)
    }
}

impl<A, H> CompletionHandler<A> for Box<H>
where
    H: CompletionHandler<A> + ?Sized,
{
    fn on_success(&self, value: A) {
        (**self).on_success(value)
    }

    fn on_error(&self, failure: BoxError) {
        (**self).on_error(failure)
    }
}

impl<A, H> CompletionHandler<A> for Arc<H>
where
    H: CompletionHandler<A> + ?Sized,
{
    fn on_success(&self, value: A) {
        (**self).on_success(value)
    }

    fn on_error(&self, failure: BoxError) {
        (**self).on_error(failure)
    }
}

/// Creates a [`CompletionHandler`] whose success path calls `f`.
///
/// Failures take the default path and are reported to the diagnostic stream.
///
/// # Examples
///
/// ```
/// use completion::CompletionHandler;
///
/// let handler = completion::from_fn(|value: u8| assert_eq!(value, 7));
/// handler.on_success(7);
/// ```
pub fn from_fn<A, F>(f: F) -> FnHandler<F>
where
    F: Fn(A),
{
    FnHandler { f }
}

/// A [`CompletionHandler`] backed by a closure.
///
/// This type is created by [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnHandler<F> {
    f: F,
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

impl<A, F> CompletionHandler<A> for FnHandler<F>
where
    F: Fn(A),
{
    fn on_success(&self, value: A) {
        (self.f)(value)
    }
}
