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

//! Idempotent completion handlers.
//!
//! [`SafeHandler`] lets any number of threads race to complete the same handler. The first
//! caller to flip its `fired` flag wins and is forwarded to the underlying handler; everybody
//! else is absorbed.
//!
//! # Examples
//!
//! ```
//! use std::sync::Mutex;
//!
//! use completion::CompletionHandler;
//!
//! let results = Mutex::new(vec![]);
//! let handler = completion::safe(completion::from_fn(|value: i32| {
//!     results.lock().unwrap().push(value);
//! }));
//!
//! handler.on_success(1);
//! handler.on_success(2);
//! handler.on_error("too late".into());
//!
//! assert!(handler.is_fired());
//! assert_eq!(*results.lock().unwrap(), vec![1]);
//! ```

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::diagnostic;
use crate::handler::BoxError;
use crate::handler::CompletionHandler;

#[cfg(test)]
mod tests;

/// Wraps `underlying` so that it is completed at most once.
///
/// Pass `&handler` or an `Arc` when the caller needs to keep using the handler afterwards.
///
/// See [`SafeHandler`] for the exact semantics.
pub fn safe<A, H>(underlying: H) -> SafeHandler<H>
where
    H: CompletionHandler<A>,
{
    SafeHandler::new(underlying)
}

/// A [`CompletionHandler`] that forwards at most one outcome to the handler it wraps.
///
/// Every call to [`on_success`] or [`on_error`] tries to move the wrapper from "not fired" to
/// "fired" with a single compare-and-swap. The caller that performs the transition is forwarded
/// to the underlying handler; the lock-free transition is the only synchronization, so the
/// underlying handler may block or take its own locks.
///
/// Callers that lose are treated by outcome:
///
/// * a late success is dropped silently;
/// * a late failure cannot be delivered either, but it is still reported to the diagnostic
///   stream so the fault stays visible.
///
/// [`on_success`]: CompletionHandler::on_success
/// [`on_error`]: CompletionHandler::on_error
pub struct SafeHandler<H> {
    underlying: H,
    fired: AtomicBool,
}

impl<H> fmt::Debug for SafeHandler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeHandler")
            .field("fired", &self.is_fired())
            .finish_non_exhaustive()
    }
}

impl<H> SafeHandler<H> {
    /// Creates a new `SafeHandler` that has not fired yet.
    pub const fn new(underlying: H) -> Self {
        Self {
            underlying,
            fired: AtomicBool::new(false),
        }
    }

    /// Returns `true` once some call has been forwarded to the underlying handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use completion::CompletionHandler;
    ///
    /// let handler = completion::safe(completion::from_fn(|_: ()| {}));
    /// assert!(!handler.is_fired());
    ///
    /// handler.on_success(());
    /// assert!(handler.is_fired());
    /// ```
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Returns a reference to the underlying handler.
    pub fn get_ref(&self) -> &H {
        &self.underlying
    }

    /// Consumes the wrapper, returning the underlying handler.
    pub fn into_inner(self) -> H {
        self.underlying
    }

    /// Returns `true` if this call won the transition to "fired".
    fn try_fire(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl<A, H> CompletionHandler<A> for SafeHandler<H>
where
    H: CompletionHandler<A>,
{
    fn on_success(&self, value: A) {
        if self.try_fire() {
            self.underlying.on_success(value);
        }
    }

    fn on_error(&self, failure: BoxError) {
        if self.try_fire() {
            self.underlying.on_error(failure);
        } else {
            diagnostic::report(&*failure, "completion failure after handler already fired");
        }
    }
}
