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

use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use crate::handler::BoxError;
use crate::handler::CompletionHandler;

/// Runs `f` with a subscriber that records every event emitted on this thread.
pub(crate) fn capture_diagnostics<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    (result, output)
}

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A handler that remembers every outcome it was told about.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    successes: Mutex<Vec<i32>>,
    errors: Mutex<Vec<String>>,
}

impl Recorder {
    pub(crate) fn successes(&self) -> Vec<i32> {
        self.successes.lock().unwrap().clone()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.successes.lock().unwrap().len() + self.errors.lock().unwrap().len()
    }
}

impl CompletionHandler<i32> for Recorder {
    fn on_success(&self, value: i32) {
        self.successes.lock().unwrap().push(value);
    }

    fn on_error(&self, failure: BoxError) {
        self.errors.lock().unwrap().push(failure.to_string());
    }
}

pub(crate) fn failure(message: &str) -> BoxError {
    message.to_owned().into()
}
