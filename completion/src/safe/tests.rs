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

use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use super::*;
use crate::testing::Recorder;
use crate::testing::capture_diagnostics;
use crate::testing::failure;

#[test]
fn success_is_delivered_once() {
    let recorder = Recorder::default();
    let handler = safe(&recorder);
    for value in 1..=5 {
        handler.on_success(value);
    }
    assert_eq!(recorder.successes(), vec![1]);
    assert!(recorder.errors().is_empty());
}

#[test]
fn error_after_success_is_reported_not_delivered() {
    let recorder = Recorder::default();
    let handler = safe(&recorder);

    let ((), output) = capture_diagnostics(|| {
        handler.on_success(42);
        handler.on_error(failure("late failure"));
    });

    assert_eq!(recorder.successes(), vec![42]);
    assert!(recorder.errors().is_empty());
    assert!(
        output.contains("completion failure after handler already fired"),
        "{output}"
    );
    assert!(output.contains("late failure"), "{output}");
}

#[test]
fn success_after_error_is_absorbed_silently() {
    let recorder = Recorder::default();
    let handler = safe(&recorder);

    let ((), output) = capture_diagnostics(|| {
        handler.on_error(failure("first failure"));
        handler.on_success(42);
    });

    assert!(recorder.successes().is_empty());
    assert_eq!(recorder.errors(), vec!["first failure".to_string()]);
    assert!(output.is_empty(), "{output}");
}

#[test]
fn first_error_falls_back_to_default_reporting() {
    let handler = safe(crate::handler::from_fn(|_: i32| unreachable!()));

    let ((), output) = capture_diagnostics(|| {
        handler.on_error(failure("first failure"));
        handler.on_success(42);
    });

    assert!(output.contains("unhandled completion failure"), "{output}");
    assert!(output.contains("first failure"), "{output}");
    assert!(!output.contains("already fired"), "{output}");
}

#[test]
fn second_error_is_reported() {
    let recorder = Recorder::default();
    let handler = safe(&recorder);

    let ((), output) = capture_diagnostics(|| {
        handler.on_error(failure("first failure"));
        handler.on_error(failure("second failure"));
    });

    assert_eq!(recorder.errors(), vec!["first failure".to_string()]);
    assert!(!output.contains("first failure"), "{output}");
    assert!(output.contains("second failure"), "{output}");
}

#[test]
fn is_fired_tracks_first_call() {
    let handler = SafeHandler::new(Recorder::default());
    assert!(!handler.is_fired());
    assert_eq!(
        format!("{handler:?}"),
        "SafeHandler { fired: false, .. }"
    );

    handler.on_success(7);
    assert!(handler.is_fired());
    assert_eq!(format!("{handler:?}"), "SafeHandler { fired: true, .. }");
    assert_eq!(handler.get_ref().successes(), vec![7]);
    assert_eq!(handler.into_inner().successes(), vec![7]);
}

#[test]
fn concurrent_calls_deliver_exactly_once() {
    const THREADS: usize = 16;
    const CALLS: usize = 100;

    for _ in 0..50 {
        let recorder = Arc::new(Recorder::default());
        let handler = safe(Arc::clone(&recorder));
        let barrier = Barrier::new(THREADS);

        thread::scope(|s| {
            for t in 0..THREADS {
                let handler = &handler;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    for i in 0..CALLS {
                        if (t + i) % 2 == 0 {
                            handler.on_success((t * CALLS + i) as i32);
                        } else {
                            handler.on_error(failure("racing failure"));
                        }
                    }
                });
            }
        });

        assert_eq!(recorder.calls(), 1);
    }
}
