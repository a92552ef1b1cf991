// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The single cooperative cancellation signal shared by every worker.
//!
//! There is exactly one flag for an entire solve. It starts false and is
//! flipped at most once, by whichever of these fires first: a solution is
//! found while `find_all` is false, `max_solutions` is reached, the
//! configured timeout elapses, or the caller aborts explicitly. Every
//! worker polls it at predictable points (top of a branch, after
//! propagation) instead of being preempted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A shared, monotonic stop signal.
#[derive(Clone)]
pub struct Cutoff {
    stop: Arc<AtomicBool>,
}

impl Cutoff {
    /// A cutoff that never fires on its own; the caller is responsible for
    /// calling [`Cutoff::signal`] (e.g. after the first solution).
    pub fn manual() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A cutoff that fires automatically once `budget` has elapsed, on a
    /// background thread. Modeled directly on a time-budget cutoff: spawn,
    /// sleep, flip the flag.
    pub fn with_timeout(budget: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let background = stop.clone();
        thread::spawn(move || {
            thread::sleep(budget);
            background.store(true, Ordering::Relaxed);
        });
        Self { stop }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn signal(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
