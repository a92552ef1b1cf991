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

//! Solver configuration. Built with [`SolverConfigBuilder`] so that callers
//! only need to name the options they care about.

use std::time::Duration;

/// Options recognized by [`crate::search::SearchEngine`].
#[derive(Debug, Clone, derive_builder::Builder)]
#[builder(build_fn(validate = "SolverConfig::validate"))]
pub struct SolverConfig {
    /// `false` stops the search after the first solution; `true` enumerates
    /// every solution (subject to `max_solutions`).
    #[builder(default = "false")]
    pub find_all: bool,
    /// Hard cap on the number of solutions emitted when `find_all` is set.
    #[builder(default = "None")]
    pub max_solutions: Option<usize>,
    /// Number of worker threads; `None` auto-sizes from hardware
    /// parallelism and `parallel_fraction`.
    #[builder(default = "None")]
    pub worker_count: Option<usize>,
    /// Clamp on the fraction of hardware parallelism to use, in `(0, 1]`.
    #[builder(default = "1.0")]
    pub parallel_fraction: f64,
    /// Override for the fork-depth threshold; `None` auto-computes it from
    /// grid size and clue density.
    #[builder(default = "None")]
    pub parallel_depth: Option<usize>,
    /// In enumerate mode, suppress solutions that are the horizontal mirror
    /// of one already emitted.
    #[builder(default = "false")]
    pub canonical_only: bool,
    /// Wall-clock budget after which the search stops and returns whatever
    /// it has found so far.
    #[builder(default = "None")]
    pub timeout: Option<Duration>,
    /// Enable the one-ply look-ahead probe: after ordinary propagation
    /// reaches its own fixpoint, also try both values of every remaining
    /// unknown edge on a scratch clone and force whichever edges have only
    /// one surviving value. Off by default: the extra clone-and-propagate
    /// pass per branch costs more than it saves on most grids.
    #[builder(default = "false")]
    pub lookahead: bool,
    /// Emit progress information through the `log` facade.
    #[builder(default = "false")]
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfigBuilder::default()
            .build()
            .expect("all-default configuration is always valid")
    }
}

impl SolverConfig {
    fn validate(builder: &SolverConfigBuilder) -> Result<(), String> {
        if let Some(fraction) = builder.parallel_fraction {
            if fraction <= 0.0 || fraction > 1.0 {
                return Err(format!("parallel_fraction must be in (0, 1], got {fraction}"));
            }
        }
        if let Some(Some(0)) = builder.max_solutions {
            return Err("max_solutions must be at least 1 when set".to_string());
        }
        Ok(())
    }

    /// Number of worker threads to actually spawn, given hardware
    /// parallelism.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) if n > 0 => n,
            _ => {
                let hw = num_cpus::get() as f64;
                ((hw * self.parallel_fraction).floor() as usize).max(1)
            }
        }
    }
}
