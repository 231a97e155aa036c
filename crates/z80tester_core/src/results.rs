/*
    Z80Tester
    Pin-level Z80 conformance harness

    Copyright 2025 The Z80Tester Authors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    ---------------------------------------------------------------------------

    results.rs

    Tallies test outcomes per file and for the whole run.

*/

use std::{collections::BTreeMap, fmt, path::PathBuf, time::Duration};

use crate::error::{FailureKind, TestFailure};

/// Outcome of running every test case in one vector file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileResult {
    pub path: PathBuf,
    pub passed: usize,
    pub failed: usize,
    pub failed_by_kind: BTreeMap<FailureKind, usize>,
    pub duration: Duration,
}

impl FileResult {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn record(&mut self, result: &Result<(), TestFailure>) {
        match result {
            Ok(()) => self.passed += 1,
            Err(failure) => {
                self.failed += 1;
                *self.failed_by_kind.entry(failure.kind()).or_insert(0) += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// Failure counts by category, e.g. "cycle: 2, register: 1". Empty when
    /// nothing failed.
    pub fn failure_breakdown(&self) -> String {
        self.failed_by_kind
            .iter()
            .map(|(kind, count)| format!("{}: {}", kind, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TestRunSummary {
    pub run: usize,
    pub failed: usize,
}

impl TestRunSummary {
    pub fn record(&mut self, result: &Result<(), TestFailure>) {
        self.run += 1;
        if result.is_err() {
            self.failed += 1;
        }
    }

    pub fn passed(&self) -> usize {
        self.run - self.failed
    }

    /// Process exit status: -1 if no test case ran, otherwise the failure count.
    pub fn exit_status(&self) -> i32 {
        if self.run == 0 {
            -1
        }
        else {
            i32::try_from(self.failed).unwrap_or(i32::MAX)
        }
    }
}

impl fmt::Display for TestRunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "testing finished, {} out of {} tests were successful",
            self.passed(),
            self.run
        )
    }
}
