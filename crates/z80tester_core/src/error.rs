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

    error.rs

    Error types for vector loading and test failures.

    The Display text of each TestFailure is the diagnostic printed for the
    failing test case.

*/

use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

use crate::bus_state::BusState;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open test cases file {}: {}", .0.display(), .1)]
    Open(PathBuf, #[source] io::Error),
    #[error("cannot read test cases file {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] io::Error),
    #[error("cannot parse test cases file {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),
}

/// The first mismatch found while running a test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestFailure {
    /// The control lines that stayed asserted across both edges of a cycle
    /// did not match the cycle's signature.
    BusState {
        name: String,
        cycle: usize,
        state: BusState,
        edges: [BusState; 2],
        expected: BusState,
    },
    Address {
        name: String,
        cycle: usize,
        address: u16,
        expected: u16,
    },
    Data {
        name: String,
        cycle: usize,
        data: u8,
        expected: u8,
    },
    /// `width` is the number of hex digits the register is printed with.
    Register {
        name: String,
        register: &'static str,
        width: usize,
        value: u16,
        expected: u16,
    },
    Memory {
        name: String,
        address: u16,
        value: u8,
        expected: u8,
    },
    Io {
        name: String,
        address: u16,
        value: u8,
        expected: u8,
    },
}

impl Error for TestFailure {}
impl Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFailure::BusState {
                name,
                cycle,
                state,
                edges,
                expected,
            } => write!(
                f,
                "{} cycle {}: bus state {:#x} ({:#x} {:#x}), expected {:#x}",
                name, cycle, state, edges[0], edges[1], expected
            ),
            TestFailure::Address {
                name,
                cycle,
                address,
                expected,
            } => write!(f, "{} cycle {}: addr 0x{:04x}, expected 0x{:04x}", name, cycle, address, expected),
            TestFailure::Data {
                name,
                cycle,
                data,
                expected,
            } => write!(f, "{} cycle {}: data 0x{:02x}, expected 0x{:02x}", name, cycle, data, expected),
            TestFailure::Register {
                name,
                register,
                width,
                value,
                expected,
            } => write!(
                f,
                "{}: {} 0x{:0w$x}, expected 0x{:0w$x}",
                name,
                register,
                value,
                expected,
                w = *width
            ),
            TestFailure::Memory {
                name,
                address,
                value,
                expected,
            } => write!(
                f,
                "{}: memory @ 0x{:04x} = 0x{:02x}, expected 0x{:02x}",
                name, address, value, expected
            ),
            TestFailure::Io {
                name,
                address,
                value,
                expected,
            } => write!(
                f,
                "{}: I/O @ 0x{:04x} = 0x{:02x}, expected 0x{:02x}",
                name, address, value, expected
            ),
        }
    }
}

impl LoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Open(path, _) | LoadError::Read(path, _) | LoadError::Parse(path, _) => path,
        }
    }
}

impl TestFailure {
    /// The part of the test a failure was found in.
    pub fn kind(&self) -> FailureKind {
        match self {
            TestFailure::BusState { .. } | TestFailure::Address { .. } | TestFailure::Data { .. } => {
                FailureKind::Cycle
            }
            TestFailure::Register { .. } => FailureKind::Register,
            TestFailure::Memory { .. } | TestFailure::Io { .. } => FailureKind::Memory,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    Cycle,
    Register,
    Memory,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Cycle => write!(f, "cycle"),
            FailureKind::Register => write!(f, "register"),
            FailureKind::Memory => write!(f, "memory"),
        }
    }
}
