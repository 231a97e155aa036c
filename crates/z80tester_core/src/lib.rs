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

    lib.rs

    Test harness core

*/

//! Drives a pin-level Z80 core through JSON test vectors, one bus cycle at a
//! time, and reports the first divergence from the expected bus activity or
//! final machine state.

#![forbid(unsafe_code)]

pub mod address_space;
pub mod bus_state;
pub mod cpu_core;
pub mod error;
pub mod pins;
pub mod reset;
pub mod results;
pub mod runner;
#[cfg(any(test, feature = "script_core"))]
pub mod script_core;
pub mod test_case;
pub mod verify;

pub use cpu_core::{PinCore, Z80Registers};
pub use error::{LoadError, TestFailure};
pub use pins::Z80Pins;
pub use results::{FileResult, TestRunSummary};
pub use runner::{RunOptions, TestRunner};
pub use test_case::{read_tests_from_file, TestCase};
