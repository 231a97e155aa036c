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

    Headless front end. A binary crate supplies its pin-level core and calls
    run() from main().

*/

//! Command line front end for the Z80 pin-level test harness.
//!
//! ```ignore
//! fn main() {
//!     std::process::exit(z80tester_headless::run(MyCore::new));
//! }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod run_tests;
pub mod tracelogger;

use z80tester_core::PinCore;

use crate::config::{cli_args, CmdLineArgs};

/// Parse the process command line, run every test file named on it and
/// return the process exit status.
pub fn run<C, F>(new_core: F) -> i32
where
    C: PinCore,
    F: FnMut() -> C,
{
    env_logger::init();
    let args = cli_args().run();
    run_with_args(&args, new_core)
}

pub fn run_with_args<C, F>(args: &CmdLineArgs, new_core: F) -> i32
where
    C: PinCore,
    F: FnMut() -> C,
{
    match run_tests::run_tests(args, new_core) {
        Ok(summary) => summary.exit_status(),
        Err(e) => {
            log::error!("{:?}", e);
            eprintln!("ERROR: {:#}", e);
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use z80tester_core::script_core::ScriptCore;

    #[test]
    fn no_files_exits_negative() {
        let args = CmdLineArgs::default();
        assert_eq!(run_with_args(&args, || ScriptCore::new(Vec::new())), -1);
    }

    #[test]
    fn log_file_error_exits_negative() {
        let args = CmdLineArgs {
            log_file: Some(std::env::temp_dir().join("z80tester_no_such_dir").join("x.log")),
            ..Default::default()
        };
        assert_eq!(run_with_args(&args, || ScriptCore::new(Vec::new())), -1);
    }
}
