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

    config.rs

    Command line options for the headless test runner.

*/

use std::path::PathBuf;

use bpaf::{Bpaf, Parser};

fn test_files_arg() -> impl Parser<Vec<PathBuf>> {
    bpaf::positional::<PathBuf>("FILE")
        .help("Test vector file (.json or .json.gz), or a directory containing them")
        .many()
}

#[derive(Bpaf, Clone, Debug, Default)]
#[bpaf(options, version, generate(cli_args))]
pub struct CmdLineArgs {
    /// Also write every diagnostic to this file
    #[bpaf(long("log_file"), long("log-file"))]
    pub log_file: Option<PathBuf>,

    /// Stop after the first failing test case
    #[bpaf(long("stop_on_failure"), long("stop-on-failure"), switch)]
    pub stop_on_failure: bool,

    /// Zero memory and I/O before each test case
    #[bpaf(long("clear_memory"), long("clear-memory"), switch)]
    pub clear_memory: bool,

    #[bpaf(external(test_files_arg))]
    pub test_files: Vec<PathBuf>,
}
