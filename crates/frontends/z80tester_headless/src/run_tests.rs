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

    run_tests.rs

    Loads test vector files and runs each test case, reporting failures as they
    happen and a summary per file and for the whole run.

*/

use std::{
    fs::read_dir,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use colored::*;

use z80tester_core::{
    error::LoadError,
    results::{FileResult, TestRunSummary},
    runner::{RunOptions, TestRunner},
    test_case::{read_tests_from_file, TestCase},
    PinCore,
};

use crate::{config::CmdLineArgs, tracelogger::TraceLogger};

/// Print a line to the console and mirror it into the trace log.
macro_rules! report {
    ($log:expr, $($t:tt)*) => {{
        let formatted_message = format!($($t)*);
        println!("{}", &formatted_message);
        $log.println(&formatted_message);
    }};
}

pub fn run_tests<C, F>(args: &CmdLineArgs, new_core: F) -> anyhow::Result<TestRunSummary>
where
    C: PinCore,
    F: FnMut() -> C,
{
    let mut log = match &args.log_file {
        Some(path) => TraceLogger::from_filename(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?,
        None => TraceLogger::default(),
    };

    let options = RunOptions {
        clear_unlisted: args.clear_memory,
    };
    let mut runner = TestRunner::with_options(new_core, options);
    let mut summary = TestRunSummary::default();

    for path in collect_test_files(&args.test_files, &mut log) {
        let tests = match read_tests_from_file(&path) {
            Ok(tests) => tests,
            Err(LoadError::Open(..)) => {
                log::warn!("Skipping unopenable file {:?}", path);
                report!(log, "ERROR: cannot open test cases file {}, ignoring", path.display());
                continue;
            }
            Err(e) => {
                log::warn!("Skipping unreadable file {:?}", e.path());
                report!(log, "ERROR: {}, ignoring", e);
                continue;
            }
        };

        log::debug!("Running {} tests from {:?}", tests.len(), path);
        let file_result = run_file(&mut runner, &path, &tests, args, &mut summary, &mut log);
        print_file_result(&file_result, &mut log);

        if args.stop_on_failure && !file_result.success() {
            log::debug!("Stopping on first failure.");
            break;
        }
    }

    if summary.run == 0 {
        report!(log, "ERROR: no test cases provided");
    }
    else {
        let line = summary.to_string();
        if summary.failed == 0 {
            println!("{}", line.green());
        }
        else {
            println!("{}", line.red());
        }
        log.println(&line);
    }

    if let Err(e) = log.finish() {
        if let Some(path) = &args.log_file {
            eprintln!("ERROR: log file {} is incomplete: {}", path.display(), e);
        }
    }
    Ok(summary)
}

fn run_file<C, F>(
    runner: &mut TestRunner<F>,
    path: &Path,
    tests: &[TestCase],
    args: &CmdLineArgs,
    summary: &mut TestRunSummary,
    log: &mut TraceLogger,
) -> FileResult
where
    C: PinCore,
    F: FnMut() -> C,
{
    let mut result = FileResult::new(path.to_path_buf());
    let start = Instant::now();

    for test in tests {
        let outcome = runner.run_test(test);
        match &outcome {
            Ok(()) => log::trace!("{}: passed", test.name),
            Err(failure) => report!(log, "{}", failure),
        }
        result.record(&outcome);
        summary.record(&outcome);

        if args.stop_on_failure && outcome.is_err() {
            break;
        }
    }

    result.duration = start.elapsed();
    result
}

fn print_file_result(result: &FileResult, log: &mut TraceLogger) {
    let status = if result.success() { "PASS".green() } else { "FAIL".red() };
    let mut detail = format!(
        "{}: {}/{} tests passed in {:.2} seconds",
        result.path.display(),
        result.passed,
        result.total(),
        result.duration.as_secs_f32()
    );
    if !result.success() {
        detail.push_str(&format!(" ({})", result.failure_breakdown()));
    }
    println!("{} {}", status, detail);
    log.println(format!("{} {}", if result.success() { "PASS" } else { "FAIL" }, detail));
}

/// Expand the command line paths into the list of vector files to run.
/// Directories contribute their `.json` and `.json.gz` files in name order;
/// plain paths are passed through so that open errors are reported later.
pub fn collect_test_files(paths: &[PathBuf], log: &mut TraceLogger) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        match read_dir(path) {
            Ok(entries) => {
                let mut dir_files: Vec<PathBuf> = entries
                    .filter_map(Result::ok)
                    .map(|entry| entry.path())
                    .filter(|entry| entry.is_file() && is_vector_file(entry))
                    .collect();
                dir_files.sort();
                log::debug!("Found {} test files in {:?}", dir_files.len(), path);
                files.extend(dir_files);
            }
            Err(e) => {
                log::error!("Error reading directory {:?}: {}", path, e);
                report!(log, "ERROR: cannot open test cases file {}, ignoring", path.display());
            }
        }
    }

    files
}

fn is_vector_file(path: &Path) -> bool {
    path.file_name()
        .and_then(std::ffi::OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .is_some_and(|name| name.ends_with(".json") || name.ends_with(".json.gz"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use z80tester_core::script_core::{BusStep, ScriptCore};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("z80tester_headless_{}_{}", name, std::process::id()));
        _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn state(pc: u16, a: u8) -> serde_json::Value {
        json!({
            "pc": pc, "sp": 0, "a": a, "b": 0, "c": 0, "d": 0, "e": 0, "f": 0, "h": 0, "l": 0,
            "i": 0, "r": 0, "ix": 0, "iy": 0, "af_": 0, "bc_": 0, "de_": 0, "hl_": 0,
            "iff1": 0, "iff2": 0, "ram": [[0, 0]]
        })
    }

    fn nop_test(name: &str, final_a: u8) -> serde_json::Value {
        json!({
            "name": name,
            "initial": state(0, 0),
            "final": state(1, final_a),
            "cycles": [[0, 0, "r-m-"]]
        })
    }

    fn nop_core() -> ScriptCore {
        ScriptCore::new(vec![
            BusStep::mem_read(0x0000),
            BusStep::mem_read(0x0000).with_latch(|regs, _| regs.pc = regs.pc.wrapping_add(1)),
        ])
    }

    fn args(dir: &Path, files: Vec<PathBuf>) -> CmdLineArgs {
        CmdLineArgs {
            log_file: Some(dir.join("run.log")),
            test_files: files,
            ..Default::default()
        }
    }

    fn log_contents(dir: &Path) -> String {
        fs::read_to_string(dir.join("run.log")).unwrap()
    }

    #[test]
    fn passing_file() {
        let dir = scratch_dir("pass");
        let file = dir.join("00.json");
        fs::write(&file, json!([nop_test("00 0000", 0), nop_test("00 0001", 0)]).to_string()).unwrap();

        let summary = run_tests(&args(&dir, vec![file]), nop_core).unwrap();
        assert_eq!(summary, TestRunSummary { run: 2, failed: 0 });
        assert_eq!(summary.exit_status(), 0);
        assert!(log_contents(&dir).contains("testing finished, 2 out of 2 tests were successful"));
    }

    #[test]
    fn failures_are_reported_and_counted() {
        let dir = scratch_dir("fail");
        let file = dir.join("00.json");
        fs::write(
            &file,
            json!([nop_test("00 0000", 0x42), nop_test("00 0001", 0), nop_test("00 0002", 0x01)]).to_string(),
        )
        .unwrap();

        let summary = run_tests(&args(&dir, vec![file]), nop_core).unwrap();
        assert_eq!(summary.exit_status(), 2);

        let log = log_contents(&dir);
        assert!(log.contains("00 0000: A 0x00, expected 0x42"));
        assert!(log.contains("00 0002: A 0x00, expected 0x01"));
        assert!(log.contains("FAIL"));
        assert!(log.contains("1/3 tests passed"));
        assert!(log.contains("(register: 2)"));
        assert!(log.contains("testing finished, 1 out of 3 tests were successful"));
    }

    #[test]
    fn stop_on_failure_ends_the_run() {
        let dir = scratch_dir("stop");
        let first = dir.join("00.json");
        let second = dir.join("01.json");
        fs::write(&first, json!([nop_test("00 0000", 0x42), nop_test("00 0001", 0x42)]).to_string()).unwrap();
        fs::write(&second, json!([nop_test("01 0000", 0)]).to_string()).unwrap();

        let mut cmd = args(&dir, vec![first, second]);
        cmd.stop_on_failure = true;
        let summary = run_tests(&cmd, nop_core).unwrap();
        assert_eq!(summary, TestRunSummary { run: 1, failed: 1 });
        assert!(!log_contents(&dir).contains("00 0001"));
    }

    #[test]
    fn missing_file_is_skipped() {
        let dir = scratch_dir("missing");
        let missing = dir.join("nope.json");
        let summary = run_tests(&args(&dir, vec![missing.clone()]), nop_core).unwrap();
        assert_eq!(summary.exit_status(), -1);

        let log = log_contents(&dir);
        assert!(log.contains(&format!("ERROR: cannot open test cases file {}, ignoring", missing.display())));
        assert!(log.contains("ERROR: no test cases provided"));
    }

    #[test]
    fn malformed_file_is_skipped_and_others_run() {
        let dir = scratch_dir("malformed");
        let bad = dir.join("bad.json");
        let good = dir.join("good.json");
        fs::write(&bad, "[{\"name\": ").unwrap();
        fs::write(&good, json!([nop_test("00 0000", 0)]).to_string()).unwrap();

        let summary = run_tests(&args(&dir, vec![bad.clone(), good]), nop_core).unwrap();
        assert_eq!(summary, TestRunSummary { run: 1, failed: 0 });
        assert!(log_contents(&dir).contains(&format!("ERROR: cannot parse test cases file {}: ", bad.display())));
    }

    #[test]
    fn empty_file_counts_as_no_tests() {
        let dir = scratch_dir("empty");
        let file = dir.join("empty.json");
        fs::write(&file, "").unwrap();
        let summary = run_tests(&args(&dir, vec![file]), nop_core).unwrap();
        assert_eq!(summary.exit_status(), -1);
    }

    #[test]
    fn directories_expand_to_sorted_vector_files() {
        let dir = scratch_dir("expand");
        for name in ["02.json.gz", "00.json", "notes.txt", "01.JSON"] {
            fs::write(dir.join(name), "").unwrap();
        }
        fs::create_dir_all(dir.join("sub.json")).unwrap();
        let extra = PathBuf::from("extra.json");

        let files = collect_test_files(&[dir.clone(), extra.clone()], &mut TraceLogger::default());
        assert_eq!(
            files,
            vec![dir.join("00.json"), dir.join("01.JSON"), dir.join("02.json.gz"), extra]
        );
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let dir = scratch_dir("badlog");
        let cmd = CmdLineArgs {
            log_file: Some(dir.join("missing").join("run.log")),
            ..Default::default()
        };
        assert!(run_tests(&cmd, nop_core).is_err());
    }
}
