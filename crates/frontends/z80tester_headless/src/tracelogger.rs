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

    tracelogger.rs

    Optional log file that mirrors every diagnostic the runner prints.

    The first failed write is reported and ends logging, so a full disk shows up
    as an error instead of a silently truncated file.

*/

use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

#[derive(Debug)]
pub struct TraceLogger<W: Write = BufWriter<File>> {
    writer: Option<W>,
    error: Option<io::Error>,
}

impl<W: Write> Default for TraceLogger<W> {
    fn default() -> Self {
        Self {
            writer: None,
            error: None,
        }
    }
}

impl TraceLogger {
    pub fn from_filename<S: AsRef<Path>>(filename: S) -> io::Result<Self> {
        let file = File::create(filename)?;
        Ok(TraceLogger::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> TraceLogger<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: Some(writer),
            error: None,
        }
    }

    pub fn println<S: Display>(&mut self, msg: S) {
        if let Some(writer) = &mut self.writer {
            if let Err(e) = writeln!(writer, "{}", msg) {
                self.fail(e);
            }
        }
    }

    /// Flush the log and return the first write error, if any occurred.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(writer) = &mut self.writer {
            if let Err(e) = writer.flush() {
                self.fail(e);
            }
        }
        self.writer = None;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, e: io::Error) {
        log::error!("Failed to write log file, logging stopped: {}", e);
        self.writer = None;
        self.error = Some(e);
    }
}
