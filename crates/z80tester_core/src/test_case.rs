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

    test_case.rs

    Test vector data model and file loading.

    A vector file is a JSON array of test cases. Each case gives the initial
    registers and memory, optional I/O port declarations, the expected bus
    activity cycle by cycle, and the expected final state. Files ending in .gz
    are decompressed first.

*/

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use flate2::read::GzDecoder;
use serde_derive::Deserialize;

use crate::{cpu_core::Z80Registers, error::LoadError};

/// A `[address, value]` pair from a `ram` list.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RamEntry(pub u16, pub u8);

impl RamEntry {
    pub fn address(&self) -> u16 {
        self.0
    }

    pub fn value(&self) -> u8 {
        self.1
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortDirection {
    Read,
    Write,
}

/// A `[address, value, direction]` triple from a `ports` list.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PortEntry(pub u16, pub u8, pub String);

impl PortEntry {
    pub fn address(&self) -> u16 {
        self.0
    }

    pub fn value(&self) -> u8 {
        self.1
    }

    /// Only the first character of the direction string is significant.
    /// Unrecognized directions are ignored by the harness.
    pub fn direction(&self) -> Option<PortDirection> {
        match self.2.chars().next() {
            Some('r') => Some(PortDirection::Read),
            Some('w') => Some(PortDirection::Write),
            _ => None,
        }
    }
}

/// One expected bus cycle: `[address-or-null, data-or-null, signature]`.
/// A null address or data field is not checked.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CycleEntry(pub Option<u16>, pub Option<u8>, pub String);

impl CycleEntry {
    pub fn address(&self) -> Option<u16> {
        self.0
    }

    pub fn data(&self) -> Option<u8> {
        self.1
    }

    pub fn signature(&self) -> &str {
        &self.2
    }
}

/// Register and memory snapshot, used for both `initial` and `final`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TestState {
    pub pc: u16,
    pub sp: u16,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub f: u8,
    pub h: u8,
    pub l: u8,
    pub i: u8,
    pub r: u8,
    pub ix: u16,
    pub iy: u16,
    pub af_: u16,
    pub bc_: u16,
    pub de_: u16,
    pub hl_: u16,
    pub iff1: u8,
    pub iff2: u8,
    #[serde(default)]
    pub ram: Vec<RamEntry>,
}

impl TestState {
    pub fn registers(&self) -> Z80Registers {
        Z80Registers {
            pc: self.pc,
            sp: self.sp,
            a: self.a,
            b: self.b,
            c: self.c,
            d: self.d,
            e: self.e,
            f: self.f,
            h: self.h,
            l: self.l,
            i: self.i,
            r: self.r,
            ix: self.ix,
            iy: self.iy,
            af_s: self.af_,
            bc_s: self.bc_,
            de_s: self.de_,
            hl_s: self.hl_,
            iff1: self.iff1 == 1,
            iff2: self.iff2 == 1,
        }
    }

    /// Copy a register file into this snapshot, leaving `ram` untouched.
    pub fn set_registers(&mut self, regs: &Z80Registers) {
        self.pc = regs.pc;
        self.sp = regs.sp;
        self.a = regs.a;
        self.b = regs.b;
        self.c = regs.c;
        self.d = regs.d;
        self.e = regs.e;
        self.f = regs.f;
        self.h = regs.h;
        self.l = regs.l;
        self.i = regs.i;
        self.r = regs.r;
        self.ix = regs.ix;
        self.iy = regs.iy;
        self.af_ = regs.af_s;
        self.bc_ = regs.bc_s;
        self.de_ = regs.de_s;
        self.hl_ = regs.hl_s;
        self.iff1 = regs.iff1 as u8;
        self.iff2 = regs.iff2 as u8;
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub initial: TestState,
    #[serde(rename = "final")]
    pub final_state: TestState,
    #[serde(default)]
    pub ports: Vec<PortEntry>,
    #[serde(default)]
    pub cycles: Vec<CycleEntry>,
}

impl TestCase {
    /// An empty test case with the given name. Used when building tests in code.
    pub fn named(name: &str) -> Self {
        TestCase {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Iterate the ports that declare an expected post-run value.
    pub fn write_ports(&self) -> impl Iterator<Item = &PortEntry> {
        self.ports
            .iter()
            .filter(|port| port.direction() == Some(PortDirection::Write))
    }
}

/// Parse a test vector document. An empty document contains no tests.
pub fn parse_tests(json: &str) -> Result<Vec<TestCase>, serde_json::Error> {
    match serde_json::from_str(json) {
        Ok(tests) => Ok(tests),
        Err(e) if e.is_eof() && json.trim().is_empty() => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Load all test cases from a `.json` or `.json.gz` vector file.
pub fn read_tests_from_file(path: &Path) -> Result<Vec<TestCase>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::Open(path.to_path_buf(), e))?;

    let mut file_string = String::new();
    let is_gzip = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    if is_gzip {
        let mut decoder = GzDecoder::new(BufReader::new(file));
        decoder
            .read_to_string(&mut file_string)
            .map_err(|e| LoadError::Read(path.to_path_buf(), e))?;
    }
    else {
        BufReader::new(file)
            .read_to_string(&mut file_string)
            .map_err(|e| LoadError::Read(path.to_path_buf(), e))?;
    }

    let tests = parse_tests(&file_string).map_err(|e| LoadError::Parse(path.to_path_buf(), e))?;
    log::debug!("Loaded {} tests from {:?}", tests.len(), path);
    Ok(tests)
}
