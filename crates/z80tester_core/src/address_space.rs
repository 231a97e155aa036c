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

    address_space.rs

    Implements the memory and I/O address spaces that answer the core's bus
    requests.

    Only the addresses a test case lists are written before that test runs. All
    other locations keep whatever a previous test left behind, just like real
    RAM that is never cleared between instructions.

*/

use crate::test_case::{PortDirection, TestCase};

pub const ADDRESS_SPACE: usize = 0x10000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Space {
    Memory,
    Io,
}

pub struct AddressSpaces {
    memory: Vec<u8>,
    io: Vec<u8>,
}

impl Default for AddressSpaces {
    fn default() -> Self {
        AddressSpaces::new()
    }
}

impl AddressSpaces {
    pub fn new() -> Self {
        Self {
            memory: vec![0; ADDRESS_SPACE],
            io: vec![0; ADDRESS_SPACE],
        }
    }

    #[inline]
    pub fn read(&self, space: Space, address: u16) -> u8 {
        match space {
            Space::Memory => self.memory[address as usize],
            Space::Io => self.io[address as usize],
        }
    }

    #[inline]
    pub fn write(&mut self, space: Space, address: u16, data: u8) {
        match space {
            Space::Memory => self.memory[address as usize] = data,
            Space::Io => self.io[address as usize] = data,
        }
    }

    /// Zero both spaces.
    pub fn clear(&mut self) {
        self.memory.fill(0);
        self.io.fill(0);
    }

    /// Apply a test's `initial.ram` entries and its read-direction ports.
    /// Write-direction ports are expectations and are not loaded.
    pub fn load_initial(&mut self, test: &TestCase) {
        for entry in &test.initial.ram {
            self.write(Space::Memory, entry.address(), entry.value());
        }
        for port in &test.ports {
            if port.direction() == Some(PortDirection::Read) {
                self.write(Space::Io, port.address(), port.value());
            }
        }
    }
}
