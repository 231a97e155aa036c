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

    verify.rs

    Final state verification: registers, memory and I/O ports are compared
    against a test case's expected final state. The first mismatch wins.

*/

use crate::{
    address_space::{AddressSpaces, Space},
    cpu_core::Z80Registers,
    error::TestFailure,
    test_case::TestCase,
};

pub struct RegisterCheck {
    pub name: &'static str,
    /// Hex digits used when reporting a mismatch.
    pub width: usize,
    pub get: fn(&Z80Registers) -> u16,
}

/// Registers in the order they are checked.
pub static REGISTER_CHECKS: [RegisterCheck; 20] = [
    RegisterCheck { name: "A", width: 2, get: |r| r.a as u16 },
    RegisterCheck { name: "B", width: 2, get: |r| r.b as u16 },
    RegisterCheck { name: "C", width: 2, get: |r| r.c as u16 },
    RegisterCheck { name: "D", width: 2, get: |r| r.d as u16 },
    RegisterCheck { name: "E", width: 2, get: |r| r.e as u16 },
    RegisterCheck { name: "F", width: 2, get: |r| r.f as u16 },
    RegisterCheck { name: "H", width: 2, get: |r| r.h as u16 },
    RegisterCheck { name: "L", width: 2, get: |r| r.l as u16 },
    RegisterCheck { name: "I", width: 2, get: |r| r.i as u16 },
    RegisterCheck { name: "R", width: 2, get: |r| r.r as u16 },
    RegisterCheck { name: "AF'", width: 4, get: |r| r.af_s },
    RegisterCheck { name: "BC'", width: 4, get: |r| r.bc_s },
    RegisterCheck { name: "DE'", width: 4, get: |r| r.de_s },
    RegisterCheck { name: "HL'", width: 4, get: |r| r.hl_s },
    RegisterCheck { name: "IX", width: 4, get: |r| r.ix },
    RegisterCheck { name: "IY", width: 4, get: |r| r.iy },
    RegisterCheck { name: "PC", width: 4, get: |r| r.pc },
    RegisterCheck { name: "SP", width: 4, get: |r| r.sp },
    RegisterCheck { name: "IFF1", width: 1, get: |r| r.iff1 as u16 },
    RegisterCheck { name: "IFF2", width: 1, get: |r| r.iff2 as u16 },
];

pub fn verify_registers(name: &str, regs: &Z80Registers, expected: &Z80Registers) -> Result<(), TestFailure> {
    for check in REGISTER_CHECKS.iter() {
        let value = (check.get)(regs);
        let expected = (check.get)(expected);
        if value != expected {
            return Err(TestFailure::Register {
                name: name.to_string(),
                register: check.name,
                width: check.width,
                value,
                expected,
            });
        }
    }
    Ok(())
}

pub fn verify_memory(test: &TestCase, spaces: &AddressSpaces) -> Result<(), TestFailure> {
    for entry in &test.final_state.ram {
        let value = spaces.read(Space::Memory, entry.address());
        if value != entry.value() {
            return Err(TestFailure::Memory {
                name: test.name.clone(),
                address: entry.address(),
                value,
                expected: entry.value(),
            });
        }
    }
    Ok(())
}

/// Only write-direction ports carry post-run expectations.
pub fn verify_io(test: &TestCase, spaces: &AddressSpaces) -> Result<(), TestFailure> {
    for port in test.write_ports() {
        let value = spaces.read(Space::Io, port.address());
        if value != port.value() {
            return Err(TestFailure::Io {
                name: test.name.clone(),
                address: port.address(),
                value,
                expected: port.value(),
            });
        }
    }
    Ok(())
}

/// Check registers, then memory, then I/O.
pub fn verify_final(regs: &Z80Registers, spaces: &AddressSpaces, test: &TestCase) -> Result<(), TestFailure> {
    verify_registers(&test.name, regs, &test.final_state.registers())?;
    verify_memory(test, spaces)?;
    verify_io(test, spaces)
}
