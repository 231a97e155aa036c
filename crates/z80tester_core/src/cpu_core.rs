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

    cpu_core.rs

    Defines the PinCore trait, implemented by any pin-level Z80 core that is to
    be driven by the harness, and the register file exchanged with it.

*/

use std::fmt::{self, Display};

use crate::pins::Z80Pins;

/// Register file of a Z80 core. The alternate register set is carried as
/// 16-bit pairs, since only the pairs are visible from outside the core.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Z80Registers {
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
    pub af_s: u16,
    pub bc_s: u16,
    pub de_s: u16,
    pub hl_s: u16,
    pub iff1: bool,
    pub iff2: bool,
}

impl Display for Z80Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A: {:02x} F: {:02x} B: {:02x} C: {:02x} D: {:02x} E: {:02x} H: {:02x} L: {:02x}\n\
            AF': {:04x} BC': {:04x} DE': {:04x} HL': {:04x}\n\
            IX: {:04x} IY: {:04x} SP: {:04x} PC: {:04x}\n\
            I: {:02x} R: {:02x} IFF1: {} IFF2: {}",
            self.a,
            self.f,
            self.b,
            self.c,
            self.d,
            self.e,
            self.h,
            self.l,
            self.af_s,
            self.bc_s,
            self.de_s,
            self.hl_s,
            self.ix,
            self.iy,
            self.sp,
            self.pc,
            self.i,
            self.r,
            self.iff1 as u8,
            self.iff2 as u8
        )
    }
}

/// A cycle-accurate Z80 core reachable only through its pins.
///
/// The harness treats the core as a black box: it hands in the pin state it
/// wants on the next clock edge and gets back whatever the core drives. A
/// core must accept `set_regs` once it has come out of reset, and `regs`
/// must return exactly what was set if no clock has happened in between.
pub trait PinCore {
    /// Advance the core by one clock edge (half a T-state).
    fn clock(&mut self, pins: Z80Pins) -> Z80Pins;

    fn set_regs(&mut self, regs: &Z80Registers);

    fn regs(&self) -> Z80Registers;
}

impl<T: PinCore + ?Sized> PinCore for Box<T> {
    fn clock(&mut self, pins: Z80Pins) -> Z80Pins {
        (**self).clock(pins)
    }

    fn set_regs(&mut self, regs: &Z80Registers) {
        (**self).set_regs(regs)
    }

    fn regs(&self) -> Z80Registers {
        (**self).regs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_register_widths() {
        let regs = Z80Registers {
            a: 0x0A,
            pc: 0x1234,
            iff1: true,
            ..Default::default()
        };
        let text = regs.to_string();
        assert!(text.starts_with("A: 0a F: 00"));
        assert!(text.contains("PC: 1234"));
        assert!(text.contains("IFF1: 1 IFF2: 0"));
    }
}
