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

    pins.rs

    Defines the Z80 pin state exchanged with a CPU core on every clock edge.
    All control lines are stored as electrical levels. The Z80 control lines
    are active-low, so a line reading 'false' is asserted.

*/

use modular_bitfield::prelude::*;

/// The full set of Z80 pins, packed into a u64.
#[bitfield]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Z80Pins {
    pub address: B16,
    pub data: B8,
    pub m1: bool,
    pub mreq: bool,
    pub iorq: bool,
    pub rd: bool,
    pub wr: bool,
    pub rfsh: bool,
    pub halt: bool,
    pub wait: bool,
    pub int: bool,
    pub nmi: bool,
    pub reset: bool,
    pub busreq: bool,
    pub busack: bool,
    #[skip]
    unused: B27,
}

impl Z80Pins {
    /// Pin state at power-on: every control line high (inactive), buses zero.
    pub fn init() -> Self {
        Z80Pins::new()
            .with_m1(true)
            .with_mreq(true)
            .with_iorq(true)
            .with_rd(true)
            .with_wr(true)
            .with_rfsh(true)
            .with_halt(true)
            .with_wait(true)
            .with_int(true)
            .with_nmi(true)
            .with_reset(true)
            .with_busreq(true)
            .with_busack(true)
    }

    /// Pull RESET low.
    pub fn hold_reset(&mut self) {
        self.set_reset(false);
    }

    /// Drive RESET, BUSREQ, WAIT and INT to their inactive (high) level so the
    /// core is never held in reset, stalled or interrupted.
    pub fn release_inputs(&mut self) {
        self.set_reset(true);
        self.set_busreq(true);
        self.set_wait(true);
        self.set_int(true);
    }
}

impl Default for Z80Pins {
    fn default() -> Self {
        Z80Pins::init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_leaves_all_control_lines_inactive() {
        let pins = Z80Pins::init();
        assert!(pins.rd() && pins.wr() && pins.mreq() && pins.iorq());
        assert!(pins.reset() && pins.busreq() && pins.wait() && pins.int());
        assert_eq!(pins.address(), 0);
        assert_eq!(pins.data(), 0);
    }

    #[test]
    fn release_inputs_only_touches_inputs() {
        let mut pins = Z80Pins::new().with_address(0xBEEF).with_data(0x5A);
        pins.release_inputs();
        assert!(pins.reset() && pins.busreq() && pins.wait() && pins.int());
        // Outputs driven by the core are left alone.
        assert!(!pins.rd());
        assert!(!pins.mreq());
        assert_eq!(pins.address(), 0xBEEF);
        assert_eq!(pins.data(), 0x5A);
    }

    #[test]
    fn hold_reset_pulls_reset_low() {
        let mut pins = Z80Pins::init();
        pins.hold_reset();
        assert!(!pins.reset());
        assert!(pins.busreq());
    }
}
