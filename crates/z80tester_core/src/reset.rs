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

    reset.rs

    Power-on reset sequence applied to every freshly constructed core before
    test registers are injected.

*/

use crate::{
    address_space::{AddressSpaces, Space},
    cpu_core::PinCore,
    pins::Z80Pins,
};

pub const OPCODE_NOP: u8 = 0x00;

/// Clocks RESET is held low for: one high and one low clock phase.
pub const RESET_HOLD_CLOCKS: usize = 2;
/// Clocks run after RESET is released. Two NOP fetch/execute cycles are
/// needed before the core settles and will accept register writes.
pub const RESET_RUNOUT_CLOCKS: usize = 8;

/// Bring a core out of power-on reset.
///
/// RESET is pulled low for two clocks, a NOP is placed at memory address 0,
/// and then the core is clocked eight more times with RESET, BUSREQ, WAIT and
/// INT released. The bus is not serviced while this happens. Returns the pin
/// state after the last clock, which the caller must keep feeding back.
pub fn power_on_reset<C: PinCore>(core: &mut C, spaces: &mut AddressSpaces) -> Z80Pins {
    let mut pins = Z80Pins::init();
    pins.hold_reset();
    for _ in 0..RESET_HOLD_CLOCKS {
        pins = core.clock(pins);
    }

    spaces.write(Space::Memory, 0x0000, OPCODE_NOP);

    for _ in 0..RESET_RUNOUT_CLOCKS {
        pins.release_inputs();
        pins = core.clock(pins);
    }

    log::trace!("reset complete, pins: {:?}", pins);
    pins
}
