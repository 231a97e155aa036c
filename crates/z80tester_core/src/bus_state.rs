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

    bus_state.rs

    Decodes the Z80 read/write/request lines into a 4-bit bus state, either from
    the pins of a core or from the signature string of a test vector cycle.

    A signature is four characters in fixed order: 'r' (RD), 'w' (WR), 'm' (MREQ)
    and 'i' (IORQ). Any other character at a position leaves that line clear,
    so '-' is used as the placeholder.

*/

use std::{
    fmt,
    ops::BitAnd,
};

use crate::{address_space::Space, pins::Z80Pins};

pub const BUS_RD: u8 = 0b0000_0001;
pub const BUS_WR: u8 = 0b0000_0010;
pub const BUS_MREQ: u8 = 0b0000_0100;
pub const BUS_IORQ: u8 = 0b0000_1000;

// Signature character for each bit, in signature order.
const SIGNATURE_CHARS: [(u8, u8); 4] = [(b'r', BUS_RD), (b'w', BUS_WR), (b'm', BUS_MREQ), (b'i', BUS_IORQ)];

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct BusState(u8);

impl BusState {
    pub const IDLE: BusState = BusState(0);

    pub const fn from_bits(bits: u8) -> Self {
        BusState(bits & (BUS_RD | BUS_WR | BUS_MREQ | BUS_IORQ))
    }

    /// Sample the bus state driven by a core. The lines are active-low.
    pub fn from_pins(pins: Z80Pins) -> Self {
        let mut bits = 0;
        if !pins.rd() {
            bits |= BUS_RD;
        }
        if !pins.wr() {
            bits |= BUS_WR;
        }
        if !pins.mreq() {
            bits |= BUS_MREQ;
        }
        if !pins.iorq() {
            bits |= BUS_IORQ;
        }
        BusState(bits)
    }

    /// Decode a test vector signature such as "r-m-".
    pub fn from_signature(signature: &str) -> Self {
        let sig = signature.as_bytes();
        SIGNATURE_CHARS
            .iter()
            .enumerate()
            .filter(|(pos, (c, _))| sig.get(*pos) == Some(c))
            .fold(BusState::IDLE, |state, (_, (_, bit))| BusState(state.0 | bit))
    }

    /// Render back to signature form, using '-' for clear lines.
    pub fn to_signature(self) -> String {
        SIGNATURE_CHARS
            .iter()
            .map(|&(c, bit)| if self.0 & bit != 0 { c as char } else { '-' })
            .collect()
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_read(self) -> bool {
        self.0 & BUS_RD != 0
    }

    #[inline]
    pub const fn is_write(self) -> bool {
        self.0 & BUS_WR != 0
    }

    #[inline]
    pub const fn is_mreq(self) -> bool {
        self.0 & BUS_MREQ != 0
    }

    #[inline]
    pub const fn is_iorq(self) -> bool {
        self.0 & BUS_IORQ != 0
    }

    /// The space a transfer in this state addresses. MREQ takes priority.
    pub fn space(self) -> Option<Space> {
        if self.is_mreq() {
            Some(Space::Memory)
        }
        else if self.is_iorq() {
            Some(Space::Io)
        }
        else {
            None
        }
    }
}

impl BitAnd for BusState {
    type Output = BusState;

    fn bitand(self, rhs: BusState) -> BusState {
        BusState(self.0 & rhs.0)
    }
}

impl fmt::LowerHex for BusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Debug for BusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusState({:#x} {})", self.0, self.to_signature())
    }
}

impl fmt::Display for BusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_signature())
    }
}
