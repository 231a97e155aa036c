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

    script_core.rs

    A scripted PinCore used to exercise the harness without a real CPU core.

    The core idles through reset. Once registers are injected it plays back a
    fixed list of bus steps, one per clock edge, and then idles again. A step may
    carry a latch function that receives the incoming data bus on that edge and
    may modify the register file, which is how tests model reads that land in a
    register.

*/

use crate::{
    bus_state::{BusState, BUS_IORQ, BUS_MREQ, BUS_RD, BUS_WR},
    cpu_core::{PinCore, Z80Registers},
    pins::Z80Pins,
};

pub type Latch = fn(&mut Z80Registers, u8);

#[derive(Copy, Clone)]
pub struct BusStep {
    pub state: BusState,
    pub address: u16,
    /// Value driven onto the data bus by the core, for writes.
    pub data: Option<u8>,
    pub latch: Option<Latch>,
}

impl BusStep {
    pub fn new(state: BusState, address: u16) -> Self {
        Self {
            state,
            address,
            data: None,
            latch: None,
        }
    }

    pub fn idle(address: u16) -> Self {
        BusStep::new(BusState::IDLE, address)
    }

    pub fn mem_read(address: u16) -> Self {
        BusStep::new(BusState::from_bits(BUS_RD | BUS_MREQ), address)
    }

    pub fn mem_write(address: u16, data: u8) -> Self {
        BusStep {
            data: Some(data),
            ..BusStep::new(BusState::from_bits(BUS_WR | BUS_MREQ), address)
        }
    }

    pub fn io_read(address: u16) -> Self {
        BusStep::new(BusState::from_bits(BUS_RD | BUS_IORQ), address)
    }

    pub fn io_write(address: u16, data: u8) -> Self {
        BusStep {
            data: Some(data),
            ..BusStep::new(BusState::from_bits(BUS_WR | BUS_IORQ), address)
        }
    }

    /// MREQ without RD, as during a refresh.
    pub fn refresh(address: u16) -> Self {
        BusStep::new(BusState::from_bits(BUS_MREQ), address)
    }

    pub fn with_latch(mut self, latch: Latch) -> Self {
        self.latch = Some(latch);
        self
    }
}

pub struct ScriptCore {
    regs: Z80Registers,
    script: Vec<BusStep>,
    position: usize,
    armed: bool,
    clocks: usize,
    sampled: Vec<u8>,
}

impl ScriptCore {
    pub fn new(script: Vec<BusStep>) -> Self {
        Self {
            regs: Z80Registers::default(),
            script,
            position: 0,
            armed: false,
            clocks: 0,
            sampled: Vec::new(),
        }
    }

    /// Total clock edges seen, including reset.
    pub fn clocks(&self) -> usize {
        self.clocks
    }

    /// Data bus values seen by latching steps, in order.
    pub fn sampled(&self) -> &[u8] {
        &self.sampled
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.script.len()
    }
}

impl PinCore for ScriptCore {
    fn clock(&mut self, pins: Z80Pins) -> Z80Pins {
        self.clocks += 1;

        let mut out = pins;
        out.set_rd(true);
        out.set_wr(true);
        out.set_mreq(true);
        out.set_iorq(true);

        if !self.armed || self.is_finished() {
            return out;
        }

        let step = self.script[self.position];
        self.position += 1;

        if let Some(latch) = step.latch {
            self.sampled.push(pins.data());
            latch(&mut self.regs, pins.data());
        }

        out.set_rd(!step.state.is_read());
        out.set_wr(!step.state.is_write());
        out.set_mreq(!step.state.is_mreq());
        out.set_iorq(!step.state.is_iorq());
        out.set_address(step.address);
        if let Some(data) = step.data {
            out.set_data(data);
        }
        out
    }

    fn set_regs(&mut self, regs: &Z80Registers) {
        self.regs = *regs;
        self.armed = true;
    }

    fn regs(&self) -> Z80Registers {
        self.regs
    }
}
