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

    runner.rs

    Runs test cases against a pin-level core.

    Each test case gets a fresh core, which is taken through the power-on reset
    sequence, has its registers injected, and is then clocked twice per expected
    bus cycle. Memory and I/O requests are answered inline from the runner's
    address spaces. After the last cycle the final state is verified.

*/

use crate::{
    address_space::AddressSpaces,
    bus_state::BusState,
    cpu_core::PinCore,
    error::TestFailure,
    pins::Z80Pins,
    reset::power_on_reset,
    test_case::{CycleEntry, TestCase},
    verify::verify_final,
};

#[derive(Copy, Clone, Debug, Default)]
pub struct RunOptions {
    /// Zero memory and I/O before every test case instead of leaving unlisted
    /// addresses as the previous test left them.
    pub clear_unlisted: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Reset,
    RegisterInject,
    Running(usize),
    Verify,
}

/// Owns the address spaces for a whole run and a factory for fresh cores.
pub struct TestRunner<F> {
    spaces: AddressSpaces,
    new_core: F,
    options: RunOptions,
}

impl<C, F> TestRunner<F>
where
    C: PinCore,
    F: FnMut() -> C,
{
    pub fn new(new_core: F) -> Self {
        TestRunner::with_options(new_core, RunOptions::default())
    }

    pub fn with_options(new_core: F, options: RunOptions) -> Self {
        Self {
            spaces: AddressSpaces::new(),
            new_core,
            options,
        }
    }

    pub fn spaces(&self) -> &AddressSpaces {
        &self.spaces
    }

    pub fn spaces_mut(&mut self) -> &mut AddressSpaces {
        &mut self.spaces
    }

    /// Run a single test case to its first failure or to completion.
    pub fn run_test(&mut self, test: &TestCase) -> Result<(), TestFailure> {
        let mut core = (self.new_core)();
        self.run_test_on(&mut core, test)
    }

    /// Run a test case on a core the caller has just constructed, so that it
    /// can be inspected afterwards.
    pub fn run_test_on(&mut self, core: &mut C, test: &TestCase) -> Result<(), TestFailure> {
        log::trace!("{}: {:?}", test.name, RunPhase::Reset);
        let mut pins = power_on_reset(core, &mut self.spaces);

        log::trace!("{}: {:?}", test.name, RunPhase::RegisterInject);
        core.set_regs(&test.initial.registers());
        if self.options.clear_unlisted {
            self.spaces.clear();
        }
        self.spaces.load_initial(test);

        for (i, cycle) in test.cycles.iter().enumerate() {
            log::trace!("{}: {:?}", test.name, RunPhase::Running(i));
            self.run_cycle(core, &mut pins, &test.name, i + 1, cycle)?;
        }

        log::trace!("{}: {:?}", test.name, RunPhase::Verify);
        verify_final(&core.regs(), &self.spaces, test)
    }

    /// Clock both edges of one bus cycle and check it. `cycle_num` is 1-based.
    fn run_cycle(
        &mut self,
        core: &mut C,
        pins: &mut Z80Pins,
        name: &str,
        cycle_num: usize,
        cycle: &CycleEntry,
    ) -> Result<(), TestFailure> {
        let mut edges = [BusState::IDLE; 2];
        for edge in edges.iter_mut() {
            pins.release_inputs();
            *pins = core.clock(*pins);
            *edge = BusState::from_pins(*pins);
            self.service_bus(pins, *edge);
            log::trace!(
                "{} cycle {}: {} addr {:04X} data {:02X}",
                name,
                cycle_num,
                edge,
                pins.address(),
                pins.data()
            );
        }

        // Only lines held across both edges count; single-edge glitches are dropped.
        let state = edges[0] & edges[1];
        let expected = BusState::from_signature(cycle.signature());
        if state != expected {
            return Err(TestFailure::BusState {
                name: name.to_string(),
                cycle: cycle_num,
                state,
                edges,
                expected,
            });
        }

        if let Some(expected) = cycle.address() {
            if pins.address() != expected {
                return Err(TestFailure::Address {
                    name: name.to_string(),
                    cycle: cycle_num,
                    address: pins.address(),
                    expected,
                });
            }
        }

        if let Some(expected) = cycle.data() {
            if pins.data() != expected {
                return Err(TestFailure::Data {
                    name: name.to_string(),
                    cycle: cycle_num,
                    data: pins.data(),
                    expected,
                });
            }
        }

        Ok(())
    }

    /// Answer a read by driving the data bus, or latch a write into the
    /// addressed space. Reads take priority if both RD and WR are low.
    fn service_bus(&mut self, pins: &mut Z80Pins, state: BusState) {
        let Some(space) = state.space()
        else {
            return;
        };
        if state.is_read() {
            pins.set_data(self.spaces.read(space, pins.address()));
        }
        else if state.is_write() {
            self.spaces.write(space, pins.address(), pins.data());
        }
    }
}
