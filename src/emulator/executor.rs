use super::basics::EmulatorError;
use super::vm::VirtualMachine;

/// Instruction burst per frame when the host does not override it,
/// matching the pace the common 60 Hz front ends run at.
pub const DEFAULT_INSTRUCTIONS_PER_FRAME: u32 = 10;

/// Paces the interpreter cooperatively: a burst of instruction steps,
/// then exactly one timer tick. The host calls `frame` once per display
/// frame and stops the session on the first error.
pub struct Executor {
    vm: VirtualMachine,
    instructions_per_frame: u32,
}

impl Executor {
    pub fn new(vm: VirtualMachine, instructions_per_frame: u32) -> Executor {
        Executor {
            vm,
            instructions_per_frame,
        }
    }

    /// Runs one emulated frame. Timers decay once regardless of how many
    /// of the steps were no-ops due to an outstanding key wait.
    pub fn frame(&mut self) -> Result<(), EmulatorError> {
        for _ in 0..self.instructions_per_frame {
            self.vm.step()?;
        }
        self.vm.tick_timers();
        Ok(())
    }

    pub fn vm(&self) -> &VirtualMachine {
        &self.vm
    }

    pub fn vm_mut(&mut self) -> &mut VirtualMachine {
        &mut self.vm
    }
}
