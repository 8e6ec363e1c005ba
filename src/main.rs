use std::{env, error::Error, fs};

use pixel8::emulator::executor::{Executor, DEFAULT_INSTRUCTIONS_PER_FRAME};
use pixel8::emulator::vm::VirtualMachine;
use pixel8::visualizer::Visualizer;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let rom_path = env::args().nth(1).ok_or("usage: pixel8 <rom-file>")?;
    let rom = fs::read(&rom_path)?;

    let mut vm = VirtualMachine::new();
    vm.load_program(&rom)?;

    let mut executor = Executor::new(vm, DEFAULT_INSTRUCTIONS_PER_FRAME);
    let mut visualizer = Visualizer::new();
    while visualizer.is_open() {
        visualizer.poll_input(executor.vm_mut());
        if let Err(err) = executor.frame() {
            log::error!("halting session: {}", err);
            break;
        }
        visualizer.draw_frame(executor.vm().display());
    }
    Ok(())
}
