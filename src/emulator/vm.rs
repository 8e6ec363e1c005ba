use rand::Rng;

use super::basics::{
    EmulatorError, Register, ADDRESS_MASK, FONT_GLYPH_BYTES, FONT_OFFSET, KEY_COUNT,
};
use super::machine::{FrameBuffer, Machine};
use super::program::Instruction;

/// The interpreter: fetches at the program counter, decodes, executes
/// against the owned machine state. It is the only writer of that state;
/// collaborators (rendering, audio, keyboard) get read access and the key
/// interface below.
///
/// A wait-for-key instruction parks the interpreter: `step` becomes a
/// no-op until a key press is delivered through `press_key`. The driver
/// keeps running its frame loop (timer ticks included) during the pause.
pub struct VirtualMachine {
    machine: Machine,
    pressed_keys: [bool; KEY_COUNT],
    waiting_for_key: Option<Register>,
}

impl VirtualMachine {
    pub fn new() -> VirtualMachine {
        VirtualMachine {
            machine: Machine::new(),
            pressed_keys: [false; KEY_COUNT],
            waiting_for_key: None,
        }
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<(), EmulatorError> {
        self.machine.load_program(program)
    }

    /// Executes one instruction, or nothing at all while a key wait is
    /// outstanding. The program counter moves past the fetched word before
    /// the instruction runs, so control-flow instructions override an
    /// already-applied advance instead of being advanced twice.
    pub fn step(&mut self) -> Result<(), EmulatorError> {
        if self.waiting_for_key.is_some() {
            return Ok(());
        }
        let word = self.fetch_word();
        let instruction = Instruction::from_word(word)?;
        log::trace!("{:#06X} -> {:?}", word, instruction);
        self.execute(instruction)
    }

    /// One frame's worth of timer decay. Driven once per frame by the
    /// host, independently of how many instruction steps the frame ran,
    /// and not suspended by a key wait.
    pub fn tick_timers(&mut self) {
        if self.machine.delay_timer > 0 {
            self.machine.delay_timer -= 1;
        }
        if self.machine.sound_timer > 0 {
            self.machine.sound_timer -= 1;
        }
    }

    /// Marks a key as held and resolves an outstanding key wait: the key
    /// code lands in the waiting register and stepping resumes.
    pub fn press_key(&mut self, key: u8) {
        let key = key & 0x0F;
        self.pressed_keys[key as usize] = true;
        if let Some(vx) = self.waiting_for_key.take() {
            *self.machine.register_mut(vx) = key;
        }
    }

    pub fn release_key(&mut self, key: u8) {
        self.pressed_keys[(key & 0x0F) as usize] = false;
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting_for_key.is_some()
    }

    /// The audio collaborator's contract: tone while the sound timer runs.
    pub fn sound_active(&self) -> bool {
        self.machine.sound_timer > 0
    }

    pub fn display(&self) -> &FrameBuffer {
        &self.machine.display
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.machine.registers
    }

    pub fn program_counter(&self) -> u16 {
        self.machine.program_counter
    }

    pub fn delay_timer(&self) -> u8 {
        self.machine.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.machine.sound_timer
    }

    fn fetch_word(&mut self) -> u16 {
        let pc = self.machine.program_counter;
        let word = u16::from(self.machine.read_byte(pc)) << 8
            | u16::from(self.machine.read_byte(pc.wrapping_add(1)));
        self.machine.program_counter = pc.wrapping_add(2) & ADDRESS_MASK;
        word
    }

    fn skip_next(&mut self) {
        self.machine.program_counter =
            self.machine.program_counter.wrapping_add(2) & ADDRESS_MASK;
    }

    fn key_held(&self, key: u8) -> bool {
        self.pressed_keys[(key & 0x0F) as usize]
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), EmulatorError> {
        match instruction {
            Instruction::ClearDisplay => self.machine.display.clear(),
            Instruction::Return => {
                let addr = self
                    .machine
                    .stack
                    .pop()
                    .ok_or(EmulatorError::StackUnderflow)?;
                self.machine.program_counter = addr;
            }
            Instruction::Jump(addr) => self.machine.program_counter = addr.0,
            Instruction::Call(addr) => {
                self.machine
                    .stack
                    .try_push(self.machine.program_counter)
                    .map_err(|_| EmulatorError::StackOverflow)?;
                self.machine.program_counter = addr.0;
            }

            Instruction::SkipEqConst(vx, kk) => {
                if self.machine.register(vx) == kk.0 {
                    self.skip_next();
                }
            }
            Instruction::SkipNeConst(vx, kk) => {
                if self.machine.register(vx) != kk.0 {
                    self.skip_next();
                }
            }
            Instruction::SkipEq(vx, vy) => {
                if self.machine.register(vx) == self.machine.register(vy) {
                    self.skip_next();
                }
            }
            Instruction::SkipNe(vx, vy) => {
                if self.machine.register(vx) != self.machine.register(vy) {
                    self.skip_next();
                }
            }

            Instruction::Load(vx, kk) => *self.machine.register_mut(vx) = kk.0,
            // Wrapping add without touching the flag register.
            Instruction::AddConst(vx, kk) => {
                let value = self.machine.register(vx).wrapping_add(kk.0);
                *self.machine.register_mut(vx) = value;
            }
            Instruction::Move(vx, vy) => {
                let y = self.machine.register(vy);
                *self.machine.register_mut(vx) = y;
            }
            Instruction::Or(vx, vy) => {
                let y = self.machine.register(vy);
                *self.machine.register_mut(vx) |= y;
            }
            Instruction::And(vx, vy) => {
                let y = self.machine.register(vy);
                *self.machine.register_mut(vx) &= y;
            }
            Instruction::Xor(vx, vy) => {
                let y = self.machine.register(vy);
                *self.machine.register_mut(vx) ^= y;
            }
            Instruction::Add(vx, vy) => {
                let sum =
                    u16::from(self.machine.register(vx)) + u16::from(self.machine.register(vy));
                *self.machine.register_mut(vx) = sum as u8;
                self.machine.set_flag((sum > 0xFF) as u8);
            }
            // The borrow flag compares the operands before the subtraction
            // and before the result wraps.
            Instruction::Sub(vx, vy) => {
                let x = self.machine.register(vx);
                let y = self.machine.register(vy);
                *self.machine.register_mut(vx) = x.wrapping_sub(y);
                self.machine.set_flag((x > y) as u8);
            }
            Instruction::SubNeg(vx, vy) => {
                let x = self.machine.register(vx);
                let y = self.machine.register(vy);
                *self.machine.register_mut(vx) = y.wrapping_sub(x);
                self.machine.set_flag((y > x) as u8);
            }
            // Both shifts operate on Vx itself. That is the simplified
            // convention some programs assume; the outgoing bit is captured
            // into VF before it is shifted away.
            Instruction::ShiftRight(vx) => {
                let x = self.machine.register(vx);
                *self.machine.register_mut(vx) = x >> 1;
                self.machine.set_flag(x & 0x01);
            }
            Instruction::ShiftLeft(vx) => {
                let x = self.machine.register(vx);
                *self.machine.register_mut(vx) = x << 1;
                self.machine.set_flag(x >> 7);
            }

            Instruction::LoadIndex(addr) => self.machine.index = addr.0,
            Instruction::JumpOffset(addr) => {
                self.machine.program_counter =
                    addr.0.wrapping_add(u16::from(self.machine.register(Register(0))))
                        & ADDRESS_MASK;
            }
            Instruction::Random(vx, kk) => {
                let byte: u8 = rand::thread_rng().gen();
                *self.machine.register_mut(vx) = byte & kk.0;
            }

            Instruction::Draw(vx, vy, n) => {
                let x0 = self.machine.register(vx) as usize;
                let y0 = self.machine.register(vy) as usize;
                let mut collision = false;
                for row in 0..n.0 as usize {
                    let sprite_byte = self.machine.read_byte(self.machine.index + row as u16);
                    for col in 0..8 {
                        if sprite_byte & (0x80 >> col) != 0 {
                            collision |= self.machine.display.xor_pixel(x0 + col, y0 + row);
                        }
                    }
                }
                self.machine.set_flag(collision as u8);
            }

            Instruction::SkipKey(vx) => {
                if self.key_held(self.machine.register(vx)) {
                    self.skip_next();
                }
            }
            Instruction::SkipNoKey(vx) => {
                if !self.key_held(self.machine.register(vx)) {
                    self.skip_next();
                }
            }

            Instruction::GetDelay(vx) => {
                let value = self.machine.delay_timer;
                *self.machine.register_mut(vx) = value;
            }
            Instruction::WaitKey(vx) => self.waiting_for_key = Some(vx),
            Instruction::SetDelay(vx) => self.machine.delay_timer = self.machine.register(vx),
            Instruction::SetSound(vx) => self.machine.sound_timer = self.machine.register(vx),

            Instruction::AddIndex(vx) => {
                self.machine.index = self
                    .machine
                    .index
                    .wrapping_add(u16::from(self.machine.register(vx)))
                    & ADDRESS_MASK;
            }
            Instruction::FontAddr(vx) => {
                self.machine.index =
                    FONT_OFFSET + u16::from(self.machine.register(vx)) * FONT_GLYPH_BYTES;
            }
            Instruction::StoreBcd(vx) => {
                let value = self.machine.register(vx);
                let index = self.machine.index;
                self.machine.write_byte(index, value / 100);
                self.machine.write_byte(index.wrapping_add(1), value / 10 % 10);
                self.machine.write_byte(index.wrapping_add(2), value % 10);
            }
            Instruction::DumpRegisters(vx) => {
                for i in 0..=vx.0 {
                    let value = self.machine.register(Register(i));
                    self.machine
                        .write_byte(self.machine.index.wrapping_add(u16::from(i)), value);
                }
            }
            Instruction::FillRegisters(vx) => {
                for i in 0..=vx.0 {
                    let value = self
                        .machine
                        .read_byte(self.machine.index.wrapping_add(u16::from(i)));
                    *self.machine.register_mut(Register(i)) = value;
                }
            }
        }
        Ok(())
    }
}
