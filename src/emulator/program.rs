use super::basics::{Address, EmulatorError, Register, Value};

/// One decoded instruction. Instances only live for the duration of a
/// single fetch-decode-execute step; programs in memory stay raw bytes.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Instruction {
    ClearDisplay,
    Return,
    Jump(Address),
    Call(Address),
    SkipEqConst(Register, Value),
    SkipNeConst(Register, Value),
    SkipEq(Register, Register),
    SkipNe(Register, Register),
    Load(Register, Value),
    AddConst(Register, Value),
    Move(Register, Register),
    Or(Register, Register),
    And(Register, Register),
    Xor(Register, Register),
    Add(Register, Register),
    Sub(Register, Register),
    ShiftRight(Register),
    SubNeg(Register, Register),
    ShiftLeft(Register),
    LoadIndex(Address),
    JumpOffset(Address),
    Random(Register, Value),
    Draw(Register, Register, Value),
    SkipKey(Register),
    SkipNoKey(Register),
    GetDelay(Register),
    WaitKey(Register),
    SetDelay(Register),
    SetSound(Register),
    AddIndex(Register),
    FontAddr(Register),
    StoreBcd(Register),
    DumpRegisters(Register),
    FillRegisters(Register),
}

macro_rules! NNN {
    ($word:expr) => {
        Address($word & 0x0FFF)
    };
}

macro_rules! KK {
    ($word:expr) => {
        Value(($word & 0x00FF) as u8)
    };
}

macro_rules! N {
    ($word:expr) => {
        Value(($word & 0x000F) as u8)
    };
}

macro_rules! VX {
    ($word:expr) => {
        Register(($word >> 8 & 0x0F) as u8)
    };
}

macro_rules! VY {
    ($word:expr) => {
        Register(($word >> 4 & 0x0F) as u8)
    };
}

impl Instruction {
    /// Decodes a big-endian instruction word. Words matching no pattern of
    /// the base instruction set are rejected; skipping over them silently
    /// would desynchronize every later program counter adjustment. The
    /// `0nnn` machine-code-routine family is likewise rejected since there
    /// is no host machine code to run.
    pub fn from_word(word: u16) -> Result<Instruction, EmulatorError> {
        let nibbles = (
            (word >> 12 & 0x0F) as u8,
            (word >> 8 & 0x0F) as u8,
            (word >> 4 & 0x0F) as u8,
            (word & 0x0F) as u8,
        );
        Ok(match nibbles {
            (0x0, 0x0, 0xE, 0x0) => Instruction::ClearDisplay,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump(NNN!(word)),
            (0x2, ..) => Instruction::Call(NNN!(word)),
            (0x3, ..) => Instruction::SkipEqConst(VX!(word), KK!(word)),
            (0x4, ..) => Instruction::SkipNeConst(VX!(word), KK!(word)),
            (0x5, .., 0x0) => Instruction::SkipEq(VX!(word), VY!(word)),
            (0x6, ..) => Instruction::Load(VX!(word), KK!(word)),
            (0x7, ..) => Instruction::AddConst(VX!(word), KK!(word)),
            (0x8, .., 0x0) => Instruction::Move(VX!(word), VY!(word)),
            (0x8, .., 0x1) => Instruction::Or(VX!(word), VY!(word)),
            (0x8, .., 0x2) => Instruction::And(VX!(word), VY!(word)),
            (0x8, .., 0x3) => Instruction::Xor(VX!(word), VY!(word)),
            (0x8, .., 0x4) => Instruction::Add(VX!(word), VY!(word)),
            (0x8, .., 0x5) => Instruction::Sub(VX!(word), VY!(word)),
            (0x8, .., 0x6) => Instruction::ShiftRight(VX!(word)),
            (0x8, .., 0x7) => Instruction::SubNeg(VX!(word), VY!(word)),
            (0x8, .., 0xE) => Instruction::ShiftLeft(VX!(word)),
            (0x9, .., 0x0) => Instruction::SkipNe(VX!(word), VY!(word)),
            (0xA, ..) => Instruction::LoadIndex(NNN!(word)),
            (0xB, ..) => Instruction::JumpOffset(NNN!(word)),
            (0xC, ..) => Instruction::Random(VX!(word), KK!(word)),
            (0xD, ..) => Instruction::Draw(VX!(word), VY!(word), N!(word)),
            (0xE, _, 0x9, 0xE) => Instruction::SkipKey(VX!(word)),
            (0xE, _, 0xA, 0x1) => Instruction::SkipNoKey(VX!(word)),
            (0xF, _, 0x0, 0x7) => Instruction::GetDelay(VX!(word)),
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey(VX!(word)),
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay(VX!(word)),
            (0xF, _, 0x1, 0x8) => Instruction::SetSound(VX!(word)),
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex(VX!(word)),
            (0xF, _, 0x2, 0x9) => Instruction::FontAddr(VX!(word)),
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd(VX!(word)),
            (0xF, _, 0x5, 0x5) => Instruction::DumpRegisters(VX!(word)),
            (0xF, _, 0x6, 0x5) => Instruction::FillRegisters(VX!(word)),
            _ => return Err(EmulatorError::UnknownOpcode { word }),
        })
    }
}
