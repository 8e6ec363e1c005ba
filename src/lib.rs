//! A CHIP-8 virtual machine.
//!
//! The `emulator` module holds the core: machine state, the instruction
//! decoder and the fetch-decode-execute interpreter, plus a cooperative
//! frame driver. The `visualizer` module is a thin sfml front end that
//! paints the framebuffer and forwards key events; `keymap` maps host
//! keys onto the 16-key pad.

pub mod emulator;
pub mod keymap;
pub mod visualizer;
