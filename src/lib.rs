//! A MOS Technology 6502 instruction core: registers, flat 64 KiB memory,
//! the addressing-mode resolver, and the full legal opcode matrix across all
//! thirteen addressing modes.
//!
//! http://www.6502.org/
//! https://en.wikipedia.org/wiki/MOS_Technology_6502

pub mod constants;
pub mod cpu;
mod decode;
mod operand;
mod ops_illegal;
mod ops_jump;
mod ops_logical;
mod ops_move;
pub mod status;

pub use cpu::{Cpu, LoadOutcome};
pub use decode::{decode, DecoderEntry, Handler};
pub use operand::{Mode, OperandRef};
