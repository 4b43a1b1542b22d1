//! The processor status register, P.
//!
//! Bit layout (7 -> 0): N V U B D I Z C. U is a wire tied high on real
//! silicon; it is never meaningfully clear and writes to it are ignored.

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFlag {
    Carry            = 0b0000_0001,
    Zero             = 0b0000_0010,
    InterruptDisable = 0b0000_0100,
    Decimal          = 0b0000_1000,
    Break            = 0b0001_0000,
    Unused           = 0b0010_0000,
    Overflow         = 0b0100_0000,
    Negative         = 0b1000_0000,
}

/// Status byte immediately after `reset()`: U and I set, everything else clear.
pub const RESET_STATUS: u8 = StatusFlag::Unused as u8 | StatusFlag::InterruptDisable as u8;

/// Forces the U bit high, matching the hardware's tied-open pin.
#[inline]
pub fn normalize(p: u8) -> u8 {
    p | StatusFlag::Unused as u8
}
