//! The CPU driver: registers, flat memory, and the fetch/decode/execute loop.

use crate::constants::{InterruptVector, MEMORY_SIZE, STACK_PAGE};
use crate::decode::decode;
use crate::operand::{Mode, OperandRef};
use crate::status::{normalize, StatusFlag, RESET_STATUS};

/// The outcome of loading a binary image into memory, reported rather than
/// silently dropped when the requested range spills past the end of memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub requested: usize,
    pub written: usize,
}

impl LoadOutcome {
    #[inline]
    pub fn truncated(&self) -> bool {
        self.written < self.requested
    }
}

/// A single MOS 6502 core: registers, a private 64 KiB memory array, and the
/// machinery to fetch, decode, and execute one instruction at a time.
///
/// http://www.6502.org/
/// https://en.wikipedia.org/wiki/MOS_Technology_6502
pub struct Cpu {
    memory: [u8; MEMORY_SIZE],

    /// "A" register - the accumulator. Most ALU results land here.
    pub a: u8,
    /// "X" index register.
    pub x: u8,
    /// "Y" index register.
    pub y: u8,
    /// "PC" - program counter.
    pub pc: u16,
    /// "SP" - stack pointer. Effective address is always `0x0100 | sp`.
    pub sp: u8,
    /// "P" - processor status. Use `status()`/`set_status()` rather than
    /// reading this directly if you need the U bit forced.
    pub p: u8,
}

impl Cpu {
    /// Builds a CPU with zeroed memory and registers already in the
    /// post-`reset()` shape, so a freshly constructed instance is
    /// well-defined even before a host loads a program and calls `reset()`.
    pub fn new() -> Cpu {
        Cpu {
            memory: [0; MEMORY_SIZE],
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0xFD,
            p: RESET_STATUS,
        }
    }

    // -- Driver entry points -------------------------------------------------

    /// A=X=Y=0; SP=0xFD; P=0x24 (U, I set); PC loaded from the reset vector.
    /// Memory is left untouched.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.p = RESET_STATUS;
        self.pc = self.read_u16(InterruptVector::Reset.address());
        log::trace!("reset: pc <- {:#06x}", self.pc);
    }

    /// Executes exactly one instruction: fetch, decode, resolve operand,
    /// dispatch to the handler.
    pub fn step(&mut self) {
        let opcode = self.fetch_u8();
        let entry = decode(opcode);
        (entry.handler)(self, entry.mode, opcode);
    }

    /// Executes exactly `n` instructions via repeated `step()`. Encountering
    /// an illegal opcode mid-run does not stop the loop early.
    pub fn run(&mut self, n: u16) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Copies `bytes` into memory starting at `dest`, truncating at the end
    /// of the 64 KiB address space rather than wrapping or panicking.
    pub fn load(&mut self, bytes: &[u8], dest: u16) -> LoadOutcome {
        let start = dest as usize;
        let capacity = MEMORY_SIZE - start.min(MEMORY_SIZE);
        let written = bytes.len().min(capacity);
        self.memory[start..start + written].copy_from_slice(&bytes[..written]);
        log::trace!(
            "load: wrote {written} of {requested} bytes at {start:#06x}",
            requested = bytes.len()
        );
        LoadOutcome {
            requested: bytes.len(),
            written,
        }
    }

    // -- Register/status/memory accessors ------------------------------------

    #[inline]
    pub fn get_a(&self) -> u8 {
        self.a
    }
    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }
    #[inline]
    pub fn get_x(&self) -> u8 {
        self.x
    }
    #[inline]
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }
    #[inline]
    pub fn get_y(&self) -> u8 {
        self.y
    }
    #[inline]
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }
    #[inline]
    pub fn get_sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }
    #[inline]
    pub fn get_pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// U always reads as 1, regardless of what was last written to it.
    #[inline]
    pub fn get_status(&self) -> u8 {
        normalize(self.p)
    }

    /// Writes to U are ignored; it is held at 1.
    #[inline]
    pub fn set_status(&mut self, value: u8) {
        self.p = normalize(value);
    }

    #[inline]
    pub fn get_memory(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    pub fn set_memory(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    // -- Flags ----------------------------------------------------------------

    pub(crate) fn set_flag(&mut self, flag: StatusFlag, value: bool) {
        if value {
            self.p |= flag as u8;
        } else {
            self.p &= !(flag as u8);
        }
    }

    pub(crate) fn flag(&self, flag: StatusFlag) -> bool {
        self.p & (flag as u8) != 0
    }

    pub(crate) fn update_zero_and_negative(&mut self, value: u8) {
        self.set_flag(StatusFlag::Zero, value == 0);
        self.set_flag(StatusFlag::Negative, value & 0x80 != 0);
    }

    // -- Fetch ------------------------------------------------------------------

    /// Reads the byte at PC and advances PC by one.
    pub(crate) fn fetch_u8(&mut self) -> u8 {
        let value = self.get_memory(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads the little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_u16(&mut self) -> u16 {
        let lo = self.fetch_u8();
        let hi = self.fetch_u8();
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn read_u16(&self, addr: u16) -> u16 {
        let lo = self.get_memory(addr);
        let hi = self.get_memory(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Reads a little-endian word from a zero-page pointer, wrapping the
    /// high-byte fetch within the zero page rather than crossing into page 1.
    pub(crate) fn read_u16_zero_page_wrapped(&self, zp_addr: u8) -> u16 {
        let lo = self.get_memory(zp_addr as u16);
        let hi = self.get_memory(zp_addr.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }

    // -- Addressing-mode resolver -------------------------------------------

    /// Resolves `mode` against the instruction stream at the current PC,
    /// consuming 0, 1, or 2 bytes and advancing PC accordingly.
    pub(crate) fn resolve(&mut self, mode: Mode) -> OperandRef {
        match mode {
            Mode::Accumulator => OperandRef::Accumulator,
            Mode::Implied => OperandRef::Implied,
            Mode::Immediate => OperandRef::Immediate(self.fetch_u8()),
            Mode::Relative => OperandRef::Relative(self.fetch_u8() as i8),
            Mode::Absolute => OperandRef::Memory(self.fetch_u16()),
            Mode::ZeroPage => OperandRef::Memory(self.fetch_u8() as u16),
            Mode::ZeroPageX => {
                OperandRef::Memory(self.fetch_u8().wrapping_add(self.x) as u16)
            }
            Mode::ZeroPageY => {
                OperandRef::Memory(self.fetch_u8().wrapping_add(self.y) as u16)
            }
            Mode::AbsoluteIndexedX => {
                let base = self.fetch_u16();
                OperandRef::Memory(base.wrapping_add(self.x as u16))
            }
            Mode::AbsoluteIndexedY => {
                let base = self.fetch_u16();
                OperandRef::Memory(base.wrapping_add(self.y as u16))
            }
            Mode::IndirectX => {
                let zp = self.fetch_u8().wrapping_add(self.x);
                OperandRef::Memory(self.read_u16_zero_page_wrapped(zp))
            }
            Mode::IndirectY => {
                let zp = self.fetch_u8();
                let base = self.read_u16_zero_page_wrapped(zp);
                OperandRef::Memory(base.wrapping_add(self.y as u16))
            }
            Mode::Indirect => {
                let pointer = self.fetch_u16();
                // Hardware bug: if the pointer's low byte is 0xFF, the high
                // byte of the target is fetched from the start of the same
                // page rather than the next one.
                let hi_addr = if pointer & 0x00FF == 0x00FF {
                    pointer & 0xFF00
                } else {
                    pointer.wrapping_add(1)
                };
                let lo = self.get_memory(pointer);
                let hi = self.get_memory(hi_addr);
                OperandRef::Memory(u16::from_le_bytes([lo, hi]))
            }
        }
    }

    /// Reads the value an operand reference points to. Reading an `Implied`
    /// operand is only ever done by handlers that ignore the result.
    pub(crate) fn read_operand(&self, op: OperandRef) -> u8 {
        match op {
            OperandRef::Accumulator => self.a,
            OperandRef::Memory(addr) => self.get_memory(addr),
            OperandRef::Immediate(value) => value,
            OperandRef::Implied => 0,
            OperandRef::Relative(offset) => offset as u8,
        }
    }

    /// Writes through an operand reference. `Immediate`, `Implied`, and
    /// `Relative` are not writable; per the error-handling contract this is
    /// a client bug, asserted in debug builds and a no-op in release.
    pub(crate) fn write_operand(&mut self, op: OperandRef, value: u8) {
        match op {
            OperandRef::Accumulator => self.a = value,
            OperandRef::Memory(addr) => self.set_memory(addr, value),
            OperandRef::Immediate(_) | OperandRef::Implied | OperandRef::Relative(_) => {
                debug_assert!(false, "attempted to write through a non-writable operand");
            }
        }
    }

    // -- Stack ------------------------------------------------------------------

    pub(crate) fn push_u8(&mut self, value: u8) {
        self.set_memory(STACK_PAGE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull_u8(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.get_memory(STACK_PAGE | self.sp as u16)
    }

    /// Pushes high byte then low byte, matching the hardware push order used
    /// by both JSR and BRK.
    pub(crate) fn push_u16(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push_u8(hi);
        self.push_u8(lo);
    }

    /// Pops low byte then high byte and reassembles with OR, matching the
    /// hardware pop order used by both RTS/RTI.
    pub(crate) fn pull_u16(&mut self) -> u16 {
        let lo = self.pull_u8();
        let hi = self.pull_u8();
        u16::from_le_bytes([lo, hi])
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu::new()
    }
}
