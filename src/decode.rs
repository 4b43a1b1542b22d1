//! The frozen 256-entry decoder table: opcode byte -> (handler, mode,
//! mnemonic). Every byte decodes to something; the 105 bytes with no legal
//! meaning all route to the illegal-opcode trap.

use crate::cpu::Cpu;
use crate::operand::Mode;
use crate::ops_illegal::illegal;
use crate::ops_jump::*;
use crate::ops_logical::*;
use crate::ops_move::*;

pub type Handler = fn(&mut Cpu, Mode, u8);

#[derive(Clone, Copy)]
pub struct DecoderEntry {
    pub handler: Handler,
    pub mode: Mode,
    pub mnemonic: &'static str,
}

#[inline]
pub fn decode(opcode: u8) -> DecoderEntry {
    let (handler, mode, mnemonic) = TABLE[opcode as usize];
    DecoderEntry {
        handler,
        mode,
        mnemonic,
    }
}

use Mode::*;

/// One row per hex digit of the opcode's high nibble, matching how the
/// canonical MOS 6502 matrix is usually laid out in documentation. `ill`
/// below is the illegal-opcode trap, used for every one of the 105 bytes
/// with no documented meaning.
const ILL: (Handler, Mode, &str) = (illegal, Implied, "???");

#[rustfmt::skip]
static TABLE: [(Handler, Mode, &str); 256] = [
    // 0x00
    (brk, Implied, "brk"), (ora, IndirectX, "ora"), ILL, ILL,
    ILL, (ora, ZeroPage, "ora"), (asl, ZeroPage, "asl"), ILL,
    (php, Implied, "php"), (ora, Immediate, "ora"), (asl, Accumulator, "asl"), ILL,
    ILL, (ora, Absolute, "ora"), (asl, Absolute, "asl"), ILL,
    // 0x10
    (bpl, Relative, "bpl"), (ora, IndirectY, "ora"), ILL, ILL,
    ILL, (ora, ZeroPageX, "ora"), (asl, ZeroPageX, "asl"), ILL,
    (clc, Implied, "clc"), (ora, AbsoluteIndexedY, "ora"), ILL, ILL,
    ILL, (ora, AbsoluteIndexedX, "ora"), (asl, AbsoluteIndexedX, "asl"), ILL,
    // 0x20
    (jsr, Absolute, "jsr"), (and, IndirectX, "and"), ILL, ILL,
    (bit, ZeroPage, "bit"), (and, ZeroPage, "and"), (rol, ZeroPage, "rol"), ILL,
    (plp, Implied, "plp"), (and, Immediate, "and"), (rol, Accumulator, "rol"), ILL,
    (bit, Absolute, "bit"), (and, Absolute, "and"), (rol, Absolute, "rol"), ILL,
    // 0x30
    (bmi, Relative, "bmi"), (and, IndirectY, "and"), ILL, ILL,
    ILL, (and, ZeroPageX, "and"), (rol, ZeroPageX, "rol"), ILL,
    (sec, Implied, "sec"), (and, AbsoluteIndexedY, "and"), ILL, ILL,
    ILL, (and, AbsoluteIndexedX, "and"), (rol, AbsoluteIndexedX, "rol"), ILL,
    // 0x40
    (rti, Implied, "rti"), (eor, IndirectX, "eor"), ILL, ILL,
    ILL, (eor, ZeroPage, "eor"), (lsr, ZeroPage, "lsr"), ILL,
    (pha, Implied, "pha"), (eor, Immediate, "eor"), (lsr, Accumulator, "lsr"), ILL,
    (jmp, Absolute, "jmp"), (eor, Absolute, "eor"), (lsr, Absolute, "lsr"), ILL,
    // 0x50
    (bvc, Relative, "bvc"), (eor, IndirectY, "eor"), ILL, ILL,
    ILL, (eor, ZeroPageX, "eor"), (lsr, ZeroPageX, "lsr"), ILL,
    (cli, Implied, "cli"), (eor, AbsoluteIndexedY, "eor"), ILL, ILL,
    ILL, (eor, AbsoluteIndexedX, "eor"), (lsr, AbsoluteIndexedX, "lsr"), ILL,
    // 0x60
    (rts, Implied, "rts"), (adc, IndirectX, "adc"), ILL, ILL,
    ILL, (adc, ZeroPage, "adc"), (ror, ZeroPage, "ror"), ILL,
    (pla, Implied, "pla"), (adc, Immediate, "adc"), (ror, Accumulator, "ror"), ILL,
    (jmp, Indirect, "jmp"), (adc, Absolute, "adc"), (ror, Absolute, "ror"), ILL,
    // 0x70
    (bvs, Relative, "bvs"), (adc, IndirectY, "adc"), ILL, ILL,
    ILL, (adc, ZeroPageX, "adc"), (ror, ZeroPageX, "ror"), ILL,
    (sei, Implied, "sei"), (adc, AbsoluteIndexedY, "adc"), ILL, ILL,
    ILL, (adc, AbsoluteIndexedX, "adc"), (ror, AbsoluteIndexedX, "ror"), ILL,
    // 0x80
    ILL, (sta, IndirectX, "sta"), ILL, ILL,
    (sty, ZeroPage, "sty"), (sta, ZeroPage, "sta"), (stx, ZeroPage, "stx"), ILL,
    (dey, Implied, "dey"), ILL, (txa, Implied, "txa"), ILL,
    (sty, Absolute, "sty"), (sta, Absolute, "sta"), (stx, Absolute, "stx"), ILL,
    // 0x90
    (bcc, Relative, "bcc"), (sta, IndirectY, "sta"), ILL, ILL,
    (sty, ZeroPageX, "sty"), (sta, ZeroPageX, "sta"), (stx, ZeroPageY, "stx"), ILL,
    (tya, Implied, "tya"), (sta, AbsoluteIndexedY, "sta"), (txs, Implied, "txs"), ILL,
    ILL, (sta, AbsoluteIndexedX, "sta"), ILL, ILL,
    // 0xA0
    (ldy, Immediate, "ldy"), (lda, IndirectX, "lda"), (ldx, Immediate, "ldx"), ILL,
    (ldy, ZeroPage, "ldy"), (lda, ZeroPage, "lda"), (ldx, ZeroPage, "ldx"), ILL,
    (tay, Implied, "tay"), (lda, Immediate, "lda"), (tax, Implied, "tax"), ILL,
    (ldy, Absolute, "ldy"), (lda, Absolute, "lda"), (ldx, Absolute, "ldx"), ILL,
    // 0xB0
    (bcs, Relative, "bcs"), (lda, IndirectY, "lda"), ILL, ILL,
    (ldy, ZeroPageX, "ldy"), (lda, ZeroPageX, "lda"), (ldx, ZeroPageY, "ldx"), ILL,
    (clv, Implied, "clv"), (lda, AbsoluteIndexedY, "lda"), (tsx, Implied, "tsx"), ILL,
    (ldy, AbsoluteIndexedX, "ldy"), (lda, AbsoluteIndexedX, "lda"), (ldx, AbsoluteIndexedY, "ldx"), ILL,
    // 0xC0
    (cpy, Immediate, "cpy"), (cmp, IndirectX, "cmp"), ILL, ILL,
    (cpy, ZeroPage, "cpy"), (cmp, ZeroPage, "cmp"), (dec, ZeroPage, "dec"), ILL,
    (iny, Implied, "iny"), (cmp, Immediate, "cmp"), (dex, Implied, "dex"), ILL,
    (cpy, Absolute, "cpy"), (cmp, Absolute, "cmp"), (dec, Absolute, "dec"), ILL,
    // 0xD0
    (bne, Relative, "bne"), (cmp, IndirectY, "cmp"), ILL, ILL,
    ILL, (cmp, ZeroPageX, "cmp"), (dec, ZeroPageX, "dec"), ILL,
    (cld, Implied, "cld"), (cmp, AbsoluteIndexedY, "cmp"), ILL, ILL,
    ILL, (cmp, AbsoluteIndexedX, "cmp"), (dec, AbsoluteIndexedX, "dec"), ILL,
    // 0xE0
    (cpx, Immediate, "cpx"), (sbc, IndirectX, "sbc"), ILL, ILL,
    (cpx, ZeroPage, "cpx"), (sbc, ZeroPage, "sbc"), (inc, ZeroPage, "inc"), ILL,
    (inx, Implied, "inx"), (sbc, Immediate, "sbc"), (nop, Implied, "nop"), ILL,
    (cpx, Absolute, "cpx"), (sbc, Absolute, "sbc"), (inc, Absolute, "inc"), ILL,
    // 0xF0
    (beq, Relative, "beq"), (sbc, IndirectY, "sbc"), ILL, ILL,
    ILL, (sbc, ZeroPageX, "sbc"), (inc, ZeroPageX, "inc"), ILL,
    (sed, Implied, "sed"), (sbc, AbsoluteIndexedY, "sbc"), ILL, ILL,
    ILL, (sbc, AbsoluteIndexedX, "sbc"), (inc, AbsoluteIndexedX, "inc"), ILL,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_opcode_byte_is_defined() {
        for opcode in 0u16..=255 {
            let _ = decode(opcode as u8);
        }
    }

    #[test]
    fn legal_opcode_count_is_151() {
        let legal = TABLE.iter().filter(|(_, _, mnemonic)| *mnemonic != "???").count();
        assert_eq!(legal, 151);
    }

    #[test]
    fn illegal_opcode_count_is_105() {
        let illegal = TABLE.iter().filter(|(_, _, mnemonic)| *mnemonic == "???").count();
        assert_eq!(illegal, 105);
    }
}
