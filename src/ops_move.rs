//! Loads, stores, register transfers, and the stack push/pop instructions.

use crate::cpu::Cpu;
use crate::operand::Mode;
use crate::status::StatusFlag;

pub fn lda(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let op = cpu.resolve(mode);
    cpu.a = cpu.read_operand(op);
    cpu.update_zero_and_negative(cpu.a);
}

pub fn ldx(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let op = cpu.resolve(mode);
    cpu.x = cpu.read_operand(op);
    cpu.update_zero_and_negative(cpu.x);
}

pub fn ldy(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let op = cpu.resolve(mode);
    cpu.y = cpu.read_operand(op);
    cpu.update_zero_and_negative(cpu.y);
}

pub fn sta(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let op = cpu.resolve(mode);
    cpu.write_operand(op, cpu.a);
}

pub fn stx(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let op = cpu.resolve(mode);
    cpu.write_operand(op, cpu.x);
}

pub fn sty(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let op = cpu.resolve(mode);
    cpu.write_operand(op, cpu.y);
}

pub fn tax(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.x = cpu.a;
    cpu.update_zero_and_negative(cpu.x);
}

pub fn txa(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.a = cpu.x;
    cpu.update_zero_and_negative(cpu.a);
}

pub fn tay(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.y = cpu.a;
    cpu.update_zero_and_negative(cpu.y);
}

pub fn tya(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.a = cpu.y;
    cpu.update_zero_and_negative(cpu.a);
}

pub fn tsx(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.x = cpu.sp;
    cpu.update_zero_and_negative(cpu.x);
}

/// No flags: SP is not one of the registers the N/Z test covers.
pub fn txs(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.sp = cpu.x;
}

pub fn pha(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.push_u8(cpu.a);
}

pub fn pla(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.a = cpu.pull_u8();
    cpu.update_zero_and_negative(cpu.a);
}

/// Pushes P with B and U forced to 1, independent of their current value.
pub fn php(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let pushed = cpu.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8;
    cpu.push_u8(pushed);
}

/// B and U are not restored from the stack; U still reads back as 1 via
/// `get_status`, and B keeps whatever hardware-fixed meaning applies outside
/// an explicit push.
pub fn plp(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.p = cpu.pull_u8();
}

#[cfg(test)]
mod test {
    use crate::cpu::Cpu;
    use crate::status::StatusFlag;

    #[test]
    fn lda_immediate_sets_zero_flag() {
        let mut cpu = Cpu::new();
        cpu.load(&[0xA9, 0x00], 0x0200);
        cpu.set_memory(0xFFFC, 0x00);
        cpu.set_memory(0xFFFD, 0x02);
        cpu.reset();
        cpu.step();
        assert_eq!(cpu.a, 0);
        assert!(cpu.flag(StatusFlag::Zero));
        assert!(!cpu.flag(StatusFlag::Negative));
        assert_eq!(cpu.pc, 0x0202);
    }

    #[test]
    fn lda_immediate_sets_negative_flag() {
        let mut cpu = Cpu::new();
        cpu.load(&[0xA9, 0x80], 0x0200);
        cpu.pc = 0x0200;
        cpu.step();
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.flag(StatusFlag::Negative));
        assert!(!cpu.flag(StatusFlag::Zero));
    }

    #[test]
    fn tax_then_txa_round_trips_a() {
        let mut cpu = Cpu::new();
        cpu.a = 0x42;
        cpu.load(&[0xAA, 0x8A], 0x0200);
        cpu.pc = 0x0200;
        cpu.step(); // TAX
        assert_eq!(cpu.x, 0x42);
        cpu.a = 0;
        cpu.step(); // TXA
        assert_eq!(cpu.a, 0x42);
        assert!(!cpu.flag(StatusFlag::Zero));
    }

    #[test]
    fn txs_does_not_touch_flags() {
        let mut cpu = Cpu::new();
        cpu.x = 0x00;
        cpu.p = 0;
        cpu.load(&[0x9A], 0x0200);
        cpu.pc = 0x0200;
        cpu.step();
        assert_eq!(cpu.sp, 0x00);
        assert_eq!(cpu.p, 0, "TXS must not update N/Z despite moving a zero value");
    }

    #[test]
    fn pha_then_pla_round_trips_a_and_sets_flags() {
        let mut cpu = Cpu::new();
        cpu.a = 0x99;
        cpu.sp = 0xFD;
        cpu.load(&[0x48, 0xA9, 0x00, 0x68], 0x0200);
        cpu.pc = 0x0200;
        cpu.step(); // PHA
        assert_eq!(cpu.get_memory(0x01FD), 0x99);
        assert_eq!(cpu.sp, 0xFC);
        cpu.step(); // LDA #$00, to prove PLA overwrites it
        cpu.step(); // PLA
        assert_eq!(cpu.a, 0x99);
        assert_eq!(cpu.sp, 0xFD);
        assert!(cpu.flag(StatusFlag::Negative));
    }

    #[test]
    fn stack_wraps_within_page_one() {
        let mut cpu = Cpu::new();
        cpu.sp = 0x00;
        cpu.a = 0x11;
        cpu.load(&[0x48], 0x0200);
        cpu.pc = 0x0200;
        cpu.step();
        assert_eq!(cpu.get_memory(0x0100), 0x11);
        assert_eq!(cpu.sp, 0xFF);
    }

    #[test]
    fn php_forces_break_and_unused_plp_does_not_restore_them() {
        let mut cpu = Cpu::new();
        cpu.sp = 0xFD;
        cpu.p = 0; // B and U both clear going in
        cpu.load(&[0x08, 0x28], 0x0200);
        cpu.pc = 0x0200;
        cpu.step(); // PHP
        let pushed = cpu.get_memory(0x01FD);
        assert_eq!(pushed & StatusFlag::Break as u8, StatusFlag::Break as u8);
        assert_eq!(pushed & StatusFlag::Unused as u8, StatusFlag::Unused as u8);
        cpu.p = 0xFF;
        cpu.step(); // PLP restores the pushed byte verbatim
        assert_eq!(cpu.p, pushed);
        assert_eq!(cpu.get_status(), pushed | StatusFlag::Unused as u8);
    }
}
