//! Branches, jumps, subroutine linkage, interrupt return, and the
//! single-flag instructions.

use crate::constants::InterruptVector;
use crate::cpu::Cpu;
use crate::operand::{Mode, OperandRef};
use crate::status::StatusFlag;

fn branch(cpu: &mut Cpu, mode: Mode, take: bool) {
    let op = cpu.resolve(mode);
    if take {
        if let OperandRef::Relative(offset) = op {
            // PC is already past the operand byte; the offset is relative to that.
            cpu.pc = cpu.pc.wrapping_add(offset as i16 as u16);
        }
    }
}

pub fn bpl(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    branch(cpu, mode, !cpu.flag(StatusFlag::Negative));
}

pub fn bmi(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    branch(cpu, mode, cpu.flag(StatusFlag::Negative));
}

pub fn bvc(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    branch(cpu, mode, !cpu.flag(StatusFlag::Overflow));
}

pub fn bvs(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    branch(cpu, mode, cpu.flag(StatusFlag::Overflow));
}

pub fn bcc(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    branch(cpu, mode, !cpu.flag(StatusFlag::Carry));
}

pub fn bcs(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    branch(cpu, mode, cpu.flag(StatusFlag::Carry));
}

pub fn bne(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    branch(cpu, mode, !cpu.flag(StatusFlag::Zero));
}

pub fn beq(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    branch(cpu, mode, cpu.flag(StatusFlag::Zero));
}

/// Pushes PC+1 (PC already points one past the single BRK byte), then P with
/// B=1 and U=1, sets I, and jumps to the IRQ/BRK vector — not the reset
/// vector.
pub fn brk(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.push_u16(cpu.pc.wrapping_add(1));
    let pushed = cpu.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8;
    cpu.push_u8(pushed);
    cpu.set_flag(StatusFlag::InterruptDisable, true);
    cpu.pc = cpu.read_u16(InterruptVector::IrqOrBrk.address());
}

/// Pops P (B/U are not restored from the stack), then pops PC with no +1,
/// unlike RTS.
pub fn rti(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.p = cpu.pull_u8();
    cpu.pc = cpu.pull_u16();
}

pub fn jsr(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let op = cpu.resolve(mode);
    let target = match op {
        OperandRef::Memory(addr) => addr,
        _ => unreachable!("JSR is always absolute"),
    };
    cpu.push_u16(cpu.pc.wrapping_sub(1));
    cpu.pc = target;
}

pub fn rts(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.pc = cpu.pull_u16().wrapping_add(1);
}

pub fn jmp(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let op = cpu.resolve(mode);
    match op {
        OperandRef::Memory(addr) => cpu.pc = addr,
        _ => unreachable!("JMP is always absolute or indirect"),
    }
}

pub fn clc(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_flag(StatusFlag::Carry, false);
}

pub fn sec(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_flag(StatusFlag::Carry, true);
}

pub fn cld(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_flag(StatusFlag::Decimal, false);
}

pub fn sed(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_flag(StatusFlag::Decimal, true);
}

pub fn cli(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_flag(StatusFlag::InterruptDisable, false);
}

pub fn sei(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_flag(StatusFlag::InterruptDisable, true);
}

pub fn clv(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_flag(StatusFlag::Overflow, false);
}

pub fn nop(_cpu: &mut Cpu, _mode: Mode, _opcode: u8) {}

#[cfg(test)]
mod test {
    use crate::cpu::Cpu;
    use crate::status::StatusFlag;

    #[test]
    fn branch_taken_backward_lands_on_self() {
        let mut cpu = Cpu::new();
        cpu.set_flag(StatusFlag::Zero, false);
        cpu.load(&[0xD0, 0xFE], 0x0200); // BNE -2
        cpu.pc = 0x0200;
        cpu.step();
        assert_eq!(cpu.pc, 0x0200);
    }

    #[test]
    fn branch_not_taken_just_advances_past_operand() {
        let mut cpu = Cpu::new();
        cpu.set_flag(StatusFlag::Zero, true);
        cpu.load(&[0xD0, 0xFE], 0x0200); // BNE -2, but Z=1 so no branch
        cpu.pc = 0x0200;
        cpu.step();
        assert_eq!(cpu.pc, 0x0202);
    }

    #[test]
    fn indirect_jmp_page_boundary_bug() {
        let mut cpu = Cpu::new();
        cpu.set_memory(0x02FF, 0x34);
        cpu.set_memory(0x0300, 0x12);
        cpu.set_memory(0x0200, 0x12);
        cpu.load(&[0x6C, 0xFF, 0x02], 0x0100); // JMP ($02FF)
        cpu.pc = 0x0100;
        cpu.step();
        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn jsr_then_rts_round_trips_pc_and_sp() {
        let mut cpu = Cpu::new();
        cpu.sp = 0xFD;
        cpu.load(&[0x20, 0x00, 0x04], 0x0300); // JSR $0400
        cpu.set_memory(0x0400, 0x60); // RTS
        cpu.pc = 0x0300;
        cpu.step();
        assert_eq!(cpu.pc, 0x0400);
        cpu.step();
        assert_eq!(cpu.pc, 0x0303);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn brk_jumps_to_irq_vector_not_reset_vector() {
        let mut cpu = Cpu::new();
        cpu.sp = 0xFD;
        cpu.set_memory(0xFFFE, 0x00);
        cpu.set_memory(0xFFFF, 0x90);
        cpu.set_memory(0xFFFC, 0x00);
        cpu.set_memory(0xFFFD, 0x80);
        cpu.load(&[0x00], 0x0200); // BRK
        cpu.pc = 0x0200;
        cpu.step();
        assert_eq!(cpu.pc, 0x9000);
        assert!(cpu.flag(StatusFlag::InterruptDisable));
    }

    #[test]
    fn brk_then_rti_restores_pc_and_status() {
        let mut cpu = Cpu::new();
        cpu.sp = 0xFD;
        cpu.p = 0b0000_1101; // arbitrary N/V/D/I/Z/C mix, no B, no U
        cpu.set_memory(0xFFFE, 0x00);
        cpu.set_memory(0xFFFF, 0x90);
        cpu.set_memory(0x9000, 0x40); // RTI
        cpu.load(&[0x00], 0x0200); // BRK
        cpu.pc = 0x0200;
        let status_before = cpu.p;
        cpu.step(); // BRK
        cpu.pc = 0x9000;
        cpu.step(); // RTI
        assert_eq!(cpu.pc, 0x0202, "RTI must not add one, unlike RTS");
        assert_eq!(
            cpu.p & 0b1100_1111,
            status_before & 0b1100_1111,
            "N V D I Z C must round-trip through BRK/RTI"
        );
    }
}
