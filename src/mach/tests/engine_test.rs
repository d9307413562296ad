use super::*;
use crate::mach::{FLAG, KEY_COUNT};

#[test]
fn test_load_immediate_every_register_and_byte() {
    for x in 0..16u16 {
        for nn in 0..=255u16 {
            let mut s = State::new();
            exec(&mut s, 0x6000 | x << 8 | nn).unwrap();
            assert_eq!(s.v[x as usize], nn as u8);
            assert_eq!(s.pc, PROGRAM_ORIGIN + 2);
        }
    }
}

#[test]
fn test_add_immediate_twice() {
    for x in 0..16u16 {
        let mut s = State::new();
        exec(&mut s, 0x7001 | x << 8).unwrap();
        exec(&mut s, 0x7001 | x << 8).unwrap();
        assert_eq!(s.v[x as usize], 2);
        assert_eq!(s.pc, PROGRAM_ORIGIN + 4);
    }
}

#[test]
fn test_add_immediate_wraps_without_flag() {
    let mut s = State::new();
    s.v[2] = 0xFF;
    exec(&mut s, 0x7203).unwrap();
    assert_eq!(s.v[2], 0x02);
    assert_eq!(s.v[FLAG], 0);
}

#[test]
fn test_skip_if_equal() {
    for &(val, nn) in &[(0u8, 0u8), (5, 5), (0xFF, 0xFF), (1, 0), (0, 0xFF), (0x80, 0x08)] {
        let mut s = State::new();
        s.v[4] = val;
        exec(&mut s, 0x3400 | nn as u16).unwrap();
        let expect = if val == nn { 4 } else { 2 };
        assert_eq!(s.pc, PROGRAM_ORIGIN + expect, "v={} nn={}", val, nn);
    }
}

#[test]
fn test_skip_if_not_equal() {
    let mut s = State::new();
    s.v[1] = 9;
    exec(&mut s, 0x4109).unwrap();
    assert_eq!(s.pc, PROGRAM_ORIGIN + 2);
    exec(&mut s, 0x4108).unwrap();
    assert_eq!(s.pc, PROGRAM_ORIGIN + 6);
}

#[test]
fn test_skip_if_registers_differ() {
    let mut s = State::new();
    s.v[1] = 3;
    s.v[2] = 3;
    exec(&mut s, 0x9120).unwrap();
    assert_eq!(s.pc, PROGRAM_ORIGIN + 2);
    s.v[2] = 4;
    exec(&mut s, 0x9120).unwrap();
    assert_eq!(s.pc, PROGRAM_ORIGIN + 6);
}

#[test]
fn test_move_and_xor() {
    let mut s = State::new();
    s.v[1] = 0b1100;
    s.v[2] = 0b1010;
    exec(&mut s, 0x8122).unwrap();
    assert_eq!(s.v[1], 0b1000);
    exec(&mut s, 0x8123).unwrap();
    assert_eq!(s.v[1], 0b0010);
    exec(&mut s, 0x8320).unwrap();
    assert_eq!(s.v[3], 0b1010);
    assert_eq!(s.pc, PROGRAM_ORIGIN + 6);
}

#[test]
fn test_add_registers_carry() {
    let mut s = State::new();
    s.v[0] = 0xFF;
    s.v[1] = 0x02;
    exec(&mut s, 0x8014).unwrap();
    assert_eq!(s.v[0], 0x01);
    assert_eq!(s.v[FLAG], 1);
    s.v[0] = 0xFE;
    s.v[1] = 0x01;
    exec(&mut s, 0x8014).unwrap();
    assert_eq!(s.v[0], 0xFF);
    assert_eq!(s.v[FLAG], 0);
}

#[test]
fn test_sub_registers_borrow() {
    let mut s = State::new();
    s.v[0] = 0x01;
    s.v[1] = 0x02;
    exec(&mut s, 0x8015).unwrap();
    assert_eq!(s.v[0], 0xFF);
    assert_eq!(s.v[FLAG], 0);
    s.v[0] = 0x05;
    s.v[1] = 0x05;
    exec(&mut s, 0x8015).unwrap();
    assert_eq!(s.v[0], 0x00);
    assert_eq!(s.v[FLAG], 1);
}

#[test]
fn test_shift_right() {
    let mut s = State::new();
    s.v[3] = 0b101;
    exec(&mut s, 0x8306).unwrap();
    assert_eq!(s.v[3], 0b10);
    assert_eq!(s.v[FLAG], 1);
    exec(&mut s, 0x8306).unwrap();
    assert_eq!(s.v[3], 0b1);
    assert_eq!(s.v[FLAG], 0);
}

#[test]
fn test_flag_register_as_destination_keeps_result() {
    let mut s = State::new();
    s.v[FLAG] = 0xFF;
    s.v[1] = 0x02;
    exec(&mut s, 0x8F14).unwrap();
    assert_eq!(s.v[FLAG], 0x01);
    s.v[FLAG] = 0x07;
    exec(&mut s, 0x8F06).unwrap();
    assert_eq!(s.v[FLAG], 0x03);
}

#[test]
fn test_random_is_masked() {
    let mut s = State::new();
    s.v[2] = 0xAA;
    exec(&mut s, 0xC200).unwrap();
    assert_eq!(s.v[2], 0);
    for _ in 0..32 {
        exec(&mut s, 0xC20F).unwrap();
        assert!(s.v[2] <= 0x0F);
    }
}

#[test]
fn test_add_index_overflow_flag() {
    let mut s = State::new();
    s.i = 0xFFF;
    s.v[2] = 0x05;
    exec(&mut s, 0xF21E).unwrap();
    assert_eq!(s.v[FLAG], 1);
    assert_eq!(s.i, 0x1004);
    s.i = 0x300;
    exec(&mut s, 0xF21E).unwrap();
    assert_eq!(s.v[FLAG], 0);
    assert_eq!(s.i, 0x305);
}

#[test]
fn test_glyph_address() {
    let mut s = State::new();
    s.v[6] = 0xA;
    exec(&mut s, 0xF629).unwrap();
    assert_eq!(s.i, 50);
    assert_eq!(&s.memory[50..55], &[0xF0, 0x90, 0xF0, 0x90, 0x90]);
}

#[test]
fn test_bcd() {
    let mut s = State::new();
    s.i = 0x300;
    s.v[0] = 101;
    exec(&mut s, 0xF033).unwrap();
    assert_eq!(&s.memory[0x300..0x303], &[1, 0, 1]);
    s.v[0] = 0;
    exec(&mut s, 0xF033).unwrap();
    assert_eq!(&s.memory[0x300..0x303], &[0, 0, 0]);
    s.v[0] = 255;
    exec(&mut s, 0xF033).unwrap();
    assert_eq!(&s.memory[0x300..0x303], &[2, 5, 5]);
    assert_eq!(s.i, 0x300);
}

#[test]
fn test_store_then_fill_restores_registers() {
    for x in 0..16u16 {
        let mut s = State::new();
        s.i = 0x400;
        for r in 0..16 {
            s.v[r] = 0x10 + r as u8;
        }
        let before = s.v;
        exec(&mut s, 0xF055 | x << 8).unwrap();
        for r in 0..=x as usize {
            s.v[r] = 0;
        }
        exec(&mut s, 0xF065 | x << 8).unwrap();
        assert_eq!(s.v, before, "x={}", x);
        assert_eq!(s.i, 0x400);
    }
}

#[test]
fn test_store_writes_only_requested_registers() {
    let mut s = State::new();
    s.i = 0x400;
    s.v[0] = 1;
    s.v[1] = 2;
    s.v[2] = 3;
    exec(&mut s, 0xF155).unwrap();
    assert_eq!(&s.memory[0x400..0x403], &[1, 2, 0]);
}

#[test]
fn test_legacy_increment() {
    let options = Options {
        legacy_increment: true,
        ..Options::default()
    };
    let mut s = State::new();
    s.i = 0x400;
    exec_with(&mut s, 0xF255, &options).unwrap();
    assert_eq!(s.i, 0x403);
    exec_with(&mut s, 0xF065, &options).unwrap();
    assert_eq!(s.i, 0x404);
}

#[test]
fn test_timers() {
    let mut s = State::new();
    s.v[3] = 60;
    exec(&mut s, 0xF315).unwrap();
    exec(&mut s, 0xF318).unwrap();
    assert_eq!(s.delay_timer, 60);
    assert_eq!(s.sound_timer, 60);
    s.delay_timer = 7;
    exec(&mut s, 0xF407).unwrap();
    assert_eq!(s.v[4], 7);
}

#[test]
fn test_key_wait_holds_pc() {
    let mut s = State::new();
    assert_eq!(exec(&mut s, 0xF50A).unwrap(), Step::Waiting);
    assert_eq!(exec(&mut s, 0xF50A).unwrap(), Step::Waiting);
    assert_eq!(s.pc, PROGRAM_ORIGIN);
    s.set_key(0xC, true);
    s.set_key(0x7, true);
    assert_eq!(
        exec(&mut s, 0xF50A).unwrap(),
        Step::Executed(Opcode::WaitKey(5))
    );
    assert_eq!(s.v[5], 0x7);
    assert_eq!(s.pc, PROGRAM_ORIGIN + 2);
}

#[test]
fn test_key_skips() {
    let mut s = State::new();
    s.v[1] = 0xB;
    exec(&mut s, 0xE19E).unwrap();
    assert_eq!(s.pc, PROGRAM_ORIGIN + 2);
    exec(&mut s, 0xE1A1).unwrap();
    assert_eq!(s.pc, PROGRAM_ORIGIN + 6);
    s.set_key(0xB, true);
    exec(&mut s, 0xE19E).unwrap();
    assert_eq!(s.pc, PROGRAM_ORIGIN + 10);
    exec(&mut s, 0xE1A1).unwrap();
    assert_eq!(s.pc, PROGRAM_ORIGIN + 12);
    assert!((0..KEY_COUNT).all(|k| s.key(k) == (k == 0xB)));
}

#[test]
fn test_jump_call_return() {
    let mut s = State::new();
    exec(&mut s, 0x1456).unwrap();
    assert_eq!(s.pc, 0x456);
    exec(&mut s, 0x2300).unwrap();
    assert_eq!(s.pc, 0x300);
    assert_eq!(s.stack.as_slice(), &[0x456]);
    exec(&mut s, 0x00EE).unwrap();
    assert_eq!(s.pc, 0x458);
    assert!(s.stack.is_empty());
}

#[test]
fn test_clear_screen() {
    let mut s = State::new();
    s.pixels[10] = 1;
    s.draw_dirty = false;
    exec(&mut s, 0x00E0).unwrap();
    assert!(s.pixels.iter().all(|&p| p == 0));
    assert!(s.draw_dirty);
}

#[test]
fn test_unknown_words_change_nothing() {
    let words = [
        0x0123, 0x00E1, 0x5120, 0x8121, 0x8127, 0x812E, 0x812F, 0x9121, 0xB123, 0xE19F, 0xF1FF,
        0xF160,
    ];
    for &word in &words {
        let mut s = machine(&[word]);
        s.v[1] = 3;
        let before = s.clone();
        assert_eq!(exec(&mut s, word).unwrap(), Step::Unimplemented(word));
        assert!(s == before, "{:04X}", word);
    }
}
