use super::{Address, Stack, FONT, KEY_COUNT, MEMORY_SIZE, PROGRAM_ORIGIN};
use super::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error;
use crate::lang::Error;
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

pub const PIXEL_COUNT: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// ## Machine state
///
/// Everything the engine reads and writes. There is no behavior here
/// beyond bounds-checked access; `Clone` is the snapshot operation.

#[derive(Clone, PartialEq)]
pub struct State {
    pub memory: [u8; MEMORY_SIZE],
    pub pc: Address,
    pub stack: Stack,
    /// The index register `I`.
    pub i: Address,
    pub v: [u8; 16],
    pub delay_timer: u8,
    pub sound_timer: u8,
    /// Row-major, each value exactly 0 or 1.
    pub pixels: [u8; PIXEL_COUNT],
    pub draw_dirty: bool,
    pub keys: [bool; KEY_COUNT],
}

impl Default for State {
    fn default() -> State {
        State::new()
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "State {{ pc: 0x{:03X}, i: 0x{:03X}, v: {:02X?}, stack: {:?}, dt: {}, st: {} }}",
            self.pc, self.i, self.v, self.stack, self.delay_timer, self.sound_timer
        )
    }
}

impl State {
    /// All zero with the font installed and `pc` at the program origin.
    pub fn new() -> State {
        let mut memory = [0; MEMORY_SIZE];
        memory[..FONT.len()].copy_from_slice(&FONT);
        State {
            memory,
            pc: PROGRAM_ORIGIN,
            stack: Stack::new(),
            i: 0,
            v: [0; 16],
            delay_timer: 0,
            sound_timer: 0,
            pixels: [0; PIXEL_COUNT],
            draw_dirty: true,
            keys: [false; KEY_COUNT],
        }
    }

    pub fn reset(&mut self) {
        *self = State::new();
    }

    /// Checked range of `len` bytes starting at `addr`.
    pub fn range(&self, addr: Address, len: usize) -> Result<Range<usize>> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(error!(AddressOutOfRange; &format!("0x{:X}..0x{:X}", start, end)));
        }
        Ok(start..end)
    }

    pub fn word(&self, addr: Address) -> Result<u16> {
        let range = self.range(addr, 2)?;
        Ok(u16::from_be_bytes([
            self.memory[range.start],
            self.memory[range.start + 1],
        ]))
    }

    /// The instruction word at `pc`.
    pub fn fetch(&self) -> Result<u16> {
        self.word(self.pc)
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y % SCREEN_HEIGHT) * SCREEN_WIDTH + (x % SCREEN_WIDTH)]
    }

    /// Consume the frame for rendering. True when pixels changed
    /// since the last call.
    pub fn take_frame(&mut self) -> bool {
        std::mem::replace(&mut self.draw_dirty, false)
    }

    pub fn set_key(&mut self, key: usize, down: bool) {
        if let Some(k) = self.keys.get_mut(key) {
            *k = down;
        }
    }

    pub fn key(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }
}
