use super::font::GLYPH_HEIGHT;
use super::state::PIXEL_COUNT;
use super::{Opcode, State, FLAG, KEY_COUNT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error;
use crate::lang::Error;
use rand::Rng;

type Result<T> = std::result::Result<T, Error>;

/// ## Quirk modes
///
/// Runtime switches that change instruction semantics without
/// changing the encoding.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// A draw that collides does not mark the frame dirty.
    pub anti_flicker: bool,
    /// `Fx55` and `Fx65` advance `I` past the registers they touched.
    pub legacy_increment: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            anti_flicker: true,
            legacy_increment: false,
        }
    }
}

/// What one engine invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(Opcode),
    /// `Fx0A` found no key down; `pc` is held so the next call retries.
    Waiting,
    /// Nothing handles this word; `pc` is held and nothing changed.
    Unimplemented(u16),
}

/// Fetch the instruction at `pc` and execute it.
/// Faults carry the address of the faulting instruction.
pub fn step<R: Rng + ?Sized>(state: &mut State, options: &Options, rng: &mut R) -> Result<Step> {
    let pc = state.pc;
    let word = state.fetch().map_err(|e| e.at_address(pc))?;
    let opcode = Opcode::decode(word);
    log::trace!("0x{:03X} {:04X} {}", pc, word, opcode);
    execute(state, opcode, options, rng).map_err(|e| e.at_address(pc))
}

/// Execute exactly one instruction, including its `pc` advance.
/// On error the state is left as it was.
pub fn execute<R: Rng + ?Sized>(
    state: &mut State,
    opcode: Opcode,
    options: &Options,
    rng: &mut R,
) -> Result<Step> {
    use Opcode::*;
    match opcode {
        Cls => {
            state.pixels = [0; PIXEL_COUNT];
            state.draw_dirty = true;
            advance(state);
        }
        Ret => {
            let addr = state.stack.pop()?;
            state.pc = addr.wrapping_add(2);
        }
        Jump(nnn) => state.pc = nnn,
        Call(nnn) => {
            state.stack.push(state.pc)?;
            state.pc = nnn;
        }

        SkipEq(x, nn) => skip_if(state, state.v[reg(x)] == nn),
        SkipNe(x, nn) => skip_if(state, state.v[reg(x)] != nn),
        SkipNeReg(x, y) => skip_if(state, state.v[reg(x)] != state.v[reg(y)]),
        SkipKey(x) => {
            let down = key(state, x)?;
            skip_if(state, down);
        }
        SkipNoKey(x) => {
            let down = key(state, x)?;
            skip_if(state, !down);
        }

        Load(x, nn) => {
            state.v[reg(x)] = nn;
            advance(state);
        }
        AddImm(x, nn) => {
            state.v[reg(x)] = state.v[reg(x)].wrapping_add(nn);
            advance(state);
        }
        Move(x, y) => {
            state.v[reg(x)] = state.v[reg(y)];
            advance(state);
        }
        And(x, y) => {
            state.v[reg(x)] &= state.v[reg(y)];
            advance(state);
        }
        Xor(x, y) => {
            state.v[reg(x)] ^= state.v[reg(y)];
            advance(state);
        }
        AddReg(x, y) => {
            let (sum, carry) = state.v[reg(x)].overflowing_add(state.v[reg(y)]);
            with_flag(state, x, sum, carry);
        }
        SubReg(x, y) => {
            let (lhs, rhs) = (state.v[reg(x)], state.v[reg(y)]);
            with_flag(state, x, lhs.wrapping_sub(rhs), rhs <= lhs);
        }
        Shr(x, _) => {
            let val = state.v[reg(x)];
            with_flag(state, x, val >> 1, val & 1 == 1);
        }
        Random(x, nn) => {
            state.v[reg(x)] = rng.gen::<u8>() & nn;
            advance(state);
        }

        LoadIndex(nnn) => {
            state.i = nnn;
            advance(state);
        }
        AddIndex(x) => {
            let val = state.v[reg(x)];
            let overflow = state.i as usize + val as usize > 0xFFF;
            state.v[FLAG] = overflow as u8;
            state.i = state.i.wrapping_add(val as u16);
            advance(state);
        }
        Glyph(x) => {
            state.i = state.v[reg(x)] as u16 * GLYPH_HEIGHT as u16;
            advance(state);
        }
        Bcd(x) => {
            let range = state.range(state.i, 3)?;
            let val = state.v[reg(x)];
            state.memory[range].copy_from_slice(&[val / 100, val / 10 % 10, val % 10]);
            advance(state);
        }
        Store(x) => {
            let len = reg(x) + 1;
            let range = state.range(state.i, len)?;
            state.memory[range].copy_from_slice(&state.v[..len]);
            legacy_increment(state, options, len);
            advance(state);
        }
        Fill(x) => {
            let len = reg(x) + 1;
            let range = state.range(state.i, len)?;
            state.v[..len].copy_from_slice(&state.memory[range]);
            legacy_increment(state, options, len);
            advance(state);
        }
        Draw(x, y, n) => {
            draw(state, options, x, y, n)?;
            advance(state);
        }

        GetDelay(x) => {
            state.v[reg(x)] = state.delay_timer;
            advance(state);
        }
        WaitKey(x) => match (0..KEY_COUNT).find(|&k| state.keys[k]) {
            Some(k) => {
                state.v[reg(x)] = k as u8;
                advance(state);
            }
            None => return Ok(Step::Waiting),
        },
        SetDelay(x) => {
            state.delay_timer = state.v[reg(x)];
            advance(state);
        }
        SetSound(x) => {
            state.sound_timer = state.v[reg(x)];
            advance(state);
        }

        Unknown(word) => {
            log::warn!("unimplemented: {:04X} at 0x{:03X}", word, state.pc);
            return Ok(Step::Unimplemented(word));
        }
    }
    Ok(Step::Executed(opcode))
}

fn reg(x: u8) -> usize {
    (x & 0xF) as usize
}

fn advance(state: &mut State) {
    state.pc = state.pc.wrapping_add(2);
}

fn skip_if(state: &mut State, condition: bool) {
    state.pc = state.pc.wrapping_add(if condition { 4 } else { 2 });
}

/// Flag first, then the result, so `x == F` keeps the result.
fn with_flag(state: &mut State, x: u8, val: u8, flag: bool) {
    state.v[FLAG] = flag as u8;
    state.v[reg(x)] = val;
    advance(state);
}

fn key(state: &State, x: u8) -> Result<bool> {
    let k = state.v[reg(x)] as usize;
    if k >= KEY_COUNT {
        return Err(error!(InvalidKey; &format!("V{:X} = {}", x, k)));
    }
    Ok(state.keys[k])
}

fn legacy_increment(state: &mut State, options: &Options, len: usize) {
    if options.legacy_increment {
        state.i = state.i.wrapping_add(len as u16);
    }
}

fn draw(state: &mut State, options: &Options, x: u8, y: u8, n: u8) -> Result<()> {
    let rows = state.range(state.i, n as usize)?;
    let x_pos = state.v[reg(x)] as usize;
    let y_pos = state.v[reg(y)] as usize;
    let mut collision = false;
    for (row, addr) in rows.enumerate() {
        let bits = state.memory[addr];
        for col in 0..8 {
            if bits & (0x80 >> col) == 0 {
                continue;
            }
            let px = (x_pos + col) % SCREEN_WIDTH;
            let py = (y_pos + row) % SCREEN_HEIGHT;
            let pixel = &mut state.pixels[py * SCREEN_WIDTH + px];
            if *pixel == 1 {
                collision = true;
            }
            *pixel ^= 1;
        }
    }
    state.v[FLAG] = collision as u8;
    if !(collision && options.anti_flicker) {
        state.draw_dirty = true;
    }
    Ok(())
}
