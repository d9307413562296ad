use crate::lang::Error;
use crate::mach::{execute, Opcode, Options, State, Step, PROGRAM_ORIGIN};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod compile_test;
mod engine_test;

/// Fresh machine with `words` stored from the program origin.
fn machine(words: &[u16]) -> State {
    let mut state = State::new();
    for (n, word) in words.iter().enumerate() {
        let addr = PROGRAM_ORIGIN as usize + 2 * n;
        state.memory[addr..addr + 2].copy_from_slice(&word.to_be_bytes());
    }
    state
}

fn exec(state: &mut State, word: u16) -> Result<Step, Error> {
    exec_with(state, word, &Options::default())
}

fn exec_with(state: &mut State, word: u16, options: &Options) -> Result<Step, Error> {
    let mut rng = StdRng::seed_from_u64(8);
    execute(state, Opcode::decode(word), options, &mut rng)
}
