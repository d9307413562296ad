#![allow(dead_code)]
use chip8::mach::{Event, Layout, Options, Program, Runtime};

pub fn runtime() -> Runtime {
    Runtime::with_seed(Options::default(), 1)
}

/// Compile and load, panicking on compile errors.
pub fn load(source: &str, layout: Layout) -> (Runtime, Program) {
    let program = Program::compile(source, layout);
    assert!(program.is_ok(), "{:?}", program.errors());
    let mut r = runtime();
    r.load_program(&program).unwrap();
    (r, program)
}

pub fn rom(words: &[u16]) -> Runtime {
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
    let mut r = runtime();
    r.load_rom(&bytes).unwrap();
    r
}

/// Execute until anything other than `Running`, giving up after `frames`.
pub fn exec_n(runtime: &mut Runtime, frames: usize) -> Event {
    for _ in 0..frames {
        match runtime.execute(100) {
            Event::Running => runtime.tick(),
            event => return event,
        }
    }
    Event::Running
}

pub fn exec(runtime: &mut Runtime) -> Event {
    exec_n(runtime, 50)
}
