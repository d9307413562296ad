use super::operation::{self, Options, Step};
use super::{Address, Program, State, MEMORY_SIZE, PROGRAM_ORIGIN};
use crate::error;
use crate::lang::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;

type Result<T> = std::result::Result<T, Error>;

/// ## Execution driver
///
/// Owns the live machine, at most one snapshot, the quirk options and
/// the random source. The host calls `execute` once per frame and
/// `tick` at the timer cadence.

pub struct Runtime {
    state: State,
    saved: Option<State>,
    options: Options,
    rng: StdRng,
    loaded: bool,
    paused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Nothing loaded, or paused.
    Stopped,
    /// The cycle budget ran out.
    Running,
    /// Parked on a key wait.
    Waiting,
    Unimplemented(Address, u16),
    /// The runtime pauses itself before reporting a fault.
    Fault(Error),
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new(Options::default())
    }
}

impl Runtime {
    pub fn new(options: Options) -> Runtime {
        Runtime::with_rng(options, StdRng::from_entropy())
    }

    /// Deterministic random numbers for tests and replays.
    pub fn with_seed(options: Options, seed: u64) -> Runtime {
        Runtime::with_rng(options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(options: Options, rng: StdRng) -> Runtime {
        Runtime {
            state: State::new(),
            saved: None,
            options,
            rng,
            loaded: false,
            paused: false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reset the machine and copy a raw image to the program origin.
    /// Returns the CRC-32 of the image.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<u32> {
        let capacity = MEMORY_SIZE - PROGRAM_ORIGIN as usize;
        if rom.len() > capacity {
            return Err(error!(OutOfMemory; &format!("{} BYTES, {} AVAILABLE", rom.len(), capacity)));
        }
        self.state.reset();
        let start = PROGRAM_ORIGIN as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        self.saved = None;
        self.loaded = true;
        self.paused = false;
        let crc = crc::crc32::checksum_ieee(rom);
        log::debug!("loaded {} bytes, crc32 {:08x}", rom.len(), crc);
        Ok(crc)
    }

    /// Load a compiled program. A program with errors is refused and
    /// the current machine is left alone.
    pub fn load_program(&mut self, program: &Program) -> Result<u32> {
        if let Some(error) = program.errors().first() {
            return Err(error.clone());
        }
        self.load_rom(&program.image())
    }

    /// Execute exactly one instruction, paused or not.
    pub fn step(&mut self) -> Result<Step> {
        let result = operation::step(&mut self.state, &self.options, &mut self.rng);
        if let Err(error) = &result {
            log::debug!("fault: {}", error);
            self.paused = true;
        }
        result
    }

    /// Run up to `cycles` instructions.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if !self.loaded || self.paused {
            return Event::Stopped;
        }
        for _ in 0..cycles {
            let pc = self.state.pc;
            match self.step() {
                Ok(Step::Executed(_)) => {}
                Ok(Step::Waiting) => return Event::Waiting,
                Ok(Step::Unimplemented(word)) => return Event::Unimplemented(pc, word),
                Err(error) => return Event::Fault(error),
            }
        }
        Event::Running
    }

    /// One timer period: both timers count down to zero.
    pub fn tick(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Copy the live machine into the snapshot, replacing any earlier one.
    pub fn save(&mut self) {
        log::debug!("snapshot at 0x{:03X}", self.state.pc);
        self.saved = Some(self.state.clone());
    }

    /// Rewind to the snapshot. The snapshot is kept for another rewind.
    pub fn restore(&mut self) -> bool {
        match &self.saved {
            Some(saved) => {
                self.state = saved.clone();
                log::debug!("restored 0x{:03X}", self.state.pc);
                true
            }
            None => false,
        }
    }

    pub fn has_snapshot(&self) -> bool {
        self.saved.is_some()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
