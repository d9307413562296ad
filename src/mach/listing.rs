use super::{Address, Opcode, Program, State, MEMORY_SIZE, PROGRAM_ORIGIN};

/// ## Disassembly
///
/// A run of instruction words with their addresses. `Display` prints
/// one `[addr] word ; mnemonic` line each, with `>` marking `pc`.

#[derive(Debug, Clone, Default)]
pub struct Listing {
    start: Address,
    words: Vec<u16>,
    pc: Option<Address>,
    labels: Vec<(Address, String)>,
}

impl Listing {
    /// Up to `count` words of `state` memory starting at `from`.
    pub fn new(state: &State, from: Address, count: usize) -> Listing {
        let words = (0..count)
            .map(|n| from as usize + 2 * n)
            .take_while(|addr| addr + 1 < MEMORY_SIZE)
            .map(|addr| u16::from_be_bytes([state.memory[addr], state.memory[addr + 1]]))
            .collect();
        Listing {
            start: from,
            words,
            pc: Some(state.pc),
            labels: vec![],
        }
    }

    pub fn of_program(program: &Program) -> Listing {
        let mut labels: Vec<(Address, String)> = program
            .link()
            .labels()
            .map(|(name, addr)| (addr, name.to_string()))
            .collect();
        labels.sort();
        Listing {
            start: PROGRAM_ORIGIN,
            words: program.ops().iter().map(Opcode::encode).collect(),
            pc: None,
            labels,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Address, u16, Opcode)> + '_ {
        let start = self.start;
        self.words
            .iter()
            .enumerate()
            .map(move |(n, word)| (start + 2 * n as Address, *word, Opcode::decode(*word)))
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (addr, word, opcode) in self.iter() {
            for (_, name) in self.labels.iter().filter(|(a, _)| *a == addr) {
                writeln!(f, "{}:", name)?;
            }
            let marker = if self.pc == Some(addr) { '>' } else { ' ' };
            writeln!(f, "{}[0x{:03X}] 0x{:04X} ; {}", marker, addr, word, opcode)?;
        }
        Ok(())
    }
}
