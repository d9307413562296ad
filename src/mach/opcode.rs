use super::Address;

/// ## Virtual machine instruction set
///
/// One variant per implemented 16-bit encoding. Register operands are
/// 4-bit indices, `nn` operands are bytes and addresses are 12 bits.
/// Any word without a variant decodes to `Unknown` and the engine
/// treats it as a no-op.
///
/// For example: `v[3] += 5` compiles to `AddImm(3, 5)`, stored as `0x7305`.

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // *** Display and flow
    /// `00E0` clear every pixel.
    Cls,
    /// `00EE` pop the return address and continue after the call.
    Ret,
    /// `1nnn`
    Jump(Address),
    /// `2nnn`
    Call(Address),

    // *** Conditional skips
    /// `3xnn` skip when `v[x] == nn`.
    SkipEq(u8, u8),
    /// `4xnn` skip when `v[x] != nn`.
    SkipNe(u8, u8),
    /// `9xy0` skip when `v[x] != v[y]`.
    SkipNeReg(u8, u8),
    /// `Ex9E` skip when key `v[x]` is down.
    SkipKey(u8),
    /// `ExA1` skip when key `v[x]` is up.
    SkipNoKey(u8),

    // *** Register arithmetic
    /// `6xnn`
    Load(u8, u8),
    /// `7xnn` wrapping, flag untouched.
    AddImm(u8, u8),
    /// `8xy0`
    Move(u8, u8),
    /// `8xy2`
    And(u8, u8),
    /// `8xy3`
    Xor(u8, u8),
    /// `8xy4` with carry in `v[F]`.
    AddReg(u8, u8),
    /// `8xy5` with not-borrow in `v[F]`.
    SubReg(u8, u8),
    /// `8xy6` shifted-out bit in `v[F]`.
    Shr(u8, u8),
    /// `Cxnn` random byte masked with `nn`.
    Random(u8, u8),

    // *** Index register and memory
    /// `Annn`
    LoadIndex(Address),
    /// `Fx1E`
    AddIndex(u8),
    /// `Fx29` point at the glyph for `v[x]`.
    Glyph(u8),
    /// `Fx33` decimal digits of `v[x]`.
    Bcd(u8),
    /// `Fx55` store `v[0..=x]`.
    Store(u8),
    /// `Fx65` load `v[0..=x]`.
    Fill(u8),
    /// `Dxyn`
    Draw(u8, u8, u8),

    // *** Timers and keys
    /// `Fx07`
    GetDelay(u8),
    /// `Fx0A` hold the program counter until a key is down.
    WaitKey(u8),
    /// `Fx15`
    SetDelay(u8),
    /// `Fx18`
    SetSound(u8),

    Unknown(u16),
}

impl Opcode {
    pub fn decode(word: u16) -> Opcode {
        use Opcode::*;
        let x = ((word & 0x0F00) >> 8) as u8;
        let y = ((word & 0x00F0) >> 4) as u8;
        let n = (word & 0x000F) as u8;
        let nn = (word & 0x00FF) as u8;
        let nnn = word & 0x0FFF;
        match word >> 12 {
            0x0 => match word {
                0x00E0 => Cls,
                0x00EE => Ret,
                _ => Unknown(word),
            },
            0x1 => Jump(nnn),
            0x2 => Call(nnn),
            0x3 => SkipEq(x, nn),
            0x4 => SkipNe(x, nn),
            0x6 => Load(x, nn),
            0x7 => AddImm(x, nn),
            0x8 => match n {
                0x0 => Move(x, y),
                0x2 => And(x, y),
                0x3 => Xor(x, y),
                0x4 => AddReg(x, y),
                0x5 => SubReg(x, y),
                0x6 => Shr(x, y),
                _ => Unknown(word),
            },
            0x9 if n == 0 => SkipNeReg(x, y),
            0xA => LoadIndex(nnn),
            0xC => Random(x, nn),
            0xD => Draw(x, y, n),
            0xE => match nn {
                0x9E => SkipKey(x),
                0xA1 => SkipNoKey(x),
                _ => Unknown(word),
            },
            0xF => match nn {
                0x07 => GetDelay(x),
                0x0A => WaitKey(x),
                0x15 => SetDelay(x),
                0x18 => SetSound(x),
                0x1E => AddIndex(x),
                0x29 => Glyph(x),
                0x33 => Bcd(x),
                0x55 => Store(x),
                0x65 => Fill(x),
                _ => Unknown(word),
            },
            _ => Unknown(word),
        }
    }

    pub fn encode(&self) -> u16 {
        use Opcode::*;
        fn xnn(family: u16, x: u8, nn: u8) -> u16 {
            family << 12 | (x as u16 & 0xF) << 8 | nn as u16
        }
        fn xyn(family: u16, x: u8, y: u8, n: u8) -> u16 {
            family << 12 | (x as u16 & 0xF) << 8 | (y as u16 & 0xF) << 4 | (n as u16 & 0xF)
        }
        fn nnn(family: u16, addr: Address) -> u16 {
            family << 12 | (addr & 0x0FFF)
        }
        match *self {
            Cls => 0x00E0,
            Ret => 0x00EE,
            Jump(a) => nnn(0x1, a),
            Call(a) => nnn(0x2, a),
            SkipEq(x, nn) => xnn(0x3, x, nn),
            SkipNe(x, nn) => xnn(0x4, x, nn),
            Load(x, nn) => xnn(0x6, x, nn),
            AddImm(x, nn) => xnn(0x7, x, nn),
            Move(x, y) => xyn(0x8, x, y, 0x0),
            And(x, y) => xyn(0x8, x, y, 0x2),
            Xor(x, y) => xyn(0x8, x, y, 0x3),
            AddReg(x, y) => xyn(0x8, x, y, 0x4),
            SubReg(x, y) => xyn(0x8, x, y, 0x5),
            Shr(x, y) => xyn(0x8, x, y, 0x6),
            SkipNeReg(x, y) => xyn(0x9, x, y, 0x0),
            LoadIndex(a) => nnn(0xA, a),
            Random(x, nn) => xnn(0xC, x, nn),
            Draw(x, y, n) => xyn(0xD, x, y, n),
            SkipKey(x) => xnn(0xE, x, 0x9E),
            SkipNoKey(x) => xnn(0xE, x, 0xA1),
            GetDelay(x) => xnn(0xF, x, 0x07),
            WaitKey(x) => xnn(0xF, x, 0x0A),
            SetDelay(x) => xnn(0xF, x, 0x15),
            SetSound(x) => xnn(0xF, x, 0x18),
            AddIndex(x) => xnn(0xF, x, 0x1E),
            Glyph(x) => xnn(0xF, x, 0x29),
            Bcd(x) => xnn(0xF, x, 0x33),
            Store(x) => xnn(0xF, x, 0x55),
            Fill(x) => xnn(0xF, x, 0x65),
            Unknown(word) => word,
        }
    }

    /// Big-endian, high byte first.
    pub fn to_bytes(&self) -> [u8; 2] {
        self.encode().to_be_bytes()
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump(a) => write!(f, "JP 0x{:03X}", a),
            Call(a) => write!(f, "CALL 0x{:03X}", a),

            SkipEq(x, nn) => write!(f, "SE V{:X}, 0x{:02X}", x, nn),
            SkipNe(x, nn) => write!(f, "SNE V{:X}, 0x{:02X}", x, nn),
            SkipNeReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            SkipKey(x) => write!(f, "SKP V{:X}", x),
            SkipNoKey(x) => write!(f, "SKNP V{:X}", x),

            Load(x, nn) => write!(f, "LD V{:X}, 0x{:02X}", x, nn),
            AddImm(x, nn) => write!(f, "ADD V{:X}, 0x{:02X}", x, nn),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            SubReg(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr(x, _) => write!(f, "SHR V{:X}", x),
            Random(x, nn) => write!(f, "RND V{:X}, 0x{:02X}", x, nn),

            LoadIndex(a) => write!(f, "LD I, 0x{:03X}", a),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            Glyph(x) => write!(f, "LD F, V{:X}", x),
            Bcd(x) => write!(f, "LD B, V{:X}", x),
            Store(x) => write!(f, "LD [I], V{:X}", x),
            Fill(x) => write!(f, "LD V{:X}, [I]", x),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),

            GetDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),

            Unknown(word) => write!(f, "DATA 0x{:04X}", word),
        }
    }
}
