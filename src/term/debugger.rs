use super::display;
use ansi_term::Style;
use chip8::error;
use chip8::lang::Error;
use chip8::mach::{Address, Listing, Runtime, Step, KEY_COUNT, MEMORY_SIZE};
use linefeed::{Interface, ReadResult, Terminal};
use std::io;

type Result<T> = std::result::Result<T, Error>;

pub enum Resume {
    Run,
    Quit,
}

enum Reply {
    Text(String),
    Resume(Resume),
}

const HELP: &str = "\
step [n]                         execute n instructions
run                              continue running
regs                             show registers
mem <addr> [len]                 dump memory
list [addr] [count]              disassemble
screen                           print the display
key <k> <up|down>                set a key
save                             snapshot the machine
restore                          rewind to the snapshot
quirks [anti-flicker|legacy] [on|off]
quit";

/// Prompt for commands until the user resumes or quits.
pub fn debugger<T: Terminal>(interface: &Interface<T>, runtime: &mut Runtime) -> io::Result<Resume> {
    interface.write_fmt(format_args!("{}", current(runtime)))?;
    loop {
        let line = match interface.read_line()? {
            ReadResult::Input(line) => line,
            ReadResult::Signal(_) | ReadResult::Eof => return Ok(Resume::Quit),
        };
        if line.trim().is_empty() {
            continue;
        }
        interface.add_history_unique(line.clone());
        match command(runtime, &line) {
            Ok(Reply::Text(text)) => interface.write_fmt(format_args!("{}", text))?,
            Ok(Reply::Resume(resume)) => return Ok(resume),
            Err(error) => interface.write_fmt(format_args!(
                "{}\n",
                Style::new().bold().paint(error.to_string())
            ))?,
        }
    }
}

fn command(runtime: &mut Runtime, line: &str) -> Result<Reply> {
    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or("");
    let args: Vec<&str> = words.collect();
    let text = match name {
        "step" | "s" => step(runtime, count_arg(&args, 0, 1)?)?,
        "run" | "r" | "c" => return Ok(Reply::Resume(Resume::Run)),
        "quit" | "q" => return Ok(Reply::Resume(Resume::Quit)),
        "regs" => regs(runtime),
        "mem" | "m" => {
            let addr = match args.first() {
                Some(arg) => address(arg)?,
                None => return Err(error!(SyntaxError; "EXPECTED ADDRESS")),
            };
            mem(runtime, addr, count_arg(&args, 1, 16)?)?
        }
        "list" | "l" => {
            let from = match args.first() {
                Some(arg) => address(arg)?,
                None => runtime.state().pc,
            };
            Listing::new(runtime.state(), from, count_arg(&args, 1, 10)?).to_string()
        }
        "screen" => {
            let mut text = display::frame_lines(runtime.state()).join("\n");
            text.push('\n');
            text.push_str(&display::status_line(runtime.state(), ""));
            text.push('\n');
            text
        }
        "key" => key(runtime, &args)?,
        "save" => {
            runtime.save();
            format!("saved at 0x{:03X}\n", runtime.state().pc)
        }
        "restore" => {
            if !runtime.restore() {
                return Err(error!(InternalError; "NO SNAPSHOT"));
            }
            current(runtime)
        }
        "quirks" => quirks(runtime, &args)?,
        "help" | "?" => format!("{}\n", HELP),
        _ => return Err(error!(SyntaxError; "UNKNOWN COMMAND, TRY help")),
    };
    Ok(Reply::Text(text))
}

/// Decimal, or hex with a `0x` prefix.
fn number(arg: &str) -> Result<usize> {
    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => arg.parse::<usize>(),
    };
    parsed.map_err(|_| error!(SyntaxError; &format!("EXPECTED NUMBER, GOT {}", arg)))
}

fn address(arg: &str) -> Result<Address> {
    let n = number(arg)?;
    if n >= MEMORY_SIZE {
        return Err(error!(SyntaxError; &format!("ADDRESS {} PAST 0x{:03X}", arg, MEMORY_SIZE - 1)));
    }
    Ok(n as Address)
}

fn count_arg(args: &[&str], idx: usize, default: usize) -> Result<usize> {
    match args.get(idx) {
        Some(arg) => number(arg),
        None => Ok(default),
    }
}

fn current(runtime: &Runtime) -> String {
    Listing::new(runtime.state(), runtime.state().pc, 1).to_string()
}

fn step(runtime: &mut Runtime, count: usize) -> Result<String> {
    let mut note = String::new();
    for _ in 0..count {
        match runtime.step()? {
            Step::Executed(_) => {}
            Step::Waiting => {
                note = "waiting for a key\n".to_string();
                break;
            }
            Step::Unimplemented(word) => {
                note = format!("unimplemented 0x{:04X}\n", word);
                break;
            }
        }
    }
    Ok(format!("{}{}", note, current(runtime)))
}

fn regs(runtime: &Runtime) -> String {
    let s = runtime.state();
    let mut text = format!(
        "PC 0x{:03X}  I 0x{:03X}  SP {}  DT {}  ST {}\n",
        s.pc,
        s.i,
        s.stack.len(),
        s.delay_timer,
        s.sound_timer
    );
    for (n, regs) in s.v.chunks(8).enumerate() {
        let line: Vec<String> = regs
            .iter()
            .enumerate()
            .map(|(r, val)| format!("V{:X} {:02X}", n * 8 + r, val))
            .collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    if let Some(top) = s.stack.last() {
        text.push_str(&format!("RET 0x{:03X}  STACK {:?}\n", top, s.stack));
    }
    let keys: Vec<String> = (0..KEY_COUNT)
        .filter(|&k| s.key(k))
        .map(|k| format!("{:X}", k))
        .collect();
    if !keys.is_empty() {
        text.push_str(&format!("KEYS {}\n", keys.join(" ")));
    }
    text
}

fn mem(runtime: &Runtime, addr: Address, len: usize) -> Result<String> {
    let range = runtime.state().range(addr, len)?;
    let mut text = String::new();
    for (n, chunk) in runtime.state().memory[range].chunks(16).enumerate() {
        let bytes: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
        text.push_str(&format!(
            "[0x{:03X}] {}\n",
            addr as usize + n * 16,
            bytes.join(" ")
        ));
    }
    Ok(text)
}

fn key(runtime: &mut Runtime, args: &[&str]) -> Result<String> {
    let k = match args.first() {
        Some(arg) => usize::from_str_radix(arg, 16)
            .map_err(|_| error!(SyntaxError; "EXPECTED HEX KEY"))?,
        None => return Err(error!(SyntaxError; "EXPECTED KEY")),
    };
    if k >= KEY_COUNT {
        return Err(error!(InvalidKey; &format!("{:X}", k)));
    }
    let down = match args.get(1).copied() {
        Some("down") | None => true,
        Some("up") => false,
        Some(_) => return Err(error!(SyntaxError; "EXPECTED up OR down")),
    };
    runtime.state_mut().set_key(k, down);
    Ok(format!("key {:X} {}\n", k, if down { "down" } else { "up" }))
}

fn quirks(runtime: &mut Runtime, args: &[&str]) -> Result<String> {
    if let Some(&name) = args.first() {
        let on = match args.get(1).copied() {
            Some("on") => true,
            Some("off") => false,
            _ => return Err(error!(SyntaxError; "EXPECTED on OR off")),
        };
        let options = runtime.options_mut();
        match name {
            "anti-flicker" => options.anti_flicker = on,
            "legacy" => options.legacy_increment = on,
            _ => return Err(error!(SyntaxError; "EXPECTED anti-flicker OR legacy")),
        }
    }
    let options = runtime.options();
    Ok(format!(
        "anti-flicker {}\nlegacy {}\n",
        if options.anti_flicker { "on" } else { "off" },
        if options.legacy_increment { "on" } else { "off" }
    ))
}
