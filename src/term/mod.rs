extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
extern crate mortal;

mod debugger;
mod display;
mod logger;

use ansi_term::Style;
use chip8::error;
use chip8::lang::Error;
use chip8::mach::{Event, Layout, Listing, Options, Program, Runtime, KEY_COUNT, PROGRAM_ORIGIN};
use clap::Parser;
use debugger::Resume;
use linefeed::Interface;
use mortal::{Event as TermEvent, Key, PrepareConfig, Screen};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Frames a key stays down after the terminal reports it.
const KEY_HOLD_FRAMES: u8 = 6;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Raw program image loaded at 0x200
    #[arg(long, required_unless_present = "source", conflicts_with = "source")]
    rom: Option<PathBuf>,

    /// Statement language source to compile and load
    #[arg(long)]
    source: Option<PathBuf>,

    /// LD [I], Vx and LD Vx, [I] advance I
    #[arg(long)]
    legacy_increment: bool,

    /// Redraw on frames where a sprite collided
    #[arg(long)]
    no_anti_flicker: bool,

    /// Store compiled variables after the code instead of at 0x200
    #[arg(long)]
    vars_after_code: bool,

    /// Instructions executed per frame
    #[arg(long, default_value_t = 10)]
    cycles_per_frame: usize,

    /// Frames per second, also the timer rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for repeatable random numbers
    #[arg(long)]
    seed: Option<u64>,

    /// Start paused in the debugger
    #[arg(long)]
    debug: bool,

    /// Run headless for this many instructions and print the registers
    #[arg(long)]
    steps: Option<usize>,

    /// Print a disassembly instead of running
    #[arg(long)]
    disassemble: bool,

    /// More logging on stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn main(args: Args) {
    logger::init(args.verbose);
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        log::warn!("no Ctrl-C handler: {}", error);
    }
    if let Err(error) = main_loop(&args, interrupted) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

fn main_loop(args: &Args, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let options = Options {
        anti_flicker: !args.no_anti_flicker,
        legacy_increment: args.legacy_increment,
    };
    let mut runtime = match args.seed {
        Some(seed) => Runtime::with_seed(options, seed),
        None => Runtime::new(options),
    };
    let listing = match load(args, &mut runtime) {
        Ok(listing) => listing,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            std::process::exit(1);
        }
    };
    if args.disassemble {
        print!("{}", listing);
        return Ok(());
    }
    if let Some(steps) = args.steps {
        return headless(args, &mut runtime, steps, &interrupted);
    }
    if args.debug {
        runtime.pause();
    }

    let command = Interface::new("chip8")?;
    command.set_prompt("> ")?;
    let mut holds = [0u8; KEY_COUNT];
    let mut note = String::new();

    loop {
        if runtime.is_paused() {
            match debugger::debugger(&command, &mut runtime)? {
                Resume::Run => runtime.resume(),
                Resume::Quit => break,
            }
            interrupted.store(false, Ordering::SeqCst);
        }
        let stop = {
            let screen = Screen::new(PrepareConfig::default())?;
            screen.clear_screen();
            runtime.state_mut().draw_dirty = true;
            run_frames(args, &screen, &mut runtime, &mut holds, &mut note, &interrupted)
        };
        match stop? {
            Some(error) => {
                command.write_fmt(format_args!(
                    "\n{}\n",
                    Style::new().bold().paint(error.to_string())
                ))?;
            }
            None => command.write_fmt(format_args!("\n"))?,
        }
    }
    Ok(())
}

/// Run until paused. Returns the fault that paused it, if any.
fn run_frames(
    args: &Args,
    screen: &Screen,
    runtime: &mut Runtime,
    holds: &mut [u8; KEY_COUNT],
    note: &mut String,
    interrupted: &AtomicBool,
) -> std::io::Result<Option<Error>> {
    let frame = Duration::from_secs(1) / args.fps.max(1);
    loop {
        let deadline = Instant::now() + frame;
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.pause();
        }
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            match screen.read_event(Some(remaining))? {
                Some(TermEvent::Key(Key::Escape)) | Some(TermEvent::Key(Key::Ctrl('c'))) => {
                    runtime.pause();
                }
                Some(TermEvent::Key(Key::Char(ch))) => {
                    if let Some(k) = ch.to_digit(16) {
                        holds[k as usize] = KEY_HOLD_FRAMES;
                        runtime.state_mut().set_key(k as usize, true);
                    }
                }
                Some(TermEvent::Resize(_)) => runtime.state_mut().draw_dirty = true,
                _ => {}
            }
        }
        if runtime.is_paused() {
            return Ok(None);
        }
        match runtime.execute(args.cycles_per_frame) {
            Event::Running | Event::Stopped => note.clear(),
            Event::Waiting => *note = "KEY?".to_string(),
            Event::Unimplemented(addr, word) => {
                *note = format!("UNIMPLEMENTED 0x{:04X} AT 0x{:03X}", word, addr)
            }
            Event::Fault(error) => return Ok(Some(error)),
        }
        runtime.tick();
        for (k, hold) in holds.iter_mut().enumerate() {
            if *hold > 0 {
                *hold -= 1;
                if *hold == 0 {
                    runtime.state_mut().set_key(k, false);
                }
            }
        }
        if runtime.state_mut().take_frame() {
            display::draw(screen, runtime.state());
        }
        display::status(screen, runtime.state(), note)?;
    }
}

fn headless(
    args: &Args,
    runtime: &mut Runtime,
    steps: usize,
    interrupted: &AtomicBool,
) -> std::io::Result<()> {
    let mut remaining = steps;
    let mut last = Event::Running;
    while remaining > 0 && !interrupted.load(Ordering::SeqCst) {
        let cycles = remaining.min(args.cycles_per_frame.max(1));
        last = runtime.execute(cycles);
        runtime.tick();
        remaining -= cycles;
        match &last {
            Event::Running => {}
            _ => break,
        }
    }
    match last {
        Event::Fault(error) => println!("{}", Style::new().bold().paint(error.to_string())),
        Event::Unimplemented(addr, word) => {
            println!("UNIMPLEMENTED 0x{:04X} AT 0x{:03X}", word, addr)
        }
        _ => {}
    }
    let s = runtime.state();
    println!(
        "PC 0x{:03X}  I 0x{:03X}  SP {}  DT {}  ST {}",
        s.pc,
        s.i,
        s.stack.len(),
        s.delay_timer,
        s.sound_timer
    );
    let v: Vec<String> = s.v.iter().map(|val| format!("{:02X}", val)).collect();
    println!("V {}", v.join(" "));
    Ok(())
}

/// Load the ROM or compiled source named by `args` and return its listing.
fn load(args: &Args, runtime: &mut Runtime) -> Result<Listing, Error> {
    if let Some(path) = &args.source {
        let source = read(path)?;
        let text = String::from_utf8_lossy(&source);
        let layout = if args.vars_after_code {
            Layout::AfterCode
        } else {
            Layout::Origin
        };
        let program = Program::compile(&text, layout);
        for warning in program.warnings() {
            eprintln!("{}", warning);
        }
        if let Some(error) = program.errors().first() {
            for error in program.errors() {
                eprintln!("{}", decorate(&text, error));
            }
            return Err(error.clone());
        }
        let crc = runtime.load_program(&program)?;
        log::info!("compiled {} instructions, crc32 {:08x}", program.len(), crc);
        return Ok(Listing::of_program(&program));
    }
    let path = match &args.rom {
        Some(path) => path,
        None => return Err(error!(FileNotFound; "NO PROGRAM GIVEN")),
    };
    let rom = read(path)?;
    let crc = runtime.load_rom(&rom)?;
    log::info!("{}: {} bytes, crc32 {:08x}", path.display(), rom.len(), crc);
    Ok(Listing::new(
        runtime.state(),
        PROGRAM_ORIGIN,
        (rom.len() + 1) / 2,
    ))
}

fn read(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|error| {
        let msg = format!("{}: {}", path.display(), error);
        match error.kind() {
            ErrorKind::NotFound => error!(FileNotFound; msg.as_str()),
            _ => error!(InternalError; msg.as_str()),
        }
    })
}

/// The error followed by its statement with the faulty columns underlined.
fn decorate(text: &str, error: &Error) -> String {
    let col = error.column();
    if col.start >= col.end || col.end > text.len() {
        return error.to_string();
    }
    let start = text[..col.start].rfind(';').map(|i| i + 1).unwrap_or(0);
    let end = text[col.end..]
        .find(';')
        .map(|i| col.end + i + 1)
        .unwrap_or(text.len());
    let style = Style::new().underline();
    format!(
        "{}\n  {}{}{}",
        error,
        text[start..col.start].trim_start(),
        style.paint(&text[col.clone()]),
        &text[col.end..end]
    )
}
