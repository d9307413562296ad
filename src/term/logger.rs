use ansi_term::{Colour, Style};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Timestamped, coloured log lines on stderr.
struct Logger;

static LOGGER: Logger = Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => Colour::Red.bold().paint("ERROR"),
            Level::Warn => Colour::Yellow.bold().paint("WARN "),
            Level::Info => Colour::Green.paint("INFO "),
            Level::Debug => Colour::Blue.paint("DEBUG"),
            Level::Trace => Style::new().dimmed().paint("TRACE"),
        };
        let now = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        eprintln!(
            "{} {} {}: {}",
            Style::new().dimmed().paint(now),
            level,
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Install the logger. Each `-v` lowers the threshold one level from warn.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
