use chip8::mach::{State, SCREEN_HEIGHT, SCREEN_WIDTH};
use mortal::{Cursor, Screen};
use std::io;

/// Terminal rows used by the framebuffer, two pixels per cell.
pub const ROWS: usize = SCREEN_HEIGHT / 2;

/// The framebuffer as text. Each character is a column of two pixels.
pub fn frame_lines(state: &State) -> Vec<String> {
    (0..ROWS)
        .map(|row| {
            (0..SCREEN_WIDTH)
                .map(|x| {
                    let top = state.pixel(x, row * 2) == 1;
                    let bottom = state.pixel(x, row * 2 + 1) == 1;
                    match (top, bottom) {
                        (false, false) => ' ',
                        (true, false) => '▀',
                        (false, true) => '▄',
                        (true, true) => '█',
                    }
                })
                .collect()
        })
        .collect()
}

pub fn status_line(state: &State, note: &str) -> String {
    let line = format!(
        "PC 0x{:03X}  I 0x{:03X}  DT {:3}  ST {:3}  {}",
        state.pc, state.i, state.delay_timer, state.sound_timer, note
    );
    format!("{:width$}", line, width = SCREEN_WIDTH)
}

/// Write the framebuffer into the screen buffer. Shown on the next `refresh`.
pub fn draw(screen: &Screen, state: &State) {
    for (line, text) in frame_lines(state).iter().enumerate() {
        screen.set_cursor(Cursor { line, column: 0 });
        screen.write_str(text);
    }
}

/// Write the status line below the framebuffer and refresh the terminal.
pub fn status(screen: &Screen, state: &State, note: &str) -> io::Result<()> {
    screen.set_cursor(Cursor {
        line: ROWS,
        column: 0,
    });
    screen.reverse();
    screen.write_str(&status_line(state, note));
    screen.clear_attributes();
    screen.refresh()
}
