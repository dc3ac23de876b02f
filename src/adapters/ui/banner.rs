//! Welcome banner: the club's short name in FIGlet letters with a
//! blue-to-green gradient (Finistère sea to countryside).

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};

/// Océan (#0b5fa5).
const OCEAN_BLUE: (u8, u8, u8) = (0x0b, 0x5f, 0xa5);
/// Lande (#3fae49).
const HEATH_GREEN: (u8, u8, u8) = (0x3f, 0xae, 0x49);

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// Color of row `row` out of `rows`: first row ocean, last row heath.
fn row_color(row: usize, rows: usize) -> (u8, u8, u8) {
    if rows <= 1 {
        return HEATH_GREEN;
    }
    let t = row as f64 / (rows - 1) as f64;
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    (
        mix(OCEAN_BLUE.0, HEATH_GREEN.0),
        mix(OCEAN_BLUE.1, HEATH_GREEN.1),
        mix(OCEAN_BLUE.2, HEATH_GREEN.2),
    )
}

/// FIGlet rendering of `text`, or the text itself if the font is unavailable.
fn art_lines(text: &str) -> Vec<String> {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(text).map(|fig| fig.to_string()))
        .unwrap_or_else(|| text.to_string());
    art.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn write_banner(out: &mut impl Write, short_name: &str, full_name: &str) -> io::Result<()> {
    let lines = art_lines(short_name);
    for (row, line) in lines.iter().enumerate() {
        queue!(
            out,
            SetForegroundColor(rgb(row_color(row, lines.len()))),
            Print(line),
            Print("\r\n")
        )?;
    }
    queue!(
        out,
        SetForegroundColor(rgb(HEATH_GREEN)),
        Print(format!("{} v{}\r\n", full_name, env!("CARGO_PKG_VERSION"))),
        ResetColor
    )?;
    out.flush()
}

/// Prints the club banner. Terminal errors are ignored: the banner is cosmetic.
pub fn print_welcome(short_name: &str, full_name: &str) {
    let _ = write_banner(&mut stdout(), short_name, full_name);
}
