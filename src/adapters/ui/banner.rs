//! Welcome banner with a two-color gradient (CLOSED DAYS).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Slate blue (#4f6bed).
const SLATE_BLUE: (u8, u8, u8) = (0x4f, 0x6b, 0xed);
/// Closed-day red (#e5484d).
const CLOSED_RED: (u8, u8, u8) = (0xe5, 0x48, 0x4d);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints "CLOSED DAYS" in the standard figlet font, graded from slate blue to
/// red, then the version line. Falls back to plain text if figlet fails.
pub fn print_welcome() {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("CLOSED DAYS").map(|f| f.to_string()))
        .unwrap_or_else(|| "CLOSED DAYS".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(SLATE_BLUE, CLOSED_RED, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(Print(format!("v{} closed-day calendar admin\r\n", version)));
    let _ = out.flush();
}
