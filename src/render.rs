//! Chart rendering for ranges.
//!
//! Two outputs are supported:
//! - a terminal grid with an ANSI background colour per action
//! - a self-contained HTML page with one chart per position
//!
//! Cell text colour is picked from the background's WCAG relative luminance
//! so labels stay readable on both the dark raise colour and the light
//! call/fold colours.

use std::fmt::Write as _;

use crate::ranges::{grid, Action, Range, RangeCollection, RANKS};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Colour from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Relative luminance per WCAG 2.0, in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        let channel = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// CSS hex form, `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Text colour for labels drawn on a coloured background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    /// White text.
    Light,
    /// Near-black text.
    Dark,
}

impl TextTone {
    /// Concrete colour for this tone.
    pub fn rgb(&self) -> Rgb {
        match self {
            TextTone::Light => Rgb::new(0xff, 0xff, 0xff),
            TextTone::Dark => Rgb::new(0x1f, 0x29, 0x37),
        }
    }
}

/// Dark text on light backgrounds, light text on dark ones.
pub fn contrast_text(background: Rgb) -> TextTone {
    if background.luminance() > 0.5 {
        TextTone::Dark
    } else {
        TextTone::Light
    }
}

/// Background colours for each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// RAISE background.
    pub raise: Rgb,
    /// CALL background.
    pub call: Rgb,
    /// FOLD background.
    pub fold: Rgb,
    /// Unassigned pocket pair.
    pub pair: Rgb,
    /// Any other unassigned hand.
    pub other: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            raise: Rgb::new(0x99, 0x1b, 0x1b),
            call: Rgb::new(0xbf, 0xdb, 0xfe),
            fold: Rgb::new(0xd1, 0xd5, 0xdb),
            pair: Rgb::new(0xf5, 0xf7, 0xf5),
            other: Rgb::new(0xee, 0xf2, 0xee),
        }
    }
}

impl Palette {
    /// Background for an assigned action.
    pub fn action(&self, action: Action) -> Rgb {
        match action {
            Action::Raise => self.raise,
            Action::Call => self.call,
            Action::Fold => self.fold,
        }
    }

    /// Background of the cell at `(row, col)` given its assigned action.
    pub fn cell(&self, row: usize, col: usize, action: Option<Action>) -> Rgb {
        match action {
            Some(action) => self.action(action),
            None if row == col => self.pair,
            None => self.other,
        }
    }
}

/// One-line summary of how much of the range each action covers.
pub fn summary(range: &Range) -> String {
    let [raise, call, fold] = range.counts();
    format!(
        "Raise: {:.1}% ({} hands) | Call: {:.1}% ({} hands) | Fold: {:.1}% ({} hands)",
        range.combo_fraction(Action::Raise) * 100.0,
        raise,
        range.combo_fraction(Action::Call) * 100.0,
        call,
        range.combo_fraction(Action::Fold) * 100.0,
        fold,
    )
}

/// Render a range as a 13x13 terminal grid.
///
/// With `ansi` set, painted cells get a 24-bit background colour.
pub fn text_grid(range: &Range, palette: &Palette, ansi: bool) -> String {
    let mut out = String::new();

    out.push_str("   ");
    for rank in RANKS {
        let _ = write!(out, "{:>5}", rank);
    }
    out.push('\n');

    for (row, rank) in RANKS.iter().enumerate() {
        let _ = write!(out, "{:>2} ", rank);
        for col in 0..13 {
            let hand = grid::hand_at(row, col);
            let action = range.get(&hand);
            let label = format!("{:>4}", hand.to_string());

            match action {
                Some(action) if ansi => {
                    let bg = palette.action(action);
                    let fg = contrast_text(bg).rgb();
                    let _ = write!(
                        out,
                        " \x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m{}\x1b[0m",
                        bg.r, bg.g, bg.b, fg.r, fg.g, fg.b, label
                    );
                }
                Some(action) => {
                    let marker = &action.name()[..1];
                    let _ = write!(out, " {:>3}{}", hand.to_string(), marker);
                }
                None if ansi => {
                    let _ = write!(out, " {}", label);
                }
                None => {
                    let _ = write!(out, " {:>3} ", hand.to_string());
                }
            }
        }
        out.push('\n');
    }

    out
}

/// Render every position as one HTML page.
pub fn html(collection: &RangeCollection, palette: &Palette) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Preflop Ranges</title>
    <style>
        body { font-family: 'Segoe UI', Arial, sans-serif; background: #f9fafb; color: #1f2937; padding: 20px; }
        .container { max-width: 1200px; margin: 0 auto; }
        h1 { text-align: center; }
        .position { margin-bottom: 40px; background: #fff; padding: 20px; border-radius: 10px; }
        .position h2 { margin: 0 0 8px 0; }
        .summary { color: #6b7280; margin-bottom: 12px; font-size: 13px; }
        .legend { display: flex; gap: 20px; margin-bottom: 15px; }
        .legend-item { display: flex; align-items: center; gap: 8px; }
        .legend-color { width: 20px; height: 20px; border-radius: 4px; }
        .grid { display: grid; grid-template-columns: repeat(13, 1fr); gap: 2px; }
        .cell { aspect-ratio: 1; display: flex; align-items: center; justify-content: center; border: 1px solid #d1d5db; border-radius: 4px; font-size: 13px; font-weight: bold; }
    </style>
</head>
<body>
<div class="container">
    <h1>Preflop Ranges</h1>
"#,
    );

    for (position, range) in collection.iter() {
        let _ = write!(
            html,
            r#"
    <div class="position">
        <h2>{}</h2>
        <div class="summary">{}</div>
        <div class="legend">
"#,
            position,
            summary(range)
        );
        for action in Action::all() {
            let _ = writeln!(
                html,
                r#"            <div class="legend-item"><div class="legend-color" style="background: {};"></div>{}</div>"#,
                palette.action(*action).hex(),
                action
            );
        }
        html.push_str("        </div>\n        <div class=\"grid\">\n");

        for row in 0..13 {
            for col in 0..13 {
                let hand = grid::hand_at(row, col);
                let bg = palette.cell(row, col, range.get(&hand));
                let fg = contrast_text(bg).rgb();
                let _ = writeln!(
                    html,
                    r#"            <div class="cell" style="background: {}; color: {};">{}</div>"#,
                    bg.hex(),
                    fg.hex(),
                    hand
                );
            }
        }

        html.push_str("        </div>\n    </div>\n");
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}
