// Non-interactive grid output for `mgrid show`

use std::collections::BTreeMap;
use std::io::{self, Write};

use crossterm::style::{Color, Stylize};
use serde::Serialize;

use moneygrid_core::{Board, Cell, CellCounts, Grid, Settings};

/// Fill colour per classification; `Empty` stays unstyled.
pub(crate) fn cell_rgb(cell: Cell) -> Option<(u8, u8, u8)> {
    match cell {
        Cell::Empty => None,
        Cell::Has => Some((0x5b, 0xe7, 0xa9)),
        Cell::ToBeSpent => Some((0xff, 0xbd, 0x67)),
        Cell::Needed => Some((0xff, 0x64, 0x64)),
    }
}

/// One-character stand-in used when colour is unavailable.
pub(crate) fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Has => '#',
        Cell::ToBeSpent => '-',
        Cell::Needed => '!',
    }
}

fn summary(settings: &Settings) -> String {
    format!(
        "{} x {} cells of {} | has {} | to spend {} | capacity {}",
        settings.rows_count(),
        settings.columns_count(),
        settings.cell_weight(),
        settings.has(),
        settings.to_spend(),
        settings.capacity()
    )
}

/// Grid as coloured two-column blocks, followed by a legend.
pub fn print_color(board: &Board, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "{}", summary(board.settings()))?;
    for row in board.grid().rows() {
        for &cell in row {
            match cell_rgb(cell) {
                Some((r, g, b)) => write!(w, "{}", "  ".on(Color::Rgb { r, g, b }))?,
                None => write!(w, "{}", "\u{b7} ".dark_grey())?,
            }
        }
        writeln!(w)?;
    }
    let counts = board.grid().counts();
    for cell in Cell::ALL {
        let swatch = match cell_rgb(cell) {
            Some((r, g, b)) => format!("{}", "  ".on(Color::Rgb { r, g, b })),
            None => format!("{}", "\u{b7} ".dark_grey()),
        };
        writeln!(w, "{} {} ({})", swatch, cell.description(), counts.get(cell))?;
    }
    Ok(())
}

/// Grid as one glyph per cell, no escape codes.
pub fn print_plain(board: &Board, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "{}", summary(board.settings()))?;
    for row in board.grid().rows() {
        let line: String = row.iter().map(|&c| glyph(c)).collect();
        writeln!(w, "{}", line)?;
    }
    let counts = board.grid().counts();
    for cell in Cell::ALL {
        writeln!(w, "{} {} ({})", glyph(cell), cell.description(), counts.get(cell))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ShowJson<'a> {
    settings: &'a Settings,
    rows: &'a Grid,
    counts: CellCounts,
    styles: BTreeMap<&'static str, &'static str>,
}

/// Grid as a single JSON document.
pub fn print_json(board: &Board, w: &mut impl Write) -> io::Result<()> {
    let doc = ShowJson {
        settings: board.settings(),
        rows: board.grid(),
        counts: board.grid().counts(),
        styles: Cell::ALL.iter().map(|c| (c.name(), c.style_class())).collect(),
    };
    serde_json::to_writer_pretty(&mut *w, &doc)?;
    writeln!(w)
}
