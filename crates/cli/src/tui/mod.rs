pub mod dialog;

use std::io::stdout;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use moneygrid_config::{save_settings, SettingsStore};
use moneygrid_core::{Board, Cell, Settings};

use crate::render::{cell_rgb, glyph};
use dialog::{DialogOutcome, EditDialog};

/// Display columns per grid cell.
const CELL_WIDTH: usize = 2;

struct TuiApp<'a> {
    board: Board,
    store: &'a mut dyn SettingsStore,
    cursor_row: usize,
    cursor_col: usize,
    scroll_row: usize,
    scroll_col: usize,
    should_quit: bool,
    show_help: bool,
    dialog: Option<EditDialog>,
    /// Transient status message (save failures, confirmations)
    message: Option<String>,
}

impl<'a> TuiApp<'a> {
    fn new(board: Board, store: &'a mut dyn SettingsStore) -> Self {
        Self {
            board,
            store,
            cursor_row: 0,
            cursor_col: 0,
            scroll_row: 0,
            scroll_col: 0,
            should_quit: false,
            show_help: false,
            dialog: None,
            message: None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(dialog) = self.dialog.as_mut() {
            match dialog.handle_key(key) {
                DialogOutcome::Continue => {}
                DialogOutcome::Cancel => self.dialog = None,
                DialogOutcome::Submit(settings) => {
                    self.dialog = None;
                    self.apply(settings);
                }
            }
            return;
        }

        if self.show_help {
            // Any key dismisses help
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('e') | KeyCode::Enter => {
                self.message = None;
                self.dialog = Some(EditDialog::new(self.board.settings()));
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Home | KeyCode::Char('g') => self.cursor_row = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor_row = self.board.grid().row_count().saturating_sub(1);
            }
            KeyCode::Char('0') => self.cursor_col = 0,
            KeyCode::Char('$') => {
                self.cursor_col = self.board.grid().column_count().saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Replace the board, then persist. A failed save keeps the new grid.
    fn apply(&mut self, settings: Settings) {
        self.board.replace(settings);
        self.clamp_cursor();
        match save_settings(&mut *self.store, self.board.settings()) {
            Ok(()) => self.message = Some("Settings saved".to_string()),
            Err(e) => {
                log::error!("Error saving settings: {}", e);
                self.message = Some(format!("Save failed: {}", e));
            }
        }
    }

    fn clamp_cursor(&mut self) {
        let grid = self.board.grid();
        self.cursor_row = self.cursor_row.min(grid.row_count().saturating_sub(1));
        self.cursor_col = self.cursor_col.min(grid.column_count().saturating_sub(1));
    }

    fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let grid = self.board.grid();
        if grid.row_count() == 0 || grid.column_count() == 0 {
            return;
        }
        self.cursor_row = (self.cursor_row as i32 + drow).clamp(0, grid.row_count() as i32 - 1) as usize;
        self.cursor_col = (self.cursor_col as i32 + dcol).clamp(0, grid.column_count() as i32 - 1) as usize;
    }

    fn ensure_visible(&mut self, visible_rows: usize, visible_cols: usize) {
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        }
        if visible_rows > 0 && self.cursor_row >= self.scroll_row + visible_rows {
            self.scroll_row = self.cursor_row - visible_rows + 1;
        }
        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        }
        if visible_cols > 0 && self.cursor_col >= self.scroll_col + visible_cols {
            self.scroll_col = self.cursor_col - visible_cols + 1;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.draw_title(frame, chunks[0]);
        self.draw_grid(frame, chunks[1]);
        self.draw_status(frame, chunks[2]);

        if let Some(dialog) = &self.dialog {
            dialog.draw(frame, area);
        } else if self.show_help {
            self.draw_help(frame, area);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let s = self.board.settings();
        let title = format!(
            " moneygrid | {} x {} | cell weight {} | has {} | to spend {} | capacity {} ",
            s.rows_count(),
            s.columns_count(),
            s.cell_weight(),
            s.has(),
            s.to_spend(),
            s.capacity()
        );
        let para = Paragraph::new(Line::from(vec![Span::styled(
            title,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]))
        .style(Style::default().bg(Color::Cyan));
        frame.render_widget(para, area);
    }

    fn cell_style(cell: Cell) -> Style {
        match cell_rgb(cell) {
            Some((r, g, b)) => Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b)),
            None => Style::default().fg(Color::DarkGray),
        }
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        let grid = self.board.grid();
        if grid.row_count() == 0 || grid.column_count() == 0 {
            let msg = Paragraph::new("(empty grid, press e to edit)")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(msg, area);
            return;
        }

        let visible_cols = area.width as usize / CELL_WIDTH;
        let end_row = (self.scroll_row + area.height as usize).min(grid.row_count());
        let end_col = (self.scroll_col + visible_cols).min(grid.column_count());

        let mut lines: Vec<Line> = Vec::with_capacity(end_row.saturating_sub(self.scroll_row));
        for r in self.scroll_row..end_row {
            let row = &grid.rows()[r];
            let spans: Vec<Span> = (self.scroll_col..end_col)
                .map(|c| {
                    let cell = row[c];
                    let style = Self::cell_style(cell);
                    if r == self.cursor_row && c == self.cursor_col {
                        Span::styled("[]", style.add_modifier(Modifier::BOLD))
                    } else if cell == Cell::Empty {
                        Span::styled("\u{b7} ", style)
                    } else {
                        Span::styled("  ", style)
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let grid = self.board.grid();
        let left = match (
            grid.get(self.cursor_row, self.cursor_col),
            self.board.cell_value(self.cursor_row, self.cursor_col),
        ) {
            (Some(cell), Some(value)) => format!(
                " r{} c{}: up to {} ({})",
                self.cursor_row + 1,
                self.cursor_col + 1,
                value,
                cell.description()
            ),
            _ => String::new(),
        };
        let left = match &self.message {
            Some(msg) => format!("{}  | {}", left, msg),
            None => left,
        };

        let counts = grid.counts();
        let right = format!(
            "{} {}  {} {}  {} {}  e: edit  ?: help ",
            glyph(Cell::Has),
            counts.has,
            glyph(Cell::ToBeSpent),
            counts.to_be_spent,
            glyph(Cell::Needed),
            counts.needed
        );

        let padding = (area.width as usize).saturating_sub(left.chars().count() + right.chars().count());
        let status = format!("{}{:pad$}{}", left, "", right, pad = padding);

        let para = Paragraph::new(Line::from(vec![Span::styled(
            status,
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        )]))
        .style(Style::default().bg(Color::DarkGray));
        frame.render_widget(para, area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let mut help_lines: Vec<Line> = [
            "",
            "  Navigation",
            "  ----------",
            "  arrows / hjkl     Move cursor",
            "  Home / g          First row",
            "  End  / G          Last row",
            "  0 / $             First / last column",
            "",
            "  Settings",
            "  --------",
            "  e / Enter         Edit settings",
            "",
            "  General",
            "  -------",
            "  q / Esc           Quit",
            "  ?                 Toggle this help",
            "",
            "  Legend",
            "  ------",
        ]
        .iter()
        .map(|s| Line::from(Span::styled(*s, Style::default().fg(Color::White))))
        .collect();

        for cell in Cell::ALL {
            help_lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{} ", glyph(cell)), Self::cell_style(cell)),
                Span::styled(format!("  {}", cell.description()), Style::default().fg(Color::White)),
            ]));
        }
        help_lines.push(Line::from(""));

        let help_width: u16 = 44;
        let help_height: u16 = help_lines.len() as u16 + 2;
        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let popup = Rect::new(
            area.x + x,
            area.y + y,
            help_width.min(area.width),
            help_height.min(area.height),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keybindings ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(Color::Black));

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(help_lines).block(block), popup);
    }
}

/// Run the interactive grid view until the user quits.
pub fn run(board: Board, store: &mut dyn SettingsStore) -> Result<(), String> {
    let mut app = TuiApp::new(board, store);

    terminal::enable_raw_mode()
        .map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        let size = terminal
            .size()
            .map(|s| Rect::new(0, 0, s.width, s.height))
            .unwrap_or_default();
        // title + status bar
        let visible_rows = size.height.saturating_sub(2) as usize;
        app.ensure_visible(visible_rows, size.width as usize / CELL_WIDTH);

        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100))
            .map_err(|e| format!("event poll error: {}", e))?
        {
            if let Event::Key(key) =
                event::read().map_err(|e| format!("event read error: {}", e))?
            {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
