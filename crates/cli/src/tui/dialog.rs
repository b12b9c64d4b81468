// Settings edit dialog for the TUI

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use moneygrid_core::{Settings, SettingsField, SettingsForm};

/// What the dialog wants the app to do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Keep the dialog open.
    Continue,
    /// Close without changes.
    Cancel,
    /// Close and apply these settings.
    Submit(Settings),
}

pub struct EditDialog {
    form: SettingsForm,
    focus: usize,
    /// Set after a rejected submit; errors show for every field from then on.
    show_all_errors: bool,
    /// Fields the user has typed into.
    touched: [bool; 5],
}

const LABEL_WIDTH: usize = 15;
const INPUT_WIDTH: usize = 16;

impl EditDialog {
    pub fn new(settings: &Settings) -> Self {
        Self {
            form: SettingsForm::from_settings(settings),
            focus: 0,
            show_all_errors: false,
            touched: [false; 5],
        }
    }

    pub fn focused(&self) -> SettingsField {
        SettingsField::ALL[self.focus]
    }

    #[cfg(test)]
    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        let field = self.focused();
        match key.code {
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Enter => match self.form.submit() {
                Ok(settings) => return DialogOutcome::Submit(settings),
                Err(errors) => {
                    log::debug!("Edit rejected: {}", errors);
                    self.show_all_errors = true;
                }
            },
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % SettingsField::ALL.len(),
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + SettingsField::ALL.len() - 1) % SettingsField::ALL.len()
            }
            KeyCode::Backspace => {
                self.form.pop_char(field);
                self.touched[self.focus] = true;
            }
            KeyCode::Char(c @ ('0'..='9' | '.' | '-' | 'e')) => {
                self.form.push_char(field, c);
                self.touched[self.focus] = true;
            }
            _ => {}
        }
        DialogOutcome::Continue
    }

    fn error_visible(&self, index: usize) -> bool {
        self.show_all_errors || self.touched[index]
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from("")];
        for (i, field) in SettingsField::ALL.into_iter().enumerate() {
            let focused = i == self.focus;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let input_style = if focused {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            };
            let mut value = self.form.value(field).to_string();
            if focused {
                value.push('_');
            }
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<width$}", field.label(), width = LABEL_WIDTH), label_style),
                Span::styled(format!(" {:<width$}", value, width = INPUT_WIDTH), input_style),
            ]));

            let error = self
                .form
                .field_error(field)
                .filter(|_| self.error_visible(i))
                .map(|e| e.to_string())
                .unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!("  {:<width$} {}", "", error, width = LABEL_WIDTH),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "  Enter: Ok   Esc: Cancel   Tab: next field",
            Style::default().fg(Color::DarkGray),
        )));

        let width: u16 = 64;
        let height = lines.len() as u16 + 2;
        let x = area.width.saturating_sub(width) / 2;
        let y = area.height.saturating_sub(height) / 2;
        let popup = Rect::new(
            area.x + x,
            area.y + y,
            width.min(area.width),
            height.min(area.height),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Edit Settings ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black));

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut EditDialog, code: KeyCode) -> DialogOutcome {
        dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(dialog: &mut EditDialog, text: &str) {
        for c in text.chars() {
            press(dialog, KeyCode::Char(c));
        }
    }

    fn clear(dialog: &mut EditDialog) {
        while !dialog.form().value(dialog.focused()).is_empty() {
            press(dialog, KeyCode::Backspace);
        }
    }

    #[test]
    fn edit_and_submit() {
        let mut dialog = EditDialog::new(&Settings::default());
        for _ in 0..3 {
            press(&mut dialog, KeyCode::Tab);
        }
        assert_eq!(dialog.focused(), SettingsField::Has);
        clear(&mut dialog);
        type_text(&mut dialog, "120");

        match press(&mut dialog, KeyCode::Enter) {
            DialogOutcome::Submit(settings) => {
                assert_eq!(settings.has(), 120);
                assert_eq!(settings.cell_weight(), 50);
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn rejected_submit_stays_open() {
        let mut dialog = EditDialog::new(&Settings::default());
        press(&mut dialog, KeyCode::Tab);
        clear(&mut dialog);
        type_text(&mut dialog, "99");
        assert_eq!(press(&mut dialog, KeyCode::Enter), DialogOutcome::Continue);
        assert!(dialog.show_all_errors);
    }

    #[test]
    fn escape_cancels() {
        let mut dialog = EditDialog::new(&Settings::default());
        type_text(&mut dialog, "5");
        assert_eq!(press(&mut dialog, KeyCode::Esc), DialogOutcome::Cancel);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut dialog = EditDialog::new(&Settings::default());
        press(&mut dialog, KeyCode::BackTab);
        assert_eq!(dialog.focused(), SettingsField::ToSpend);
        press(&mut dialog, KeyCode::Down);
        assert_eq!(dialog.focused(), SettingsField::CellWeight);
    }

    #[test]
    fn letters_are_ignored() {
        let mut dialog = EditDialog::new(&Settings::default());
        type_text(&mut dialog, "xyz");
        assert_eq!(dialog.form().value(SettingsField::CellWeight), "50");
        assert!(!dialog.touched[0]);
    }
}
