use crossterm::event::KeyCode;
use gusto_nav::{Action, Event, Params, View};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

/// Catch-all target; built lazily since most sessions never see it.
#[derive(Default)]
pub struct NotFoundPage;

impl View for NotFoundPage {
    fn render(&mut self, frame: &mut ratatui::Frame, area: Rect, _params: &Params) {
        let body = Paragraph::new(vec![
            Line::from(""),
            Line::styled(
                "404",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Line::from("That page is not on the menu."),
            Line::from(""),
            Line::styled(
                "H — home │ Esc — back",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(body, area);
    }

    fn handle_event(&mut self, event: Event, _params: &Params) -> Option<Action> {
        let Event::Key(key) = event else { return None };
        match key.code {
            KeyCode::Char('h') | KeyCode::Enter => Some(Action::Navigate("/".to_string())),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}
