use crossterm::event::KeyCode;
use gusto_nav::{Action, Event, Params, View};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

/// Landing page for routes registered from the restaurant API. One shared
/// instance serves every dynamic route; the slug arrives as a preset
/// parameter.
#[derive(Default)]
pub struct DynamicPage;

impl View for DynamicPage {
    fn render(&mut self, frame: &mut ratatui::Frame, area: Rect, params: &Params) {
        let slug = params.get("slug").map(String::as_str).unwrap_or("?");

        let body = Paragraph::new(vec![
            Line::from(""),
            Line::styled(
                slug.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from("Freshly listed from the restaurant API."),
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
