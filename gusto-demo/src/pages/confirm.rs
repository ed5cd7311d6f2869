use crate::model::{format_price, Cart};
use crossterm::event::KeyCode;
use gusto_nav::{Action, Entity, Event, Params, View};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

pub struct ConfirmPage {
    cart: Entity<Cart>,
}

impl ConfirmPage {
    pub fn new(cart: Entity<Cart>) -> Self {
        Self { cart }
    }
}

impl View for ConfirmPage {
    fn render(&mut self, frame: &mut ratatui::Frame, area: Rect, _params: &Params) {
        let cart = self.cart.read(|c| c.clone()).unwrap_or_default();

        let lines = match cart.confirmed.as_deref() {
            Some(code) => vec![
                Line::from(""),
                Line::styled(
                    "Order placed!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::from(""),
                Line::from(format!("Confirmation {code}")),
                Line::from(format!(
                    "{} items · {}",
                    cart.item_count(),
                    format_price(cart.total_cents())
                )),
                Line::from(""),
                Line::styled(
                    "Enter — back to restaurants",
                    Style::default().fg(Color::DarkGray),
                ),
            ],
            None => vec![
                Line::from(""),
                Line::styled("Nothing confirmed yet", Style::default().fg(Color::Red)),
                Line::from(""),
                Line::styled(
                    "Enter — back to restaurants",
                    Style::default().fg(Color::DarkGray),
                ),
            ],
        };

        let body = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(body, area);
    }

    fn handle_event(&mut self, event: Event, _params: &Params) -> Option<Action> {
        let Event::Key(key) = event else { return None };
        match key.code {
            KeyCode::Enter | KeyCode::Char('h') => {
                // done with this order; start the next one clean
                let _ = self.cart.update(|c| c.clear());
                Some(Action::Navigate("/".to_string()))
            }
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}
