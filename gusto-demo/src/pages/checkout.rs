use crate::model::{format_price, Cart};
use crossterm::event::KeyCode;
use gusto_nav::{Action, Entity, Event, Params, View};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct CheckoutPage {
    cart: Entity<Cart>,
}

impl CheckoutPage {
    pub fn new(cart: Entity<Cart>) -> Self {
        Self { cart }
    }
}

fn order_code() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("G-{:05}", seconds % 100_000)
}

impl View for CheckoutPage {
    fn render(&mut self, frame: &mut ratatui::Frame, area: Rect, _params: &Params) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let cart = self.cart.read(|c| c.clone()).unwrap_or_default();

        let header = Paragraph::new("Checkout")
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        if cart.lines.is_empty() {
            let empty = Paragraph::new("Your order is empty — Esc to keep browsing")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, chunks[1]);
        } else {
            let mut items: Vec<ListItem> = cart
                .lines
                .iter()
                .map(|line| {
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("{}× {} ", line.quantity, line.item)),
                        Span::styled(
                            format!("({})", line.restaurant),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(
                            format!("  {}", format_price(line.price_cents * line.quantity)),
                            Style::default().fg(Color::Green),
                        ),
                    ]))
                })
                .collect();
            items.push(ListItem::new(Line::from(Span::styled(
                format!("Total  {}", format_price(cart.total_cents())),
                Style::default().add_modifier(Modifier::BOLD),
            ))));

            let list = List::new(items).block(
                Block::default()
                    .title(" Your order ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
            frame.render_widget(list, chunks[1]);
        }

        let footer = Paragraph::new(" Enter Place order │ X Clear │ Esc Back │ Q Quit ")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_event(&mut self, event: Event, _params: &Params) -> Option<Action> {
        let Event::Key(key) = event else { return None };
        match key.code {
            KeyCode::Enter => {
                let placed = self
                    .cart
                    .update(|c| {
                        if c.lines.is_empty() {
                            false
                        } else {
                            c.confirmed = Some(order_code());
                            true
                        }
                    })
                    .unwrap_or(false);
                placed.then(|| Action::Navigate("/confirm".to_string()))
            }
            KeyCode::Char('x') => {
                let _ = self.cart.update(|c| c.clear());
                None
            }
            KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}
