use crate::model::{format_price, Cart, Restaurant};
use crossterm::event::KeyCode;
use gusto_nav::{Action, Entity, Event, Params, View};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};

/// Detail page for `/restaurant/:slug`; the slug arrives as a forwarded
/// path parameter.
pub struct RestaurantPage {
    selected: usize,
    catalog: Vec<Restaurant>,
    cart: Entity<Cart>,
}

impl RestaurantPage {
    pub fn new(catalog: Vec<Restaurant>, cart: Entity<Cart>) -> Self {
        Self {
            selected: 0,
            catalog,
            cart,
        }
    }

    fn restaurant(&self, params: &Params) -> Option<&Restaurant> {
        let slug = params.get("slug")?;
        self.catalog.iter().find(|r| r.slug == slug)
    }
}

impl View for RestaurantPage {
    fn on_enter(&mut self, _params: &Params) {
        self.selected = 0;
    }

    fn render(&mut self, frame: &mut ratatui::Frame, area: Rect, params: &Params) {
        let Some(restaurant) = self.restaurant(params).cloned() else {
            let unknown = params.get("slug").map(String::as_str).unwrap_or("?");
            let message = Paragraph::new(format!("No restaurant under \"{unknown}\" — Esc to go back"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(message, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::styled(
                restaurant.name,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(restaurant.tagline, Style::default().fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = restaurant
            .menu
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let is_selected = i == self.selected;
                let marker = if is_selected { "▶ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        item.name,
                        Style::default().add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                    ),
                    Span::styled(
                        format!("  {}", format_price(item.price_cents)),
                        Style::default().fg(Color::Green),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(" Menu ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(list, chunks[1]);

        let cart_count = self.cart.read(|c| c.item_count()).unwrap_or_default();
        let footer = Paragraph::new(format!(
            " ↑/↓ Select │ A Add to order ({cart_count} items) │ C Checkout │ Esc Back │ Q Quit ",
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_event(&mut self, event: Event, params: &Params) -> Option<Action> {
        let Event::Key(key) = event else { return None };
        let menu_len = self.restaurant(params).map(|r| r.menu.len()).unwrap_or(0);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') if menu_len > 0 => {
                if self.selected > 0 {
                    self.selected -= 1;
                } else {
                    self.selected = menu_len - 1;
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') if menu_len > 0 => {
                if self.selected + 1 < menu_len {
                    self.selected += 1;
                } else {
                    self.selected = 0;
                }
                None
            }
            KeyCode::Char('a') | KeyCode::Enter => {
                if let Some(restaurant) = self.restaurant(params) {
                    if let Some(item) = restaurant.menu.get(self.selected).cloned() {
                        let name = restaurant.name.to_string();
                        let _ = self.cart.update(|c| c.add(&name, &item));
                    }
                }
                None
            }
            KeyCode::Char('c') => Some(Action::Navigate("/checkout".to_string())),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}
