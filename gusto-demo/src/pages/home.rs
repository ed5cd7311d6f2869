use crate::model::{format_price, Cart, Restaurant};
use crossterm::event::KeyCode;
use gusto_nav::{Action, Entity, Event, Params, View};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};

pub struct HomePage {
    selected: usize,
    catalog: Vec<Restaurant>,
    cart: Entity<Cart>,
}

impl HomePage {
    pub fn new(catalog: Vec<Restaurant>, cart: Entity<Cart>) -> Self {
        Self {
            selected: 0,
            catalog,
            cart,
        }
    }
}

impl View for HomePage {
    fn render(&mut self, frame: &mut ratatui::Frame, area: Rect, _params: &Params) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let cart = self.cart.read(|c| c.clone()).unwrap_or_default();

        let header = Paragraph::new("Gusto — order in")
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = self
            .catalog
            .iter()
            .enumerate()
            .map(|(i, restaurant)| {
                let is_selected = i == self.selected;
                let marker = if is_selected { "▶ " } else { "  " };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            marker,
                            Style::default().fg(if is_selected {
                                Color::Yellow
                            } else {
                                Color::DarkGray
                            }),
                        ),
                        Span::styled(
                            restaurant.name,
                            Style::default().add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("    {}", restaurant.tagline),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(" Restaurants ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(list, chunks[1]);

        let footer = Paragraph::new(format!(
            " ↑/↓ Select │ Enter Open │ C Checkout ({} items, {}) │ Q Quit ",
            cart.item_count(),
            format_price(cart.total_cents())
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_event(&mut self, event: Event, _params: &Params) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    if self.selected > 0 {
                        self.selected -= 1;
                    } else {
                        self.selected = self.catalog.len().saturating_sub(1);
                    }
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.selected + 1 < self.catalog.len() {
                        self.selected += 1;
                    } else {
                        self.selected = 0;
                    }
                    None
                }
                KeyCode::Enter => {
                    let slug = self.catalog.get(self.selected)?.slug;
                    Some(Action::Navigate(format!("/restaurant/{slug}")))
                }
                KeyCode::Char('c') => Some(Action::Navigate("/checkout".to_string())),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
