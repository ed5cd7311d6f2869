//! Domain state for the ordering front end.

/// A dish on a restaurant's menu.
#[derive(Clone)]
pub struct MenuItem {
    pub name: &'static str,
    pub price_cents: u32,
}

/// A restaurant in the built-in catalog.
///
/// The live list comes from the restaurant API when dynamic routes are
/// enabled; this catalog backs the static detail pages.
#[derive(Clone)]
pub struct Restaurant {
    pub name: &'static str,
    pub slug: &'static str,
    pub tagline: &'static str,
    pub menu: Vec<MenuItem>,
}

pub fn catalog() -> Vec<Restaurant> {
    vec![
        Restaurant {
            name: "Trattoria Roma",
            slug: "trattoria-roma",
            tagline: "Cucina romana, carbonara come si deve",
            menu: vec![
                MenuItem { name: "Carbonara", price_cents: 1250 },
                MenuItem { name: "Cacio e Pepe", price_cents: 1150 },
                MenuItem { name: "Saltimbocca", price_cents: 1680 },
                MenuItem { name: "Tiramisù", price_cents: 650 },
            ],
        },
        Restaurant {
            name: "Sushi Kyo",
            slug: "sushi-kyo",
            tagline: "Omakase counter, fish in daily",
            menu: vec![
                MenuItem { name: "Nigiri set", price_cents: 2200 },
                MenuItem { name: "Chirashi bowl", price_cents: 1890 },
                MenuItem { name: "Miso soup", price_cents: 450 },
            ],
        },
        Restaurant {
            name: "Bombay Spice",
            slug: "bombay-spice",
            tagline: "Tandoor oven, breads to match",
            menu: vec![
                MenuItem { name: "Butter Chicken", price_cents: 1450 },
                MenuItem { name: "Chana Masala", price_cents: 1100 },
                MenuItem { name: "Garlic Naan", price_cents: 380 },
                MenuItem { name: "Mango Lassi", price_cents: 520 },
            ],
        },
    ]
}

/// One line of the order.
#[derive(Clone, PartialEq)]
pub struct CartLine {
    pub restaurant: String,
    pub item: String,
    pub price_cents: u32,
    pub quantity: u32,
}

/// Shared order state, one per application.
#[derive(Clone, Default)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    /// Confirmation code once the order has been placed.
    pub confirmed: Option<String>,
}

impl Cart {
    /// Add one unit of `item`, merging with an existing line.
    pub fn add(&mut self, restaurant: &str, item: &MenuItem) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.restaurant == restaurant && l.item == item.name)
        {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            restaurant: restaurant.to_string(),
            item: item.name.to_string(),
            price_cents: item.price_cents,
            quantity: 1,
        });
    }

    pub fn total_cents(&self) -> u32 {
        self.lines.iter().map(|l| l.price_cents * l.quantity).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.confirmed = None;
    }
}

pub fn format_price(cents: u32) -> String {
    format!("€{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_same_item_merges_lines() {
        let mut cart = Cart::default();
        let item = MenuItem { name: "Carbonara", price_cents: 1250 };

        cart.add("trattoria-roma", &item);
        cart.add("trattoria-roma", &item);

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.total_cents(), 2500);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn prices_render_with_two_decimals() {
        assert_eq!(format_price(1250), "€12.50");
        assert_eq!(format_price(380), "€3.80");
        assert_eq!(format_price(5), "€0.05");
    }
}
