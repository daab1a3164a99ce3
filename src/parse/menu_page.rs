use std::fmt::{self, Display, Formatter};

use super::{events, Event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantMenu {
    name: String,
    items: Vec<String>,
}

impl RestaurantMenu {
    fn new(name: String) -> Self {
        Self {
            name,
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

/// Restaurants in the order their headings first appear on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuPage {
    restaurants: Vec<RestaurantMenu>,
}

impl MenuPage {
    pub fn iter(&self) -> std::slice::Iter<'_, RestaurantMenu> {
        self.restaurants.iter()
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Exact, case-sensitive name lookup.
    pub fn restaurant(&self, name: &str) -> Option<&RestaurantMenu> {
        self.restaurants.iter().find(|r| r.name == name)
    }

    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut extraction = Extraction::default();
        for event in events {
            extraction.feed(event);
        }
        extraction.finish()
    }
}

impl Display for MenuPage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, restaurant) in self.restaurants.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", restaurant.name)?;
            for item in &restaurant.items {
                writeln!(f, "{item}")?;
            }
        }
        Ok(())
    }
}

/// Scrapes a lunch listing: every `h3` names a restaurant and the text right
/// after each following `p` or `li` is one of its menu lines.
///
/// Never fails. Markup that doesn't fit the shape just contributes nothing.
pub fn extract(html: &str) -> MenuPage {
    MenuPage::from_events(events(html))
}

// Per-call state; a fresh one is built for every page.
#[derive(Debug, Default)]
struct Extraction {
    awaiting_heading_text: bool,
    awaiting_item_text: bool,
    current: Option<usize>,
    restaurants: Vec<RestaurantMenu>,
}

impl Extraction {
    fn feed(&mut self, event: Event) {
        match event {
            Event::TagOpen { name, .. } => match name.as_str() {
                "h3" => self.awaiting_heading_text = true,
                "p" | "li" => self.awaiting_item_text = true,
                _ => {}
            },
            Event::Text(data) => self.text(&data),
        }
    }

    fn text(&mut self, data: &str) {
        if self.awaiting_heading_text {
            self.awaiting_heading_text = false;
            self.current = Some(self.start_restaurant(data));
        }
        if self.awaiting_item_text {
            self.awaiting_item_text = false;
            match self.current {
                Some(i) => self.restaurants[i].items.push(data.to_owned()),
                None => log::debug!("skipping menu line before any restaurant: {data:?}"),
            }
        }
    }

    /// A repeated heading keeps its slot but drops the items gathered so far.
    fn start_restaurant(&mut self, name: &str) -> usize {
        if let Some(i) = self.restaurants.iter().position(|r| r.name == name) {
            self.restaurants[i].items.clear();
            i
        } else {
            self.restaurants.push(RestaurantMenu::new(name.to_owned()));
            self.restaurants.len() - 1
        }
    }

    fn finish(self) -> MenuPage {
        MenuPage {
            restaurants: self.restaurants,
        }
    }
}
