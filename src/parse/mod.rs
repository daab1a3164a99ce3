mod events;
mod menu_page;

pub use events::{events, Event};
pub use menu_page::{extract, MenuPage, RestaurantMenu};
