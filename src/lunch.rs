use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::LunchConfig,
    fetch::{self, Page},
    parse::{self, MenuPage, RestaurantMenu},
    reply::{Embed, Reply},
};

pub const EMBED_COLOR: u32 = 10_203_435;

/// Today's lunch, or the fact that we couldn't get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lunch {
    Menu(MenuPage),
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a RestaurantMenu),
    NotFound,
    /// There was no menu to look in.
    Unavailable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Embed,
    Text,
}

impl From<Page> for Lunch {
    /// Only a `200 OK` page gets scraped.
    fn from(page: Page) -> Self {
        match page {
            Page::Ok(html) => {
                let page = parse::extract(&html);
                if page.is_empty() {
                    log::info!("lunch page has no restaurants today");
                } else {
                    log::debug!("scraped {} restaurants", page.len());
                }
                Self::Menu(page)
            }
            Page::Status(status) => {
                log::warn!("lunch page answered {status}, menu unavailable");
                Self::Unavailable
            }
        }
    }
}

impl Lunch {
    pub async fn fetch(client: &Client, config: &LunchConfig) -> Self {
        match fetch::lunch_page(client, &config.url).await {
            Ok(page) => page.into(),
            Err(e) => {
                log::warn!("Error while fetching lunch page: {e:?}");
                Self::Unavailable
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        match self {
            Self::Menu(page) => page.restaurant(name).map_or(Lookup::NotFound, Lookup::Found),
            Self::Unavailable => Lookup::Unavailable,
        }
    }

    /// Renders the whole menu, or one restaurant of it when `restaurant` is given.
    pub fn reply(&self, restaurant: Option<&str>, format: Format, config: &LunchConfig) -> Reply {
        let fallback = config.fallback_image.as_str();
        match (restaurant, format) {
            (Some(name), format) => match self.lookup(name) {
                Lookup::Found(menu) => match format {
                    Format::Embed => Embed::new(EMBED_COLOR)
                        .field(menu.name(), menu.items().join("\n"))
                        .into(),
                    Format::Text => Reply::text(menu.items().join("\n")),
                },
                Lookup::NotFound => Reply::text(not_found(name)),
                Lookup::Unavailable => unavailable(format, fallback),
            },
            (None, Format::Embed) => match self {
                Self::Menu(page) => page
                    .iter()
                    .fold(Embed::new(EMBED_COLOR), |embed, menu| {
                        embed.field(menu.name(), menu.items().join("\n"))
                    })
                    .into(),
                Self::Unavailable => unavailable(format, fallback),
            },
            (None, Format::Text) => match self {
                Self::Menu(page) => Reply::text(page.to_string()),
                Self::Unavailable => unavailable(format, fallback),
            },
        }
    }
}

fn not_found(name: &str) -> String {
    format!("No restaurant named \"{name}\" on today's menu.")
}

fn unavailable(format: Format, fallback: &str) -> Reply {
    match format {
        Format::Embed => Embed::new(EMBED_COLOR).image(fallback).into(),
        Format::Text => Reply::text(fallback),
    }
}
