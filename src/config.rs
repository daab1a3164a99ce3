use std::{env, fs, io, path::Path, str::FromStr};

use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

use crate::error::Error;

static DEFAULT_PATH: &str = "config.toml";
static LUNCH_URL: &str = "http://preston.se/dagens.html";
static FALLBACK_IMAGE: &str = "http://i0.kym-cdn.com/photos/images/original/000/538/460/90d.jpg";

/// Everything the bot says that isn't hardcoded. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lunch: LunchConfig,
    pub countdown: Countdown,
    pub songs: Vec<String>,
    pub jokes: Vec<String>,
    pub abandonship: Vec<String>,
    pub caturday: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LunchConfig {
    pub url: Url,
    /// Shown instead of the menu when the page can't be fetched.
    pub fallback_image: Url,
}

impl Default for LunchConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(LUNCH_URL).expect("default lunch url should be valid"),
            fallback_image: Url::parse(FALLBACK_IMAGE)
                .expect("default fallback image url should be valid"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Countdown {
    pub label: String,
    pub date: NaiveDate,
    pub arrived: String,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            label: "WoW Classic".to_string(),
            date: NaiveDate::from_ymd_opt(2019, 8, 27).expect("countdown date should be valid"),
            arrived: "We're home boys".to_string(),
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(From::from)
    }
}

impl Config {
    /// A missing file is not an error; the defaults are used instead.
    pub fn load(p: impl AsRef<Path>) -> crate::Result<Self> {
        let p = p.as_ref();
        match fs::read_to_string(p) {
            Ok(s) => s.parse(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("config file {} not found, using defaults.", p.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_env() -> crate::Result<Self> {
        match env::var("CONFIG") {
            Ok(p) => Self::load(p),
            Err(_) => Self::load(DEFAULT_PATH),
        }
    }
}
