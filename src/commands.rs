use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, Weekday};
use rand::{seq::IndexedRandom, Rng};
use regex::Regex;

use crate::{config::Config, reply::Reply};

static FRIDAY_VIDEO: &str = "https://www.youtube.com/watch?v=kfVsfOSbJY0";
static SATURDAY_VIDEO: &str = "https://www.youtube.com/watch?v=GVCzdpagXOQ";
static NOT_CATURDAY: &str = "https://i.imgur.com/DKUR9Tk.png";
static LAWS: &str = "```First Law
  A robot may not injure a human being or, through inaction, allow a human being to come to harm.
Second Law
  A robot must obey the orders given it by human beings except where such orders would conflict with the First Law.
Third Law
  A robot must protect its own existence as long as such protection does not conflict with the First or Second Laws.```
I see them more as suggestions than laws.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AbandonShip,
    Caturday,
    DaysLeft,
    Friday,
    Joke,
    Laws,
    /// Optionally narrowed down to one restaurant.
    Lunch(Option<String>),
    Saturday,
    Song,
    WowClassic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Reply(Reply),
    /// The menu has to be fetched before anything can be said.
    Lunch { restaurant: Option<String> },
    /// Nothing configured to say.
    Silent,
}

impl Command {
    /// `!name [argument]`, where `name` has to match exactly.
    pub fn parse(text: &str) -> Option<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(?s)^!(\S+)\s*(.*?)\s*$").expect("regex should be valid")
        });
        let caps = re.captures(text)?;
        let argument = caps.get(2).map(|m| m.as_str()).filter(|s| !s.is_empty());
        let command = match &caps[1] {
            "abandonship" => Self::AbandonShip,
            "caturday" => Self::Caturday,
            "daysleft" => Self::DaysLeft,
            "friday" => Self::Friday,
            "joke" => Self::Joke,
            "laws" => Self::Laws,
            "lunch" => Self::Lunch(argument.map(str::to_owned)),
            "saturday" => Self::Saturday,
            "song" => Self::Song,
            "wowclassic" => Self::WowClassic,
            _ => return None,
        };
        Some(command)
    }

    pub fn respond<R: Rng + ?Sized>(
        &self,
        today: NaiveDate,
        config: &Config,
        rng: &mut R,
    ) -> Response {
        let is = |day: Weekday| today.weekday() == day;
        let reply = match self {
            Self::Friday if is(Weekday::Fri) => FRIDAY_VIDEO.to_string(),
            Self::Friday => not_today("Friday", FRIDAY_VIDEO),
            Self::Saturday if is(Weekday::Sat) => SATURDAY_VIDEO.to_string(),
            Self::Saturday => not_today("Saturday", SATURDAY_VIDEO),
            Self::Caturday if is(Weekday::Sat) => return pick(&config.caturday, rng),
            Self::Caturday => NOT_CATURDAY.to_string(),
            Self::DaysLeft => days_left(today, config),
            Self::WowClassic => "We're home boys".to_string(),
            Self::Laws => LAWS.to_string(),
            Self::Song => return pick(&config.songs, rng),
            Self::Joke => return pick(&config.jokes, rng),
            Self::AbandonShip => return pick(&config.abandonship, rng),
            Self::Lunch(restaurant) => {
                return Response::Lunch {
                    restaurant: restaurant.clone(),
                }
            }
        };
        Response::Reply(Reply::text(reply))
    }
}

fn not_today(day: &str, video: &str) -> String {
    format!("It is not {day}. Let me link you a video that can educate you on the matter: {video}")
}

fn days_left(today: NaiveDate, config: &Config) -> String {
    let countdown = &config.countdown;
    match (countdown.date - today).num_days() {
        i64::MIN..=0 => countdown.arrived.clone(),
        1 => format!("1 day left until {}", countdown.label),
        n => format!("{n} days left until {}", countdown.label),
    }
}

fn pick<R: Rng + ?Sized>(choices: &[String], rng: &mut R) -> Response {
    choices
        .choose(rng)
        .map_or(Response::Silent, |s| Response::Reply(Reply::text(s.as_str())))
}
