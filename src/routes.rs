use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    commands::{self, Command},
    config::Config,
    lunch::{Format, Lunch},
    reply::Reply,
    topic,
};

#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<Config>,
    client: Client,
}

impl AppState {
    pub fn new(config: Config, client: Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Message {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Channel {
    #[serde(default)]
    topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelUpdate {
    #[serde(default)]
    before: Channel,
    #[serde(default)]
    after: Channel,
}

#[derive(Debug, Deserialize)]
pub struct LunchQuery {
    restaurant: Option<String>,
    #[serde(default)]
    format: Format,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/message", post(message))
        .route("/channel-update", post(channel_update))
        .route("/lunch", get(lunch))
        .with_state(state)
}

fn reply_or_silence(reply: Option<Reply>) -> Response {
    match reply {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn message(State(state): State<AppState>, Json(msg): Json<Message>) -> Response {
    let Some(command) = Command::parse(&msg.content) else {
        return reply_or_silence(None);
    };
    tracing::debug!("handling {command:?}");
    let today = Local::now().date_naive();
    let response = command.respond(today, &state.config, &mut rand::rng());
    let reply = match response {
        commands::Response::Reply(reply) => Some(reply),
        commands::Response::Lunch { restaurant } => {
            let lunch = Lunch::fetch(&state.client, &state.config.lunch).await;
            Some(lunch.reply(restaurant.as_deref(), Format::Embed, &state.config.lunch))
        }
        commands::Response::Silent => {
            tracing::warn!("nothing configured to answer {command:?} with");
            None
        }
    };
    reply_or_silence(reply)
}

async fn channel_update(Json(update): Json<ChannelUpdate>) -> Response {
    let announcement = topic::announce(
        update.before.topic.as_deref(),
        update.after.topic.as_deref(),
    );
    reply_or_silence(announcement.map(Reply::text))
}

async fn lunch(State(state): State<AppState>, Query(query): Query<LunchQuery>) -> Json<Reply> {
    let lunch = Lunch::fetch(&state.client, &state.config.lunch).await;
    Json(lunch.reply(query.restaurant.as_deref(), query.format, &state.config.lunch))
}

#[cfg(test)]
mod tests {
    use std::{fs, net::SocketAddr};

    use serde_json::{json, Value};
    use url::Url;

    use super::*;
    use crate::{config::LunchConfig, fetch::make_client, lunch::EMBED_COLOR, test_server::serve};

    async fn lunch_site(status: StatusCode) -> Url {
        let html = fs::read_to_string("./src/parse/html_examples/dagens.html").unwrap();
        let addr = serve(Router::new().route(
            "/dagens.html",
            get(move || async move { (status, html) }),
        ))
        .await;
        Url::parse(&format!("http://{addr}/dagens.html")).unwrap()
    }

    async fn bot(lunch_url: Url) -> SocketAddr {
        let config = Config {
            lunch: LunchConfig {
                url: lunch_url,
                ..LunchConfig::default()
            },
            ..Config::default()
        };
        serve(router(AppState::new(config, make_client()))).await
    }

    async fn post(addr: SocketAddr, path: &str, body: Value) -> (u16, Option<Value>) {
        let res = make_client()
            .post(format!("http://{addr}{path}"))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = res.status().as_u16();
        let text = res.text().await.unwrap();
        (status, serde_json::from_str(&text).ok())
    }

    #[tokio::test]
    async fn test_message_command() {
        let addr = bot(lunch_site(StatusCode::OK).await).await;
        let (status, body) = post(addr, "/message", json!({"content": "!wowclassic"})).await;
        assert_eq!(status, 200);
        assert_eq!(body, Some(json!({"type": "text", "content": "We're home boys"})));
    }

    #[tokio::test]
    async fn test_message_not_a_command() {
        let addr = bot(lunch_site(StatusCode::OK).await).await;
        let (status, body) = post(addr, "/message", json!({"content": "anyone for lunch?"})).await;
        assert_eq!(status, 204);
        assert_eq!(body, None);
        let (status, _) = post(addr, "/message", json!({"content": "!song"})).await;
        assert_eq!(status, 204);
    }

    #[tokio::test]
    async fn test_message_lunch() {
        let addr = bot(lunch_site(StatusCode::OK).await).await;
        let (status, body) = post(addr, "/message", json!({"content": "!lunch Thai Corner"})).await;
        assert_eq!(status, 200);
        assert_eq!(
            body,
            Some(json!({
                "type": "embed",
                "color": EMBED_COLOR,
                "fields": [{"name": "Thai Corner", "value": "Pad thai"}],
            }))
        );
        let (_, body) = post(addr, "/message", json!({"content": "!lunch Burger King"})).await;
        assert_eq!(
            body,
            Some(json!({
                "type": "text",
                "content": "No restaurant named \"Burger King\" on today's menu.",
            }))
        );
    }

    #[tokio::test]
    async fn test_message_lunch_unavailable() {
        let addr = bot(lunch_site(StatusCode::NOT_FOUND).await).await;
        let (status, body) = post(addr, "/message", json!({"content": "!lunch"})).await;
        assert_eq!(status, 200);
        assert_eq!(
            body,
            Some(json!({
                "type": "embed",
                "color": EMBED_COLOR,
                "fields": [],
                "image": LunchConfig::default().fallback_image.as_str(),
            }))
        );
    }

    #[tokio::test]
    async fn test_channel_update() {
        let addr = bot(lunch_site(StatusCode::OK).await).await;
        let (status, body) = post(
            addr,
            "/channel-update",
            json!({"before": {"topic": "old"}, "after": {"topic": "new"}}),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body, Some(json!({"type": "text", "content": "New topic:\n```\nnew```"})));
        let (status, _) = post(
            addr,
            "/channel-update",
            json!({"before": {"topic": "same"}, "after": {"topic": "same"}}),
        )
        .await;
        assert_eq!(status, 204);
    }

    #[tokio::test]
    async fn test_lunch_text() {
        let addr = bot(lunch_site(StatusCode::OK).await).await;
        let text = make_client()
            .get(format!("http://{addr}/lunch?format=text&restaurant=Preston"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "text",
                "content": "Köttbullar med gräddsås och potatismos\nVegetarisk lasagne",
            })
        );
    }
}
