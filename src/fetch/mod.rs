use reqwest::{Client, Error as RequestError, StatusCode};
use tracing::{instrument, Level};
use url::Url;

/// Result of asking the lunch site for its page.
#[derive(Debug)]
pub enum Page {
    Ok(String),
    /// Any status other than `200 OK`; the body is never read.
    Status(StatusCode),
}

pub fn make_client() -> Client {
    Client::builder()
        .gzip(true)
        .build()
        .expect("client creation should succeed")
}

#[instrument(skip(client, url), fields(url = %url), level = Level::TRACE)]
pub async fn lunch_page(client: &Client, url: &Url) -> Result<Page, RequestError> {
    let start = std::time::Instant::now();
    let res = client.get(url.clone()).send().await?;
    if res.status() != StatusCode::OK {
        return Ok(Page::Status(res.status()));
    }
    let text = res.text().await?;
    log::trace!("Got text of lunch page in \t {:?}", start.elapsed());
    Ok(Page::Ok(text))
}
