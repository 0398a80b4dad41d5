use crate::config::{Auth, Config};
use crate::endpoints::paged;
use crate::error::Result;
use crate::models::Page;
use crate::JiraError;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// JSON-over-HTTP access to a JIRA instance.
///
/// Every resource operation takes one of these explicitly. An empty response
/// body is reported as `Value::Null`.
#[allow(async_fn_in_trait)]
pub trait RemoteClient {
    async fn send(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<Value>;
}

/// Typed wrapper around [`RemoteClient::send`].
pub async fn request<C, B, T>(client: &C, method: Method, endpoint: &str, body: Option<&B>) -> Result<T>
where
    C: RemoteClient,
    B: Serialize,
    T: DeserializeOwned,
{
    let body = body.map(serde_json::to_value).transpose()?;
    let response = client.send(method, endpoint, body).await?;
    Ok(serde_json::from_value(response)?)
}

/// Sends a request whose response body, if any, is not needed.
pub async fn execute<C, B>(client: &C, method: Method, endpoint: &str, body: Option<&B>) -> Result<()>
where
    C: RemoteClient,
    B: Serialize,
{
    let body = body.map(serde_json::to_value).transpose()?;
    client.send(method, endpoint, body).await?;
    Ok(())
}

/// Collects every value of a paged list endpoint.
pub async fn get_all<C, T>(client: &C, endpoint: &str) -> Result<Vec<T>>
where
    C: RemoteClient,
    T: DeserializeOwned,
{
    let mut values: Vec<T> = Vec::new();
    let mut start_at = 0;

    loop {
        let page: Page<T> = request(client, Method::GET, &paged(endpoint, start_at), None::<&()>).await?;

        let page_size = page.values.len() as u64;
        values.extend(page.values);
        start_at += page_size;

        if page.is_last || page_size == 0 || (page.total > 0 && start_at >= page.total) {
            break;
        }
    }

    Ok(values)
}

#[derive(Clone)]
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    auth: Auth,
}

impl JiraClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        Ok(Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .user_agent(concat!("jira-field-sync/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: config.auth.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RemoteClient for JiraClient {
    async fn send(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, "Sending JIRA request");

        let mut builder = self.client.request(method, url);
        builder = match &self.auth {
            Auth::Bearer(token) => builder.bearer_auth(token),
            Auth::Basic { user, token } => builder.basic_auth(user, Some(token)),
        };
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(JiraError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
