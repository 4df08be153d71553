mod models;

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub use self::models::{ChargeSession, Installation};
use self::models::Page;
use crate::{api::ChargingCloud, core::period::DateRange, prelude::*};

/// Non-successful response from the Zaptec API.
#[derive(Debug, thiserror::Error)]
#[error("`{path}` responded with {status}: {body}")]
pub struct UpstreamError {
    pub path: String,
    pub status: StatusCode,

    /// Response body, kept for diagnostics.
    pub body: String,
}

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(base_url: Url, access_token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {access_token}"))?);
        let client = Client::builder()
            .user_agent("ladegrunnlag")
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;
        Ok(Self { client, base_url })
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    async fn get<Q, R>(&self, path: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.base_url.join(path)?)
            .query(query)
            .send()
            .await
            .with_context(|| format!("failed to call `{path}`"))?;
        error_for_status(path, response)
            .await?
            .json()
            .await
            .with_context(|| format!("failed to deserialize `{path}` response JSON"))
    }
}

#[async_trait]
impl ChargingCloud for Api {
    #[instrument(skip_all)]
    async fn get_installations(&self) -> Result<Vec<Installation>> {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Query {
            page_size: u32,
        }

        info!("fetching…");
        let page: Page<Installation> = self.get("api/installation", &Query { page_size: 100 }).await?;
        info!(n_installations = page.data.len(), "fetched");
        Ok(page.data)
    }

    #[instrument(skip_all, fields(installation_id = installation_id))]
    async fn get_charge_history(
        &self,
        installation_id: &str,
        range: DateRange,
    ) -> Result<Vec<ChargeSession>> {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Query<'a> {
            installation_id: &'a str,
            from: String,
            to: String,
            detail_level: u8,
            page_size: u32,
        }

        info!(?range, "fetching…");
        let query = Query {
            installation_id,
            from: range.from_timestamp(),
            to: range.to_timestamp(),
            detail_level: 1,
            page_size: 100,
        };
        let page: Page<ChargeSession> = self.get("api/chargehistory", &query).await?;
        info!(n_sessions = page.data.len(), "fetched");
        Ok(page.data)
    }
}

/// Exchange the user's credentials for an access token (OAuth password grant).
#[instrument(skip_all, fields(username = username))]
pub async fn request_access_token(base_url: &Url, username: &str, password: &str) -> Result<String> {
    #[derive(Deserialize)]
    struct TokenResponse {
        access_token: String,
    }

    const PATH: &str = "oauth/token";

    info!("requesting…");
    let response = Client::builder()
        .user_agent("ladegrunnlag")
        .timeout(Duration::from_secs(30))
        .build()?
        .post(base_url.join(PATH)?)
        .form(&[("grant_type", "password"), ("username", username), ("password", password)])
        .send()
        .await
        .with_context(|| format!("failed to call `{PATH}`"))?;
    let token: TokenResponse = error_for_status(PATH, response)
        .await?
        .json()
        .await
        .context("failed to deserialize the token response")?;
    Ok(token.access_token)
}

async fn error_for_status(path: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(UpstreamError { path: path.to_owned(), status, body }.into())
}
