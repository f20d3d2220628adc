use anyhow::{anyhow, Context, Result};
use reqwest::{header::LOCATION, RequestBuilder, Response, StatusCode};
use rust_decimal::Decimal;

use crate::database::models::{CashCard, CashCardRequest};

/// Thin HTTP client for the /cashcards API
pub struct CashCardClient {
    http: reqwest::Client,
    base_url: String,
    user: String,
    password: Option<String>,
}

impl CashCardClient {
    pub fn new(base_url: impl Into<String>, user: impl Into<String>, password: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user: user.into(),
            password,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.user, self.password.as_deref())
    }

    pub async fn list(&self, page: Option<u32>, size: Option<u32>, sort: &[String]) -> Result<Vec<CashCard>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = size {
            query.push(("size", size.to_string()));
        }
        for s in sort {
            query.push(("sort", s.clone()));
        }

        let resp = self.authed(self.http.get(self.url("/cashcards")).query(&query)).send().await?;
        let resp = ensure_success(resp).await?;
        resp.json().await.context("failed to parse cash card list")
    }

    pub async fn get(&self, id: i64) -> Result<CashCard> {
        let resp = self
            .authed(self.http.get(self.url(&format!("/cashcards/{}", id))))
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        resp.json().await.context("failed to parse cash card")
    }

    /// Returns the Location of the new card
    pub async fn create(&self, amount: Decimal) -> Result<String> {
        let resp = self
            .authed(self.http.post(self.url("/cashcards")))
            .json(&CashCardRequest { amount })
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| anyhow!("server did not return a Location header"))?;
        Ok(location.to_string())
    }

    pub async fn update(&self, id: i64, amount: Decimal) -> Result<()> {
        let resp = self
            .authed(self.http.put(self.url(&format!("/cashcards/{}", id))))
            .json(&CashCardRequest { amount })
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let resp = self
            .authed(self.http.delete(self.url(&format!("/cashcards/{}", id))))
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

/// Turn non-2xx responses into errors carrying the server's message when it sent one
async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(anyhow!("cash card not found"));
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);

    Err(anyhow!("request failed with {}: {}", status, message))
}
