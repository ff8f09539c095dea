// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use paydesk_app::{
    Ack, ApiError, Fee, FeeChange, FeeId, ListPage, ListQuery, Merchant, MerchantAction,
    MerchantDecision, MerchantId, RegisterMerchantForm, Transaction, TransactionId,
};
use reqwest::blocking::Client as HttpClient;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1";

const NO_BODY: Option<&()> = None;

/// Blocking client for the payments admin REST API. Every call maps its
/// outcome onto [`ApiError`] so controllers never see transport types.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    token: Option<String>,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let base_url =
            Url::parse(trimmed).with_context(|| format!("parse api.base_url {trimmed:?}"))?;
        if base_url.cannot_be_a_base() {
            bail!("api.base_url {trimmed:?} cannot carry a path");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            token: token
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Cheapest authenticated round trip the API offers.
    pub fn ping(&self) -> Result<(), ApiError> {
        let query = ListQuery {
            page: 1,
            page_size: 1,
            filters: Default::default(),
        };
        self.list_fees(&query).map(|_| ())
    }

    pub fn list_merchants(&self, query: &ListQuery) -> Result<ListPage<Merchant>, ApiError> {
        self.list(&["merchant"], query)
    }

    pub fn merchant(&self, id: &MerchantId) -> Result<Merchant, ApiError> {
        let url = self.endpoint(&["merchant", id.trimmed()], &[])?;
        let detail: Detail<Merchant> = self.call(Method::GET, url, NO_BODY)?;
        Ok(detail.into_inner())
    }

    pub fn merchant_transactions(&self, id: &MerchantId) -> Result<Vec<Transaction>, ApiError> {
        let url = self.endpoint(
            &["merchant", id.trimmed(), "transactions"],
            &[("page", "1"), ("limit", "10")],
        )?;
        let envelope: TransactionsEnvelope = self.call(Method::GET, url, NO_BODY)?;
        Ok(envelope.into_transactions())
    }

    pub fn register_merchant(&self, form: &RegisterMerchantForm) -> Result<Ack, ApiError> {
        let url = self.endpoint(&["auth", "register"], &[])?;
        self.call(Method::POST, url, Some(form))
    }

    pub fn decide_merchant(&self, decision: &MerchantDecision) -> Result<Ack, ApiError> {
        let action = match decision.action {
            MerchantAction::Approve => "approve",
            MerchantAction::Block => "block",
        };
        let url = self.endpoint(&["admin", action, decision.merchant_id.trimmed()], &[])?;
        self.call(Method::PATCH, url, NO_BODY)
    }

    pub fn list_fees(&self, query: &ListQuery) -> Result<ListPage<Fee>, ApiError> {
        self.list(&["fee"], query)
    }

    pub fn fee(&self, id: &FeeId) -> Result<Fee, ApiError> {
        let url = self.endpoint(&["fee", id.trimmed()], &[])?;
        let detail: Detail<Fee> = self.call(Method::GET, url, NO_BODY)?;
        Ok(detail.into_inner())
    }

    pub fn save_fee(&self, change: &FeeChange) -> Result<Ack, ApiError> {
        let payload = change.form().to_payload()?;
        match change {
            FeeChange::Create(_) => {
                let url = self.endpoint(&["fee"], &[])?;
                self.call(Method::POST, url, Some(&payload))
            }
            FeeChange::Update { id, .. } => {
                let url = self.endpoint(&["fee", id.trimmed()], &[])?;
                self.call(Method::PUT, url, Some(&payload))
            }
        }
    }

    pub fn delete_fee(&self, id: &FeeId) -> Result<Ack, ApiError> {
        let url = self.endpoint(&["fee", id.trimmed()], &[])?;
        self.call(Method::DELETE, url, NO_BODY)
    }

    pub fn list_transactions(&self, query: &ListQuery) -> Result<ListPage<Transaction>, ApiError> {
        self.list(&["transaction"], query)
    }

    pub fn delete_transaction(&self, id: &TransactionId) -> Result<Ack, ApiError> {
        let url = self.endpoint(&["transaction", id.trimmed()], &[])?;
        self.call(Method::DELETE, url, NO_BODY)
    }

    fn list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &ListQuery,
    ) -> Result<ListPage<T>, ApiError> {
        let params = query.params();
        let pairs: Vec<(&str, &str)> = params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let url = self.endpoint(segments, &pairs)?;
        let envelope: ListEnvelope<T> = self.call(Method::GET, url, NO_BODY)?;
        Ok(envelope.into_page())
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Network(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn call<R, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!(%method, path = url.path(), "api request");
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|error| connection_error(&self.base_url, error))?;
        tracing::debug!(%method, path = url.path(), status = status.as_u16(), "api response");

        decode_response(status, &text)
    }
}

fn connection_error(base_url: &Url, error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::Network(format!("request to {base_url} timed out"));
    }
    ApiError::Network(format!("cannot reach {base_url} ({error})"))
}

fn decode_response<R: DeserializeOwned>(status: StatusCode, body: &str) -> Result<R, ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Auth);
    }
    if !status.is_success() {
        return Err(ApiError::Http {
            status: status.as_u16(),
            message: error_message(body),
        });
    }

    let value = if body.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(body).map_err(|error| ApiError::Decode(error.to_string()))?
    };
    if value.get("success") == Some(&Value::Bool(false)) {
        return Err(ApiError::Rejected {
            message: message_field(&value),
        });
    }
    serde_json::from_value(value).map_err(|error| ApiError::Decode(error.to_string()))
}

/// Server-provided text from an error body: a JSON `message` or `error`
/// field, or a short plain-text body.
fn error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return message_field(&value);
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('<') {
        return Some(trimmed.to_owned());
    }
    None
}

fn message_field(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_owned)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    pages: Option<u32>,
    #[serde(default)]
    total: Option<u64>,
}

impl<T> ListEnvelope<T> {
    /// `pagination.pages` wins over a top-level `totalPages`; anything
    /// missing is derived later from the item total.
    fn into_page(self) -> ListPage<T> {
        let (pages, pagination_total) = self
            .pagination
            .map_or((None, None), |pagination| (pagination.pages, pagination.total));
        ListPage {
            items: self.data,
            total_pages: pages.or(self.total_pages),
            total: self.total.or(pagination_total),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Detail<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TransactionsEnvelope {
    #[serde(default)]
    data: Option<TransactionsData>,
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
}

#[derive(Debug, Deserialize)]
struct TransactionsData {
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
}

impl TransactionsEnvelope {
    fn into_transactions(self) -> Vec<Transaction> {
        self.data
            .and_then(|data| data.transactions)
            .or(self.transactions)
            .unwrap_or_default()
    }
}
