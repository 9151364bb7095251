//! PagerDuty REST API v2 schedule retrieval
//!
//! Only the subset of the schedule resource needed to attribute shifts is
//! modelled: the schedule name and its final rendered entries.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default PagerDuty REST API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";

const ACCEPT_V2: &str = "application/vnd.pagerduty+json;version=2";

/// Errors raised while fetching a schedule
#[derive(Error, Debug)]
pub enum PagerDutyError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid API key: {0}")]
    InvalidApiKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReference {
    pub summary: String,
}

/// One entry of a schedule's final layer, timestamps kept as returned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedScheduleEntry {
    pub start: String,
    pub end: String,
    pub user: UserReference,
}

impl RenderedScheduleEntry {
    pub fn new(start: &str, end: &str, user: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            user: UserReference {
                summary: user.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleLayer {
    #[serde(default)]
    pub rendered_schedule_entries: Vec<RenderedScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub final_schedule: ScheduleLayer,
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    schedule: Schedule,
}

/// Query parameters for a schedule request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleQuery {
    pub time_zone: String,
    pub since: String,
    pub until: String,
}

/// Source of rendered schedules
pub trait ScheduleClient {
    fn get_schedule(&self, id: &str, query: &ScheduleQuery) -> Result<Schedule, PagerDutyError>;
}

/// Blocking PagerDuty API client
#[derive(Debug, Clone)]
pub struct PagerDutyClient {
    http: Client,
    base_url: String,
}

impl PagerDutyClient {
    pub fn new(api_key: &str) -> Result<Self, PagerDutyError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a different endpoint (proxies, test servers)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, PagerDutyError> {
        let mut token = HeaderValue::from_str(&format!("Token token={}", api_key))
            .map_err(|e| PagerDutyError::InvalidApiKey(e.to_string()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V2));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn schedule_url(&self, id: &str) -> String {
        format!("{}/schedules/{}", self.base_url, id)
    }
}

impl ScheduleClient for PagerDutyClient {
    fn get_schedule(&self, id: &str, query: &ScheduleQuery) -> Result<Schedule, PagerDutyError> {
        let url = self.schedule_url(id);
        tracing::debug!(%url, since = %query.since, until = %query.until, "requesting schedule");

        let response = self.http.get(&url).query(query).send()?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(PagerDutyError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PagerDutyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ScheduleResponse = response.json()?;
        Ok(body.schedule)
    }
}
