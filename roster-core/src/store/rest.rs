//! HTTP client for the hosted schedule store (PostgREST dialect).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use chrono_tz::Tz;
use url::Url;

use super::ScheduleStore;
use crate::config::RosterConfig;
use crate::error::{RosterError, RosterResult};
use crate::record::{ScheduleFields, ScheduleId, ScheduleRecord};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const RPC_BY_ASSIGNEE: &str = "get_user_schedules";
const RPC_BY_EVENT: &str = "get_event_schedules";
const RPC_BY_ASSIGNEE_AND_EVENT: &str = "get_user_event_schedules";

/// Error body returned by the store.
#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
    #[serde(default)]
    hint: Option<String>,
}

pub struct RestStore {
    http: reqwest::Client,
    tz: Tz,
    rows_url: Url,
    rpc_url: Url,
    api_key: String,
}

impl RestStore {
    pub fn new(config: &RosterConfig) -> RosterResult<Self> {
        let (store_url, api_key) = config.credentials()?;

        let base = Url::parse(&format!("{}/", store_url.trim_end_matches('/')))
            .map_err(|e| RosterError::Config(format!("Invalid store_url '{store_url}': {e}")))?;
        let rows_url = base
            .join(&format!("rest/v1/{}", config.table))
            .map_err(|e| RosterError::Config(e.to_string()))?;
        let rpc_url = base
            .join("rest/v1/rpc/")
            .map_err(|e| RosterError::Config(e.to_string()))?;

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(RestStore {
            http,
            tz: config.timezone,
            rows_url,
            rpc_url,
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn rows(&self, method: Method) -> RequestBuilder {
        self.request(method, self.rows_url.clone())
    }

    fn rpc(&self, name: &str) -> RosterResult<RequestBuilder> {
        let url = self
            .rpc_url
            .join(name)
            .map_err(|e| RosterError::Config(e.to_string()))?;
        Ok(self.request(Method::POST, url))
    }

    async fn send(builder: RequestBuilder) -> RosterResult<Response> {
        let resp = builder.send().await?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(RosterError::Store {
            status,
            message: error_message(&body),
        })
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> RosterResult<T> {
        let resp = Self::send(builder).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_records(&self, builder: RequestBuilder) -> RosterResult<Vec<ScheduleRecord>> {
        let rows: Vec<serde_json::Value> = Self::send_json(builder).await?;
        rows.into_iter()
            .map(|row| ScheduleRecord::from_row(row, self.tz))
            .collect()
    }

    /// Mutations ask for the written row back; the store answers with a
    /// one-element array.
    async fn send_returning_one(&self, builder: RequestBuilder) -> RosterResult<ScheduleRecord> {
        let rows = self
            .send_records(builder.header("Prefer", "return=representation"))
            .await?;
        rows.into_iter().next().ok_or_else(|| RosterError::Store {
            status: 404,
            message: "Store returned no record".into(),
        })
    }
}

fn id_filter(id: ScheduleId) -> (&'static str, String) {
    ("schedule_id", format!("eq.{id}"))
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { message, hint: Some(hint) }) => format!("{message} ({hint})"),
        Ok(ErrorResponse { message, hint: None }) => message,
        Err(_) if body.is_empty() => "no response body".to_string(),
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl ScheduleStore for RestStore {
    async fn list(&self) -> RosterResult<Vec<ScheduleRecord>> {
        self.send_records(
            self.rows(Method::GET)
                .query(&[("select", "*"), ("order", "schedule_id.asc")]),
        )
        .await
    }

    async fn filter_by_assignee(&self, assigned: &str) -> RosterResult<Vec<ScheduleRecord>> {
        self.send_records(self.rpc(RPC_BY_ASSIGNEE)?.json(&json!({ "assigned": assigned }))).await
    }

    async fn filter_by_event(&self, event: &str) -> RosterResult<Vec<ScheduleRecord>> {
        self.send_records(self.rpc(RPC_BY_EVENT)?.json(&json!({ "eventname": event }))).await
    }

    async fn filter_by_assignee_and_event(
        &self,
        assigned: &str,
        event: &str,
    ) -> RosterResult<Vec<ScheduleRecord>> {
        self.send_records(
            self.rpc(RPC_BY_ASSIGNEE_AND_EVENT)?
                .json(&json!({ "assigned": assigned, "eventname": event })),
        )
        .await
    }

    async fn get(&self, id: ScheduleId) -> RosterResult<Option<ScheduleRecord>> {
        let rows = self
            .send_records(
                self.rows(Method::GET)
                    .query(&[("select", "*".to_string()), id_filter(id)]),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn create(&self, fields: &ScheduleFields) -> RosterResult<ScheduleRecord> {
        self.send_returning_one(self.rows(Method::POST).json(fields)).await
    }

    async fn update(&self, id: ScheduleId, fields: &ScheduleFields) -> RosterResult<ScheduleRecord> {
        self.send_returning_one(self.rows(Method::PATCH).query(&[id_filter(id)]).json(fields)).await
    }

    async fn delete(&self, id: ScheduleId) -> RosterResult<()> {
        Self::send(self.rows(Method::DELETE).query(&[id_filter(id)])).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> RosterConfig {
        RosterConfig {
            store_url: Some(url.to_string()),
            api_key: Some("key".to_string()),
            ..RosterConfig::default()
        }
    }

    #[test]
    fn endpoints_are_built_from_base_url() {
        let store = RestStore::new(&config("https://example.supabase.co/")).unwrap();
        assert_eq!(store.rows_url.as_str(), "https://example.supabase.co/rest/v1/schedules");
        assert_eq!(
            store.rpc_url.join(RPC_BY_EVENT).unwrap().as_str(),
            "https://example.supabase.co/rest/v1/rpc/get_event_schedules"
        );
    }

    #[test]
    fn missing_credentials_are_a_config_error() {
        let result = RestStore::new(&RosterConfig::default());
        assert!(matches!(result, Err(RosterError::Config(_))));
    }

    #[test]
    fn invalid_url_is_a_config_error() {
        let result = RestStore::new(&config("not a url"));
        assert!(matches!(result, Err(RosterError::Config(_))));
    }

    #[test]
    fn error_bodies_are_summarised() {
        assert_eq!(
            error_message(r#"{"message":"permission denied","hint":"check RLS"}"#),
            "permission denied (check RLS)"
        );
        assert_eq!(error_message(r#"{"message":"bad"}"#), "bad");
        assert_eq!(error_message("oops"), "oops");
        assert_eq!(error_message(""), "no response body");
    }
}
