use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use reqwest::blocking::Client;
use serde_json::Value;

use super::{MutationCommand, MutationError, MutationSink};
use crate::models::settings::Settings;

/// Sends mutations to the store's REST endpoint as PATCH requests.
///
/// Uses a blocking client; run it from the dispatcher's blocking pool, not
/// directly on an async task.
pub struct HttpMutationSink {
    client: Client,
    endpoint: String,
    tz: Tz,
}

impl HttpMutationSink {
    /// `tz` is the zone entity wall-clock times are expressed in.
    pub fn new(endpoint: impl Into<String>, timeout: Duration, tz: Tz) -> Result<Self> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(anyhow!("Mutation endpoint must be an http(s) URL"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build mutation HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            tz,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let endpoint = settings
            .mutation_endpoint
            .as_deref()
            .ok_or_else(|| anyhow!("No mutation endpoint configured"))?;
        let tz = settings.time_zone().map_err(|e| anyhow!(e))?;
        Self::new(endpoint, Duration::from_secs(settings.mutation_timeout_secs), tz)
    }

    /// `{endpoint}/{events|tasks}/{id}` with the id percent-encoded.
    pub fn url_for(&self, command: &MutationCommand) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint,
            command.kind().collection(),
            urlencoding::encode(command.entity_id())
        )
    }

    /// JSON body of the PATCH request for `command`.
    pub fn request_body(&self, command: &MutationCommand) -> Result<Value, MutationError> {
        command.patch_body(self.tz)
    }
}

impl MutationSink for HttpMutationSink {
    fn apply(&self, command: &MutationCommand) -> Result<(), MutationError> {
        let url = self.url_for(command);
        let body = self.request_body(command)?;
        let response = self
            .client
            .patch(&url)
            .json(&body)
            .send()
            .map_err(|err| MutationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MutationError::Rejected {
                entity_id: command.entity_id().to_string(),
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
