use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::{parse_payload, CalendarDataSource, FetchError};
use crate::app::state::ProjectFilter;
use crate::models::record::RecordSet;
use crate::models::settings::Settings;

/// Query parameter the backend reads the project filter from.
const PROJECT_PARAM: &str = "projeto_id";

/// Blocking HTTP client for the calendar backend.
pub struct HttpDataSource {
    client: Client,
    base_url: String,
    max_response_bytes: usize,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl HttpDataSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("Failed to build calendar backend HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.backend_url.clone(),
            max_response_bytes: settings.max_response_bytes,
            max_retries: settings.max_retries,
            retry_delay_ms: settings.retry_delay_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch_with_retries(&self, filter: &ProjectFilter) -> Result<RecordSet, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(filter) {
                Ok(records) => return Ok(records),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "Calendar fetch attempt {} for {} failed: {}",
                        attempt,
                        filter,
                        err
                    );
                    thread::sleep(Duration::from_millis(self.retry_delay_ms));
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn fetch_once(&self, filter: &ProjectFilter) -> Result<RecordSet, FetchError> {
        let mut request = self.client.get(&self.base_url);
        if let Some(value) = filter.query_value() {
            request = request.query(&[(PROJECT_PARAM, value)]);
        }

        let response = request.send().map_err(|err| self.network_error(err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_response_bytes as u64 {
                return Err(FetchError::TooLarge {
                    size: content_length,
                    limit: self.max_response_bytes,
                });
            }
        }

        let bytes = response.bytes().map_err(|err| self.network_error(err))?;
        if bytes.len() > self.max_response_bytes {
            return Err(FetchError::TooLarge {
                size: bytes.len() as u64,
                limit: self.max_response_bytes,
            });
        }

        let body = std::str::from_utf8(&bytes).map_err(|_| FetchError::InvalidUtf8)?;
        parse_payload(body)
    }

    fn network_error(&self, err: reqwest::Error) -> FetchError {
        FetchError::Network {
            url: self.base_url.clone(),
            message: err.to_string(),
        }
    }
}

impl CalendarDataSource for HttpDataSource {
    fn fetch(&self, filter: &ProjectFilter) -> Result<RecordSet, FetchError> {
        log::debug!("Fetching calendar data from {} ({})", self.base_url, filter);
        self.fetch_with_retries(filter)
    }
}
