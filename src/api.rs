//! The Dog API image search: wire types and the blocking HTTP client.

use crate::config::AppConfig;
use crate::{DogTableError, Result};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

/// Header carrying the API credential
pub const API_KEY_HEADER: &str = "x-api-key";

/// A breed tag attached to an image. Only the name is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    #[serde(default)]
    pub name: String,
}

impl Breed {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One image returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub breeds: Vec<Breed>,
}

impl DogRecord {
    pub fn new(url: impl Into<String>, breeds: Vec<Breed>) -> Self {
        Self {
            id: None,
            url: url.into(),
            breeds,
        }
    }

    /// Name of the first breed tag, if any.
    pub fn primary_breed(&self) -> Option<&str> {
        self.breeds.first().map(|b| b.name.as_str())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Breed>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Breed>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode a search response body.
pub fn parse_records(body: &[u8]) -> Result<Vec<DogRecord>> {
    Ok(serde_json::from_slice(body)?)
}

/// Anything that can produce one page of dog records.
pub trait DogSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<DogRecord>>;
}

/// Blocking client for the image search endpoint
pub struct DogApiClient {
    http: reqwest::blocking::Client,
    config: AppConfig,
}

impl DogApiClient {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("dogtable/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Use a preconfigured reqwest client.
    pub fn with_http_client(config: AppConfig, http: reqwest::blocking::Client) -> Self {
        Self { http, config }
    }
}

impl DogSource for DogApiClient {
    fn fetch(&self) -> Result<Vec<DogRecord>> {
        let mut request = self
            .http
            .get(&self.config.endpoint)
            .query(&self.config.params.pairs())
            .header(CONTENT_TYPE, "application/json");

        match &self.config.api_key {
            Some(key) => request = request.header(API_KEY_HEADER, key),
            None => warn!(
                endpoint = %self.config.endpoint,
                "no API key configured; sending unauthenticated request"
            ),
        }

        debug!(endpoint = %self.config.endpoint, "requesting dog images");
        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DogTableError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes()?;
        let records = parse_records(&body)?;
        info!(count = records.len(), "received dog images");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_api_shape() {
        let body = br#"[
            {"id":"abc","url":"https://cdn.example/a.jpg","width":500,"height":375,
             "breeds":[{"id":1,"name":"Pug","temperament":"Docile"},{"name":"Beagle"}]},
            {"url":"https://cdn.example/b.jpg","breeds":[]}
        ]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("abc"));
        assert_eq!(records[0].primary_breed(), Some("Pug"));
        assert_eq!(records[0].breeds.len(), 2);
        assert_eq!(records[1].primary_breed(), None);
    }

    #[test]
    fn missing_or_null_breeds_decode_as_empty() {
        let body = br#"[{"url":"a.jpg"},{"url":"b.jpg","breeds":null}]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(
            records,
            vec![DogRecord::new("a.jpg", vec![]), DogRecord::new("b.jpg", vec![])]
        );
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_records(b"[]").unwrap().is_empty());
    }

    #[test]
    fn non_array_body_is_a_decode_error() {
        let err = parse_records(br#"{"message":"Unauthorized"}"#).unwrap_err();
        assert!(matches!(err, DogTableError::Decode(_)));

        let err = parse_records(br#"[{"breeds":[]}]"#).unwrap_err();
        assert!(matches!(err, DogTableError::Decode(_)));
    }

    #[test]
    fn client_rejects_invalid_config() {
        let config = AppConfig::default().with_endpoint("not a url");
        assert!(matches!(
            DogApiClient::new(config),
            Err(DogTableError::InvalidConfig(_))
        ));
    }
}
