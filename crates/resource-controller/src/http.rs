//! # HTTP Resource Client
//!
//! [`HttpClient`] implements [`ResourceClient`] against a REST backend:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `list` | `GET {base}{path}?{filters}&page=..&limit=..` |
//! | `get` | `GET {base}{path}/{id}` |
//! | `create` | `POST {base}{path}` with a JSON body |
//! | `update` | `PUT {base}{path}/{id}` with a JSON body |
//! | `delete` | `DELETE {base}{path}/{id}` |
//!
//! Failed responses are mapped onto [`ResourceError`] by [`error_from_status`]. File-bearing
//! mutations go through [`HttpClient::create_with_file`] and [`HttpClient::update_with_file`],
//! which send a multipart form instead of JSON.

use crate::client::ResourceClient;
use crate::config::HttpConfig;
use crate::entity::Resource;
use crate::error::{FieldErrors, ResourceError};
use crate::filters::FilterState;
use crate::page::{ListResponse, Page};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// A file attached to a multipart mutation.
#[derive(Debug, Clone)]
pub struct FileField {
    /// Form field the backend reads the file from (`document`, `photo`, ...).
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

pub struct HttpClient<T> {
    http: reqwest::Client,
    base_url: String,
    path: String,
    _resource: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            path: self.path.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> HttpClient<T> {
    /// Client for the resource mounted at `path` (e.g. `/moyens-de-travail`).
    pub fn new(config: &HttpConfig, path: impl Into<String>) -> Result<Self, ResourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ResourceError::Network(e.to_string()))?;
        let path = path.into();
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            path: format!("/{}", path.trim_matches('/')),
            _resource: PhantomData,
        })
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    pub fn item_url(&self, id: &T::Id) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// `POST` with a multipart body: the input's fields stringified plus `file`.
    pub async fn create_with_file(&self, input: &T::Input, file: FileField) -> Result<T, ResourceError> {
        let form = multipart_form(input, file)?;
        let response = send(self.http.post(self.collection_url()).multipart(form)).await?;
        decode_json(response).await
    }

    /// `PUT` with a multipart body: the input's fields stringified plus `file`.
    pub async fn update_with_file(
        &self,
        id: &T::Id,
        input: &T::Input,
        file: FileField,
    ) -> Result<T, ResourceError> {
        let form = multipart_form(input, file)?;
        let response = send(self.http.put(self.item_url(id)).multipart(form)).await?;
        decode_json(response).await
    }
}

#[async_trait]
impl<T: Resource> ResourceClient<T> for HttpClient<T> {
    async fn list(&self, filters: &FilterState) -> Result<Page<T>, ResourceError> {
        let url = self.collection_url();
        debug!(resource = T::NAME, %url, ?filters, "GET list");
        let request = self.http.get(&url).query(&filters.query_pairs());
        let body = send(request)
            .await?
            .text()
            .await
            .map_err(transport_error)?;
        decode_list(&body)
    }

    async fn get(&self, id: &T::Id) -> Result<T, ResourceError> {
        let response = send(self.http.get(self.item_url(id))).await?;
        decode_json(response).await
    }

    async fn create(&self, input: T::Input) -> Result<T, ResourceError> {
        debug!(resource = T::NAME, ?input, "POST");
        let response = send(self.http.post(self.collection_url()).json(&input)).await?;
        decode_json(response).await
    }

    async fn update(&self, id: &T::Id, input: T::Input) -> Result<T, ResourceError> {
        debug!(resource = T::NAME, %id, ?input, "PUT");
        let response = send(self.http.put(self.item_url(id)).json(&input)).await?;
        decode_json(response).await
    }

    async fn delete(&self, id: &T::Id) -> Result<(), ResourceError> {
        debug!(resource = T::NAME, %id, "DELETE");
        send(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ResourceError> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let err = error_from_status(status.as_u16(), &body);
    warn!(status = status.as_u16(), error = %err, "Request failed");
    Err(err)
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ResourceError> {
    response
        .json()
        .await
        .map_err(|e| ResourceError::Network(format!("invalid response body: {e}")))
}

fn transport_error(e: reqwest::Error) -> ResourceError {
    if e.is_timeout() {
        ResourceError::Network(format!("timeout: {e}"))
    } else {
        ResourceError::Network(e.to_string())
    }
}

/// Parses a list body in either shape into a [`Page`].
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Page<T>, ResourceError> {
    serde_json::from_str::<ListResponse<T>>(body)
        .map(ListResponse::into_page)
        .map_err(|e| ResourceError::Network(format!("invalid list response: {e}")))
}

/// Maps a non-success status and its body onto the error taxonomy.
///
/// 400/422 become `Validation` with field messages read from an `errors` object, 404
/// `NotFound`, 409 `Conflict`, and anything else `Network`.
pub fn error_from_status(status: u16, body: &str) -> ResourceError {
    let json: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = json
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        400 | 422 => {
            let fields = json
                .as_ref()
                .and_then(|v| v.get("errors"))
                .map(field_errors)
                .unwrap_or_default();
            let message = if message.is_empty() {
                "validation failed".to_string()
            } else {
                message
            };
            ResourceError::Validation { message, fields }
        }
        404 => ResourceError::NotFound(message),
        409 => ResourceError::Conflict(message),
        _ => ResourceError::Network(format!("HTTP {status}: {message}")),
    }
}

fn field_errors(errors: &serde_json::Value) -> FieldErrors {
    let mut fields = FieldErrors::new();
    if let Some(map) = errors.as_object() {
        for (field, messages) in map {
            let messages = match messages {
                serde_json::Value::String(message) => vec![message.clone()],
                serde_json::Value::Array(items) => items
                    .iter()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect(),
                other => vec![other.to_string()],
            };
            fields.insert(field.clone(), messages);
        }
    }
    fields
}

/// Non-file multipart fields: every non-null top-level field of `input`, stringified.
pub fn multipart_fields<I: Serialize>(input: &I) -> Result<Vec<(String, String)>, ResourceError> {
    let value = serde_json::to_value(input)
        .map_err(|e| ResourceError::invalid_field("body", e.to_string()))?;
    let serde_json::Value::Object(map) = value else {
        return Err(ResourceError::invalid_field("body", "multipart input must be an object"));
    };
    Ok(map
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| match value {
            serde_json::Value::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect())
}

fn multipart_form<I: Serialize>(input: &I, file: FileField) -> Result<Form, ResourceError> {
    let form = multipart_fields(input)?
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value));
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(mime) = &file.mime {
        part = part
            .mime_str(mime)
            .map_err(|e| ResourceError::invalid_field(file.field.clone(), e.to_string()))?;
    }
    Ok(form.part(file.field, part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Contract {
        id: String,
        title: String,
    }

    #[derive(Debug, Clone, Serialize)]
    struct ContractInput {
        title: String,
        amount: f64,
        signed: bool,
        notes: Option<String>,
    }

    impl Resource for Contract {
        type Id = String;
        type Input = ContractInput;
        const NAME: &'static str = "contrat";

        fn id(&self) -> &String {
            &self.id
        }
        fn from_input(id: String, input: ContractInput) -> Self {
            Self { id, title: input.title }
        }
        fn apply_input(&mut self, input: ContractInput) {
            self.title = input.title;
        }
    }

    #[test]
    fn urls_are_joined_without_double_slashes() {
        let config = HttpConfig {
            base_url: "http://api.local/".into(),
            ..HttpConfig::default()
        };
        let client = HttpClient::<Contract>::new(&config, "administration/contrats/").unwrap();
        assert_eq!(client.collection_url(), "http://api.local/administration/contrats");
        assert_eq!(
            client.item_url(&"C-7".to_string()),
            "http://api.local/administration/contrats/C-7"
        );
    }

    #[test]
    fn validation_errors_carry_field_messages() {
        let body = r#"{"message": "Invalid contract", "errors": {"title": ["required"], "amount": "must be positive"}}"#;
        let err = error_from_status(422, body);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["title"], vec!["required".to_string()]);
        assert_eq!(fields["amount"], vec!["must be positive".to_string()]);
        assert_eq!(err.to_string(), "Validation error: Invalid contract");
    }

    #[test]
    fn statuses_map_onto_the_taxonomy() {
        assert!(matches!(error_from_status(400, ""), ResourceError::Validation { .. }));
        assert_eq!(
            error_from_status(404, r#"{"message": "contrat C-9"}"#),
            ResourceError::NotFound("contrat C-9".into())
        );
        assert!(matches!(error_from_status(409, "stale"), ResourceError::Conflict(_)));
        let err = error_from_status(503, "down");
        assert!(matches!(err, ResourceError::Network(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn list_bodies_in_both_shapes_decode() {
        let raw: Page<Contract> = decode_list(r#"[{"id": "C-1", "title": "Nettoyage"}]"#).unwrap();
        assert_eq!(raw.total, 1);
        let envelope: Page<Contract> =
            decode_list(r#"{"data": [], "total": 40, "page": 3, "limit": 10}"#).unwrap();
        assert_eq!((envelope.total, envelope.page, envelope.total_pages), (40, 3, 4));
        assert!(matches!(decode_list::<Contract>("<html>"), Err(ResourceError::Network(_))));
    }

    #[test]
    fn multipart_fields_are_stringified_and_nulls_skipped() {
        let input = ContractInput {
            title: "Gardiennage".into(),
            amount: 1250.5,
            signed: true,
            notes: None,
        };
        let mut fields = multipart_fields(&input).unwrap();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("amount".to_string(), "1250.5".to_string()),
                ("signed".to_string(), "true".to_string()),
                ("title".to_string(), "Gardiennage".to_string()),
            ]
        );
    }

    #[test]
    fn multipart_rejects_non_object_inputs() {
        assert!(matches!(multipart_fields(&"text"), Err(ResourceError::Validation { .. })));
    }
}
