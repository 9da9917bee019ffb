// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the photo service.
//!
//! Implements [`PhotoGateway`] over the service's JSON API with `reqwest`.
//! Identities are serialized to their wire form here and nowhere else.

use crate::application::port::gateway::{BinaryPayload, GatewayError, PhotoGateway};
use crate::config::GatewayConfig;
use crate::domain::filter::FilterId;
use crate::domain::frame::FrameDescriptor;
use crate::domain::identity::PhotoIdentity;
use crate::domain::photo::PhotoRecord;
use futures_util::future::BoxFuture;
use futures_util::StreamExt;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

const USER_AGENT: &str = concat!("FotoboxGuest/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhotoDto {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, alias = "id", alias = "photoId")]
    identifier: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default, alias = "isInstagram")]
    is_instagram_frame: bool,
    #[serde(default)]
    is_custom_frame: bool,
    #[serde(default)]
    custom_frame_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    photo_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverlayDto {
    name: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameRequest<'a> {
    overlay_name: &'a str,
    create_new_version: bool,
}

// =============================================================================
// HttpGateway
// =============================================================================

/// [`PhotoGateway`] backed by the photo service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    origin: String,
    api: String,
}

impl HttpGateway {
    /// Builds a gateway for the configured origin.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let origin = config.base_url.trim_end_matches('/').to_string();
        let prefix = config.api_prefix.trim_matches('/');
        let api = if prefix.is_empty() {
            origin.clone()
        } else {
            format!("{origin}/{prefix}")
        };

        Ok(Self {
            client,
            origin,
            api,
        })
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[tracing::instrument(skip_all, fields(identity = %identity))]
    async fn get_photo(&self, identity: PhotoIdentity) -> Result<PhotoRecord, GatewayError> {
        let url = format!("{}/photos/{identity}", self.api);
        let response = self.client.get(&url).send().await.map_err(network)?;
        let status = response.status();

        if !status.is_success() {
            let message = server_error(response)
                .await
                .unwrap_or_else(|| format!("Failed to fetch photo ({})", status.as_u16()));
            tracing::warn!(status = status.as_u16(), %message, "fetch photo rejected");
            return Err(if status == StatusCode::NOT_FOUND {
                GatewayError::NotFound { message }
            } else {
                GatewayError::Rejected {
                    status: Some(status.as_u16()),
                    message,
                }
            });
        }

        let dto: PhotoDto = response.json().await.map_err(invalid)?;
        if dto.success == Some(false) {
            return Err(GatewayError::NotFound {
                message: dto.error.unwrap_or_else(|| "Photo not found".to_string()),
            });
        }
        photo_record(dto, identity)
    }

    #[tracing::instrument(skip_all, fields(base = %base, %filter))]
    async fn post_filter(
        &self,
        base: PhotoIdentity,
        filter: FilterId,
    ) -> Result<PhotoIdentity, GatewayError> {
        let url = format!("{}/photos/{base}/filter", self.api);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "filter": filter.as_str() }))
            .send()
            .await
            .map_err(network)?;
        let status = response.status();

        if !status.is_success() {
            let message = server_error(response)
                .await
                .unwrap_or_else(|| format!("Failed to apply filter ({})", status.as_u16()));
            return Err(GatewayError::Rejected {
                status: Some(status.as_u16()),
                message,
            });
        }

        let body: FilterResponse = response.json().await.map_err(invalid)?;
        if body.success != Some(true) {
            return Err(GatewayError::Rejected {
                status: Some(status.as_u16()),
                message: body
                    .error
                    .unwrap_or_else(|| "Failed to apply filter".to_string()),
            });
        }

        let derived = body
            .photo_url
            .as_deref()
            .and_then(PhotoIdentity::from_photo_url)
            .unwrap_or_else(|| base.filtered(filter));
        tracing::debug!(%derived, "filter derivative ready");
        Ok(derived)
    }

    #[tracing::instrument(skip_all, fields(base = %base, %overlay))]
    async fn post_overlay(
        &self,
        base: PhotoIdentity,
        overlay: String,
    ) -> Result<PhotoIdentity, GatewayError> {
        let url = format!("{}/photos/{base}/overlay", self.api);
        let response = self
            .client
            .post(&url)
            .json(&FrameRequest {
                overlay_name: &overlay,
                create_new_version: true,
            })
            .send()
            .await
            .map_err(network)?;
        let status = response.status();

        if !status.is_success() {
            let message = server_error(response)
                .await
                .unwrap_or_else(|| format!("Failed to apply frame ({})", status.as_u16()));
            return Err(GatewayError::Rejected {
                status: Some(status.as_u16()),
                message,
            });
        }

        let body: FrameResponse = response.json().await.map_err(invalid)?;
        if body.success != Some(true) {
            return Err(GatewayError::Rejected {
                status: Some(status.as_u16()),
                message: body
                    .error
                    .unwrap_or_else(|| "Failed to change frame".to_string()),
            });
        }

        // Framed photos are new base photos; the id is never parsed for markers.
        body.photo_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(PhotoIdentity::Base)
            .ok_or_else(|| GatewayError::InvalidResponse("Failed to change frame".to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn get_overlays(&self) -> Vec<FrameDescriptor> {
        let url = format!("{}/admin/overlays", self.api);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "frame catalog unavailable");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            tracing::warn!(status = response.status().as_u16(), "frame catalog unavailable");
            return Vec::new();
        }
        match response.json::<Vec<OverlayDto>>().await {
            Ok(overlays) => overlays
                .into_iter()
                .map(|overlay| FrameDescriptor::custom(overlay.name, overlay.url))
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "frame catalog unreadable");
                Vec::new()
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get_binary(&self, url: String) -> Result<BinaryPayload, GatewayError> {
        let response = self.client.get(&url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: Some(status.as_u16()),
                message: format!("Failed to fetch image ({})", status.as_u16()),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut bytes = Vec::with_capacity(
            usize::try_from(response.content_length().unwrap_or(0)).unwrap_or(0),
        );
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(network)?;
            bytes.extend_from_slice(&chunk);
        }

        tracing::debug!(len = bytes.len(), ?content_type, "image downloaded");
        Ok(BinaryPayload {
            bytes,
            content_type,
        })
    }
}

impl PhotoGateway for HttpGateway {
    fn fetch_photo(
        &self,
        identity: &PhotoIdentity,
    ) -> BoxFuture<'_, Result<PhotoRecord, GatewayError>> {
        Box::pin(self.get_photo(identity.clone()))
    }

    fn apply_filter(
        &self,
        base: &PhotoIdentity,
        filter: FilterId,
    ) -> BoxFuture<'_, Result<PhotoIdentity, GatewayError>> {
        Box::pin(self.post_filter(base.clone(), filter))
    }

    fn apply_frame(
        &self,
        base: &PhotoIdentity,
        overlay: &str,
    ) -> BoxFuture<'_, Result<PhotoIdentity, GatewayError>> {
        Box::pin(self.post_overlay(base.clone(), overlay.to_string()))
    }

    fn list_frames(&self) -> BoxFuture<'_, Vec<FrameDescriptor>> {
        Box::pin(self.get_overlays())
    }

    fn fetch_binary(&self, url: &str) -> BoxFuture<'_, Result<BinaryPayload, GatewayError>> {
        Box::pin(self.get_binary(self.resolve_url(url)))
    }

    fn resolve_url(&self, url: &str) -> String {
        resolve_against(&self.origin, url)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn network(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Network("The photo service did not answer in time".to_string())
    } else {
        GatewayError::Network(err.to_string())
    }
}

fn invalid(err: reqwest::Error) -> GatewayError {
    GatewayError::InvalidResponse(err.to_string())
}

/// `{ "error": "..." }` from a failed response, if the body carries one.
async fn server_error(response: Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    error_message(&body)
}

fn error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

fn photo_record(dto: PhotoDto, requested: PhotoIdentity) -> Result<PhotoRecord, GatewayError> {
    let url = dto
        .url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| GatewayError::InvalidResponse("Photo has no image".to_string()))?;

    let identity = dto
        .identifier
        .as_deref()
        .and_then(PhotoIdentity::parse)
        .unwrap_or(requested);

    Ok(PhotoRecord {
        identity,
        url,
        thumbnail_url: dto.thumbnail_url.filter(|url| !url.is_empty()),
        filename: dto.filename.unwrap_or_default(),
        timestamp: dto.timestamp.as_ref().and_then(timestamp_millis),
        is_instagram_frame: dto.is_instagram_frame,
        is_custom_frame: dto.is_custom_frame,
        custom_frame_name: dto.custom_frame_name,
    })
}

/// Epoch milliseconds from a number or an RFC 3339 / numeric string.
fn timestamp_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok().or_else(|| {
            chrono::DateTime::parse_from_rfc3339(text.trim())
                .ok()
                .map(|date| date.timestamp_millis())
        }),
        _ => None,
    }
}

/// Absolute URLs pass through; anything else is joined to `origin`.
fn resolve_against(origin: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with('/') {
        format!("{origin}{url}")
    } else {
        format!("{origin}/{url}")
    }
}
