use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::errors::ApiError;
use crate::schemas::session::Flash;

/// A named template plus the data it is rendered with.
///
/// Rendering itself happens client side: the response body is the template
/// name, the pending flash messages and the payload fields, as one JSON object.
#[derive(Debug)]
pub(crate) struct View {
    template: &'static str,
    payload: Map<String, Value>,
    failure: Option<(&'static str, serde_json::Error)>,
}

impl View {
    pub(crate) fn new(template: &'static str) -> Self {
        Self { template, payload: Map::new(), failure: None }
    }

    /// Add `value` under `key`. The first value that fails to serialize fails the render.
    pub(crate) fn with(mut self, key: &'static str, value: impl Serialize) -> Self {
        if self.failure.is_some() {
            return self;
        }
        match serde_json::to_value(value) {
            Ok(value) => {
                self.payload.insert(key.to_string(), value);
            }
            Err(err) => self.failure = Some((key, err)),
        }
        self
    }

    pub(crate) fn render(self, flash: Vec<Flash>) -> Result<Response, ApiError> {
        if let Some((key, err)) = self.failure {
            tracing::error!(template = self.template, key, "view data is not serializable");
            return Err(ApiError::internal(err, "Failed to render view"));
        }

        tracing::debug!(template = self.template, flash = flash.len(), "rendering view");
        let flash = serde_json::to_value(flash)
            .map_err(|e| ApiError::internal(e, "Failed to render view"))?;

        let mut body = self.payload;
        body.insert("view".to_string(), Value::String(self.template.to_string()));
        body.insert("flash".to_string(), flash);
        Ok(Json(Value::Object(body)).into_response())
    }
}
