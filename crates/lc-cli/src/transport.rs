use std::time::Duration;

use async_trait::async_trait;
use lc_core::transport::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};
use reqwest::multipart::{Form, Part};

/// `reqwest`-backed transport used by the CLI.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

/// Map common reqwest errors to user-friendly messages.
pub fn describe(err: &reqwest::Error) -> String {
    if err.is_connect() {
        "Could not connect to the loan backend. Is it running?\n  \
         (hint: check --api-url or [api].base_url in the config file)"
            .to_string()
    } else if err.is_timeout() {
        "Request timed out. The backend may be overloaded.".to_string()
    } else {
        format!("API request failed: {err}")
    }
}

fn multipart(form: lc_core::transport::MultipartForm) -> Result<Form, TransportError> {
    let mut out = Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for (name, file) in form.files {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(ct) = file.content_type {
            part = part.mime_str(&ct).map_err(|e| TransportError::new(describe(&e)))?;
        }
        out = out.part(name, part);
    }
    Ok(out)
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
        };
        for (name, value) in &request.headers {
            // reqwest sets its own content type for multipart bodies.
            if matches!(request.body, RequestBody::Multipart(_))
                && name.eq_ignore_ascii_case("content-type")
            {
                continue;
            }
            builder = builder.header(name, value);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(multipart(form)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(describe(&e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(describe(&e)))?;
        Ok(ApiResponse::new(status, body))
    }
}
