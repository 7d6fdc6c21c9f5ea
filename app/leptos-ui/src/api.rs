use async_trait::async_trait;
use js_sys::{Array, Uint8Array};
use lc_api_types::{ApiUser, LoginResponse};
use lc_core::config::{ConsoleConfig, SessionConfig};
use lc_core::transport::{
    ApiRequest, ApiResponse, FilePart, MultipartForm, RequestBody, Transport, TransportError,
};
use lc_core::{ApiClient, Session};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FileList, FormData, Request, RequestInit, Response, Storage};

/// Client every page talks to the backend through.
pub type Api = ApiClient<FetchTransport, LocalStorageSession>;

pub fn client(config: &ConsoleConfig) -> Api {
    ApiClient::from_config(FetchTransport, LocalStorageSession::new(&config.session), &config.api)
}

fn js_err(e: JsValue) -> TransportError {
    TransportError::new(format!("{:?}", e))
}

// ── fetch transport ──

/// [`Transport`] over the browser `fetch` API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

/// Build a `FormData` body. The browser picks the multipart boundary, so no
/// `Content-Type` header is set for these requests.
pub fn form_data(form: &MultipartForm) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(js_err)?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value).map_err(js_err)?;
    }
    for (name, part) in &form.files {
        let parts = Array::of1(&Uint8Array::from(part.bytes.as_slice()));
        let bag = BlobPropertyBag::new();
        if let Some(ct) = &part.content_type {
            bag.set_type(ct);
        }
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag).map_err(js_err)?;
        data.append_with_blob_and_filename(name, &blob, &part.file_name)
            .map_err(js_err)?;
    }
    Ok(data)
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        let multipart = matches!(request.body, RequestBody::Multipart(_));
        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(&body.to_string())),
            RequestBody::Multipart(form) => {
                let data: FormData = form_data(form)?;
                opts.set_body(&data)
            }
        }

        let req = Request::new_with_str_and_init(&request.url, &opts).map_err(js_err)?;
        for (name, value) in &request.headers {
            if multipart && name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            req.headers().set(name, value).map_err(js_err)?;
        }

        let window = web_sys::window().ok_or_else(|| TransportError::new("no global window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(js_err)?;
        let resp: Response = resp_value.dyn_into().map_err(js_err)?;
        let text = JsFuture::from(resp.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;

        Ok(ApiResponse::new(resp.status(), text.as_string().unwrap_or_default()))
    }
}

// ── localStorage session ──

fn storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Session read from `localStorage` on every call, so a login in one tab of
/// the console is seen by every widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStorageSession {
    token_key: String,
    user_key: String,
}

impl LocalStorageSession {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            token_key: config.token_key.clone(),
            user_key: config.user_key.clone(),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    fn user(&self) -> Option<ApiUser> {
        serde_json::from_str(&self.read(&self.user_key)?).ok()
    }

    /// Persist a successful login under the token and user keys.
    pub fn store(&self, login: &LoginResponse) -> Result<(), String> {
        let storage = storage().ok_or("localStorage is unavailable")?;
        let user = serde_json::to_string(&login.user).map_err(|e| e.to_string())?;
        storage
            .set_item(&self.token_key, &login.token)
            .map_err(|e| format!("{:?}", e))?;
        storage
            .set_item(&self.user_key, &user)
            .map_err(|e| format!("{:?}", e))?;
        Ok(())
    }

    pub fn clear(&self) {
        if let Some(storage) = storage() {
            for key in [&self.token_key, &self.user_key] {
                if let Err(e) = storage.remove_item(key) {
                    tracing::warn!(key = %key, error = ?e, "failed to clear session key");
                }
            }
        }
    }
}

impl Session for LocalStorageSession {
    fn token(&self) -> Option<String> {
        self.read(&self.token_key).filter(|t| !t.trim().is_empty())
    }

    fn username(&self) -> Option<String> {
        let user = self.user()?;
        [user.username, user.email]
            .into_iter()
            .find(|name| !name.trim().is_empty())
    }
}

// ── picked files ──

pub async fn read_file(file: &File) -> Result<FilePart, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let part = FilePart::new(file.name(), Uint8Array::new(&buffer).to_vec());
    let content_type = file.type_();
    Ok(if content_type.is_empty() {
        part
    } else {
        part.with_content_type(content_type)
    })
}

/// Read every file of a picker or drop. Unreadable files are logged and
/// skipped.
pub async fn read_files(list: Option<FileList>) -> Vec<FilePart> {
    let Some(list) = list else {
        return Vec::new();
    };
    let mut parts = Vec::new();
    for file in (0..list.length()).filter_map(|i| list.get(i)) {
        match read_file(&file).await {
            Ok(part) => parts.push(part),
            Err(error) => tracing::warn!(file = %file.name(), %error, "could not read file"),
        }
    }
    parts
}
