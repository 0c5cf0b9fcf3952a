use crate::models::{CreateNotePayload, Note, NotesPage};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Validation,
    NotFound,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

/// Which call produced a response; decides how a status code is classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiOp {
    FetchNotes,
    CreateNote,
    DeleteNote,
}

impl ApiOp {
    fn context(self) -> &'static str {
        match self {
            ApiOp::FetchNotes => "Loading notes failed",
            ApiOp::CreateNote => "Creating note failed",
            ApiOp::DeleteNote => "Deleting note failed",
        }
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    /// Maps a non-2xx status to an error kind.
    pub(crate) fn from_status(op: ApiOp, status: u16, body: &str) -> Self {
        let kind = match (op, status) {
            (_, 401) => ApiErrorKind::Unauthorized,
            (ApiOp::CreateNote, 400 | 422) => ApiErrorKind::Validation,
            (ApiOp::DeleteNote, 404) => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Http,
        };

        let body = body.trim();
        let message = if body.is_empty() {
            format!("{} ({status})", op.context())
        } else {
            format!("{} ({status}): {body}", op.context())
        };

        Self { kind, message }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub token: Option<String>,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut api_url = None;
        let mut token = None;

        // Both the documented upper-case keys and their lower-case aliases are accepted.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    let get_s = |k: &str| {
                        js_sys::Reflect::get(&env, &k.into())
                            .ok()
                            .and_then(|v| v.as_string())
                    };
                    api_url = get_s("API_URL").or_else(|| get_s("api_url"));
                    token = get_s("NOTES_TOKEN").or_else(|| get_s("token"));
                }
            }
        }

        Self::from_values(api_url, token)
    }

    pub(crate) fn from_values(api_url: Option<String>, token: Option<String>) -> Self {
        let api_url = api_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self { api_url, token }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Query string for `GET /notes`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FetchNotesParams {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FetchNotesParams {
    pub fn new(page: u32, per_page: u32, search: &str) -> Self {
        let search = search.trim();
        Self {
            page: page.max(1),
            per_page,
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            token: config.token.clone(),
        }
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn note_url(&self, id: &str) -> String {
        self.url(&format!("/notes/{}", urlencoding::encode(id)))
    }

    fn with_auth_headers(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        req
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        op: ApiOp,
        req: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let res = self
            .with_auth_headers(req)
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::from_status(op, status, &body))
        }
    }

    pub async fn fetch_notes(&self, params: &FetchNotesParams) -> ApiResult<NotesPage> {
        let req = reqwest::Client::new()
            .get(self.url("/notes"))
            .query(params);
        self.send(ApiOp::FetchNotes, req).await
    }

    pub async fn create_note(&self, payload: &CreateNotePayload) -> ApiResult<Note> {
        let req = reqwest::Client::new()
            .post(self.url("/notes"))
            .json(payload);
        self.send(ApiOp::CreateNote, req).await
    }

    pub async fn delete_note(&self, id: &str) -> ApiResult<Note> {
        let req = reqwest::Client::new().delete(self.note_url(id));
        self.send(ApiOp::DeleteNote, req).await
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_env_config_reads_window_env() {
        let window = web_sys::window().expect("browser window");
        let env = js_sys::Object::new();
        js_sys::Reflect::set(&env, &"API_URL".into(), &"https://notes.test/api/".into())
            .expect("set API_URL");
        js_sys::Reflect::set(&env, &"token".into(), &"t1".into()).expect("set token");
        js_sys::Reflect::set(&window, &"ENV".into(), &env).expect("set ENV");

        let config = EnvConfig::new();
        assert_eq!(config.api_url, "https://notes.test/api");
        assert_eq!(config.token.as_deref(), Some("t1"));

        js_sys::Reflect::set(&window, &"ENV".into(), &JsValue::UNDEFINED).expect("unset ENV");
        assert_eq!(EnvConfig::new().api_url, DEFAULT_API_URL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_params_omit_empty_search() {
        let params = FetchNotesParams::new(2, 12, "   ");
        let v = serde_json::to_value(&params).expect("should serialize");
        assert_eq!(v["page"], 2);
        assert_eq!(v["perPage"], 12);
        assert!(v.get("search").is_none());
    }

    #[test]
    fn test_fetch_params_trim_search_and_floor_page() {
        let params = FetchNotesParams::new(0, 12, " meeting ");
        assert_eq!(params.page, 1);
        assert_eq!(params.search.as_deref(), Some("meeting"));
    }

    #[test]
    fn test_status_classification_per_operation() {
        let e = ApiError::from_status(ApiOp::CreateNote, 400, "title too short");
        assert_eq!(e.kind, ApiErrorKind::Validation);
        assert_eq!(e.to_string(), "Creating note failed (400): title too short");

        assert_eq!(
            ApiError::from_status(ApiOp::CreateNote, 422, "").kind,
            ApiErrorKind::Validation
        );
        assert_eq!(
            ApiError::from_status(ApiOp::DeleteNote, 404, "").kind,
            ApiErrorKind::NotFound
        );
        // 404 on a list read is a plain HTTP failure, not a missing note.
        assert_eq!(
            ApiError::from_status(ApiOp::FetchNotes, 404, "").kind,
            ApiErrorKind::Http
        );
        assert_eq!(
            ApiError::from_status(ApiOp::DeleteNote, 401, "").kind,
            ApiErrorKind::Unauthorized
        );
        assert_eq!(
            ApiError::from_status(ApiOp::FetchNotes, 500, "  ").to_string(),
            "Loading notes failed (500)"
        );
    }

    #[test]
    fn test_env_config_defaults_and_normalizes() {
        let c = EnvConfig::from_values(None, Some("  ".to_string()));
        assert_eq!(c.api_url, DEFAULT_API_URL);
        assert!(c.token.is_none());

        let c = EnvConfig::from_values(
            Some("https://notes.test/api/".to_string()),
            Some(" jwt ".to_string()),
        );
        assert_eq!(c.api_url, "https://notes.test/api");
        assert_eq!(c.token.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_api_client_auth_header() {
        let anonymous = ApiClient::from_config(&EnvConfig::from_values(None, None));
        assert!(anonymous.get_auth_header().is_none());

        let config = EnvConfig::from_values(None, Some("my-jwt-token".to_string()));
        let client = ApiClient::from_config(&config);
        assert_eq!(client.get_auth_header().as_deref(), Some("Bearer my-jwt-token"));
    }

    #[test]
    fn test_api_client_from_config() {
        let config = EnvConfig::from_values(
            Some("https://notes.test/api".to_string()),
            Some("jwt".to_string()),
        );
        let client = ApiClient::from_config(&config);
        assert_eq!(client.base_url, "https://notes.test/api");
        assert_eq!(client.token.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_note_url_encodes_id() {
        let client = ApiClient::from_config(&EnvConfig::from_values(None, None));
        assert_eq!(client.note_url("abc"), "http://localhost:3000/api/notes/abc");
        assert_eq!(
            client.note_url("a/b c"),
            "http://localhost:3000/api/notes/a%2Fb%20c"
        );
    }
}
