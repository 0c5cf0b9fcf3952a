pub(crate) mod session;

use crate::api::ApiClient;
use leptos::prelude::*;

pub(crate) use session::{NotesSession, SEARCH_DEBOUNCE_MS};

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Page, search, modal and cache state; see `NotesSession`.
    pub session: RwSignal<NotesSession>,
}

impl AppState {
    pub fn new(api_client: ApiClient) -> Self {
        Self {
            api_client: RwSignal::new(api_client),
            session: RwSignal::new(NotesSession::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
