use crate::api::{ApiError, FetchNotesParams};
use crate::cache::{FetchTicket, QueryCache, QueryKey};
use crate::models::{Note, NotesPage};
use std::collections::HashSet;

pub(crate) const PER_PAGE: u32 = 12;
pub(crate) const SEARCH_DEBOUNCE_MS: i32 = 500;

/// What the note list area should show.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NotesView {
    pub loading: bool,
    pub error: bool,
    pub empty: bool,
    pub notes: Vec<Note>,
    pub total_pages: u32,
}

impl NotesView {
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

/// Delete calls currently awaiting the server, by note id.
#[derive(Clone, Debug, Default)]
pub(crate) struct PendingDeletes {
    ids: HashSet<String>,
}

impl PendingDeletes {
    /// Returns `false` if a delete for `id` is already running.
    pub fn begin(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    pub fn finish(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// All client state behind the notes screen.
///
/// Signals in `AppState` wrap one of these; every transition lives here so it
/// can be driven without a browser.
#[derive(Clone, Debug)]
pub(crate) struct NotesSession {
    page: u32,
    search_text: String,
    debounced_search: String,
    modal_open: bool,
    creating: bool,
    create_error: Option<String>,
    mutation_error: Option<String>,
    cache: QueryCache,
    deletes: PendingDeletes,
}

impl Default for NotesSession {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesSession {
    pub fn new() -> Self {
        Self {
            page: 1,
            search_text: String::new(),
            debounced_search: String::new(),
            modal_open: false,
            creating: false,
            create_error: None,
            mutation_error: None,
            cache: QueryCache::new(),
            deletes: PendingDeletes::default(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn creating(&self) -> bool {
        self.creating
    }

    pub fn create_error(&self) -> Option<&str> {
        self.create_error.as_deref()
    }

    pub fn mutation_error(&self) -> Option<&str> {
        self.mutation_error.as_deref()
    }

    pub fn cache_epoch(&self) -> u64 {
        self.cache.epoch()
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey::new(self.page, self.debounced_search.clone())
    }

    pub fn fetch_params(key: &QueryKey) -> FetchNotesParams {
        FetchNotesParams::new(key.page, PER_PAGE, &key.search)
    }

    /* ---------------------------- search ---------------------------- */

    /// Echo of the text box; does not touch the query.
    pub fn search_input(&mut self, text: String) {
        self.search_text = text;
    }

    /// The debounce fired. A changed filter starts over at page 1; surrounding
    /// whitespace does not count as a change.
    pub fn search_committed(&mut self, text: String) {
        let text = text.trim();
        if text == self.debounced_search {
            return;
        }
        self.debounced_search = text.to_string();
        self.page = 1;
    }

    /* ---------------------------- paging ---------------------------- */

    /// Applies a requested page, clamped to what the last result allows.
    pub fn set_page(&mut self, page: u32) {
        let max = self.view().total_pages.max(1);
        self.page = page.clamp(1, max);
    }

    /* ---------------------------- fetching ---------------------------- */

    /// Points the view at the current key and starts a fetch if one is due.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let key = self.query_key();
        self.cache.observe(&key);
        self.cache.begin(&key)
    }

    /// Returns whether the result was applied.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket, result: Result<NotesPage, ApiError>) -> bool {
        let total_pages = result.as_ref().ok().map(|p| p.total_pages);
        if !self.cache.resolve(ticket, result) {
            return false;
        }

        // Deleting the last note of the last page leaves us past the end.
        if let Some(total) = total_pages {
            if ticket.key == self.query_key() && total > 0 && self.page > total {
                self.page = total;
            }
        }
        true
    }

    pub fn view(&self) -> NotesView {
        let snap = self.cache.snapshot();
        let (notes, total_pages, resolved) = match snap.data {
            Some(data) => (data.notes, data.total_pages, true),
            None => (Vec::new(), 0, false),
        };
        let loading = !resolved && snap.is_fetching;
        let error = snap.error.is_some();

        NotesView {
            empty: resolved && notes.is_empty() && !error && !snap.is_fetching,
            loading,
            error,
            notes,
            total_pages,
        }
    }

    /* ---------------------------- modal / create ---------------------------- */

    pub fn open_modal(&mut self) {
        self.modal_open = true;
        self.create_error = None;
    }

    pub fn close_modal(&mut self) {
        if self.creating {
            return;
        }
        self.modal_open = false;
        self.create_error = None;
    }

    /// Returns `false` while a create is already running.
    pub fn begin_create(&mut self) -> bool {
        if self.creating {
            return false;
        }
        self.creating = true;
        self.create_error = None;
        true
    }

    /// On success the modal closes and the list is marked stale; on failure
    /// the modal stays open with the message and the cache is left alone.
    pub fn finish_create(&mut self, result: Result<Note, ApiError>) {
        self.creating = false;
        match result {
            Ok(_) => {
                self.modal_open = false;
                self.cache.invalidate_all();
            }
            Err(e) => {
                self.create_error = Some(e.to_string());
            }
        }
    }

    /* ---------------------------- delete ---------------------------- */

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deletes.is_pending(id)
    }

    /// Returns `false` if that note's delete is already in flight.
    pub fn begin_delete(&mut self, id: &str) -> bool {
        if !self.deletes.begin(id) {
            return false;
        }
        self.mutation_error = None;
        true
    }

    pub fn finish_delete(&mut self, id: &str, result: Result<Note, ApiError>) {
        self.deletes.finish(id);
        match result {
            Ok(_) => self.cache.invalidate_all(),
            Err(e) => self.mutation_error = Some(e.to_string()),
        }
    }

    pub fn dismiss_mutation_error(&mut self) {
        self.mutation_error = None;
    }
}
