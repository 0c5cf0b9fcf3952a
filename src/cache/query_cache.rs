use crate::api::ApiError;
use crate::models::NotesPage;
use std::collections::HashMap;

/// Identifies one cached note list result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct QueryKey {
    pub page: u32,
    pub search: String,
}

impl QueryKey {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            search: search.into(),
        }
    }
}

/// Handed out when a fetch starts; the result is only accepted back if the
/// ticket is still the one in flight for its key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    pub id: u64,
    pub key: QueryKey,
}

#[derive(Clone, Debug, Default)]
struct CacheEntry {
    data: Option<NotesPage>,
    error: Option<ApiError>,
    stale: bool,
    in_flight: Option<u64>,
}

impl CacheEntry {
    fn needs_fetch(&self) -> bool {
        self.in_flight.is_none() && ((self.data.is_none() && self.error.is_none()) || self.stale)
    }
}

/// What the list should render for the observed key.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct QuerySnapshot {
    pub data: Option<NotesPage>,
    pub is_fetching: bool,
    pub error: Option<String>,
}

/// Note list results keyed by `(page, search)`.
///
/// Entries are only ever written by resolving a ticket or by marking them
/// stale; nothing edits a cached page in place.
#[derive(Clone, Debug, Default)]
pub(crate) struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    next_ticket: u64,
    epoch: u64,

    /// Key the view currently shows.
    observed: Option<QueryKey>,
    /// Key whose data stands in while `observed` has none yet.
    placeholder: Option<QueryKey>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped on every invalidation; a change means "re-run the fetch check".
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Switches the view to `key`, remembering the previous key as placeholder
    /// if it has data to show.
    pub fn observe(&mut self, key: &QueryKey) {
        if self.observed.as_ref() == Some(key) {
            return;
        }

        if let Some(prev) = self.observed.take() {
            if self.has_data(&prev) {
                self.placeholder = Some(prev);
            }
        }
        self.observed = Some(key.clone());
    }

    /// Starts a fetch for `key` unless it is fresh or already in flight.
    pub fn begin(&mut self, key: &QueryKey) -> Option<FetchTicket> {
        let entry = self.entries.entry(key.clone()).or_default();
        if !entry.needs_fetch() {
            return None;
        }

        self.next_ticket += 1;
        entry.in_flight = Some(self.next_ticket);
        Some(FetchTicket {
            id: self.next_ticket,
            key: key.clone(),
        })
    }

    /// Stores a fetch result. Returns `false` when the ticket was superseded
    /// (the key was invalidated or re-fetched meanwhile) and the result dropped.
    pub fn resolve(&mut self, ticket: &FetchTicket, result: Result<NotesPage, ApiError>) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.in_flight != Some(ticket.id) {
            return false;
        }

        entry.in_flight = None;
        match result {
            Ok(page) => {
                entry.data = Some(page);
                entry.error = None;
                entry.stale = false;
            }
            Err(e) => {
                // Keep old data; stale so revisiting the key tries again.
                entry.error = Some(e);
                entry.stale = true;
            }
        }
        true
    }

    /// Marks every entry stale and drops all in-flight tickets. Entries the
    /// view neither shows nor falls back on are evicted; revisiting them
    /// refetches anyway.
    pub fn invalidate_all(&mut self) {
        let (observed, placeholder) = (&self.observed, &self.placeholder);
        self.entries
            .retain(|key, _| observed.as_ref() == Some(key) || placeholder.as_ref() == Some(key));
        for entry in self.entries.values_mut() {
            entry.stale = true;
            entry.in_flight = None;
        }
        self.epoch += 1;
    }

    pub fn get(&self, key: &QueryKey) -> Option<&NotesPage> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    fn has_data(&self, key: &QueryKey) -> bool {
        self.get(key).is_some()
    }

    pub fn snapshot(&self) -> QuerySnapshot {
        let Some(key) = self.observed.as_ref() else {
            return QuerySnapshot::default();
        };

        let entry = self.entries.get(key);
        let is_fetching = entry.map(|e| e.in_flight.is_some()).unwrap_or(false);
        let error = entry.and_then(|e| e.error.as_ref()).map(|e| e.to_string());

        // A failed fetch ends the transition; the previous key's page is not
        // shown next to the error.
        let data = match entry.and_then(|e| e.data.clone()) {
            Some(data) => Some(data),
            None if error.is_none() => self.placeholder.as_ref().and_then(|k| self.get(k)).cloned(),
            None => None,
        };

        QuerySnapshot {
            data,
            is_fetching,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::models::Note;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("Note {id}"),
            content: String::new(),
            tag: "Todo".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn page_of(ids: &[&str], total_pages: u32) -> NotesPage {
        NotesPage {
            notes: ids.iter().map(|id| note(id)).collect(),
            total_pages,
        }
    }

    fn network_error() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Network,
            message: "offline".to_string(),
        }
    }

    #[test]
    fn test_begin_is_idempotent_while_in_flight() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new(1, "");
        assert!(cache.begin(&key).is_some());
        assert!(cache.begin(&key).is_none());
    }

    #[test]
    fn test_fresh_entry_is_not_refetched() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new(1, "");
        let t = cache.begin(&key).unwrap();
        assert!(cache.resolve(&t, Ok(page_of(&["a"], 1))));
        assert!(cache.begin(&key).is_none());
    }

    #[test]
    fn test_invalidate_marks_stale_and_refetches() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new(1, "");
        cache.observe(&key);
        let t = cache.begin(&key).unwrap();
        cache.resolve(&t, Ok(page_of(&["a"], 1)));
        assert!(cache.begin(&key).is_none());

        let before = cache.epoch();
        cache.invalidate_all();
        assert_eq!(cache.epoch(), before + 1);
        // Stale data stays readable until the refetch lands.
        assert_eq!(cache.get(&key).map(|p| p.notes.len()), Some(1));
        assert!(cache.begin(&key).is_some());
    }

    #[test]
    fn test_invalidate_drops_in_flight_result() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new(1, "");
        let old = cache.begin(&key).unwrap();
        cache.invalidate_all();
        let fresh = cache.begin(&key).unwrap();

        // The pre-write read arrives late and must not overwrite anything.
        assert!(!cache.resolve(&old, Ok(page_of(&["ghost"], 1))));
        assert!(cache.get(&key).is_none());

        assert!(cache.resolve(&fresh, Ok(page_of(&["a"], 1))));
        assert_eq!(cache.get(&key).unwrap().notes[0].id, "a");
    }

    #[test]
    fn test_superseded_key_does_not_change_visible_data() {
        let mut cache = QueryCache::new();
        let k1 = QueryKey::new(1, "");
        let k2 = QueryKey::new(1, "meeting");

        cache.observe(&k1);
        let t1 = cache.begin(&k1).unwrap();
        cache.observe(&k2);
        let t2 = cache.begin(&k2).unwrap();

        assert!(cache.resolve(&t2, Ok(page_of(&["m"], 1))));
        // k1 resolves after k2: stored under its own key, not shown.
        assert!(cache.resolve(&t1, Ok(page_of(&["x", "y"], 2))));

        let snap = cache.snapshot();
        assert_eq!(snap.data.unwrap().notes[0].id, "m");
        assert_eq!(cache.get(&k1).map(|p| p.total_pages), Some(2));
    }

    #[test]
    fn test_placeholder_shows_previous_result_during_transition() {
        let mut cache = QueryCache::new();
        let k1 = QueryKey::new(1, "");
        let k2 = QueryKey::new(2, "");

        cache.observe(&k1);
        let t1 = cache.begin(&k1).unwrap();
        cache.resolve(&t1, Ok(page_of(&["a"], 2)));

        cache.observe(&k2);
        let _t2 = cache.begin(&k2).unwrap();
        let snap = cache.snapshot();
        assert!(snap.is_fetching);
        assert_eq!(snap.data.unwrap().notes[0].id, "a");
    }

    #[test]
    fn test_failed_transition_drops_placeholder() {
        let mut cache = QueryCache::new();
        let k1 = QueryKey::new(1, "");
        let k2 = QueryKey::new(2, "");

        cache.observe(&k1);
        let t1 = cache.begin(&k1).unwrap();
        cache.resolve(&t1, Ok(page_of(&["a"], 2)));

        cache.observe(&k2);
        let t2 = cache.begin(&k2).unwrap();
        cache.resolve(&t2, Err(network_error()));

        let snap = cache.snapshot();
        assert!(snap.data.is_none());
        assert_eq!(snap.error.as_deref(), Some("offline"));
    }

    #[test]
    fn test_invalidate_evicts_unobserved_entries() {
        let mut cache = QueryCache::new();
        let k1 = QueryKey::new(1, "");
        let k2 = QueryKey::new(2, "");
        let k3 = QueryKey::new(1, "meeting");

        for key in [&k3, &k1, &k2] {
            cache.observe(key);
            let t = cache.begin(key).unwrap();
            cache.resolve(&t, Ok(page_of(&["a"], 2)));
        }

        cache.invalidate_all();
        // k2 is shown and k1 backs it as placeholder; k3 is gone.
        assert!(cache.get(&k2).is_some());
        assert!(cache.get(&k1).is_some());
        assert!(cache.get(&k3).is_none());
        assert!(cache.begin(&k3).is_some());
    }

    #[test]
    fn test_first_load_has_no_placeholder() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new(1, "");
        cache.observe(&key);
        cache.begin(&key);
        let snap = cache.snapshot();
        assert!(snap.data.is_none());
        assert!(snap.is_fetching);
    }

    #[test]
    fn test_error_is_reported_and_not_retried_until_revisited() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new(1, "");
        cache.observe(&key);
        let t = cache.begin(&key).unwrap();
        assert!(cache.resolve(&t, Err(network_error())));

        let snap = cache.snapshot();
        assert_eq!(snap.error.as_deref(), Some("offline"));
        assert!(!snap.is_fetching);

        // The entry is stale, so the next fetch check for this key retries.
        assert!(cache.begin(&key).is_some());
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new(1, "");
        cache.observe(&key);
        let t = cache.begin(&key).unwrap();
        cache.resolve(&t, Err(network_error()));
        let t = cache.begin(&key).unwrap();
        cache.resolve(&t, Ok(page_of(&[], 0)));
        assert!(cache.snapshot().error.is_none());
    }
}
