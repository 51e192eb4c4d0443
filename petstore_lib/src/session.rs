//! Per-user session state: the store contract and the typed "my pets" list kept in it.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use petstore_api::types::PetID;
use serde_json::{Map, Value};

/// Session key under which the tracked pet ids live.
pub const ADDED_PETS_KEY: &str = "added_pets";

/// Errors from loading or saving a file-backed session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Session file {path} is not valid JSON")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key/value session storage. Values are untyped JSON; typing happens in
/// [`SessionIdTracker`].
pub trait SessionStore {
    /// Returns the value stored under `key`, or `default` when there is none.
    fn get(&self, key: &str, default: Value) -> Value;

    /// Stores `value` under `key`, replacing what was there.
    fn put(&mut self, key: &str, value: Value);
}

/// Session store that lives only as long as the value does.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    values: HashMap<String, Value>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str, default: Value) -> Value {
        self.values.get(key).cloned().unwrap_or(default)
    }

    fn put(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

/// Session store persisted as one JSON object in a file.
///
/// `put` only changes memory; call [`FileSession::save`] to write it out.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    values: Map<String, Value>,
}

impl FileSession {
    /// Loads the session at `path`.
    ///
    /// A missing file is an empty session, and so is a file holding JSON that
    /// is not an object. Unparseable JSON is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(values)) => values,
                Ok(_) => {
                    tracing::warn!(
                        "[SESSION] {} is not a JSON object, starting a fresh session",
                        path.display()
                    );
                    Map::new()
                }
                Err(source) => return Err(SessionError::Corrupt { path, source }),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    /// Writes the session back to its file.
    pub fn save(&self) -> Result<(), SessionError> {
        let text = serde_json::to_string_pretty(&self.values).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, text).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SessionStore for FileSession {
    fn get(&self, key: &str, default: Value) -> Value {
        self.values.get(key).cloned().unwrap_or(default)
    }

    fn put(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

/// One entry of the tracked list. Entries that are not pet ids are kept
/// as-is so they can be reported, but are never fetched.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackedEntry {
    Id(PetID),
    Invalid(Value),
}

impl TrackedEntry {
    /// Integers, whole floats and numeric strings are ids; anything else is invalid.
    pub fn from_value(value: Value) -> Self {
        match &value {
            Value::Number(n) => match n.as_i64().or_else(|| whole_number(n.as_f64())) {
                Some(id) => TrackedEntry::Id(id),
                None => TrackedEntry::Invalid(value),
            },
            Value::String(s) => match s.trim().parse::<PetID>() {
                Ok(id) => TrackedEntry::Id(id),
                Err(_) => TrackedEntry::Invalid(value),
            },
            _ => TrackedEntry::Invalid(value),
        }
    }

    pub fn id(&self) -> Option<PetID> {
        match self {
            TrackedEntry::Id(id) => Some(*id),
            TrackedEntry::Invalid(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            TrackedEntry::Id(id) => Value::from(*id),
            TrackedEntry::Invalid(value) => value.clone(),
        }
    }
}

fn whole_number(value: Option<f64>) -> Option<PetID> {
    value
        .filter(|f| f.fract() == 0.0 && *f >= PetID::MIN as f64 && *f < PetID::MAX as f64)
        .map(|f| f as PetID)
}

impl fmt::Display for TrackedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackedEntry::Id(id) => write!(f, "{}", id),
            TrackedEntry::Invalid(Value::String(s)) => write!(f, "{}", s),
            TrackedEntry::Invalid(value) => write!(f, "{}", value),
        }
    }
}

/// Ordered ids of the pets this session created. Duplicates are allowed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionTrackedIds {
    entries: Vec<TrackedEntry>,
}

impl SessionTrackedIds {
    pub fn new(entries: Vec<TrackedEntry>) -> Self {
        Self { entries }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = PetID>) -> Self {
        Self::new(ids.into_iter().map(TrackedEntry::Id).collect())
    }

    pub fn entries(&self) -> &[TrackedEntry] {
        &self.entries
    }

    /// Valid ids, in tracked order.
    pub fn ids(&self) -> impl Iterator<Item = PetID> + '_ {
        self.entries.iter().filter_map(TrackedEntry::id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: PetID) -> bool {
        self.ids().any(|tracked| tracked == id)
    }

    pub fn push(&mut self, id: PetID) {
        self.entries.push(TrackedEntry::Id(id));
    }

    /// Removes the first entry equal to `id`. Returns whether one was found.
    pub fn remove(&mut self, id: PetID) -> bool {
        match self.entries.iter().position(|entry| entry.id() == Some(id)) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn to_value(&self) -> Value {
        Value::Array(self.entries.iter().map(TrackedEntry::to_value).collect())
    }
}

impl fmt::Display for SessionTrackedIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.entries
                .iter()
                .map(|entry| entry.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Typed access to the tracked-id list inside a [`SessionStore`].
pub struct SessionIdTracker<'a, S: SessionStore> {
    store: &'a mut S,
}

impl<'a, S: SessionStore> SessionIdTracker<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Reads the tracked list.
    ///
    /// A list stored as a JSON string is decoded. Any other non-array value
    /// is replaced by an empty list in the store. Both cases are logged.
    pub fn load(&mut self) -> SessionTrackedIds {
        let raw = self.store.get(ADDED_PETS_KEY, Value::Array(Vec::new()));
        let items = match raw {
            Value::Array(items) => items,
            Value::String(text) => {
                tracing::warn!("[SESSION] '{}' is a string, converting...", ADDED_PETS_KEY);
                match serde_json::from_str::<Vec<Value>>(&text) {
                    Ok(items) => {
                        self.store.put(ADDED_PETS_KEY, Value::Array(items.clone()));
                        items
                    }
                    Err(_) => self.reset(),
                }
            }
            Value::Null => Vec::new(),
            _ => self.reset(),
        };
        let tracked =
            SessionTrackedIds::new(items.into_iter().map(TrackedEntry::from_value).collect());
        tracing::info!("[SESSION DATA] Retrieved added pets: {}", tracked);
        tracked
    }

    /// Writes the tracked list back to the store.
    pub fn save(&mut self, tracked: &SessionTrackedIds) {
        self.store.put(ADDED_PETS_KEY, tracked.to_value());
        tracing::info!("[SESSION UPDATE] Added pets stored in session: {}", tracked);
    }

    fn reset(&mut self) -> Vec<Value> {
        tracing::warn!(
            "[SESSION] '{}' is not a list of ids, resetting...",
            ADDED_PETS_KEY
        );
        self.store.put(ADDED_PETS_KEY, Value::Array(Vec::new()));
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_access_is_empty() {
        let mut session = MemorySession::new();
        let tracked = SessionIdTracker::new(&mut session).load();
        assert!(tracked.is_empty());
    }

    #[test]
    fn save_then_load() {
        let mut session = MemorySession::new();
        let mut tracker = SessionIdTracker::new(&mut session);
        tracker.save(&SessionTrackedIds::from_ids([5, 6]));
        let ids: Vec<_> = tracker.load().ids().collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn string_holding_json_array_is_decoded_and_healed() {
        let mut session = MemorySession::new();
        session.put(ADDED_PETS_KEY, json!("[1, \"2\", 3]"));
        let ids: Vec<_> = SessionIdTracker::new(&mut session).load().ids().collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(session.get(ADDED_PETS_KEY, Value::Null), json!([1, "2", 3]));
    }

    #[test]
    fn garbage_string_resets_to_empty() {
        let mut session = MemorySession::new();
        session.put(ADDED_PETS_KEY, json!("1,2,3"));
        let tracked = SessionIdTracker::new(&mut session).load();
        assert!(tracked.is_empty());
        assert_eq!(session.get(ADDED_PETS_KEY, Value::Null), json!([]));
    }

    #[test]
    fn non_sequence_resets_to_empty() {
        let mut session = MemorySession::new();
        session.put(ADDED_PETS_KEY, json!({"id": 4}));
        assert!(SessionIdTracker::new(&mut session).load().is_empty());
        assert_eq!(session.get(ADDED_PETS_KEY, Value::Null), json!([]));
    }

    #[test]
    fn non_numeric_entries_are_kept_but_not_ids() {
        let mut session = MemorySession::new();
        session.put(ADDED_PETS_KEY, json!([1, "abc", null, 2.5, " 7 "]));
        let tracked = SessionIdTracker::new(&mut session).load();
        assert_eq!(tracked.len(), 5);
        assert_eq!(tracked.ids().collect::<Vec<_>>(), vec![1, 7]);
        assert_eq!(tracked.to_string(), "[1, abc, null, 2.5, 7]");
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut tracked = SessionTrackedIds::from_ids([4, 8, 4]);
        assert!(tracked.remove(4));
        assert_eq!(tracked.ids().collect::<Vec<_>>(), vec![8, 4]);
        assert!(!tracked.remove(99));
        assert!(tracked.contains(8));
    }

    #[test]
    fn file_session_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = FileSession::load(&path).unwrap();
        SessionIdTracker::new(&mut session).save(&SessionTrackedIds::from_ids([11, 12]));
        session.save().unwrap();

        let mut reloaded = FileSession::load(&path).unwrap();
        let ids: Vec<_> = SessionIdTracker::new(&mut reloaded).load().ids().collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[test]
    fn file_session_resets_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let mut session = FileSession::load(&path).unwrap();
        assert!(SessionIdTracker::new(&mut session).load().is_empty());
        session.save().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let saved: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(saved, json!({ "added_pets": [] }));
    }

    #[test]
    fn file_session_rejects_unparseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{\"added_pets\": [1,").unwrap();
        assert!(matches!(
            FileSession::load(&path),
            Err(SessionError::Corrupt { .. })
        ));
    }

    #[test]
    fn whole_floats_are_ids() {
        assert_eq!(TrackedEntry::from_value(json!(2.0)), TrackedEntry::Id(2));
        assert_eq!(
            TrackedEntry::from_value(json!(2.5)),
            TrackedEntry::Invalid(json!(2.5))
        );
        assert_eq!(
            TrackedEntry::from_value(json!(true)),
            TrackedEntry::Invalid(json!(true))
        );
    }
}
