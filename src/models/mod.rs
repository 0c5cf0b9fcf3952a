use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A note as returned by the notes backend.
///
/// The backend speaks camelCase; timestamps are optional because not every
/// deployment returns them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One page of the note list for a given `(page, search)` query.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotesPage {
    pub notes: Vec<Note>,
    pub total_pages: u32,
}

/// Tags the creation form offers.
///
/// Notes coming back from the server keep their tag as a plain string, so a
/// tag added on the backend still renders.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
pub(crate) enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

pub(crate) const TITLE_MIN_CHARS: usize = 3;
pub(crate) const TITLE_MAX_CHARS: usize = 50;
pub(crate) const CONTENT_MAX_CHARS: usize = 500;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CreateNotePayload {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoteField {
    Title,
    Content,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldError {
    pub field: NoteField,
    pub message: String,
}

impl CreateNotePayload {
    /// Returns a copy with surrounding whitespace stripped from the title.
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            tag: self.tag,
        }
    }

    /// Client-side checks mirroring what the backend enforces.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let title_len = self.title.trim().chars().count();
        if title_len == 0 {
            errors.push(FieldError {
                field: NoteField::Title,
                message: "Title is required".to_string(),
            });
        } else if title_len < TITLE_MIN_CHARS {
            errors.push(FieldError {
                field: NoteField::Title,
                message: format!("Title must be at least {TITLE_MIN_CHARS} characters"),
            });
        } else if title_len > TITLE_MAX_CHARS {
            errors.push(FieldError {
                field: NoteField::Title,
                message: format!("Title must be at most {TITLE_MAX_CHARS} characters"),
            });
        }

        if self.content.chars().count() > CONTENT_MAX_CHARS {
            errors.push(FieldError {
                field: NoteField::Content,
                message: format!("Content must be at most {CONTENT_MAX_CHARS} characters"),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn payload(title: &str, content: &str) -> CreateNotePayload {
        CreateNotePayload {
            title: title.to_string(),
            content: content.to_string(),
            tag: NoteTag::Work,
        }
    }

    #[test]
    fn test_notes_page_contract_deserialize() {
        let json = r#"{
            "notes": [
                {"id": "n1", "title": "Standup", "content": "9:30", "tag": "Meeting",
                 "createdAt": "2025-01-01T10:00:00Z", "updatedAt": "2025-01-01T10:00:00Z"},
                {"id": "n2", "title": "Milk", "tag": "Shopping"}
            ],
            "totalPages": 3
        }"#;
        let page: NotesPage = serde_json::from_str(json).expect("notes page should parse");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.notes.len(), 2);
        assert_eq!(page.notes[0].created_at.as_deref(), Some("2025-01-01T10:00:00Z"));
        assert_eq!(page.notes[1].content, "");
        assert!(page.notes[1].updated_at.is_none());
    }

    #[test]
    fn test_create_payload_serializes_tag_by_name() {
        let v = serde_json::to_value(payload("Call bank", "")).expect("should serialize");
        assert_eq!(v["title"], "Call bank");
        assert_eq!(v["tag"], "Work");
        assert_eq!(v.as_object().map(|o| o.len()), Some(3));
    }

    #[test]
    fn test_note_tag_round_trips_through_strum() {
        for tag in NoteTag::iter() {
            assert_eq!(NoteTag::from_str(tag.as_ref()).ok(), Some(tag));
        }
        assert!(NoteTag::from_str("Groceries").is_err());
        assert_eq!(NoteTag::default(), NoteTag::Todo);
    }

    #[test]
    fn test_validate_accepts_reasonable_note() {
        assert!(payload("Buy bread", "whole grain").validate().is_ok());
    }

    #[test]
    fn test_validate_title_bounds() {
        let errs = payload("  ", "").validate().unwrap_err();
        assert_eq!(errs[0].field, NoteField::Title);
        assert_eq!(errs[0].message, "Title is required");

        let errs = payload("ab", "").validate().unwrap_err();
        assert!(errs[0].message.contains("at least 3"));

        let long = "x".repeat(TITLE_MAX_CHARS + 1);
        let errs = payload(&long, "").validate().unwrap_err();
        assert!(errs[0].message.contains("at most 50"));
    }

    #[test]
    fn test_validate_content_limit_counts_chars() {
        let ok = "é".repeat(CONTENT_MAX_CHARS);
        assert!(payload("Title", &ok).validate().is_ok());

        let too_long = "é".repeat(CONTENT_MAX_CHARS + 1);
        let errs = payload("Title", &too_long).validate().unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, NoteField::Content);
    }

    #[test]
    fn test_normalized_trims_title_only() {
        let p = payload("  Plan  ", " body ").normalized();
        assert_eq!(p.title, "Plan");
        assert_eq!(p.content, " body ");
    }
}
