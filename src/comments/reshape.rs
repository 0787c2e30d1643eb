//! The per-record transform between the flat and nested comment layouts.
//!
//! Old shape (one JSON object per line):
//! {
//!   "id": "c1",
//!   "text": "...",
//!   "assigned_labels": [...],      // optional
//!   "dismissed_labels": [...],     // optional
//!   "assigned_entities": [...],    // optional
//!   "dismissed_entities": [...]    // optional
//! }
//!
//! New shape:
//! {
//!   "comment": { "id": "c1", "text": "..." },
//!   "labelling": { "assigned": [...], "dismissed": [...] },
//!   "entities": { "assigned": [...], "dismissed": [...] }
//! }
//!
//! `labelling`/`entities` appear only when the old record carried at least
//! one of the corresponding fields.

use serde::Serialize;
use serde_json::{Map, Value};

/// One migrated comment, ready for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedComment {
    /// The original record minus the four annotation fields.
    pub comment: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labelling: Option<AnnotationGroup>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<AnnotationGroup>,
}

/// Assigned/dismissed pair for either labels or entities.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissed: Option<Value>,
}

impl AnnotationGroup {
    /// Group two extracted fields; None when neither key was present.
    fn from_fields(assigned: Option<Value>, dismissed: Option<Value>) -> Option<Self> {
        if assigned.is_none() && dismissed.is_none() {
            None
        } else {
            Some(AnnotationGroup {
                assigned,
                dismissed,
            })
        }
    }
}

/// Move the annotation fields of a flat comment record into nested groups.
///
/// Fields are moved, never copied: a key extracted into `labelling` or
/// `entities` no longer appears under `comment`. Presence is decided by the
/// key existing, not by its value, so an explicit `null` travels along
/// (`"assigned_labels": null` becomes `labelling.assigned = null`). The
/// relative order of the remaining comment keys is preserved.
pub fn reshape(mut record: Map<String, Value>) -> ConvertedComment {
    let assigned_labels = record.shift_remove("assigned_labels");
    let dismissed_labels = record.shift_remove("dismissed_labels");
    let assigned_entities = record.shift_remove("assigned_entities");
    let dismissed_entities = record.shift_remove("dismissed_entities");

    ConvertedComment {
        comment: record,
        labelling: AnnotationGroup::from_fields(assigned_labels, dismissed_labels),
        entities: AnnotationGroup::from_fields(assigned_entities, dismissed_entities),
    }
}
