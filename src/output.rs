//! Output types: the structured record for one resume and the batch results.

use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Structured fields extracted from one resume.
///
/// Absent optional fields mean "not found". `skills` is an empty string and
/// `work_experience` an empty list when their sections are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: String,
    pub education: Option<String>,
    pub work_experience: Vec<WorkEntry>,
}

/// One job entry, pre-formatted as `title | duration | location | description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub text: String,
}

/// A record rendered for an external similarity index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Flat text handed to the embedding model.
    pub content: String,
    /// Deduplication key; `None` when the resume has no email.
    pub email: Option<String>,
}

impl Record {
    /// Number of fields that carry a value. Used for progress reporting.
    pub fn fields_found(&self) -> usize {
        [
            self.name.is_some(),
            self.email.is_some(),
            self.phone.is_some(),
            self.location.is_some(),
            !self.skills.is_empty(),
            self.education.is_some(),
            !self.work_experience.is_empty(),
        ]
        .iter()
        .filter(|&&found| found)
        .count()
    }

    /// Render the record as one paragraph for embedding.
    ///
    /// Missing contact fields read `Unknown`; missing skills, education or
    /// work history read `None`.
    pub fn to_index_document(&self) -> IndexDocument {
        let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| "Unknown".to_string());
        let skills = if self.skills.is_empty() {
            "None".to_string()
        } else {
            self.skills.clone()
        };
        let work = if self.work_experience.is_empty() {
            "None".to_string()
        } else {
            self.work_experience
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        let content = format!(
            "Name: {}. Email: {}. Phone: {}. Location: {}. Skills: {}. Education: {}. Work Experience: {}.",
            or_unknown(&self.name),
            or_unknown(&self.email),
            or_unknown(&self.phone),
            or_unknown(&self.location),
            skills,
            self.education.as_deref().unwrap_or("None"),
            work,
        );

        IndexDocument {
            content,
            email: self.email.clone(),
        }
    }
}

/// Collapse records sharing an email, keeping the latest one.
///
/// Mirrors an upsert keyed on email: a later duplicate replaces the earlier
/// record and takes its place at the end of the list. Records without an
/// email are never merged.
pub fn dedup_by_email(records: Vec<Record>) -> Vec<Record> {
    let mut out: Vec<Option<Record>> = Vec::with_capacity(records.len());
    let mut slot_by_email: HashMap<String, usize> = HashMap::new();

    for record in records {
        if let Some(email) = record.email.clone() {
            if let Some(old) = slot_by_email.insert(email, out.len()) {
                out[old] = None;
            }
        }
        out.push(Some(record));
    }

    out.into_iter().flatten().collect()
}

/// Outcome for one source document in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Path the text was read from.
    pub path: PathBuf,
    /// Extracted fields.
    pub record: Record,
    /// Length in bytes of the decoded text.
    pub text_len: usize,
    /// Wall-clock time spent reading and parsing.
    pub duration_ms: u64,
}

/// Per-document result as stored in [`IngestOutput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub record: Option<Record>,
    pub error: Option<DocumentError>,
    pub duration_ms: u64,
}

impl From<Result<ParsedDocument, DocumentError>> for DocumentResult {
    fn from(r: Result<ParsedDocument, DocumentError>) -> Self {
        match r {
            Ok(doc) => DocumentResult {
                path: doc.path,
                record: Some(doc.record),
                error: None,
                duration_ms: doc.duration_ms,
            },
            Err(error) => DocumentResult {
                path: error.path().to_path_buf(),
                record: None,
                error: Some(error),
                duration_ms: 0,
            },
        }
    }
}

/// Result of ingesting a whole folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOutput {
    /// One entry per discovered document, sorted by path.
    pub documents: Vec<DocumentResult>,
    pub stats: IngestStats,
}

impl IngestOutput {
    /// Records of the documents that parsed, in path order.
    pub fn records(&self) -> Vec<Record> {
        self.documents
            .iter()
            .filter_map(|d| d.record.clone())
            .collect()
    }
}

/// Batch counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    pub total_documents: usize,
    pub parsed_documents: usize,
    pub failed_documents: usize,
    /// Parsed records with no email, i.e. without a deduplication key.
    pub records_without_email: usize,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, email: Option<&str>) -> Record {
        Record {
            name: Some(name.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn default_record_has_empty_skills_and_work() {
        let r = Record::default();
        assert_eq!(r.skills, "");
        assert!(r.work_experience.is_empty());
        assert_eq!(r.fields_found(), 0);
    }

    #[test]
    fn record_serialises_absent_fields_as_null() {
        let json = serde_json::to_value(Record::default()).unwrap();
        assert!(json["name"].is_null());
        assert_eq!(json["skills"], "");
        assert_eq!(json["work_experience"], serde_json::json!([]));
    }

    #[test]
    fn index_document_uses_placeholders() {
        let r = Record {
            name: Some("Jane Doe".into()),
            email: Some("jane@x.io".into()),
            skills: "Rust | Go".into(),
            work_experience: vec![
                WorkEntry { text: "Engineer - Acme".into() },
                WorkEntry { text: "Intern - Initech".into() },
            ],
            ..Default::default()
        };
        let doc = r.to_index_document();
        assert_eq!(
            doc.content,
            "Name: Jane Doe. Email: jane@x.io. Phone: Unknown. Location: Unknown. \
             Skills: Rust | Go. Education: None. \
             Work Experience: Engineer - Acme; Intern - Initech."
        );
        assert_eq!(doc.email.as_deref(), Some("jane@x.io"));
    }

    #[test]
    fn dedup_keeps_latest_and_moves_it_last() {
        let records = vec![
            record("A", Some("a@x.io")),
            record("B", Some("b@x.io")),
            record("A2", Some("a@x.io")),
        ];
        let names: Vec<_> = dedup_by_email(records)
            .into_iter()
            .filter_map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["B", "A2"]);
    }

    #[test]
    fn dedup_never_merges_missing_emails() {
        let records = vec![record("A", None), record("B", None)];
        assert_eq!(dedup_by_email(records).len(), 2);
    }

    #[test]
    fn unique_emails_survive_dedup() {
        let records: Vec<_> = (0..5)
            .map(|i| record(&format!("N{i}"), Some(&format!("n{i}@x.io"))))
            .collect();
        assert_eq!(dedup_by_email(records).len(), 5);
    }
}
