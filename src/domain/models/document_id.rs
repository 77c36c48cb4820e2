use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Kind segment of a composite document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocKind {
    File,
    Folder,
    Project,
}

impl DocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::File => "FILE",
            DocKind::Folder => "FOLDER",
            DocKind::Project => "PROJECT",
        }
    }

    /// Parses a kind segment. Comparison is case-sensitive: `"file"` is not
    /// a valid kind.
    pub fn parse(s: &str) -> Option<DocKind> {
        match s {
            "FILE" => Some(DocKind::File),
            "FOLDER" => Some(DocKind::Folder),
            "PROJECT" => Some(DocKind::Project),
            _ => None,
        }
    }

    /// FILE and FOLDER payloads carry a path and take part in the slash to
    /// underscore mapping; PROJECT payloads are opaque.
    fn maps_path(&self) -> bool {
        matches!(self, DocKind::File | DocKind::Folder)
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded composite document identifier.
///
/// The wire form is `"<project>:<KIND>:<payload>[:<sequence>]"`. The project
/// segment (everything before the first `:`) is the only linkage between a
/// document and its owning project; there is no foreign-key enforcement in
/// the vector store, only this string-prefix convention.
///
/// FILE and FOLDER payloads encode a path with `/` replaced by `_`. The
/// mapping is lossy: a literal underscore in a path segment is
/// indistinguishable from an original separator, so `decode` turns every
/// `_` back into `/`. This ambiguity is inherited from the identifier scheme
/// and deliberately left as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentId {
    project: String,
    kind: DocKind,
    payload: String,
    sequence: Option<u32>,
}

impl DocumentId {
    /// Encodes an identifier without a sequence segment.
    pub fn encode(project: &str, kind: DocKind, payload: &str) -> String {
        let payload = if kind.maps_path() {
            payload.replace('/', "_")
        } else {
            payload.to_string()
        };
        format!("{}:{}:{}", project, kind.as_str(), payload)
    }

    /// Encodes an identifier with a sequence segment, rendered zero-padded
    /// to three digits (`1` becomes `"001"`).
    pub fn encode_with_sequence(
        project: &str,
        kind: DocKind,
        payload: &str,
        sequence: u32,
    ) -> String {
        format!("{}:{:03}", Self::encode(project, kind, payload), sequence)
    }

    /// Decodes a composite identifier.
    ///
    /// Fails with [`DomainError::MalformedId`] when the id has fewer than
    /// two `:` segments, more than four, an unknown KIND segment, or a
    /// non-numeric sequence.
    pub fn decode(id: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = id.split(':').collect();

        if parts.len() < 2 {
            return Err(DomainError::malformed_id(format!(
                "expected at least 2 ':' segments in '{}'",
                id
            )));
        }
        if parts.len() > 4 {
            return Err(DomainError::malformed_id(format!(
                "too many ':' segments in '{}'",
                id
            )));
        }

        let kind = DocKind::parse(parts[1]).ok_or_else(|| {
            DomainError::malformed_id(format!("unknown kind segment '{}' in '{}'", parts[1], id))
        })?;

        let raw_payload = parts.get(2).copied().unwrap_or("");
        let payload = if kind.maps_path() {
            raw_payload.replace('_', "/")
        } else {
            raw_payload.to_string()
        };

        let sequence = match parts.get(3) {
            Some(seq) => Some(seq.parse::<u32>().map_err(|_| {
                DomainError::malformed_id(format!("non-numeric sequence '{}' in '{}'", seq, id))
            })?),
            None => None,
        };

        Ok(Self {
            project: parts[0].to_string(),
            kind,
            payload,
            sequence,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn kind(&self) -> DocKind {
        self.kind
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn sequence(&self) -> Option<u32> {
        self.sequence
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sequence {
            Some(seq) => f.write_str(&Self::encode_with_sequence(
                &self.project,
                self.kind,
                &self.payload,
                seq,
            )),
            None => f.write_str(&Self::encode(&self.project, self.kind, &self.payload)),
        }
    }
}

/// The project segment of an id: everything before the first `:`, or the
/// whole id when no colon is present.
pub fn project_prefix(id: &str) -> &str {
    id.split(':').next().unwrap_or(id)
}

/// True iff `id` belongs to `project`, i.e. starts with `"<project>:"`.
/// Case-sensitive, no decoding.
pub fn matches_project(id: &str, project: &str) -> bool {
    id.strip_prefix(project)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// True iff `id` belongs to `project` and sits inside `folder`: the decoded
/// FILE path starts with `folder + "/"`, or the decoded FOLDER path equals
/// `folder` or starts with `folder + "/"`. Ids that fail to decode never
/// match, so foreign identifier schemes are never selected by folder
/// operations.
pub fn matches_folder(id: &str, project: &str, folder: &str) -> bool {
    let decoded = match DocumentId::decode(id) {
        Ok(decoded) => decoded,
        Err(_) => return false,
    };

    if decoded.project() != project {
        return false;
    }

    let subtree = format!("{}/", folder);
    match decoded.kind() {
        DocKind::File => decoded.payload().starts_with(&subtree),
        DocKind::Folder => decoded.payload() == folder || decoded.payload().starts_with(&subtree),
        DocKind::Project => false,
    }
}
