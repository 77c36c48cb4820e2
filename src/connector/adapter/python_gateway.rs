use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::application::interfaces::VectorStoreGateway;
use crate::domain::{CollectionRef, DocumentRecord, DomainError};

/// Lists every document id plus metadata in the collection.
const LIST_HELPER: &str = r#"
import json, sys

def emit(obj):
    print(json.dumps(obj))
    sys.exit(0)

try:
    import chromadb
except Exception as exc:
    emit({"ok": False, "code": "unavailable", "error": "chromadb import failed: %s" % exc})

store_path, collection = sys.argv[1], sys.argv[2]
try:
    client = chromadb.PersistentClient(path=store_path)
    try:
        col = client.get_collection(collection)
    except Exception as exc:
        emit({"ok": False, "code": "not_found", "error": "collection does not exist: %s" % exc})
    data = col.get(include=["metadatas"])
    ids = data.get("ids") or []
    metadatas = data.get("metadatas") or [None] * len(ids)
    documents = [{"id": doc_id, "metadata": meta or {}} for doc_id, meta in zip(ids, metadatas)]
    emit({"ok": True, "documents": documents})
except Exception as exc:
    emit({"ok": False, "error": str(exc)})
"#;

/// Deletes the ids supplied as a JSON array on stdin, reporting how many of
/// them actually existed.
const DELETE_HELPER: &str = r#"
import json, sys

def emit(obj):
    print(json.dumps(obj))
    sys.exit(0)

try:
    import chromadb
except Exception as exc:
    emit({"ok": False, "code": "unavailable", "error": "chromadb import failed: %s" % exc})

store_path, collection = sys.argv[1], sys.argv[2]
try:
    ids = json.load(sys.stdin)
    client = chromadb.PersistentClient(path=store_path)
    try:
        col = client.get_collection(collection)
    except Exception as exc:
        emit({"ok": False, "code": "not_found", "error": "collection does not exist: %s" % exc})
    existing = col.get(ids=ids).get("ids") or []
    if existing:
        col.delete(ids=existing)
    emit({"ok": True, "deleted": len(existing)})
except Exception as exc:
    emit({"ok": False, "error": str(exc)})
"#;

/// Drops the whole collection, reporting its prior document count.
/// An absent collection is reported as a successful drop of zero.
const DROP_HELPER: &str = r#"
import json, sys

def emit(obj):
    print(json.dumps(obj))
    sys.exit(0)

try:
    import chromadb
except Exception as exc:
    emit({"ok": False, "code": "unavailable", "error": "chromadb import failed: %s" % exc})

store_path, collection = sys.argv[1], sys.argv[2]
try:
    client = chromadb.PersistentClient(path=store_path)
    try:
        count = client.get_collection(collection).count()
    except Exception:
        emit({"ok": True, "deleted": 0})
    client.delete_collection(collection)
    emit({"ok": True, "deleted": count})
except Exception as exc:
    emit({"ok": False, "error": str(exc)})
"#;

/// Vector store gateway that drives a persistent ChromaDB store through a
/// spawned Python helper.
///
/// Each call runs `<python> -c <helper> <store_path> <collection>` and parses
/// the helper's final non-empty stdout line as a `{"ok": ...}` JSON object.
/// Earlier stdout lines (library chatter, telemetry) are ignored, so the
/// helpers must print their result object last. Bulk ids travel to the
/// delete helper via stdin to stay clear of argv length limits. No timeout
/// is enforced; a stuck store hangs the calling request.
pub struct PythonChromaGateway {
    python: String,
}

impl PythonChromaGateway {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    async fn run_helper(
        &self,
        script: &str,
        op: &str,
        collection: &CollectionRef,
        stdin_json: Option<String>,
    ) -> Result<HelperReply, DomainError> {
        debug!(
            "Running vector store helper '{}' for collection '{}'",
            op,
            collection.name()
        );

        let mut command = Command::new(&self.python);
        command
            .arg("-c")
            .arg(script)
            .arg(collection.store_path())
            .arg(collection.name())
            .stdin(if stdin_json.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|e| {
            DomainError::gateway_unavailable(format!("failed to spawn '{}': {}", self.python, e))
        })?;

        if let Some(payload) = stdin_json {
            let mut stdin = child.stdin.take().ok_or_else(|| {
                DomainError::gateway_unavailable("helper stdin was not captured")
            })?;
            stdin.write_all(payload.as_bytes()).await.map_err(|e| {
                DomainError::gateway_unavailable(format!("failed to write ids to helper: {}", e))
            })?;
            // Dropping the handle closes the pipe so the helper sees EOF.
            drop(stdin);
        }

        let output = child.wait_with_output().await.map_err(|e| {
            DomainError::gateway_unavailable(format!("failed to read helper output: {}", e))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let Some(line) = last_non_empty_line(&stdout) else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::gateway_unavailable(format!(
                "helper '{}' produced no output (exit {:?}): {}",
                op,
                output.status.code(),
                stderr.trim()
            )));
        };

        serde_json::from_str(line).map_err(|e| {
            DomainError::gateway_unavailable(format!(
                "helper '{}' output is not valid JSON ({}): {}",
                op, e, line
            ))
        })
    }
}

#[async_trait]
impl VectorStoreGateway for PythonChromaGateway {
    async fn list_documents(
        &self,
        collection: &CollectionRef,
    ) -> Result<Vec<DocumentRecord>, DomainError> {
        let reply = self.run_helper(LIST_HELPER, "list", collection, None).await?;
        if !reply.ok {
            return Err(reply_error(reply, collection.name()));
        }

        Ok(reply
            .documents
            .unwrap_or_default()
            .into_iter()
            .map(|doc| DocumentRecord::new(doc.id).with_metadata(doc.metadata))
            .collect())
    }

    async fn delete_documents(
        &self,
        collection: &CollectionRef,
        ids: &[String],
    ) -> Result<u64, DomainError> {
        if ids.is_empty() {
            debug!("No document ids to delete, skipping helper call");
            return Ok(0);
        }

        let payload = serde_json::to_string(ids)
            .map_err(|e| DomainError::internal(format!("failed to encode ids: {}", e)))?;
        let reply = self
            .run_helper(DELETE_HELPER, "delete", collection, Some(payload))
            .await?;
        if !reply.ok {
            return Err(reply_error(reply, collection.name()));
        }

        Ok(reply.deleted.unwrap_or(0))
    }

    async fn delete_collection(&self, collection: &CollectionRef) -> Result<u64, DomainError> {
        let reply = self.run_helper(DROP_HELPER, "drop", collection, None).await?;
        if !reply.ok {
            return Err(reply_error(reply, collection.name()));
        }

        Ok(reply.deleted.unwrap_or(0))
    }
}

#[derive(Debug, Deserialize)]
struct HelperReply {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    deleted: Option<u64>,
    #[serde(default)]
    documents: Option<Vec<HelperDocument>>,
}

#[derive(Debug, Deserialize)]
struct HelperDocument {
    id: String,
    #[serde(default)]
    metadata: Map<String, Value>,
}

fn last_non_empty_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
}

/// Maps a failed helper reply onto the domain taxonomy. Helpers tag known
/// failures with a `code`; untagged messages are sniffed for the missing-
/// collection phrasing ChromaDB uses.
fn reply_error(reply: HelperReply, collection_name: &str) -> DomainError {
    let message = reply
        .error
        .unwrap_or_else(|| "helper reported failure without a message".to_string());

    match reply.code.as_deref() {
        Some("not_found") => DomainError::collection_not_found(collection_name),
        Some("unavailable") => DomainError::gateway_unavailable(message),
        _ => {
            let lowered = message.to_lowercase();
            if lowered.contains("does not exist") || lowered.contains("not found") {
                DomainError::collection_not_found(collection_name)
            } else {
                DomainError::gateway_unavailable(message)
            }
        }
    }
}
