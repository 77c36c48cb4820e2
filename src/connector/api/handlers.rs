use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::server::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteDocumentQuery {
    collection: Option<String>,
    id: Option<String>,
    chroma: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteFolderQuery {
    collection: Option<String>,
    project: Option<String>,
    folder: Option<String>,
    chroma: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteProjectQuery {
    collection: Option<String>,
    project: Option<String>,
    chroma: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClearCollectionQuery {
    collection: Option<String>,
    chroma: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    collection: Option<String>,
    project: Option<String>,
    chroma: Option<String>,
}

/// DELETE /api/rag-delete-document
pub async fn delete_document(
    State(state): State<AppState>,
    Query(query): Query<DeleteDocumentQuery>,
) -> Result<Json<Value>, ApiError> {
    let collection_name = require_param(query.collection, "collection")?;
    let id = require_param(query.id, "id")?;
    let collection = state
        .container
        .collection(&collection_name, query.chroma.as_deref())?;

    state
        .container
        .delete_document_use_case()
        .execute(&collection, &id)
        .await?;

    Ok(Json(json!({ "success": true, "deleted": id })))
}

/// DELETE /api/rag-delete-folder
pub async fn delete_folder(
    State(state): State<AppState>,
    Query(query): Query<DeleteFolderQuery>,
) -> Result<Json<Value>, ApiError> {
    let collection_name = require_param(query.collection, "collection")?;
    let project = require_param(query.project, "project")?;
    let folder = require_param(query.folder, "folder")?;
    let collection = state
        .container
        .collection(&collection_name, query.chroma.as_deref())?;

    let deleted = state
        .container
        .delete_folder_use_case()
        .execute(&collection, &project, &folder)
        .await?;

    Ok(Json(json!({ "success": true, "deletedCount": deleted })))
}

/// DELETE /api/rag-delete-project
pub async fn delete_project(
    State(state): State<AppState>,
    Query(query): Query<DeleteProjectQuery>,
) -> Result<Json<Value>, ApiError> {
    let collection_name = require_param(query.collection, "collection")?;
    let project = require_param(query.project, "project")?;
    let collection = state
        .container
        .collection(&collection_name, query.chroma.as_deref())?;

    let deleted = state
        .container
        .delete_project_use_case()
        .execute(&collection, &project)
        .await?;

    Ok(Json(json!({ "success": true, "deletedCount": deleted })))
}

/// DELETE /api/rag-clear-collection
pub async fn clear_collection(
    State(state): State<AppState>,
    Query(query): Query<ClearCollectionQuery>,
) -> Result<Json<Value>, ApiError> {
    let collection_name = require_param(query.collection, "collection")?;
    let collection = state
        .container
        .collection(&collection_name, query.chroma.as_deref())?;

    let deleted = state
        .container
        .clear_collection_use_case()
        .execute(&collection)
        .await?;

    Ok(Json(json!({ "success": true, "deletedCount": deleted })))
}

/// GET /api/rag-documents
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<Value>, ApiError> {
    let collection_name = require_param(query.collection, "collection")?;
    let collection = state
        .container
        .collection(&collection_name, query.chroma.as_deref())?;

    let documents = state
        .container
        .list_documents_use_case()
        .execute(&collection, query.project.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "count": documents.len(),
        "documents": documents,
    })))
}

/// GET /health, unauthenticated liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Fallback for the API routes: anything but the registered method gets the
/// JSON 405 body.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

fn require_param(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::bad_request(format!(
            "Missing required parameter: {}",
            name
        ))),
    }
}
