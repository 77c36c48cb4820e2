//! End-to-end tests for the deletion flows, run over an in-memory vector
//! store and real state files on disk.

use std::sync::Arc;

use ragkeeper::{
    ClearCollectionUseCase, CollectionRef, DeleteDocumentUseCase, DeleteFolderUseCase,
    DeleteProjectUseCase, DocumentRecord, InMemoryGateway, JsonStateStore, StateReconciler,
    VectorStoreGateway,
};
use tempfile::TempDir;

struct TestEnv {
    dir: TempDir,
    gateway: Arc<InMemoryGateway>,
    reconciler: Arc<StateReconciler>,
    collection: CollectionRef,
}

fn setup_test_env() -> TestEnv {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let gateway = Arc::new(InMemoryGateway::new());
    let reconciler = Arc::new(StateReconciler::new(Arc::new(JsonStateStore::new())));
    let collection = CollectionRef::new("docs", dir.path()).expect("Failed to build collection");

    TestEnv {
        dir,
        gateway,
        reconciler,
        collection,
    }
}

impl TestEnv {
    async fn seed(&self, ids: &[&str]) {
        for id in ids {
            self.gateway
                .insert(&self.collection, DocumentRecord::new(*id))
                .await;
        }
    }

    fn write_state(&self, json: &str) {
        std::fs::write(self.collection.state_file_path(), json).expect("Failed to write state");
    }

    fn state_value(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.collection.state_file_path())
            .expect("Failed to read state file");
        serde_json::from_str(&raw).expect("State file should hold valid JSON")
    }

    async fn remaining_ids(&self) -> Vec<String> {
        self.gateway
            .list_documents(&self.collection)
            .await
            .expect("Failed to list documents")
            .into_iter()
            .map(|doc| doc.id().to_string())
            .collect()
    }
}

#[tokio::test]
async fn test_delete_project_removes_only_matching_documents() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001", "beta:FILE:b:001"]).await;
    env.write_state(r#"["alpha", "beta"]"#);

    let use_case = DeleteProjectUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha")
        .await
        .expect("Failed to delete project");

    assert_eq!(deleted, 1);
    assert_eq!(env.remaining_ids().await, ["beta:FILE:b:001"]);
    assert_eq!(env.state_value(), serde_json::json!(["beta"]));
}

#[tokio::test]
async fn test_delete_document_keeps_project_with_other_documents() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001", "alpha:FILE:b:001"]).await;
    env.write_state(r#"["alpha"]"#);

    let use_case = DeleteDocumentUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha:FILE:a:001")
        .await
        .expect("Failed to delete document");

    assert_eq!(deleted, 1);
    assert_eq!(
        env.state_value(),
        serde_json::json!(["alpha"]),
        "Project with live documents should stay in the state file"
    );
}

#[tokio::test]
async fn test_delete_document_drops_orphaned_project_from_state() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001", "beta:FILE:b:001"]).await;
    env.write_state(r#"["alpha", "beta"]"#);

    let use_case = DeleteDocumentUseCase::new(env.gateway.clone(), env.reconciler.clone());
    use_case
        .execute(&env.collection, "alpha:FILE:a:001")
        .await
        .expect("Failed to delete document");

    assert_eq!(env.state_value(), serde_json::json!(["beta"]));
}

#[tokio::test]
async fn test_delete_document_tolerates_absent_id() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001"]).await;

    let use_case = DeleteDocumentUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha:FILE:gone:099")
        .await
        .expect("Deleting an absent id should succeed");

    assert_eq!(deleted, 0);
    assert_eq!(env.remaining_ids().await.len(), 1);
}

// Pins the corrected folder semantics: a folder deletion must not drop a
// project that still has documents in sibling folders.
#[tokio::test]
async fn test_delete_folder_keeps_project_with_live_siblings() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:sub_a.md:001", "alpha:FILE:other_b.md:001"])
        .await;
    env.write_state(r#"["alpha"]"#);

    let use_case = DeleteFolderUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha", "sub")
        .await
        .expect("Failed to delete folder");

    assert_eq!(deleted, 1);
    assert_eq!(env.remaining_ids().await, ["alpha:FILE:other_b.md:001"]);
    assert_eq!(
        env.state_value(),
        serde_json::json!(["alpha"]),
        "Siblings outside the folder should keep the project tracked"
    );
}

#[tokio::test]
async fn test_delete_folder_drops_project_when_nothing_remains() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:sub_a.md:001", "alpha:FOLDER:sub:001"])
        .await;
    env.write_state(r#"["alpha", "beta"]"#);

    let use_case = DeleteFolderUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha", "sub")
        .await
        .expect("Failed to delete folder");

    assert_eq!(deleted, 2);
    assert_eq!(env.state_value(), serde_json::json!(["beta"]));
}

#[tokio::test]
async fn test_delete_folder_does_not_match_prefix_cousins() {
    let env = setup_test_env();
    env.seed(&[
        "alpha:FILE:sub_a.md:001",
        "alpha:FILE:subzero_b.md:001",
        "alpha:FOLDER:sub_nested:001",
    ])
    .await;

    let use_case = DeleteFolderUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha", "sub")
        .await
        .expect("Failed to delete folder");

    assert_eq!(deleted, 2, "subzero must not match folder 'sub'");
    assert_eq!(env.remaining_ids().await, ["alpha:FILE:subzero_b.md:001"]);
}

#[tokio::test]
async fn test_folder_with_no_matches_skips_the_delete_path() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:other_a.md:001"]).await;

    let use_case = DeleteFolderUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha", "missing")
        .await
        .expect("Failed to delete folder");

    assert_eq!(deleted, 0);
    assert_eq!(
        env.gateway.delete_call_count(),
        0,
        "Empty id sets must short-circuit before the store delete"
    );
}

#[tokio::test]
async fn test_clear_collection_removes_state_and_backups() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001", "beta:FILE:b:001"]).await;
    env.write_state(r#"["alpha", "beta"]"#);
    let backup = env
        .dir
        .path()
        .join(format!("{}.bak.1700000000", env.collection.state_file_name()));
    std::fs::write(&backup, r#"["alpha"]"#).expect("Failed to write backup");

    let use_case = ClearCollectionUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let prior = use_case
        .execute(&env.collection)
        .await
        .expect("Failed to clear collection");

    assert_eq!(prior, 2);
    assert!(!env.collection.state_file_path().exists());
    assert!(!backup.exists());

    let err = env
        .gateway
        .list_documents(&env.collection)
        .await
        .expect_err("Cleared collection should be gone");
    assert!(err.is_collection_not_found());
}

#[tokio::test]
async fn test_clear_missing_collection_is_idempotent() {
    let env = setup_test_env();

    let use_case = ClearCollectionUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let prior = use_case
        .execute(&env.collection)
        .await
        .expect("Clearing an absent collection should succeed");

    assert_eq!(prior, 0);
}

#[tokio::test]
async fn test_keyed_state_shape_survives_project_removal() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001", "beta:FILE:b:001"]).await;
    env.write_state(r#"{"repos": ["alpha", "beta"], "version": 2}"#);

    let use_case = DeleteProjectUseCase::new(env.gateway.clone(), env.reconciler.clone());
    use_case
        .execute(&env.collection, "alpha")
        .await
        .expect("Failed to delete project");

    let value = env.state_value();
    assert!(value.is_object(), "Keyed shape must be preserved");
    assert_eq!(value["repos"], serde_json::json!(["beta"]));
    assert_eq!(value["version"], 2);
}

#[tokio::test]
async fn test_namespaced_state_entries_are_removed() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001"]).await;
    env.write_state(r#"["github.com/org/alpha", "beta"]"#);

    let use_case = DeleteProjectUseCase::new(env.gateway.clone(), env.reconciler.clone());
    use_case
        .execute(&env.collection, "alpha")
        .await
        .expect("Failed to delete project");

    assert_eq!(env.state_value(), serde_json::json!(["beta"]));
}

#[tokio::test]
async fn test_missing_state_file_does_not_fail_deletion() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001"]).await;

    let use_case = DeleteProjectUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha")
        .await
        .expect("Deletion should succeed without a state file");

    assert_eq!(deleted, 1);
    assert!(env.remaining_ids().await.is_empty());
}

#[tokio::test]
async fn test_corrupt_state_file_does_not_fail_deletion() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001"]).await;
    env.write_state("{this is not json");

    let use_case = DeleteProjectUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let deleted = use_case
        .execute(&env.collection, "alpha")
        .await
        .expect("Store deletion is authoritative, state errors are swallowed");

    assert_eq!(deleted, 1);
    assert!(env.remaining_ids().await.is_empty());
}

#[tokio::test]
async fn test_untouched_state_file_is_not_rewritten() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001"]).await;
    env.write_state(r#"["alpha"]"#);

    let use_case = DeleteProjectUseCase::new(env.gateway.clone(), env.reconciler.clone());
    use_case
        .execute(&env.collection, "gamma")
        .await
        .expect("Failed to delete project");

    let raw = std::fs::read_to_string(env.collection.state_file_path())
        .expect("Failed to read state file");
    assert_eq!(raw, r#"["alpha"]"#, "File without changes must stay byte-identical");
}

#[tokio::test]
async fn test_concurrent_project_deletes_do_not_lose_state_updates() {
    let env = setup_test_env();
    env.seed(&["alpha:FILE:a:001", "beta:FILE:b:001"]).await;
    env.write_state(r#"["alpha", "beta", "gamma"]"#);

    let use_case = DeleteProjectUseCase::new(env.gateway.clone(), env.reconciler.clone());
    let (left, right) = tokio::join!(
        use_case.execute(&env.collection, "alpha"),
        use_case.execute(&env.collection, "beta"),
    );
    left.expect("Failed to delete alpha");
    right.expect("Failed to delete beta");

    assert_eq!(env.state_value(), serde_json::json!(["gamma"]));
}
