use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The processed-repositories record kept as a side-car JSON file next to
/// the vector store.
///
/// Two on-disk shapes exist in the wild: a bare list of project names, or an
/// object with a `repos` list. The variant is fixed when the file is decoded
/// and preserved when it is written back, so a file always round-trips in
/// the shape it was read in. Unknown sibling keys of `repos` survive via the
/// flattened map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectStateFile {
    Flat(Vec<String>),
    Keyed {
        #[serde(default)]
        repos: Vec<String>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl ProjectStateFile {
    pub fn repos(&self) -> &[String] {
        match self {
            ProjectStateFile::Flat(repos) => repos,
            ProjectStateFile::Keyed { repos, .. } => repos,
        }
    }

    pub fn len(&self) -> usize {
        self.repos().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos().is_empty()
    }

    pub fn contains_project(&self, project: &str) -> bool {
        self.repos().iter().any(|entry| entry_matches(entry, project))
    }

    /// Drops every entry referring to `project`. Returns whether the list
    /// changed, so callers can skip rewriting an untouched file.
    pub fn remove_project(&mut self, project: &str) -> bool {
        let repos = self.repos_mut();
        let before = repos.len();
        repos.retain(|entry| !entry_matches(entry, project));
        repos.len() != before
    }

    /// For log lines: which on-disk shape this record was read in.
    pub fn shape_name(&self) -> &'static str {
        match self {
            ProjectStateFile::Flat(_) => "list",
            ProjectStateFile::Keyed { .. } => "object",
        }
    }

    fn repos_mut(&mut self) -> &mut Vec<String> {
        match self {
            ProjectStateFile::Flat(repos) => repos,
            ProjectStateFile::Keyed { repos, .. } => repos,
        }
    }
}

/// A state entry refers to `project` when it matches exactly or is a
/// namespaced identifier ending in `"/<project>"` (e.g. `org/alpha`).
fn entry_matches(entry: &str, project: &str) -> bool {
    entry == project
        || entry
            .strip_suffix(project)
            .is_some_and(|head| head.ends_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProjectStateFile {
        serde_json::from_str(json).expect("state json")
    }

    #[test]
    fn test_decodes_flat_shape() {
        let state = parse(r#"["alpha", "org/beta"]"#);
        assert_eq!(state.repos(), ["alpha", "org/beta"]);
        assert_eq!(state.shape_name(), "list");
    }

    #[test]
    fn test_decodes_keyed_shape() {
        let state = parse(r#"{"repos": ["alpha"]}"#);
        assert_eq!(state.repos(), ["alpha"]);
        assert_eq!(state.shape_name(), "object");
    }

    #[test]
    fn test_keyed_shape_tolerates_missing_repos() {
        let state = parse(r#"{"note": "no repos yet"}"#);
        assert!(state.is_empty());
    }

    #[test]
    fn test_flat_round_trips_as_array() {
        let state = parse(r#"["alpha"]"#);
        let value = serde_json::to_value(&state).expect("to_value");
        assert!(value.is_array());
    }

    #[test]
    fn test_keyed_round_trip_preserves_unknown_keys() {
        let mut state = parse(r#"{"repos": ["alpha", "beta"], "updated_at": "2024-01-01"}"#);
        assert!(state.remove_project("alpha"));

        let value = serde_json::to_value(&state).expect("to_value");
        assert_eq!(value["repos"], serde_json::json!(["beta"]));
        assert_eq!(value["updated_at"], "2024-01-01");
    }

    #[test]
    fn test_remove_project_matches_exact_and_namespaced() {
        let mut state = parse(r#"["alpha", "org/alpha", "github.com/org/alpha", "beta"]"#);
        assert!(state.remove_project("alpha"));
        assert_eq!(state.repos(), ["beta"]);
    }

    #[test]
    fn test_remove_project_does_not_match_suffix_without_separator() {
        let mut state = parse(r#"["malpha", "org/malpha"]"#);
        assert!(!state.remove_project("alpha"));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_remove_project_reports_unchanged() {
        let mut state = parse(r#"["beta"]"#);
        assert!(!state.remove_project("alpha"));
    }

    #[test]
    fn test_contains_project() {
        let state = parse(r#"["org/alpha", "beta"]"#);
        assert!(state.contains_project("alpha"));
        assert!(state.contains_project("beta"));
        assert!(!state.contains_project("gamma"));
    }
}
