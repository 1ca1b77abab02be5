// Cache store for per-user starred-repository snapshots.
// Handles JSON serialization and filesystem operations.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, StarlistError};
use crate::github::Repo;

/// Mapping from username to their complete starred-repository snapshot.
///
/// An entry is written only after a full pagination walk and is trusted
/// verbatim afterwards; there is no expiry or refresh.
pub trait RepoStore {
    /// Get the cached snapshot for a user. An absent key is `Ok(None)`,
    /// not an error; errors mean the store itself failed.
    fn get(&self, username: &str) -> Result<Option<Vec<Repo>>>;

    /// Store a snapshot, overwriting any existing entry for the user.
    fn put(&self, username: &str, repos: &[Repo]) -> Result<()>;

    /// Release underlying resources. Called exactly once before exit.
    fn close(&mut self) -> Result<()>;
}

/// Durable store backed by a single JSON file holding all users' snapshots.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, Vec<Repo>>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_map(&self, map: &HashMap<String, Vec<Repo>>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write atomically via temp file
        let json = serde_json::to_string_pretty(map)?;
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl RepoStore for FileStore {
    fn get(&self, username: &str) -> Result<Option<Vec<Repo>>> {
        Ok(self.read_map()?.remove(username))
    }

    fn put(&self, username: &str, repos: &[Repo]) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(username.to_string(), repos.to_vec());
        self.write_map(&map)
    }

    fn close(&mut self) -> Result<()> {
        // Every put is flushed to disk already; nothing is held open.
        Ok(())
    }
}

/// In-memory store; nothing survives process exit.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<Repo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<Repo>>>> {
        self.entries
            .lock()
            .map_err(|e| StarlistError::Store(e.to_string()))
    }
}

impl RepoStore for MemoryStore {
    fn get(&self, username: &str) -> Result<Option<Vec<Repo>>> {
        Ok(self.lock()?.get(username).cloned())
    }

    fn put(&self, username: &str, repos: &[Repo]) -> Result<()> {
        self.lock()?.insert(username.to_string(), repos.to_vec());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Open the store selected by the environment: a `FileStore` at the
/// `STORAGE_FILE` path when set and non-empty, otherwise a `MemoryStore`.
pub fn open_from_env() -> Box<dyn RepoStore> {
    match std::env::var("STORAGE_FILE") {
        Ok(path) if !path.is_empty() => Box::new(FileStore::new(Path::new(&path))),
        _ => Box::new(MemoryStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo(id: u64, name: &str) -> Repo {
        Repo {
            id,
            full_name: name.to_string(),
            description: Some("a test repo".to_string()),
            html_url: format!("https://github.com/{name}"),
            language: Some("Rust".to_string()),
        }
    }

    #[test]
    fn test_file_store_put_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("stars.json"));

        let repos = vec![repo(1, "a/one"), repo(2, "b/two")];
        store.put("octocat", &repos).unwrap();

        let cached = store.get("octocat").unwrap();
        assert_eq!(cached, Some(repos));
    }

    #[test]
    fn test_file_store_missing_user_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("stars.json"));

        store.put("octocat", &[repo(1, "a/one")]).unwrap();
        assert_eq!(store.get("someone-else").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nonexistent.json"));

        assert_eq!(store.get("octocat").unwrap(), None);
    }

    #[test]
    fn test_file_store_put_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("stars.json"));

        store.put("octocat", &[repo(1, "a/one")]).unwrap();
        store.put("octocat", &[repo(2, "b/two")]).unwrap();

        let cached = store.get("octocat").unwrap().unwrap();
        assert_eq!(cached, vec![repo(2, "b/two")]);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stars.json");

        let repos = vec![repo(1, "a/one")];
        {
            let mut store = FileStore::new(&path);
            store.put("octocat", &repos).unwrap();
            store.close().unwrap();
        }

        let store = FileStore::new(&path);
        assert_eq!(store.get("octocat").unwrap(), Some(repos));
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stars.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("octocat").is_err());
    }

    #[test]
    fn test_memory_store_put_and_get() {
        let store = MemoryStore::new();

        assert_eq!(store.get("octocat").unwrap(), None);

        let repos = vec![repo(1, "a/one")];
        store.put("octocat", &repos).unwrap();
        assert_eq!(store.get("octocat").unwrap(), Some(repos));
    }
}
