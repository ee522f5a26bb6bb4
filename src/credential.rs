// src/credential.rs
// =============================================================================
// Remembers the Gemini API key between runs.
//
// The library never stores credentials; this is front-end plumbing. The key
// lives in a plain file under the platform config directory (found with the
// `etcetera` crate), readable only by the owner on Unix.
//
// Which key gets used:
//   1. --api-key / GEMINI_API_KEY, unless it is blank
//   2. the stored key file
//
// When Gemini rejects a key, the file is removed only if that file is where
// the rejected key came from (or it was just written with --save-key). A
// wrong key typed on the command line never wipes a good stored one.
//
// Rust concepts:
// - Option<&T>: the store may not exist (no config dir, no --key-file)
// - enums as small state records (KeySource, SaveOutcome)
// =============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use etcetera::{choose_base_strategy, BaseStrategy};
use gh_digest::Error;

#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    // <config dir>/gh-digest/api_key, e.g. ~/.config/gh-digest/api_key
    pub fn default_location() -> Result<Self> {
        let strategy = choose_base_strategy().context("Could not locate a config directory")?;
        Ok(Self::at(strategy.config_dir().join("gh-digest").join("api_key")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Returns None if no key was saved (or the file is blank)
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let key = contents.trim();
                Ok((!key.is_empty()).then(|| key.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", self.path.display())),
        }
    }

    pub fn save(&self, key: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        fs::write(&self.path, key.trim())
            .with_context(|| format!("Could not write {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!(path = %self.path.display(), "saved API key");
        Ok(())
    }

    // Removing a key that was never saved is not an error
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "removed stored API key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Could not remove {}", self.path.display())),
        }
    }
}

// Where the key we are about to send came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Flag,
    Stored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub key: String,
    pub source: KeySource,
}

// Picks the key to use: a non-blank flag/env value first, then the store.
// Returns None when neither has one.
pub fn resolve_key(flag: Option<&str>, store: Option<&KeyStore>) -> Result<Option<ResolvedKey>> {
    // `--api-key ""` counts as not given, so the stored key still applies
    if let Some(key) = flag.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(Some(ResolvedKey {
            key: key.to_string(),
            source: KeySource::Flag,
        }));
    }

    let stored = match store {
        Some(store) => store.load()?,
        None => None,
    };
    Ok(stored.map(|key| ResolvedKey {
        key,
        source: KeySource::Stored,
    }))
}

#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    // --save-key was given but there is nowhere to put the key
    NoStore,
    // The key already came from the store
    AlreadyStored,
}

// Handles --save-key for a resolved key
pub fn remember(key: &ResolvedKey, store: Option<&KeyStore>) -> Result<SaveOutcome> {
    if key.source == KeySource::Stored {
        return Ok(SaveOutcome::AlreadyStored);
    }
    match store {
        Some(store) => {
            store.save(&key.key)?;
            Ok(SaveOutcome::Saved(store.path().to_path_buf()))
        }
        None => Ok(SaveOutcome::NoStore),
    }
}

// Throws away the stored key after Gemini rejected it
//
// Only InvalidCredential counts, and only when the rejected key is the one
// in the store: it was loaded from there, or `just_saved` it with
// --save-key. Returns true if the file was removed.
pub fn discard_if_rejected(
    error: &Error,
    key: &ResolvedKey,
    just_saved: bool,
    store: Option<&KeyStore>,
) -> Result<bool> {
    if !matches!(error, Error::InvalidCredential) {
        return Ok(false);
    }
    if key.source != KeySource::Stored && !just_saved {
        return Ok(false);
    }
    match store {
        Some(store) => {
            store.clear()?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(dir: &tempfile::TempDir, key: &str) -> KeyStore {
        let store = KeyStore::at(dir.path().join("api_key"));
        store.save(key).unwrap();
        store
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::at(dir.path().join("nope"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::at(dir.path().join("nested").join("api_key"));

        store.save("  my-key\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("my-key"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // second clear is a no-op
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_file_is_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");
        fs::write(&path, "\n  \n").unwrap();
        assert_eq!(KeyStore::at(path).load().unwrap(), None);
    }

    #[test]
    fn test_flag_wins_over_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, "stored-key");

        let key = resolve_key(Some("flag-key"), Some(&store)).unwrap().unwrap();
        assert_eq!(key.key, "flag-key");
        assert_eq!(key.source, KeySource::Flag);
    }

    #[test]
    fn test_blank_flag_falls_back_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, "stored-key");

        for blank in ["", "   "] {
            let key = resolve_key(Some(blank), Some(&store)).unwrap().unwrap();
            assert_eq!(key.key, "stored-key");
            assert_eq!(key.source, KeySource::Stored);
        }
    }

    #[test]
    fn test_no_key_anywhere() {
        assert_eq!(resolve_key(None, None).unwrap(), None);
        assert_eq!(resolve_key(Some(""), None).unwrap(), None);
    }

    #[test]
    fn test_rejected_stored_key_is_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, "stale-key");
        let key = resolve_key(None, Some(&store)).unwrap().unwrap();

        let cleared =
            discard_if_rejected(&Error::InvalidCredential, &key, false, Some(&store)).unwrap();
        assert!(cleared);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_rejected_flag_key_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, "good-stored-key");
        let key = resolve_key(Some("typo-key"), Some(&store)).unwrap().unwrap();

        let cleared =
            discard_if_rejected(&Error::InvalidCredential, &key, false, Some(&store)).unwrap();
        assert!(!cleared);
        assert_eq!(store.load().unwrap().as_deref(), Some("good-stored-key"));
    }

    #[test]
    fn test_rejected_key_just_saved_is_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::at(dir.path().join("api_key"));
        let key = resolve_key(Some("new-key"), Some(&store)).unwrap().unwrap();

        assert!(matches!(remember(&key, Some(&store)).unwrap(), SaveOutcome::Saved(_)));
        let cleared =
            discard_if_rejected(&Error::InvalidCredential, &key, true, Some(&store)).unwrap();
        assert!(cleared);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_other_failures_keep_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, "stored-key");
        let key = resolve_key(None, Some(&store)).unwrap().unwrap();

        for error in [Error::MissingCredential, Error::SummarizationFailed, Error::EmptySummary] {
            assert!(!discard_if_rejected(&error, &key, false, Some(&store)).unwrap());
        }
        assert_eq!(store.load().unwrap().as_deref(), Some("stored-key"));
    }

    #[test]
    fn test_remember_without_store() {
        let key = ResolvedKey {
            key: "k".to_string(),
            source: KeySource::Flag,
        };
        assert_eq!(remember(&key, None).unwrap(), SaveOutcome::NoStore);
    }

    #[test]
    fn test_remember_skips_stored_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, "stored-key");
        let key = resolve_key(None, Some(&store)).unwrap().unwrap();
        assert_eq!(remember(&key, Some(&store)).unwrap(), SaveOutcome::AlreadyStored);
    }
}
