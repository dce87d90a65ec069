//! Directory-backed store, one file per key.

use crate::{CacheError, KvStore};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const ENTRY_EXT: &str = "json";
const TEMP_EXT: &str = "tmp";

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// [`KvStore`] that keeps each key in its own file under a directory.
///
/// Keys are base64url-encoded into file names, so any key (including the
/// storefront's `@RocketShoes:cart`) maps to a portable name. Writes go to a
/// temp file that is renamed over the entry, so readers never see a partial
/// snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Directory this store writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", URL_SAFE_NO_PAD.encode(key), ENTRY_EXT))
    }

    /// Temp path for one write, unique across processes sharing `dir`.
    fn temp_path(&self, key: &str) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(
            "{}.{}-{}.{}",
            URL_SAFE_NO_PAD.encode(key),
            std::process::id(),
            seq,
            TEMP_EXT
        ))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.entry_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.entry_path(key);
        let temp = self.temp_path(key);

        let written = fs::File::create(&temp).and_then(|mut file| {
            file.write_all(value)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&temp, &path)) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::trace!(key, path = %path.display(), bytes = value.len(), "stored entry");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Foreign files in the directory are skipped, not errors.
            if let Ok(key) = URL_SAFE_NO_PAD
                .decode(stem)
                .map_err(|e| e.to_string())
                .and_then(|raw| String::from_utf8(raw).map_err(|e| e.to_string()))
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}
