use crate::error::Error;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed name the session record is persisted under.
pub const SESSION_KEY: &str = "user";

/// Durable backing store for the serialized session record.
///
/// Implementations store at most one record, always under [`SESSION_KEY`].
pub trait SessionStorage: Send + Sync {
    /// Read the persisted record, `None` when nothing is stored
    fn load(&self) -> Result<Option<String>, Error>;
    /// Write the record, replacing any previous one
    fn store(&self, raw: &str) -> Result<(), Error>;
    /// Remove the record; removing an absent record is not an error
    fn clear(&self) -> Result<(), Error>;
}

/// In-process storage, dropped with the client. Used when persistence is
/// disabled and in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    record: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<String>, Error> {
        Ok(self.record.lock().unwrap().clone())
    }

    fn store(&self, raw: &str) -> Result<(), Error> {
        *self.record.lock().unwrap() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

/// File-backed storage writing `<dir>/user.json`.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Storage rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_KEY}.json")),
        }
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::storage(err)),
        }
    }

    fn store(&self, raw: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(Error::storage)?;
        }
        fs::write(&self.path, raw).map_err(Error::storage)
    }

    fn clear(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::storage(err)),
        }
    }
}
