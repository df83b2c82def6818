use accesslog_core::{decode, encode};
use accesslog_types::{
    Error, LogFile, Record, RecordDraft, Result, validate_record, validate_token,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// NOTE: Every append rewrites the whole file: the end marker moves on each
// append. The new contents go to a temp file in the same directory which is
// then renamed over the target. A rejected cycle (bad token, corrupt file)
// returns before the temp file exists, so the target is never touched.

/// What to require before a brand-new log file may be created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CreationPolicy {
    /// Any caller holding a valid token may create a log
    #[default]
    Allow,
    /// Both named environment variables must be set and non-empty
    RequireEnv {
        public_var: String,
        private_var: String,
    },
}

impl CreationPolicy {
    pub fn check(&self) -> Result<()> {
        match self {
            CreationPolicy::Allow => Ok(()),
            CreationPolicy::RequireEnv {
                public_var,
                private_var,
            } => {
                for name in [public_var, private_var] {
                    let present = std::env::var_os(name).is_some_and(|value| !value.is_empty());
                    if !present {
                        return Err(Error::KeysUnavailable(name.clone()));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Result of one successful append cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// The target file did not exist before this cycle
    pub created: bool,
    /// Number of records in the log after the append
    pub record_count: usize,
}

/// Handle to one log file on disk
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
    creation: CreationPolicy,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            creation: CreationPolicy::default(),
        }
    }

    pub fn with_creation_policy(mut self, creation: CreationPolicy) -> Self {
        self.creation = creation;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and decode the log; `Ok(None)` when the file does not exist
    pub fn load(&self, token: &str) -> Result<Option<LogFile>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "decoding log");
        decode(&bytes, token).map(Some)
    }

    /// Load the log, or start an empty one bound to `token` if the file is absent.
    ///
    /// The boolean is `true` when a new log was started.
    pub fn load_or_create(&self, token: &str) -> Result<(LogFile, bool)> {
        match self.load(token)? {
            Some(log) => Ok((log, false)),
            None => {
                self.creation.check()?;
                tracing::debug!(path = %self.path.display(), "starting new log");
                Ok((LogFile::new(token), true))
            }
        }
    }

    /// Encode and atomically replace the file contents
    pub fn save(&self, log: &LogFile) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&encode(log))?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| Error::Io(err.error))?;
        Ok(())
    }

    /// One full read-modify-write cycle: load (or create), append, save.
    ///
    /// The token and the record are both checked before the file is read, so
    /// a record the codec could not read back is never written.
    pub fn append(&self, token: &str, record: Record) -> Result<AppendOutcome> {
        validate_token(token)?;
        let record = validate_record(&RecordDraft::from(&record))?;

        let (mut log, created) = self.load_or_create(token)?;
        log.append(record);
        self.save(&log)?;

        tracing::info!(
            path = %self.path.display(),
            records = log.len(),
            created,
            "appended record"
        );

        Ok(AppendOutcome {
            created,
            record_count: log.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesslog_types::{ErrorKind, Event, Person, Timestamp};
    use tempfile::TempDir;

    fn arrival(ts: u64, name: &str) -> Record {
        Record {
            timestamp: Timestamp::new(ts).unwrap(),
            room: None,
            person: Person::employee(name),
            event: Event::Arrival,
        }
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::new(dir.path().join("absent.log"));
        assert!(store.load("tok").unwrap().is_none());
        assert!(!store.exists());
    }

    #[test]
    fn test_append_creates_then_extends() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::new(dir.path().join("a.log"));

        let first = store.append("tok", arrival(1, "Ann")).unwrap();
        assert_eq!(
            first,
            AppendOutcome {
                created: true,
                record_count: 1
            }
        );

        let second = store.append("tok", arrival(2, "Ben")).unwrap();
        assert!(!second.created);
        assert_eq!(second.record_count, 2);

        let log = store.load("tok").unwrap().unwrap();
        assert_eq!(log.records()[1].person.name, "Ben");
    }

    #[test]
    fn test_invalid_token_never_touches_disk() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::new(dir.path().join("a.log"));

        let err = store.append("bad token", arrival(1, "Ann")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
        assert!(!store.exists());
    }

    #[test]
    fn test_unencodable_name_is_rejected_before_write() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::new(dir.path().join("a.log"));
        store.append("tok", arrival(1, "Ann")).unwrap();
        let before = fs::read(store.path()).unwrap();

        for name in ["Bad#Name", "Two\nLines", "Ann1", ""] {
            let err = store.append("tok", arrival(2, name)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidName, "name {:?}", name);
        }

        assert_eq!(fs::read(store.path()).unwrap(), before);
        assert_eq!(store.load("tok").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_record_never_creates_file() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::new(dir.path().join("a.log"));

        let err = store.append("tok", arrival(1, "No Space")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        assert!(!store.exists());
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = LogStore::new(dir.path().join("a.log"));
        store.append("tok", arrival(1, "Ann")).unwrap();
        store.append("tok", arrival(2, "Ann")).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_creation_policy_requires_env() {
        let dir = TempDir::new().unwrap();
        let policy = CreationPolicy::RequireEnv {
            public_var: "ACCESSLOG_TEST_UNSET_PUBLIC_KEY".to_string(),
            private_var: "ACCESSLOG_TEST_UNSET_PRIVATE_KEY".to_string(),
        };
        let store = LogStore::new(dir.path().join("a.log")).with_creation_policy(policy);

        let err = store.append("tok", arrival(1, "Ann")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeysUnavailable);
        assert!(!store.exists());
    }
}
