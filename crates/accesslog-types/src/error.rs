use std::fmt;

/// Result type for accesslog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Flat classification of every failure the library can report.
///
/// Callers that only need to branch on the failure class (exit codes, tests)
/// use this instead of matching on [`Error`] payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidToken,
    InvalidName,
    MissingTimestamp,
    InvalidRoomId,
    MissingPerson,
    MissingEvent,
    DuplicatePerson,
    DuplicateEvent,
    DuplicateLogFile,
    MissingLogFile,
    MalformedNumber,
    MalformedBatch,
    BadMagic,
    TokenMismatch,
    MalformedRecord,
    UnterminatedLog,
    KeysUnavailable,
    FileIoError,
}

/// Why a token was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenProblem {
    Empty,
    InvalidCharacter(char),
}

/// Why a person name was rejected
///
/// Digits get their own variant so the message can tell "looks like an id"
/// apart from "contains punctuation".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameProblem {
    Empty,
    ContainsSpace,
    ContainsDigit(char),
    InvalidCharacter(char),
}

/// Error types that can occur while parsing, validating or storing records
#[derive(Debug)]
pub enum Error {
    /// Token is empty or not ASCII alphanumeric
    InvalidToken(TokenProblem),

    /// Person name failed shape validation
    InvalidName { name: String, problem: NameProblem },

    /// Timestamp absent or outside 30 bits
    MissingTimestamp,

    /// Room id outside 30 bits and not the whole-building sentinel
    InvalidRoomId(u64),

    MissingPerson,

    MissingEvent,

    /// `-E`/`-G` given more than once
    DuplicatePerson,

    /// `-A`/`-L` given more than once
    DuplicateEvent,

    /// More than one bare (unflagged) field
    DuplicateLogFile { first: String, second: String },

    /// No bare field naming the target log
    MissingLogFile,

    /// Numeric flag argument that is not a complete base-10 integer
    MalformedNumber { flag: char, value: String },

    /// Batch input could not be tokenized
    MalformedBatch(String),

    /// Log file does not start with the magic marker
    BadMagic,

    /// Stored token differs from the supplied one
    TokenMismatch,

    /// A record line in the log file could not be decoded
    MalformedRecord { line: usize, reason: String },

    /// Input ended before the end marker
    UnterminatedLog,

    /// Creating a new log requires key material that is not configured
    KeysUnavailable(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidToken(_) => ErrorKind::InvalidToken,
            Error::InvalidName { .. } => ErrorKind::InvalidName,
            Error::MissingTimestamp => ErrorKind::MissingTimestamp,
            Error::InvalidRoomId(_) => ErrorKind::InvalidRoomId,
            Error::MissingPerson => ErrorKind::MissingPerson,
            Error::MissingEvent => ErrorKind::MissingEvent,
            Error::DuplicatePerson => ErrorKind::DuplicatePerson,
            Error::DuplicateEvent => ErrorKind::DuplicateEvent,
            Error::DuplicateLogFile { .. } => ErrorKind::DuplicateLogFile,
            Error::MissingLogFile => ErrorKind::MissingLogFile,
            Error::MalformedNumber { .. } => ErrorKind::MalformedNumber,
            Error::MalformedBatch(_) => ErrorKind::MalformedBatch,
            Error::BadMagic => ErrorKind::BadMagic,
            Error::TokenMismatch => ErrorKind::TokenMismatch,
            Error::MalformedRecord { .. } => ErrorKind::MalformedRecord,
            Error::UnterminatedLog => ErrorKind::UnterminatedLog,
            Error::KeysUnavailable(_) => ErrorKind::KeysUnavailable,
            Error::Io(_) => ErrorKind::FileIoError,
        }
    }

    pub fn malformed_record(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TokenProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenProblem::Empty => write!(f, "token is empty"),
            TokenProblem::InvalidCharacter(c) => {
                write!(f, "token contains non-alphanumeric character {:?}", c)
            }
        }
    }
}

impl fmt::Display for NameProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameProblem::Empty => write!(f, "name is empty"),
            NameProblem::ContainsSpace => write!(f, "name must not contain spaces"),
            NameProblem::ContainsDigit(c) => {
                write!(f, "name must not contain digits (found '{}')", c)
            }
            NameProblem::InvalidCharacter(c) => {
                write!(f, "name contains invalid character {:?}", c)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidToken(problem) => write!(f, "Invalid token: {}", problem),
            Error::InvalidName { name, problem } => {
                write!(f, "Invalid name {:?}: {}", name, problem)
            }
            Error::MissingTimestamp => {
                write!(f, "Missing timestamp: -T is required and must be below 2^30")
            }
            Error::InvalidRoomId(value) => {
                write!(f, "Invalid room id {}: must be below 2^30", value)
            }
            Error::MissingPerson => write!(f, "Missing person: one of -E or -G is required"),
            Error::MissingEvent => write!(f, "Missing event: one of -A or -L is required"),
            Error::DuplicatePerson => write!(f, "Duplicate person: -E/-G given more than once"),
            Error::DuplicateEvent => write!(f, "Duplicate event: -A/-L given more than once"),
            Error::DuplicateLogFile { first, second } => write!(
                f,
                "Duplicate log file: got {:?} and {:?}",
                first, second
            ),
            Error::MissingLogFile => write!(f, "Missing log file name"),
            Error::MalformedNumber { flag, value } => {
                write!(f, "Malformed number for -{}: {:?}", flag, value)
            }
            Error::MalformedBatch(msg) => write!(f, "Malformed batch: {}", msg),
            Error::BadMagic => write!(f, "Not an access log: bad magic header"),
            Error::TokenMismatch => write!(f, "Token does not match the log file"),
            Error::MalformedRecord { line, reason } => {
                write!(f, "Malformed record at line {}: {}", line, reason)
            }
            Error::UnterminatedLog => write!(f, "Log file is truncated: missing end marker"),
            Error::KeysUnavailable(name) => write!(
                f,
                "Cannot create a new log: environment variable {} is not set",
                name
            ),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
