#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// State could not be serialized for writing.
    Serialize(String),
    /// The storage backend rejected the write (permissions, quota, I/O).
    Write(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Serialize(msg) => {
                write!(f, "Serialization failed: {}", msg)
            }
            StorageError::Write(msg) => {
                write!(f, "Storage write failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

pub type StorageResult<T> = Result<T, StorageError>;
