use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Failed to write process memory at address {address:#x}: {message}")]
    MemoryWriteFailed { address: u64, message: String },

    #[error("Snapshot failed the savemap consistency check")]
    InvalidSnapshot,

    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Whether the error means the game process could not be reached.
    ///
    /// These abort the pending command and are never retried automatically.
    pub fn is_process_unavailable(&self) -> bool {
        matches!(
            self,
            Error::ProcessNotFound(_)
                | Error::ProcessOpenFailed(_)
                | Error::MemoryReadFailed { .. }
                | Error::MemoryWriteFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_process_unavailable_classification() {
        assert!(Error::ProcessNotFound("ff7.exe".into()).is_process_unavailable());
        assert!(
            Error::MemoryWriteFailed {
                address: 0xDC04B4,
                message: "denied".into()
            }
            .is_process_unavailable()
        );
        assert!(!Error::InvalidSnapshot.is_process_unavailable());
        assert!(!Error::UnknownIdentity("Chocobo".into()).is_process_unavailable());
    }

    #[test]
    fn test_memory_error_formats_hex_address() {
        let err = Error::MemoryReadFailed {
            address: 0xDBFD38,
            message: "partial read".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read process memory at address 0xdbfd38: partial read"
        );
    }
}
