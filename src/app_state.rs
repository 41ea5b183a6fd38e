//! Implements a struct that holds the state of the server.

use std::{path::PathBuf, sync::Arc};

use axum::extract::FromRef;

use crate::{Error, ledger::Ledger, timezone::get_local_offset};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction ledger.
    pub ledger: Arc<Ledger>,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] for the ledger file at `ledger_path`.
    ///
    /// The ledger file is created with its header row if it does not exist.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Kolkata".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known
    /// timezone, or [Error::LedgerIo] if the ledger file cannot be created.
    pub fn new(ledger_path: impl Into<PathBuf>, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let ledger = Ledger::new(ledger_path);
        ledger.ensure_file()?;

        Ok(Self {
            ledger: Arc::new(ledger),
            local_timezone: local_timezone.to_owned(),
        })
    }
}

/// The state needed by handlers that only read or append to the ledger.
#[derive(Debug, Clone)]
pub struct LedgerState {
    /// The transaction ledger.
    pub ledger: Arc<Ledger>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::AppState;
    use crate::Error;

    #[test]
    fn creates_ledger_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");

        AppState::new(&path, "Etc/UTC").unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let dir = tempdir().unwrap();

        let result = AppState::new(dir.path().join("ledger.csv"), "Nowhere/Special");

        assert_eq!(
            result.map(|_| ()),
            Err(Error::InvalidTimezoneError("Nowhere/Special".to_owned()))
        );
    }
}
