//! Session-scoped context owned by the top-level caller.
//!
//! The only durable piece is the user identifier handed out by the backend after signup;
//! the language selection lives for the process and is purely decorative.

mod language;

pub use language::{Language, LanguageView};

use crate::backend::UserId;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Display preferences chosen in the header switcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayPreferences {
    pub language: Language,
}

/// State shared by the surfaces of one user session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user_id: Option<UserId>,
    pub preferences: DisplayPreferences,
}

impl SessionContext {
    pub fn new(preferences: DisplayPreferences) -> Self {
        Self {
            user_id: None,
            preferences,
        }
    }

    pub fn with_user(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn remember_user(&mut self, user_id: UserId) {
        self.user_id = Some(user_id);
    }

    pub fn select_language(&mut self, language: Language) {
        self.preferences.language = language;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Plain-text file holding the one identifier the CLI keeps between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<UserId>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(UserId(trimmed.to_string())))
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.io_error(source)),
        }
    }

    pub fn save(&self, user_id: &UserId) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        fs::write(&self.path, &user_id.0).map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), "stored session identifier");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
