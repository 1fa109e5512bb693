// options.rs — Typed view of the connection options the local backend reads.
//
// Recognized items:
//   data_dir     (required) root directory, cleaned lexically
//   confinement  (optional) "lexical" (default) or "strict"

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use fo_connect::ConnOptions;

use crate::error::LocalFsError;
use crate::path::clean_path;

/// How strictly caller paths are held inside the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Confinement {
    /// Textual check only. A symlink inside the root that points outside it
    /// is followed.
    #[default]
    Lexical,

    /// Textual check plus symlink resolution: the real location of every
    /// path must be under the canonical root.
    Strict,
}

impl FromStr for Confinement {
    type Err = LocalFsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" => Ok(Confinement::Lexical),
            "strict" => Ok(Confinement::Strict),
            _ => Err(LocalFsError::InvalidOption {
                key: LocalFsOptions::CONFINEMENT.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Confinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confinement::Lexical => write!(f, "lexical"),
            Confinement::Strict => write!(f, "strict"),
        }
    }
}

/// Settings for one local connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFsOptions {
    data_dir: PathBuf,
    confinement: Confinement,
}

impl LocalFsOptions {
    /// Connection option key for the root directory.
    pub const DATA_DIR: &'static str = "data_dir";
    /// Connection option key for the confinement mode.
    pub const CONFINEMENT: &'static str = "confinement";
    /// Connector kind these options belong to.
    pub const CONNECTOR: &'static str = "localfs";

    /// Options rooted at `data_dir` with lexical confinement.
    pub fn new(data_dir: &str) -> Result<Self, LocalFsError> {
        if data_dir.trim().is_empty() {
            return Err(LocalFsError::MissingDataDir);
        }
        Ok(Self {
            data_dir: PathBuf::from(clean_path(data_dir)),
            confinement: Confinement::default(),
        })
    }

    pub fn with_confinement(mut self, confinement: Confinement) -> Self {
        self.confinement = confinement;
        self
    }

    /// Read `data_dir` and `confinement` from generic connection options.
    pub fn from_conn_options(copts: &ConnOptions) -> Result<Self, LocalFsError> {
        let data_dir = copts
            .get(Self::DATA_DIR)
            .ok_or(LocalFsError::MissingDataDir)?;

        let confinement = match copts.get(Self::CONFINEMENT) {
            Some(value) => value.parse()?,
            None => Confinement::default(),
        };

        Ok(Self::new(data_dir)?.with_confinement(confinement))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn confinement(&self) -> Confinement {
        self.confinement
    }
}
