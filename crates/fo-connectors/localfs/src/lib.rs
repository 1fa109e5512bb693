//! # fo-connector-localfs
//!
//! Local-disk backend for the `fo-connect` traits.
//!
//! A [`Connector`] owns one root directory. Every caller path is cleaned,
//! checked, and joined onto that root before it reaches the filesystem, so a
//! caller cannot name the root itself or anything above it.
//!
//! ## Flow
//!
//! 1. Build [`fo_connect::ConnOptions`] with a `data_dir` item and call
//!    [`Connector::connect`] → the root is validated once.
//! 2. Use [`fo_connect::FsConnector`] operations (`open`, `open_file`,
//!    `stat`, `list`, `mkdir_all`) → [`FsObject`] handles and
//!    [`FsObjectMeta`] snapshots.
//! 3. Use [`fo_connect::FileObjectConnector::fo_file_put`] to copy an
//!    external file in, replacing the destination's content.
//!
//! ## Confinement
//!
//! [`Confinement::Lexical`] (the default) rejects paths by text alone.
//! [`Confinement::Strict`] also resolves symlinks and refuses any path whose
//! real location is outside the root.

pub mod connector;
pub mod error;
pub mod object;
pub mod options;
pub mod path;
pub mod put;

pub use connector::Connector;
pub use error::LocalFsError;
pub use object::{FsObject, FsObjectMeta};
pub use options::{Confinement, LocalFsOptions};
