//! # fo-connect
//!
//! Shared vocabulary for file-object storage connectors.
//!
//! A connector crate (such as `fo-connector-localfs`) implements the traits
//! defined here; callers program against the traits and never against a
//! specific backend.
//!
//! ## Key components
//!
//! - [`ConnOptions`] — named key → value options handed to a connector's
//!   constructor. Loadable from TOML.
//! - [`OpResult`] / [`ResultStatus`] — status-plus-cause result returned by
//!   bulk operations such as [`FileObjectConnector::fo_file_put`].
//! - [`FsConnector`] — path-based operations: open, stat, list, mkdir.
//! - [`FileHandle`] / [`ObjectMeta`] — an open file and a metadata snapshot.
//! - [`OpenFlags`] — access mode and creation flags for
//!   [`FsConnector::open_file`].

pub mod error;
pub mod fs;
pub mod options;
pub mod result;

pub use error::ConnectError;
pub use fs::{FileHandle, FileObjectConnector, FsConnector, ObjectMeta, OpenFlags};
pub use options::ConnOptions;
pub use result::{OpResult, ResultStatus};
