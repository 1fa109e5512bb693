// fs.rs — File-object traits implemented by storage connectors.
//
// FsConnector is the path-based surface (open, stat, list, mkdir). It hands
// out FileHandle values for open files and ObjectMeta snapshots for
// metadata queries. FileObjectConnector is the bulk surface: open a file as
// a plain reader, or copy an external file in.
//
// Each backend provides exactly one concrete type per trait; the associated
// types let callers stay generic without boxing.

use std::io::{self, Read, Seek};
use bitflags::bitflags;
use chrono::{DateTime, Utc};

use crate::result::OpResult;

/// A point-in-time snapshot of an object's metadata.
///
/// Values are copied when the snapshot is taken and never refreshed.
pub trait ObjectMeta {
    /// Final path component.
    fn name(&self) -> &str;

    /// Size in bytes.
    fn size(&self) -> u64;

    fn is_dir(&self) -> bool;

    /// Last modification time.
    fn mod_time(&self) -> DateTime<Utc>;
}

/// An open file with an internal read/write cursor.
///
/// Reading and seeking come from the `Read` and `Seek` supertraits. A handle
/// is owned by one caller; every cursor-touching method takes `&mut self`,
/// so sharing one across threads needs external synchronization.
pub trait FileHandle: Read + Seek {
    type Meta: ObjectMeta;

    /// Write `buf` at offset 0, regardless of the cursor.
    ///
    /// Repeated calls overwrite the start of the file instead of appending.
    /// Use [`FileHandle::write_at`] to place bytes elsewhere.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Write all of `buf` at `offset` without consulting the cursor.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize>;

    /// Resize the underlying file.
    fn truncate(&mut self, size: u64) -> io::Result<()>;

    /// Fresh metadata snapshot of the open file.
    fn stat(&self) -> io::Result<Self::Meta>;

    /// Directory read on an open handle.
    ///
    /// Always returns an empty list; listing goes through
    /// [`FsConnector::list`].
    fn readdir(&mut self, count: i64) -> io::Result<Vec<Self::Meta>>;

    /// Release the file. Every later call, including a second close, fails.
    fn close(&mut self) -> io::Result<()>;
}

/// Path-based operations against a connector's storage.
///
/// All paths are relative to the connector's root; backends reject paths
/// that are empty or resolve to the root or its parent.
pub trait FsConnector {
    type Meta: ObjectMeta;
    type Handle: FileHandle<Meta = Self::Meta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Metadata for `path` without opening it.
    fn stat(&self, path: &str) -> Result<Self::Meta, Self::Error>;

    /// Create `path` and all missing parents. Succeeds if it already exists.
    fn mkdir_all(&self, path: &str, perm: u32) -> Result<(), Self::Error>;

    /// Open `path` read-only.
    fn open(&self, path: &str) -> Result<Self::Handle, Self::Error>;

    /// Open `path` with explicit flags; `perm` applies when the file is created.
    fn open_file(&self, path: &str, flags: OpenFlags, perm: u32)
        -> Result<Self::Handle, Self::Error>;

    /// Up to `limit` entries of the directory at `path`; `limit <= 0` lists all.
    fn list(&self, path: &str, limit: i64) -> Result<Vec<Self::Meta>, Self::Error>;

    /// Release the connector.
    fn close(&self) -> Result<(), Self::Error>;
}

/// Bulk file-object operations.
pub trait FileObjectConnector {
    type Reader: Read + Seek;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open `path` (relative to the root) as a plain reader.
    fn fo_file_open(&self, path: &str) -> Result<Self::Reader, Self::Error>;

    /// Copy the external file `src_path` to `dst_path` under the root,
    /// replacing any existing content.
    fn fo_file_put(&self, src_path: &str, dst_path: &str) -> OpResult;
}

bitflags! {
    /// Access mode plus creation flags for [`FsConnector::open_file`].
    ///
    /// The low two bits hold the access mode (`RDONLY`, `WRONLY`, `RDWR`); the
    /// rest are independent flags combined with `|`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u32 {
        const RDONLY = 0;
        const WRONLY = 1;
        const RDWR = 2;
        /// Writes go to the end of the file.
        const APPEND = 1 << 3;
        /// Create the file if it does not exist.
        const CREATE = 1 << 4;
        /// With `CREATE`, fail if the file already exists.
        const EXCL = 1 << 5;
        /// Truncate an existing file on open.
        const TRUNC = 1 << 6;
    }
}

impl OpenFlags {
    const ACCESS_MASK: u32 = 0b11;

    fn access(self) -> u32 {
        self.bits() & Self::ACCESS_MASK
    }

    pub fn is_readable(self) -> bool {
        self.access() != Self::WRONLY.bits()
    }

    pub fn is_writable(self) -> bool {
        self.access() == Self::WRONLY.bits() || self.access() == Self::RDWR.bits()
    }
}
