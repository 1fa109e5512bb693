// object.rs — Open file handles and metadata snapshots.
//
// FsObject owns one std::fs::File plus the path it was opened at (so stat()
// can report a name). Closing drops the File; afterwards every operation
// returns an "already closed" error, including a second close.
//
// Note the write() semantics: it always writes at offset 0. Callers that
// want the cursor or another offset use write_at() or seek + io::copy from
// a reader. FsObject deliberately does not implement std::io::Write.
//
// Handles opened with APPEND refuse write() and write_at(): pwrite on such a
// descriptor ignores the offset and lands at EOF on Linux.

use std::fs::{File, Metadata};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use fo_connect::{FileHandle, ObjectMeta};

/// Metadata snapshot for one filesystem object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FsObjectMeta {
    name: String,
    size: u64,
    is_dir: bool,
    mod_time: DateTime<Utc>,
}

impl FsObjectMeta {
    pub(crate) fn from_metadata(name: impl Into<String>, md: &Metadata) -> Self {
        Self {
            name: name.into(),
            size: md.len(),
            is_dir: md.is_dir(),
            // Platforms without mtime report the epoch.
            mod_time: md.modified().map(DateTime::<Utc>::from).unwrap_or_default(),
        }
    }
}

impl ObjectMeta for FsObjectMeta {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn is_dir(&self) -> bool {
        self.is_dir
    }

    fn mod_time(&self) -> DateTime<Utc> {
        self.mod_time
    }
}

/// Final component of `path` as a display name.
pub(crate) fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// An open file under a connector root.
///
/// Not `Clone`: the handle owns its descriptor and cursor exclusively.
#[derive(Debug)]
pub struct FsObject {
    fp: Option<File>,
    path: PathBuf,
    append: bool,
}

impl FsObject {
    pub(crate) fn new(fp: File, path: PathBuf) -> Self {
        Self {
            fp: Some(fp),
            path,
            append: false,
        }
    }

    /// Mark the handle as opened in append mode.
    pub(crate) fn appending(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Absolute path the handle was opened at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&self) -> io::Result<&File> {
        self.fp.as_ref().ok_or_else(closed_error)
    }
}

fn closed_error() -> io::Error {
    io::Error::other("file already closed")
}

#[cfg(unix)]
fn write_all_at(fp: &File, buf: &[u8], offset: u64) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    fp.write_all_at(buf, offset)
}

// seek_write moves the cursor on Windows, unlike pwrite.
#[cfg(windows)]
fn write_all_at(fp: &File, mut buf: &[u8], mut offset: u64) -> io::Result<()> {
    use std::os::windows::fs::FileExt;
    while !buf.is_empty() {
        match fp.seek_write(buf, offset) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(n) => {
                buf = &buf[n..];
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

impl Read for FsObject {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut fp = self.file()?;
        fp.read(buf)
    }
}

impl Seek for FsObject {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let mut fp = self.file()?;
        fp.seek(pos)
    }
}

impl FileHandle for FsObject {
    type Meta = FsObjectMeta;

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_at(buf, 0)
    }

    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        let fp = self.file()?;
        if self.append {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "positioned write on a handle opened with APPEND",
            ));
        }
        write_all_at(fp, buf, offset)?;
        Ok(buf.len())
    }

    fn truncate(&mut self, size: u64) -> io::Result<()> {
        self.file()?.set_len(size)
    }

    fn stat(&self) -> io::Result<FsObjectMeta> {
        let md = self.file()?.metadata()?;
        Ok(FsObjectMeta::from_metadata(base_name(&self.path), &md))
    }

    fn readdir(&mut self, _count: i64) -> io::Result<Vec<FsObjectMeta>> {
        Ok(Vec::new())
    }

    fn close(&mut self) -> io::Result<()> {
        match self.fp.take() {
            Some(fp) => {
                drop(fp);
                Ok(())
            }
            None => Err(closed_error()),
        }
    }
}
