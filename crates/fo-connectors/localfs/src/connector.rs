// connector.rs — Connector: path-confined filesystem operations.
//
// The Connector is the bridge between the generic FsConnector trait and the
// local filesystem. It holds only the root directory, fixed at construction,
// so it is Send + Sync and can be shared freely between threads.
//
// Flow for every path-taking operation:
//   1. confine(path)  → cleaned, root-relative path (or InvalidPath)
//   2. root.join(...) → absolute path under the root
//   3. strict mode only: ensure_contained() on the symlink-resolved path
//   4. native call    → errors keep their original io::Error as the source

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fo_connect::{ConnOptions, FsConnector, ObjectMeta, OpenFlags};

use crate::error::{io_error, LocalFsError};
use crate::object::{base_name, FsObject, FsObjectMeta};
use crate::options::{Confinement, LocalFsOptions};
use crate::path::{confine, ensure_contained, normalize};

/// Local filesystem connector rooted at one directory.
#[derive(Debug, Clone)]
pub struct Connector {
    /// Absolute, normalized root. Canonical (symlinks resolved) in strict mode.
    root: PathBuf,

    confinement: Confinement,
}

impl Connector {
    /// Create a connector from generic connection options.
    ///
    /// Requires a `data_dir` item naming an existing directory.
    pub fn connect(copts: &ConnOptions) -> Result<Self, LocalFsError> {
        Self::new(LocalFsOptions::from_conn_options(copts)?)
    }

    /// Create a connector from typed options.
    pub fn new(opts: LocalFsOptions) -> Result<Self, LocalFsError> {
        let data_dir = opts.data_dir();

        let md = fs::metadata(data_dir).map_err(|source| LocalFsError::DataDirNotFound {
            path: data_dir.to_path_buf(),
            source,
        })?;
        if !md.is_dir() {
            return Err(LocalFsError::DataDirNotDir {
                path: data_dir.to_path_buf(),
            });
        }

        let root = match opts.confinement() {
            Confinement::Lexical => {
                normalize(&std::path::absolute(data_dir).map_err(io_error(data_dir))?)
            }
            Confinement::Strict => fs::canonicalize(data_dir).map_err(io_error(data_dir))?,
        };

        tracing::info!(
            "localfs: connector ready at {} ({} confinement)",
            root.display(),
            opts.confinement()
        );

        Ok(Self {
            root,
            confinement: opts.confinement(),
        })
    }

    /// The root directory every path is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn confinement(&self) -> Confinement {
        self.confinement
    }

    /// Resolve a caller path to an absolute path under the root.
    pub(crate) fn resolve(&self, path: &str) -> Result<PathBuf, LocalFsError> {
        let relative = confine(path)?;
        let full = self.root.join(relative);

        if self.confinement == Confinement::Strict {
            ensure_contained(&self.root, &full, path)?;
        }

        Ok(full)
    }
}

/// Translate [`OpenFlags`] and permission bits into `OpenOptions`.
pub(crate) fn open_options(flags: OpenFlags, perm: u32) -> OpenOptions {
    let mut opts = OpenOptions::new();
    opts.read(flags.is_readable()).write(flags.is_writable());

    if flags.is_writable() {
        opts.append(flags.contains(OpenFlags::APPEND))
            .truncate(flags.contains(OpenFlags::TRUNC));

        if flags.contains(OpenFlags::CREATE) && flags.contains(OpenFlags::EXCL) {
            opts.create_new(true);
        } else if flags.contains(OpenFlags::CREATE) {
            opts.create(true);
        }
    } else {
        read_only_creation_flags(&mut opts, flags);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(perm);
    }
    #[cfg(not(unix))]
    let _ = perm;

    opts
}

// OpenOptions refuses create or truncate without write access; open(2)
// accepts them, so read-only opens hand the raw flags straight through.
#[cfg(unix)]
fn read_only_creation_flags(opts: &mut OpenOptions, flags: OpenFlags) {
    use std::os::unix::fs::OpenOptionsExt;

    let mut raw = 0;
    if flags.contains(OpenFlags::APPEND) {
        raw |= libc::O_APPEND;
    }
    if flags.contains(OpenFlags::CREATE) {
        raw |= libc::O_CREAT;
        if flags.contains(OpenFlags::EXCL) {
            raw |= libc::O_EXCL;
        }
    }
    if flags.contains(OpenFlags::TRUNC) {
        raw |= libc::O_TRUNC;
    }
    opts.custom_flags(raw);
}

// No raw pass-through here: OpenOptions reports InvalidInput for
// read-only create or truncate.
#[cfg(not(unix))]
fn read_only_creation_flags(opts: &mut OpenOptions, flags: OpenFlags) {
    opts.append(flags.contains(OpenFlags::APPEND))
        .truncate(flags.contains(OpenFlags::TRUNC));
    if flags.contains(OpenFlags::CREATE) && flags.contains(OpenFlags::EXCL) {
        opts.create_new(true);
    } else if flags.contains(OpenFlags::CREATE) {
        opts.create(true);
    }
}

/// `mkdir -p` with permission bits for every created directory.
pub(crate) fn create_dir_all(path: &Path, perm: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(perm);
    }
    #[cfg(not(unix))]
    let _ = perm;

    builder.create(path)
}

impl FsConnector for Connector {
    type Meta = FsObjectMeta;
    type Handle = FsObject;
    type Error = LocalFsError;

    fn stat(&self, path: &str) -> Result<FsObjectMeta, LocalFsError> {
        let full = self.resolve(path)?;
        tracing::debug!("localfs: stat {}", full.display());

        let md = fs::metadata(&full).map_err(io_error(&full))?;
        Ok(FsObjectMeta::from_metadata(base_name(&full), &md))
    }

    fn mkdir_all(&self, path: &str, perm: u32) -> Result<(), LocalFsError> {
        let full = self.resolve(path)?;
        tracing::debug!("localfs: mkdir_all {} ({:o})", full.display(), perm);

        create_dir_all(&full, perm).map_err(io_error(&full))
    }

    fn open(&self, path: &str) -> Result<FsObject, LocalFsError> {
        let full = self.resolve(path)?;
        tracing::debug!("localfs: open {}", full.display());

        let fp = File::open(&full).map_err(io_error(&full))?;
        Ok(FsObject::new(fp, full))
    }

    fn open_file(
        &self,
        path: &str,
        flags: OpenFlags,
        perm: u32,
    ) -> Result<FsObject, LocalFsError> {
        let full = self.resolve(path)?;
        tracing::debug!(
            "localfs: open_file {} (flags {:#x}, perm {:o})",
            full.display(),
            flags.bits(),
            perm
        );

        let fp = open_options(flags, perm)
            .open(&full)
            .map_err(io_error(&full))?;
        Ok(FsObject::new(fp, full).appending(flags.contains(OpenFlags::APPEND)))
    }

    fn list(&self, path: &str, limit: i64) -> Result<Vec<FsObjectMeta>, LocalFsError> {
        let full = self.resolve(path)?;
        tracing::debug!("localfs: list {} (limit {})", full.display(), limit);

        let entries = fs::read_dir(&full).map_err(io_error(&full))?;

        let mut metas = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_error(&full))?;
            let md = entry.metadata().map_err(io_error(entry.path()))?;
            metas.push(FsObjectMeta::from_metadata(
                entry.file_name().to_string_lossy(),
                &md,
            ));
        }

        // Sorted so a limit always returns the same prefix.
        metas.sort_by(|a, b| a.name().cmp(b.name()));
        if let Ok(limit) = usize::try_from(limit) {
            if limit > 0 {
                metas.truncate(limit);
            }
        }

        Ok(metas)
    }

    fn close(&self) -> Result<(), LocalFsError> {
        Ok(())
    }
}
