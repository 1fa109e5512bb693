// put.rs — Copy-in: bring an external file under the connector root.
//
// Sequence (no retries, stops at the first error):
//   1. validate src and dst paths
//   2. open src, stat it, reject zero-byte sources
//   3. create dst's parent chain (0755)
//   4. open/create dst read-write (0644), refuse if it is src itself,
//      seek to 0, truncate to 0
//   5. stream src → dst, check the byte count, sync dst to stable storage
//
// The size check runs before dst is opened, so a rejected source never
// touches existing content. After step 4 the replace is in place, not via a
// temp file and rename: a crash or a concurrent reader mid-copy can see a
// short destination.

use std::fs::{File, Metadata, OpenOptions};
use std::io::{self, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use fo_connect::{FileObjectConnector, FsConnector, OpResult};

use crate::connector::{create_dir_all, Connector};
use crate::error::{io_error, LocalFsError};
use crate::object::FsObject;
use crate::path::{clean_path, is_degenerate};

const PUT_DIR_MODE: u32 = 0o755;
const PUT_FILE_MODE: u32 = 0o644;

impl Connector {
    /// Copy `src_path` (opened as given, not under the root) to `dst_path`
    /// under the root. Returns the number of bytes copied.
    pub fn put_file(&self, src_path: &str, dst_path: &str) -> Result<u64, LocalFsError> {
        let src = clean_path(src_path);
        if is_degenerate(&src) {
            return Err(LocalFsError::InvalidSrcPath {
                path: src_path.to_string(),
            });
        }
        let src = PathBuf::from(src);

        let dst = self.resolve(dst_path).map_err(|e| match e {
            LocalFsError::InvalidPath { path } => LocalFsError::InvalidDstPath { path },
            other => other,
        })?;

        let mut fpsrc = File::open(&src).map_err(io_error(&src))?;
        let src_md = fpsrc.metadata().map_err(io_error(&src))?;
        let size = src_md.len();
        if size < 1 {
            return Err(LocalFsError::ZeroSize { path: src });
        }

        if let Some(parent) = dst.parent() {
            create_dir_all(parent, PUT_DIR_MODE).map_err(io_error(parent))?;
        }

        let mut fpdst = open_destination(&dst).map_err(io_error(&dst))?;
        let dst_md = fpdst.metadata().map_err(io_error(&dst))?;
        if same_file(&src, &src_md, &dst, &dst_md) {
            return Err(LocalFsError::SameFile { src, dst });
        }

        fpdst.seek(SeekFrom::Start(0)).map_err(io_error(&dst))?;
        fpdst.set_len(0).map_err(io_error(&dst))?;

        let copied = io::copy(&mut fpsrc, &mut fpdst).map_err(io_error(&dst))?;
        if copied != size {
            return Err(LocalFsError::ShortCopy {
                path: dst,
                expected: size,
                copied,
            });
        }
        fpdst.sync_all().map_err(io_error(&dst))?;

        tracing::debug!(
            "localfs: put {} -> {} ({} bytes)",
            src.display(),
            dst.display(),
            copied
        );

        Ok(copied)
    }
}

#[cfg(unix)]
fn same_file(_src: &Path, src_md: &Metadata, _dst: &Path, dst_md: &Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    src_md.dev() == dst_md.dev() && src_md.ino() == dst_md.ino()
}

#[cfg(not(unix))]
fn same_file(src: &Path, _src_md: &Metadata, dst: &Path, _dst_md: &Metadata) -> bool {
    match (std::fs::canonicalize(src), std::fs::canonicalize(dst)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn open_destination(dst: &Path) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true).truncate(false);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(PUT_FILE_MODE);
    }

    opts.open(dst)
}

impl FileObjectConnector for Connector {
    type Reader = FsObject;
    type Error = LocalFsError;

    fn fo_file_open(&self, path: &str) -> Result<FsObject, LocalFsError> {
        FsConnector::open(self, path)
    }

    fn fo_file_put(&self, src_path: &str, dst_path: &str) -> OpResult {
        OpResult::from(self.put_file(src_path, dst_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fo_connect::{ConnOptions, ObjectMeta, ResultStatus};
    use std::fs;
    use std::io::Read;
    use tempfile::{tempdir, TempDir};

    /// Connector over a temp root, plus a separate temp dir for sources.
    fn setup() -> (Connector, TempDir, TempDir) {
        let root = tempdir().unwrap();
        let sources = tempdir().unwrap();
        let copts = ConnOptions::new("test", "localfs")
            .with_item("data_dir", root.path().to_string_lossy());
        (Connector::connect(&copts).unwrap(), root, sources)
    }

    fn source(dir: &TempDir, name: &str, content: &[u8]) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    fn cause(result: &OpResult) -> &LocalFsError {
        result
            .cause()
            .and_then(|c| c.downcast_ref::<LocalFsError>())
            .expect("error result should carry a LocalFsError")
    }

    #[test]
    fn put_copies_content_exactly() {
        let (conn, root, sources) = setup();
        let src = source(&sources, "in.bin", b"the quick brown fox");

        let result = conn.fo_file_put(&src, "out/copy.bin");
        assert!(result.is_ok(), "{}", result);

        let copied = fs::read(root.path().join("out/copy.bin")).unwrap();
        assert_eq!(copied, b"the quick brown fox");
    }

    #[test]
    fn put_replaces_longer_destination() {
        let (conn, root, sources) = setup();
        fs::write(root.path().join("dst.txt"), b"a much longer original body").unwrap();
        let src = source(&sources, "short.txt", b"short");

        assert_eq!(conn.put_file(&src, "dst.txt").unwrap(), 5);

        let meta = conn.stat("dst.txt").unwrap();
        assert_eq!(meta.size(), 5);
        assert_eq!(fs::read(root.path().join("dst.txt")).unwrap(), b"short");
    }

    #[test]
    fn put_creates_parent_directories() {
        let (conn, root, sources) = setup();
        let src = source(&sources, "f", b"x");

        conn.put_file(&src, "deep/nested/dir/f").unwrap();
        assert!(root.path().join("deep/nested/dir").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn put_uses_default_modes() {
        use std::os::unix::fs::PermissionsExt;
        let (conn, root, sources) = setup();
        let src = source(&sources, "f", b"x");

        conn.put_file(&src, "made/f").unwrap();

        let mode_of = |rel: &str| {
            fs::metadata(root.path().join(rel))
                .unwrap()
                .permissions()
                .mode()
        };
        let dir_mode = mode_of("made");
        let file_mode = mode_of("made/f");
        // Process umask can only clear bits.
        assert_eq!(dir_mode & 0o777 & !0o755, 0);
        assert_eq!(file_mode & 0o777 & !0o644, 0);
    }

    #[test]
    fn zero_size_source_rejected_before_touching_destination() {
        let (conn, root, sources) = setup();
        fs::write(root.path().join("keep.txt"), b"original").unwrap();
        let src = source(&sources, "empty", b"");

        let result = conn.fo_file_put(&src, "keep.txt");
        assert_eq!(result.status(), ResultStatus::Error);
        assert!(matches!(cause(&result), LocalFsError::ZeroSize { .. }));

        assert_eq!(fs::read(root.path().join("keep.txt")).unwrap(), b"original");
    }

    #[test]
    fn zero_size_source_creates_nothing() {
        let (conn, root, sources) = setup();
        let src = source(&sources, "empty", b"");

        assert!(conn.put_file(&src, "new/dir/file").is_err());
        assert!(!root.path().join("new").exists());
    }

    #[test]
    fn missing_source_fails_with_native_error() {
        let (conn, _root, sources) = setup();
        let src = sources.path().join("absent").to_string_lossy().to_string();

        let err = conn.put_file(&src, "dst").unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn degenerate_source_rejected() {
        let (conn, _root, _sources) = setup();

        for bad in ["", ".", "..", "a/.."] {
            let result = conn.fo_file_put(bad, "dst");
            assert!(
                matches!(cause(&result), LocalFsError::InvalidSrcPath { .. }),
                "source '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn degenerate_destination_rejected() {
        let (conn, _root, sources) = setup();
        let src = source(&sources, "f", b"data");

        for bad in ["", ".", "..", "/", "../escape"] {
            let result = conn.fo_file_put(&src, bad);
            assert!(
                matches!(cause(&result), LocalFsError::InvalidDstPath { .. }),
                "destination '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn fo_file_open_reads_under_root() {
        let (conn, root, _sources) = setup();
        fs::write(root.path().join("doc.txt"), b"contents").unwrap();

        let mut reader = conn.fo_file_open("doc.txt").unwrap();
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        assert_eq!(text, "contents");

        reader.seek(SeekFrom::Start(3)).unwrap();
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "tents");
    }

    #[test]
    fn fo_file_open_rejects_degenerate_path() {
        let (conn, _root, _sources) = setup();
        assert!(matches!(
            conn.fo_file_open(".."),
            Err(LocalFsError::InvalidPath { .. })
        ));
    }

    #[test]
    fn put_onto_itself_keeps_content() {
        let (conn, root, _sources) = setup();
        let path = root.path().join("same.txt");
        fs::write(&path, b"important data").unwrap();

        let result = conn.fo_file_put(&path.to_string_lossy(), "same.txt");
        assert_eq!(result.status(), ResultStatus::Error);
        assert!(matches!(cause(&result), LocalFsError::SameFile { .. }));

        assert_eq!(fs::read(&path).unwrap(), b"important data");
    }

    #[cfg(unix)]
    #[test]
    fn put_through_hard_link_keeps_content() {
        let (conn, root, sources) = setup();
        fs::write(root.path().join("orig.txt"), b"linked body").unwrap();
        let alias = sources.path().join("alias.txt");
        fs::hard_link(root.path().join("orig.txt"), &alias).unwrap();

        let err = conn.put_file(&alias.to_string_lossy(), "orig.txt").unwrap_err();
        assert!(matches!(err, LocalFsError::SameFile { .. }));
        assert_eq!(conn.stat("orig.txt").unwrap().size(), 11);
    }

    #[test]
    fn put_twice_last_write_wins() {
        let (conn, root, sources) = setup();
        let first = source(&sources, "one", b"first version");
        let second = source(&sources, "two", b"second");

        conn.put_file(&first, "v.txt").unwrap();
        conn.put_file(&second, "v.txt").unwrap();

        assert_eq!(fs::read(root.path().join("v.txt")).unwrap(), b"second");
    }
}
