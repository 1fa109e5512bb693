// put.rs — Copy-in subcommand.

use std::io::Write;

use fo_connect::{FileObjectConnector, FsConnector, ObjectMeta};
use fo_connector_localfs::Connector;

pub fn execute(conn: &Connector, src: &str, dst: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let result = conn.fo_file_put(src, dst);
    if result.is_error() {
        anyhow::bail!("put {} -> {} failed: {}", src, dst, result);
    }

    let meta = conn.stat(dst)?;
    writeln!(out, "Copied {} -> {} ({} bytes)", src, dst, meta.size())?;
    tracing::info!("put {} -> {}", src, dst);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fo_connect::ConnOptions;
    use tempfile::tempdir;

    #[test]
    fn put_reports_copied_size() {
        let root = tempdir().unwrap();
        let sources = tempdir().unwrap();
        let src = sources.path().join("in.txt");
        std::fs::write(&src, b"twelve bytes").unwrap();

        let conn = Connector::connect(
            &ConnOptions::default().with_item("data_dir", root.path().to_string_lossy()),
        )
        .unwrap();

        let mut out = Vec::new();
        execute(&conn, &src.to_string_lossy(), "inbox/in.txt", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(12 bytes)"));
        assert!(root.path().join("inbox/in.txt").is_file());
    }

    #[test]
    fn put_zero_size_fails() {
        let root = tempdir().unwrap();
        let sources = tempdir().unwrap();
        let src = sources.path().join("empty");
        std::fs::write(&src, b"").unwrap();

        let conn = Connector::connect(
            &ConnOptions::default().with_item("data_dir", root.path().to_string_lossy()),
        )
        .unwrap();

        let mut out = Vec::new();
        let err = execute(&conn, &src.to_string_lossy(), "x", &mut out).unwrap_err();
        assert!(err.to_string().contains("zero size"));
    }
}
