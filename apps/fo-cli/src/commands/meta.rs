// meta.rs — Metadata subcommands: stat, ls.

use std::io::Write;

use fo_connect::{FsConnector, ObjectMeta};
use fo_connector_localfs::{Connector, FsObjectMeta};

pub fn stat(conn: &Connector, path: &str, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let meta = conn.stat(path)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&meta)?)?;
    } else {
        writeln!(out, "{}", format_row(&meta))?;
    }
    Ok(())
}

pub fn ls(
    conn: &Connector,
    path: &str,
    limit: i64,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let entries = conn.list(path, limit)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(out, "(empty)")?;
        return Ok(());
    }

    for meta in &entries {
        writeln!(out, "{}", format_row(meta))?;
    }
    Ok(())
}

/// One `ls -l`-style row: kind, size, modification time, name.
fn format_row(meta: &FsObjectMeta) -> String {
    let kind = if meta.is_dir() { 'd' } else { '-' };
    format!(
        "{} {:>10} {} {}",
        kind,
        meta.size(),
        meta.mod_time().format("%Y-%m-%d %H:%M:%S"),
        meta.name()
    )
}
