// object.rs — Handle subcommands: mkdir, cat, write, truncate.

use std::io::{self, Write};

use fo_connect::{FileHandle, FsConnector, OpenFlags};
use fo_connector_localfs::Connector;

pub fn mkdir(conn: &Connector, path: &str, mode: u32, out: &mut impl Write) -> anyhow::Result<()> {
    conn.mkdir_all(path, mode)?;
    writeln!(out, "Created {} ({:o})", path, mode)?;
    Ok(())
}

pub fn cat(conn: &Connector, path: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let mut handle = conn.open(path)?;
    io::copy(&mut handle, out)?;
    handle.close()?;
    Ok(())
}

pub fn write(
    conn: &Connector,
    path: &str,
    text: &str,
    offset: Option<u64>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut handle = conn.open_file(path, OpenFlags::CREATE | OpenFlags::RDWR, 0o644)?;

    let written = match offset {
        Some(offset) => handle.write_at(text.as_bytes(), offset)?,
        None => handle.write(text.as_bytes())?,
    };
    handle.close()?;

    writeln!(out, "Wrote {} byte(s) to {}", written, path)?;
    Ok(())
}

pub fn truncate(
    conn: &Connector,
    path: &str,
    size: u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut handle = conn.open_file(path, OpenFlags::WRONLY, 0o644)?;
    handle.truncate(size)?;
    handle.close()?;

    writeln!(out, "Truncated {} to {} byte(s)", path, size)?;
    Ok(())
}
