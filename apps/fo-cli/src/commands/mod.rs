// mod.rs — Subcommand implementations and shared helpers.

pub mod meta;
pub mod object;
pub mod put;

use std::path::Path;

use fo_connect::ConnOptions;
use fo_connector_localfs::LocalFsOptions;

/// Build connection options from `--config` or `--data-dir`.
pub fn connection_options(
    config: Option<&Path>,
    data_dir: Option<&str>,
    strict: bool,
) -> anyhow::Result<ConnOptions> {
    let mut copts = match (config, data_dir) {
        (Some(path), _) => ConnOptions::load(path)?,
        (None, Some(dir)) => ConnOptions::new("cli", LocalFsOptions::CONNECTOR)
            .with_item(LocalFsOptions::DATA_DIR, dir),
        (None, None) => anyhow::bail!("either --config or --data-dir is required"),
    };

    if !copts.connector.is_empty() && copts.connector != LocalFsOptions::CONNECTOR {
        anyhow::bail!(
            "connector '{}' is not supported (expected '{}')",
            copts.connector,
            LocalFsOptions::CONNECTOR
        );
    }

    if strict {
        copts.set(LocalFsOptions::CONFINEMENT, "strict");
    }

    Ok(copts)
}

/// Parse octal permission bits such as "755" or "0o644".
pub fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0o");
    u32::from_str_radix(digits, 8).map_err(|e| format!("invalid mode '{}': {}", s, e))
}
