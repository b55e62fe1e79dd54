//! Edit engine for rewritten assets.
//!
//! Responsibilities:
//! - Read and strictly decode asset files.
//! - Persist rewritten text with a temp-file-and-rename write.
//! - Describe a change (hashes, sizes) for the report.
//! - Generate a unified diff preview.

mod error;

pub use error::{AssetError, AssetResult};

use assetfix_hash::sha256_hex;
use assetfix_types::FileChange;
use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use std::collections::BTreeMap;
use std::io::{self, Write};
use tracing::debug;

/// Suffix of the sibling file a write goes through before it is renamed.
pub const TEMP_SUFFIX: &str = ".assetfix-tmp";

pub fn read_bytes(path: &Utf8Path) -> AssetResult<Vec<u8>> {
    fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Strict UTF-8 decode. No lossy fallback: a replacement character written
/// back would corrupt the file further.
pub fn decode_text(path: &Utf8Path, bytes: Vec<u8>) -> AssetResult<String> {
    String::from_utf8(bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_text(path: &Utf8Path) -> AssetResult<String> {
    decode_text(path, read_bytes(path)?)
}

/// Replace `path` with `contents` so readers see either the old or the new
/// file, never a torn one.
///
/// The text goes to a sibling temp file that inherits the original's
/// permissions, is synced, then renamed over the original. On failure the
/// temp file is removed and the original is left untouched.
pub fn write_atomic(path: &Utf8Path, contents: &str) -> AssetResult<()> {
    let tmp = temp_path(path);
    let result = write_via(&tmp, path, contents);
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(AssetError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    debug!(path = %path, "atomic write completed");
    Ok(())
}

fn write_via(tmp: &Utf8Path, path: &Utf8Path, contents: &str) -> io::Result<()> {
    let permissions = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut file = fs::File::create(tmp)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);

    if let Some(permissions) = permissions {
        fs::set_permissions(tmp, permissions)?;
    }
    fs::rename(tmp, path)
}

fn temp_path(path: &Utf8Path) -> Utf8PathBuf {
    let name = path.file_name().unwrap_or("asset");
    path.with_file_name(format!(".{name}{TEMP_SUFFIX}"))
}

/// Report entry for a file whose text went from `before` to `after`.
pub fn describe_change(
    path: &Utf8Path,
    rule_set: &str,
    rules: Vec<String>,
    before: &str,
    after: &str,
) -> FileChange {
    FileChange {
        path: path.to_path_buf(),
        rule_set: rule_set.to_string(),
        rules,
        sha256_before: sha256_hex(before.as_bytes()),
        sha256_after: sha256_hex(after.as_bytes()),
        bytes_before: before.len() as u64,
        bytes_after: after.len() as u64,
    }
}

/// Unified diff of every file whose contents differ, in path order.
pub fn render_patch(
    before: &BTreeMap<Utf8PathBuf, String>,
    after: &BTreeMap<Utf8PathBuf, String>,
) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for (path, old) in before {
        let new = after.get(path).unwrap_or(old);
        if old == new {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

        let patch = diffy::create_patch(old, new);
        let body = formatter.fmt_patch(&patch).to_string();
        let hunks = body
            .strip_prefix("--- original\n+++ modified\n")
            .unwrap_or(&body);
        out.push_str(hunks);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
