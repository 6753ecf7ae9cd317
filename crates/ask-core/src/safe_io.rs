//! Atomic file writes for the state document.
//!
//! [`atomic_write_json()`] writes to a sibling `.tmp` file, syncs it, then
//! renames over the target, so the document on disk is either the previous
//! version or the new one, never a torn write. The credential lives in the
//! same file, so on Unix the result is restricted to the owner (0600).
//!
//! There is no file locking: two processes saving at once race and the later
//! rename wins.

use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Mode applied to the state document on Unix.
#[cfg(unix)]
pub const STATE_FILE_MODE: u32 = 0o600;

/// Atomically write `value` as pretty-printed JSON.
pub fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_vec_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    atomic_write(path, &json)
}

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(STATE_FILE_MODE);
    }
    let mut file = options.open(&tmp_path)?;

    {
        let mut writer = BufWriter::new(&mut file);
        writer.write_all(contents)?;
        writer.flush()?;
    }

    // `mode` only applies on creation; a leftover tmp file keeps its old bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(STATE_FILE_MODE))?;
    }

    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
