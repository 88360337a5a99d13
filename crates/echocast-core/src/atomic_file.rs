//! Crash-safe file replacement shared by every on-disk writer.

use std::{fs, io::Write, path::Path};

use tracing::debug;

/// Replace `path` with `contents`.
///
/// Creates missing parent directories, writes a sibling `.tmp` file, syncs it
/// and renames it over the target. Readers see either the old file or the new
/// one, never a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            debug!(dir = ?parent, "Created parent directory");
        }
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let mut temp_file = fs::File::create(temp_path)?;
    temp_file.write_all(contents)?;
    temp_file.sync_all()?;
    drop(temp_file);

    if let Err(e) = fs::rename(temp_path, path) {
        let _ = fs::remove_file(temp_path);
        return Err(e);
    }

    Ok(())
}
