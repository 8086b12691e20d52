use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Error saving to file '{}': {source}", .path.display())]
pub struct SaveError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Write rendered text to `path` as UTF-8, replacing any existing file.
///
/// The file handle lives only for the duration of this call.
pub fn write_to_file(content: &str, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let wrap = |source: std::io::Error| SaveError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).map_err(wrap)?;
    writer.flush().map_err(wrap)?;

    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote verse");
    Ok(())
}
