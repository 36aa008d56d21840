//! Metadata-preserving file copy strategies

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use filetime::FileTime;

/// Copies one file to a path that must not exist yet
pub trait FileCopier {
    /// Copy `source` to `dest`, carrying over permissions and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read, the destination
    /// already exists or cannot be written, or metadata cannot be applied.
    fn copy(&self, source: &Path, dest: &Path) -> io::Result<()>;
}

/// Portable copier: content, then permissions, then access/modification times.
///
/// The destination is opened create-new, so a file that appeared after
/// planning is reported as an error rather than overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataCopier;

impl FileCopier for MetadataCopier {
    fn copy(&self, source: &Path, dest: &Path) -> io::Result<()> {
        let mut reader = File::open(source)?;
        let metadata = reader.metadata()?;

        let writer = OpenOptions::new().write(true).create_new(true).open(dest)?;

        let applied =
            copy_contents(&mut reader, writer).and_then(|()| apply_metadata(&metadata, dest));

        if applied.is_err() {
            // Only ever removes the file this call created
            let _ = fs::remove_file(dest);
        }
        applied
    }
}

fn copy_contents(reader: &mut File, mut writer: File) -> io::Result<()> {
    io::copy(reader, &mut writer)?;
    writer.sync_all()
}

fn apply_metadata(metadata: &fs::Metadata, dest: &Path) -> io::Result<()> {
    fs::set_permissions(dest, metadata.permissions())?;

    let accessed = FileTime::from_last_access_time(metadata);
    let modified = FileTime::from_last_modification_time(metadata);
    filetime::set_file_times(dest, accessed, modified)
}

/// macOS copier that shells out to `ditto` so Finder tags and extended
/// attributes travel with the file.
#[cfg(target_os = "macos")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DittoCopier;

#[cfg(target_os = "macos")]
impl FileCopier for DittoCopier {
    fn copy(&self, source: &Path, dest: &Path) -> io::Result<()> {
        // ditto overwrites silently
        if dest.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("destination already exists: {}", dest.display()),
            ));
        }

        let status = std::process::Command::new("ditto")
            .arg(source)
            .arg(dest)
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("ditto exited with {status}")))
        }
    }
}

/// The copier used for real runs on this platform
#[must_use]
pub fn platform_copier() -> Box<dyn FileCopier> {
    #[cfg(target_os = "macos")]
    {
        Box::new(DittoCopier)
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(MetadataCopier)
    }
}
