use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tempfile::NamedTempFile;

/// Where finished archives go. Implementations report their own failures.
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn save(&self, blob: Bytes, file_name: &str);
}

pub struct DirectoryPersistence {
    directory: PathBuf,
}

impl DirectoryPersistence {
    pub const fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Persistence for DirectoryPersistence {
    async fn save(&self, blob: Bytes, file_name: &str) {
        let directory = self.directory.clone();
        let file_name = file_name.to_owned();
        let size = blob.len();

        match tokio::task::spawn_blocking(move || write_atomically(&directory, &file_name, &blob))
            .await
        {
            Ok(Ok(path)) => log::info!("saved {} ({size} bytes)", path.display()),
            Ok(Err(err)) => log::error!("saving the archive failed: {err}"),
            Err(err) => log::error!("saving task failed: {err}"),
        }
    }
}

/// writes to a temporary file next to the target and renames it into place
fn write_atomically(directory: &Path, file_name: &str, blob: &[u8]) -> io::Result<PathBuf> {
    std::fs::create_dir_all(directory)?;

    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(blob)?;
    file.flush()?;

    let path = directory.join(file_name);
    file.persist(&path).map_err(|err| err.error)?;

    Ok(path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_directory_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("out");
        let persistence = DirectoryPersistence::new(output.clone());

        persistence.save(Bytes::from_static(b"first"), "collages.zip").await;
        persistence.save(Bytes::from_static(b"second"), "collages.zip").await;

        assert_eq!(std::fs::read(output.join("collages.zip")).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 1);
    }
}
