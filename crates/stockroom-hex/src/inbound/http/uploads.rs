use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Writes uploaded product images under the configured directory and hands
/// back the public URL they will be served from. The serving itself is plain
/// static-file hosting on `/uploads`.
pub struct ImageStore {
    dir: PathBuf,
    public_base: String,
}

impl ImageStore {
    pub fn new(dir: PathBuf, public_base: String) -> Self {
        Self { dir, public_base }
    }

    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Stored under a fresh name; only the extension survives from the
        // client-supplied filename.
        let filename = match Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
        {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        Ok(format!(
            "{}/uploads/{}",
            self.public_base.trim_end_matches('/'),
            filename
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_writes_file_and_builds_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().to_path_buf(), "http://localhost:3000/".into());

        let url = store.save("widget.png", b"png-bytes").await.unwrap();
        assert!(url.starts_with("http://localhost:3000/uploads/"));
        assert!(url.ends_with(".png"));

        let filename = url.rsplit('/').next().unwrap();
        let on_disk = tokio::fs::read(dir.path().join(filename)).await.unwrap();
        assert_eq!(on_disk, b"png-bytes");
    }

    #[tokio::test]
    async fn extensionless_upload_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().to_path_buf(), "http://localhost:3000".into());
        let url = store.save("photo", b"bytes").await.unwrap();
        assert!(url.contains("/uploads/"));
    }
}
