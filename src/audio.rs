use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::AppError;
use crate::tts::AudioStream;

/// URL prefix under which artifacts are served.
pub const AUDIO_ROUTE: &str = "/audio";
pub const AUDIO_EXTENSION: &str = "mp3";

const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub id: Uuid,
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Append-only directory of synthesised episodes.
pub struct AudioStore {
    dir: PathBuf,
    retention: Duration,
}

impl AudioStore {
    pub fn new(dir: PathBuf, retention: Duration) -> Result<Self, AppError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, retention })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &Uuid) -> PathBuf {
        self.dir.join(file_name(id))
    }

    /// Write every chunk of `audio` to a freshly named file. A failed write
    /// leaves the partial file for the sweeper.
    pub async fn save(&self, mut audio: AudioStream) -> Result<AudioArtifact, AppError> {
        let id = Uuid::new_v4();
        let path = self.path_for(&id);

        let mut file = tokio::fs::File::create(&path).await?;
        let mut bytes_written = 0u64;

        while let Some(chunk) = audio.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(AudioArtifact {
            id,
            path,
            bytes_written,
        })
    }

    /// Remove artifacts older than the retention window. Returns how many
    /// files were deleted.
    pub async fn sweep_expired(&self) -> Result<usize, AppError> {
        if self.retention.is_zero() {
            return Ok(0);
        }

        let now = SystemTime::now();
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e != AUDIO_EXTENSION).unwrap_or(true) {
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            let age = now.duration_since(modified).unwrap_or_default();
            if age >= self.retention {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => removed += 1,
                    Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
                }
            }
        }

        Ok(removed)
    }

    /// Run `sweep_expired` periodically for the life of the process.
    pub fn spawn_sweeper(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if self.retention.is_zero() {
            return None;
        }

        let period = self.retention.min(MAX_SWEEP_PERIOD);
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                match self.sweep_expired().await {
                    Ok(0) => {}
                    Ok(n) => tracing::info!("Removed {} expired audio files", n),
                    Err(e) => tracing::error!("Audio sweep failed: {}", e),
                }
            }
        }))
    }
}

fn file_name(id: &Uuid) -> String {
    format!("{}.{}", id, AUDIO_EXTENSION)
}

/// Public URL of an artifact, rooted at the inbound request's origin.
pub fn public_url(origin: &str, id: &Uuid) -> String {
    format!(
        "{}{}/{}",
        origin.trim_end_matches('/'),
        AUDIO_ROUTE,
        file_name(id)
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;

    pub fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("podcast-forge-test-{}", Uuid::new_v4()))
    }

    fn chunks(parts: &[&'static [u8]]) -> AudioStream {
        let items: Vec<Result<Bytes, AppError>> =
            parts.iter().map(|p| Ok(Bytes::from_static(p))).collect();
        Box::pin(stream::iter(items))
    }

    #[tokio::test]
    async fn writes_chunks_in_order() {
        let store = AudioStore::new(scratch_dir(), Duration::ZERO).unwrap();
        let artifact = store.save(chunks(&[b"ID3", b"abc", b"def"])).await.unwrap();

        assert_eq!(artifact.bytes_written, 9);
        assert_eq!(artifact.path, store.path_for(&artifact.id));
        assert_eq!(std::fs::read(&artifact.path).unwrap(), b"ID3abcdef");

        std::fs::remove_dir_all(store.dir()).unwrap();
    }

    #[tokio::test]
    async fn repeated_saves_get_distinct_files() {
        let store = AudioStore::new(scratch_dir(), Duration::ZERO).unwrap();
        let a = store.save(chunks(&[b"x"])).await.unwrap();
        let b = store.save(chunks(&[b"x"])).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(a.path, b.path);
        assert!(a.path.exists() && b.path.exists());

        std::fs::remove_dir_all(store.dir()).unwrap();
    }

    #[tokio::test]
    async fn failed_stream_leaves_partial_file() {
        let store = AudioStore::new(scratch_dir(), Duration::ZERO).unwrap();
        let items: Vec<Result<Bytes, AppError>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(AppError::Upstream("connection reset".into())),
        ];
        let err = store.save(Box::pin(stream::iter(items))).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));

        let files: Vec<_> = std::fs::read_dir(store.dir()).unwrap().collect();
        assert_eq!(files.len(), 1);

        std::fs::remove_dir_all(store.dir()).unwrap();
    }

    #[tokio::test]
    async fn sweep_removes_only_expired_audio() {
        let dir = scratch_dir();
        let store = AudioStore::new(dir.clone(), Duration::from_millis(50)).unwrap();
        let old = store.save(chunks(&[b"old"])).await.unwrap();
        std::fs::write(dir.join("notes.txt"), b"keep").unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;
        let fresh = store.save(chunks(&[b"new"])).await.unwrap();

        assert_eq!(store.sweep_expired().await.unwrap(), 1);
        assert!(!old.path.exists());
        assert!(fresh.path.exists());
        assert!(dir.join("notes.txt").exists());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn zero_retention_disables_expiry() {
        let store = Arc::new(AudioStore::new(scratch_dir(), Duration::ZERO).unwrap());
        let artifact = store.save(chunks(&[b"x"])).await.unwrap();

        assert_eq!(store.sweep_expired().await.unwrap(), 0);
        assert!(artifact.path.exists());
        assert!(Arc::clone(&store).spawn_sweeper().is_none());

        std::fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn url_contains_identifier() {
        let id = Uuid::new_v4();
        let url = public_url("http://localhost:5000/", &id);
        assert_eq!(url, format!("http://localhost:5000/audio/{}.mp3", id));
    }
}
