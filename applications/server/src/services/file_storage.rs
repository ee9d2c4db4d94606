/// File storage service - manages uploaded AAC blobs on disk
use audioshare_core::{
    types::{BlobId, AAC_EXTENSION},
    AudioShareError, Result,
};
use std::path::PathBuf;
use tokio::{
    fs::{self, File},
    io::{AsyncRead, AsyncReadExt, AsyncWriteExt},
};

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// ADTS frame sync words (MPEG-4 and MPEG-2, no CRC)
const AAC_SYNC_WORDS: [[u8; 2]; 2] = [[0xFF, 0xF1], [0xFF, 0xF9]];

/// True when `header` starts with an AAC ADTS sync word
pub fn is_aac(header: &[u8]) -> bool {
    header.len() >= 2 && AAC_SYNC_WORDS.iter().any(|sync| header[..2] == sync[..])
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Create the storage directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Where the blob lives; ids are UUIDs so the name never leaves `base_path`
    pub fn path_for(&self, id: &BlobId) -> PathBuf {
        self.base_path.join(format!("{id}.{AAC_EXTENSION}"))
    }

    /// Store an AAC stream under `id`
    ///
    /// The first two bytes are checked before any file is created; a stream
    /// shorter than that is an I/O error. A partially written file is removed
    /// when copying fails.
    pub async fn store<R>(&self, id: &BlobId, mut reader: R) -> Result<PathBuf>
    where
        R: AsyncRead + Unpin,
    {
        let mut header = [0u8; 2];
        reader.read_exact(&mut header).await?;

        if !is_aac(&header) {
            return Err(AudioShareError::NotSupportedFormat);
        }

        let path = self.path_for(id);
        let written = async {
            let mut file = File::create(&path).await?;
            file.write_all(&header).await?;
            let copied = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            Ok::<u64, std::io::Error>(copied + header.len() as u64)
        }
        .await;

        match written {
            Ok(size) => {
                tracing::debug!(blob = %id, size, "blob stored");
                Ok(path)
            }
            Err(e) => {
                let _ = fs::remove_file(&path).await;
                Err(e.into())
            }
        }
    }

    /// Open a stored blob for streaming, with its size in bytes
    pub async fn open(&self, id: &BlobId) -> Result<(File, u64)> {
        let path = self.path_for(id);
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AudioShareError::BlobNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let size = file.metadata().await?.len();
        Ok((file, size))
    }

    /// Remove a blob that never got a catalog row
    pub async fn remove(&self, id: &BlobId) -> Result<()> {
        match fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
