//! Report output persistence
//!
//! The report stream is copied to disk in fixed-size chunks. The target file is
//! created or truncated; a copy interrupted half way leaves the partial file.

use crate::utils::error_helpers::convert_io_error;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const COPY_BUFFER_SIZE: usize = 1024;

/// Copy `reader` into `writer` through a buffer of `chunk_size` bytes.
/// Returns the number of bytes written.
pub async fn copy_in_chunks<R, W>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;
    loop {
        let read = reader.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        writer.write_all(&buffer[..read]).await?;
        total += read as u64;
    }
    writer.flush().await?;
    Ok(total)
}

pub async fn copy_stream_to_file<R>(reader: &mut R, path: &Path) -> crate::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut file = File::create(path)
        .await
        .map_err(|e| convert_io_error(e, path))?;
    let written = copy_in_chunks(reader, &mut file, COPY_BUFFER_SIZE)
        .await
        .map_err(|e| convert_io_error(e, path))?;
    Ok(written)
}

pub async fn write_report_file(path: &Path, content: &[u8]) -> crate::Result<u64> {
    let mut reader = content;
    copy_stream_to_file(&mut reader, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, StorageError};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_preserves_exact_bytes() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("Birthdays.csv");

        let mut reader: &[u8] = b"a,b,c\n1,2,3\n";
        let written = copy_stream_to_file(&mut reader, &path).await.unwrap();

        assert_eq!(written, 12);
        assert_eq!(std::fs::read(&path).unwrap(), b"a,b,c\n1,2,3\n");
    }

    #[tokio::test]
    async fn test_copy_longer_than_buffer() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("large.csv");

        let content: Vec<u8> = (0..(COPY_BUFFER_SIZE * 5 + 17))
            .map(|i| b"0123456789,\n"[i % 12])
            .collect();
        let mut reader = content.as_slice();
        let written = copy_stream_to_file(&mut reader, &path).await.unwrap();

        assert_eq!(written as usize, content.len());
        assert_eq!(std::fs::read(&path).unwrap(), content);
    }

    #[tokio::test]
    async fn test_copy_in_small_chunks_keeps_multibyte_text_intact() {
        let text = "名前,誕生日\nÅsa,11-02\n";
        let mut reader = text.as_bytes();
        let mut out: Vec<u8> = Vec::new();

        copy_in_chunks(&mut reader, &mut out, 3).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), text);
    }

    #[tokio::test]
    async fn test_existing_file_is_overwritten() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("Birthdays.csv");
        std::fs::write(&path, "old content that is longer than the new one").unwrap();

        write_report_file(&path, b"x,y\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x,y\n");
    }

    #[tokio::test]
    async fn test_missing_directory_is_storage_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing").join("Birthdays.csv");

        let result = write_report_file(&path, b"a").await;
        assert!(matches!(
            result,
            Err(AppError::Storage(StorageError::FileIo { .. }))
        ));
    }
}
