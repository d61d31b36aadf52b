// src/wav.rs
// RIFF/WAVE serialization and output file handling

use crate::error::{MorseError, Result};
use chrono::Local;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::{self, OpenOptions};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

/// Bytes in front of the samples: RIFF header, 16-byte `fmt ` chunk, `data` header.
pub const HEADER_SIZE: usize = 44;

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Interleaved 16-bit samples for one synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    channels: u16,
}

impl PcmBuffer {
    pub fn new(samples: Vec<i16>, channels: u16) -> Self {
        Self { samples, channels }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Size of the `data` chunk payload.
    pub fn data_size(&self) -> usize {
        self.frame_count() * self.channels as usize * 2
    }
}

/// Serializes PCM as a canonical 16-bit PCM WAV: `riff_size = 36 + data_size`.
pub fn encode_wav(pcm: &PcmBuffer, sample_rate: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: pcm.channels(),
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(HEADER_SIZE + pcm.data_size()));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for &sample in pcm.samples() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Writes `bytes` to a new `morse_<timestamp>.wav` in `dir`, creating the
/// directory if needed. The file is created exclusively; on a name clash a
/// numeric suffix is tried. A failed write removes the file again.
pub fn write_unique(dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| MorseError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let stamp = Local::now().format("%Y%m%d-%H%M%S-%6f").to_string();
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = if attempt == 0 {
            format!("morse_{stamp}.wav")
        } else {
            format!("morse_{stamp}_{attempt}.wav")
        };
        let path = dir.join(name);

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(MorseError::OutputFile { path, source }),
        };

        let path = write_or_remove(path, file, bytes, |file| file.sync_all())?;
        log::debug!("wrote {} bytes to {:?}", bytes.len(), path);
        return Ok(path);
    }

    Err(MorseError::OutputFile {
        path: dir.join(format!("morse_{stamp}.wav")),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "no free file name"),
    })
}

/// Writes all of `bytes` to `out`, then runs `finish` on it. If either step
/// fails, `out` is closed and the file at `path` deleted.
fn write_or_remove<W, F>(path: PathBuf, mut out: W, bytes: &[u8], finish: F) -> Result<PathBuf>
where
    W: Write,
    F: FnOnce(&mut W) -> io::Result<()>,
{
    let written = out.write_all(bytes).and_then(|_| finish(&mut out));
    drop(out);
    match written {
        Ok(()) => Ok(path),
        Err(source) => {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("could not remove partial file {:?}: {}", path, e);
            }
            Err(MorseError::OutputFile { path, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    /// Accepts `budget` bytes, then fails like a full disk.
    struct ShortWriter {
        file: File,
        budget: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::other("no space left on device"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            self.file.write(&buf[..n])
        }

        fn flush(&mut self) -> io::Result<()> {
            self.file.flush()
        }
    }

    fn wav_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| p.file_name().unwrap().to_string_lossy().starts_with("morse_"))
            .collect()
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_header_layout() {
        let pcm = PcmBuffer::new(vec![0, 1, -1, 100, -100, i16::MAX], 2);
        let bytes = encode_wav(&pcm, 8000).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1); // PCM
        assert_eq!(u16_at(&bytes, 22), 2);
        assert_eq!(u32_at(&bytes, 24), 8000);
        assert_eq!(u32_at(&bytes, 28), 8000 * 4);
        assert_eq!(u16_at(&bytes, 32), 4);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");

        let data_size = u32_at(&bytes, 40);
        assert_eq!(data_size as usize, pcm.data_size());
        assert_eq!(data_size, 3 * 2 * 2);
        assert_eq!(u32_at(&bytes, 4), 36 + data_size);
        assert_eq!(bytes.len(), HEADER_SIZE + data_size as usize);
        assert_eq!(&bytes[44..46], &0i16.to_le_bytes());
        assert_eq!(&bytes[46..48], &1i16.to_le_bytes());
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(PcmBuffer::new(vec![0; 10], 2).frame_count(), 5);
        assert_eq!(PcmBuffer::new(vec![0; 10], 1).frame_count(), 10);
    }

    #[test]
    fn test_write_unique_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_unique(dir.path(), b"one").unwrap();
        let second = write_unique(dir.path(), b"two").unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"one");
        assert_eq!(fs::read(&second).unwrap(), b"two");
    }

    #[test]
    fn test_write_unique_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = write_unique(&nested, b"x").unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("morse_"));
    }

    #[test]
    fn test_unusable_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();
        let err = write_unique(&blocker.join("sub"), b"x").unwrap_err();
        assert!(matches!(err, MorseError::OutputDir { .. }));
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("morse_partial.wav");
        let file = OpenOptions::new().write(true).create_new(true).open(&path).unwrap();
        let out = ShortWriter { file, budget: 10 };

        let bytes = encode_wav(&PcmBuffer::new(vec![0; 64], 2), 8000).unwrap();
        let err = write_or_remove(path.clone(), out, &bytes, |w| w.file.sync_all()).unwrap_err();

        match err {
            MorseError::OutputFile { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected OutputFile, got {other:?}"),
        }
        assert!(!path.exists());
        assert!(wav_files(dir.path()).is_empty());
    }

    #[test]
    fn test_failed_sync_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("morse_unsynced.wav");
        let file = File::create(&path).unwrap();

        let err = write_or_remove(path.clone(), file, b"RIFF", |_| {
            Err(io::Error::other("sync failed"))
        })
        .unwrap_err();

        assert!(matches!(err, MorseError::OutputFile { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_directory_reports_output_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let result = write_unique(&locked, b"RIFF");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits do not bind root.
        if result.is_ok() {
            return;
        }
        assert!(matches!(result, Err(MorseError::OutputFile { .. })));
        assert!(wav_files(&locked).is_empty());
    }
}
