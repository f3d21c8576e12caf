//! Upload queue: audio-only, one entry per file name.

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "m4a", "ogg", "flac", "webm"];

/// Rough bytes-per-second used to estimate recording length.
pub const BYTES_PER_SECOND: u64 = 16_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioFile {
    pub name:  String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl AudioFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Duration estimate sent to the scoring service.
    pub fn estimated_duration_secs(&self) -> u64 {
        (self.size() as f64 / BYTES_PER_SECOND as f64).round() as u64
    }

    /// File name without its audio extension.
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if is_audio_extension(ext) => stem,
            _ => &self.name,
        }
    }
}

fn is_audio_extension(ext: &str) -> bool {
    AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext))
}

pub fn is_audio_file_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| is_audio_extension(ext))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default)]
pub struct BatchQueue {
    files: Vec<AudioFile>,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue audio files, skipping non-audio names and names already queued.
    /// Returns how many were accepted.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = AudioFile>) -> usize {
        let mut accepted = 0;
        for file in files {
            if !is_audio_file_name(&file.name) {
                log::debug!("skipping non-audio file {}", file.name);
                continue;
            }
            if self.files.iter().any(|f| f.name == file.name) {
                log::debug!("skipping duplicate file {}", file.name);
                continue;
            }
            self.files.push(file);
            accepted += 1;
        }
        accepted
    }

    /// Queue every audio file in `dir`, in file-name order.
    pub fn add_dir(&mut self, dir: &Path) -> std::io::Result<usize> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut files = Vec::new();
        for path in paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !is_audio_file_name(name) {
                continue;
            }
            files.push(AudioFile::new(name, std::fs::read(&path)?));
        }
        Ok(self.add_files(files))
    }

    pub fn files(&self) -> &[AudioFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}
