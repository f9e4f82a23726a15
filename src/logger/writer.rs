//! Size rotating file writer

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::{FileConfig, RotationConfig};
use crate::logger::error::LoggerError;

/// File writer that shifts the active log aside once it grows past the
/// configured size. Write failures switch it to stderr for the rest of the run.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
    rotation: RotationConfig,
}

struct WriterState {
    file: BufWriter<File>,
    current_size: u64,
    fallback_mode: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                current_size,
                fallback_mode: false,
            })),
            path: config.path.clone(),
            rotation: config.rotation.clone(),
        })
    }

    pub fn is_in_fallback_mode(&self) -> bool {
        self.state.lock().map(|s| s.fallback_mode).unwrap_or(false)
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, WriterState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock()?;

        if state.fallback_mode {
            return io::stderr().write(buf);
        }

        if state.current_size >= self.rotation.max_size {
            if let Err(e) = self.rotate(&mut state) {
                return fall_back(&mut state, buf, e);
            }
        }

        match state.file.write(buf) {
            Ok(written) => {
                state.current_size += written as u64;
                Ok(written)
            }
            Err(e) => fall_back(&mut state, buf, e),
        }
    }

    fn rotate(&self, state: &mut WriterState) -> io::Result<()> {
        state.file.flush()?;
        shift_rotated_files(&self.path, self.rotation.max_files)?;
        state.file = open_log_file(&self.path, false)?;
        state.current_size = 0;
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard {
            writer: self.clone(),
        }
    }
}

/// Per-event handle handed out to `tracing_subscriber`
pub struct RotatingWriterGuard {
    writer: RotatingFileWriter,
}

impl Write for RotatingWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.writer.lock()?;
        if state.fallback_mode {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl Drop for RotatingWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.writer.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn fall_back(state: &mut WriterState, buf: &[u8], error: io::Error) -> io::Result<usize> {
    state.fallback_mode = true;
    eprintln!("[Logger] File write failed, falling back to stderr: {}", error);
    io::stderr().write(buf)
}

/// Path of the `index`-th rotated file, e.g. `logs/roster.log.2`
pub(crate) fn rotated_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// Moves `path.N` to `path.N+1` from the oldest down, dropping the one that
/// would exceed `max_files`, then moves `path` to `path.1`.
pub(crate) fn shift_rotated_files(path: &Path, max_files: usize) -> io::Result<()> {
    let oldest = rotated_path(path, max_files);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    for index in (1..max_files).rev() {
        let from = rotated_path(path, index);
        if from.exists() {
            fs::rename(&from, rotated_path(path, index + 1))?;
        }
    }

    if path.exists() {
        fs::rename(path, rotated_path(path, 1))?;
    }

    Ok(())
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}
