//! Rolling Logger
//!
//! File logger for tier-board hosts. Lines are appended to `<dir>/<app>.log`.
//! Once the file passes its size limit it is renamed with a timestamp suffix
//! and a fresh file is started; only the newest rotated files are kept.
//! The most recent lines are also held in an in-memory circular buffer so a
//! host can show them without touching the disk.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::MakeWriter;

/// Size at which the active log file is rotated
pub const MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Number of rotated files kept next to the active one
pub const KEEP_ROTATED: usize = 3;
/// Lines held in the in-memory buffer
pub const BUFFER_LINES: usize = 500;

static RECENT: OnceLock<Arc<Mutex<VecDeque<String>>>> = OnceLock::new();

fn lock_err<T>(_: T) -> io::Error {
    io::Error::new(io::ErrorKind::Other, "log lock poisoned")
}

struct RollingFile {
    dir: PathBuf,
    app_name: String,
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    keep: usize,
    rotations: u32,
}

impl RollingFile {
    fn open(dir: &Path, app_name: &str, max_bytes: u64, keep: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            path,
            file,
            written,
            max_bytes,
            keep,
            rotations: 0,
        })
    }

    fn write_line(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.rotations += 1;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let rotated = self
            .dir
            .join(format!("{}.{}-{:04}.log", self.app_name, stamp, self.rotations));
        fs::rename(&self.path, &rotated)?;

        self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.written = 0;
        self.prune()
    }

    /// Delete the oldest rotated files beyond `keep`
    fn prune(&self) -> io::Result<()> {
        let prefix = format!("{}.", self.app_name);
        let mut rotated: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| *path != self.path)
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with(&prefix) && name.ends_with(".log"))
                    .unwrap_or(false)
            })
            .collect();

        // Suffixes are timestamp + counter, so lexical order is age order
        rotated.sort();
        while rotated.len() > self.keep {
            let oldest = rotated.remove(0);
            fs::remove_file(oldest)?;
        }
        Ok(())
    }
}

/// Writer handed to tracing-subscriber; cheap to clone
#[derive(Clone)]
pub struct RollingWriter {
    file: Arc<Mutex<RollingFile>>,
    recent: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl RollingWriter {
    pub fn new(
        dir: &Path,
        app_name: &str,
        max_bytes: u64,
        keep: usize,
        capacity: usize,
    ) -> io::Result<Self> {
        let file = RollingFile::open(dir, app_name, max_bytes, keep)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            recent: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        })
    }

    /// Path of the active log file
    pub fn path(&self) -> io::Result<PathBuf> {
        let file = self.file.lock().map_err(lock_err)?;
        Ok(file.path.clone())
    }

    /// Most recent lines, oldest first
    pub fn recent(&self, n: usize) -> Vec<String> {
        match self.recent.lock() {
            Ok(lines) => {
                let skip = lines.len().saturating_sub(n);
                lines.iter().skip(skip).cloned().collect()
            }
            Err(_) => Vec::new(),
        }
    }

    fn remember(&self, buf: &[u8]) -> io::Result<()> {
        let mut lines = self.recent.lock().map_err(lock_err)?;
        for line in String::from_utf8_lossy(buf).lines() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line.to_string());
        }
        Ok(())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.lock().map_err(lock_err)?.write_line(buf)?;
        if self.capacity > 0 {
            self.remember(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.lock().map_err(lock_err)?.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install the global subscriber writing to `<log_dir>/<app_name>.log`.
///
/// `log` records are bridged into tracing, so crates using either facade end
/// up in the same file.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    let writer = RollingWriter::new(&log_dir, app_name, MAX_FILE_BYTES, KEEP_ROTATED, BUFFER_LINES)
        .map_err(|e| format!("Failed to open log file: {}", e))?;
    let _ = RECENT.set(writer.recent.clone());

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))
}

pub fn info(msg: &str) -> Result<(), String> {
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    tracing::error!("{}", msg);
    Ok(())
}

/// Last `n` lines written through the global logger
pub fn recent_lines(n: usize) -> Vec<String> {
    match RECENT.get().and_then(|lines| lines.lock().ok()) {
        Some(lines) => {
            let skip = lines.len().saturating_sub(n);
            lines.iter().skip(skip).cloned().collect()
        }
        None => Vec::new(),
    }
}
