//! Append-only job log files.
//!
//! Every job writes its externally-consumed record through a [`JobLog`]:
//! one exclusively-held append handle per destination, so concurrent jobs
//! sharing a destination cannot interleave partial entries. Files are
//! never truncated here.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// `DD/MM/YYYY-HH:MM:SS` — heartbeat and low-stock entry stamps.
pub const STAMP_DMY: &str = "%d/%m/%Y-%H:%M:%S";

/// `YYYY-MM-DD HH:MM:SS` — report and reminder entry stamps.
pub const STAMP_YMD: &str = "%Y-%m-%d %H:%M:%S";

pub const HEARTBEAT_LOG_FILE: &str = "crm_heartbeat_log.txt";
pub const LOW_STOCK_LOG_FILE: &str = "low_stock_updates_log.txt";
pub const REMINDERS_LOG_FILE: &str = "order_reminders_log.txt";
pub const REPORT_LOG_FILE: &str = "crm_report_log.txt";

/// A single append-only log destination.
#[derive(Debug)]
pub struct JobLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl JobLog {
    /// Open (or create) the file in append mode, creating the parent
    /// directory if absent.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. The entry text must include its trailing newline;
    /// the write is sequenced under the handle's lock.
    pub fn append(&self, entry: &str) -> io::Result<()> {
        let mut file = self.file.lock().unwrap();
        file.write_all(entry.as_bytes())?;
        file.flush()
    }
}

/// The four well-known job log destinations, rooted in one directory.
#[derive(Debug)]
pub struct JobLogs {
    pub heartbeat: JobLog,
    pub low_stock: JobLog,
    pub reminders: JobLog,
    pub report: JobLog,
}

impl JobLogs {
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            heartbeat: JobLog::open(dir.join(HEARTBEAT_LOG_FILE))?,
            low_stock: JobLog::open(dir.join(LOW_STOCK_LOG_FILE))?,
            reminders: JobLog::open(dir.join(REMINDERS_LOG_FILE))?,
            report: JobLog::open(dir.join(REPORT_LOG_FILE))?,
        })
    }
}
