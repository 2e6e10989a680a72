use super::*;

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Mutex;
use ::log::{Log, Record, Metadata, SetLoggerError, LevelFilter};

/// Level filter, eg. `trace` to see every sequent the kernel proves.
pub const LEVEL_VAR: &str = "GILOG_LOG";
/// If set, log to this file instead of stderr.
pub const FILE_VAR: &str = "GILOG_LOG_FILE";

struct KernelLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

lazy_static! {
    static ref LOGGER: KernelLogger = KernelLogger {
        level: level_from(std::env::var(LEVEL_VAR).ok().as_ref().map(String::as_str)),
        file: std::env::var_os(FILE_VAR).and_then(open_log_file).map(Mutex::new),
    };
}

fn open_log_file(path: OsString) -> Option<File> {
    match File::create(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            let _ = writeln!(
                io::stderr(),
                "{}: can't open {:?} ({}), logging to stderr",
                FILE_VAR,
                path,
                e,
            );
            None
        },
    }
}

fn level_from(value: Option<&str>) -> LevelFilter {
    match value {
        Some(value) => LevelFilter::from_str(value.trim()).unwrap_or(LevelFilter::Warn),
        None => LevelFilter::Warn,
    }
}

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("gilog")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match self.file {
            Some(ref file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{} - {}", record.level(), record.args());
                    let _ = file.flush();
                }
            },
            None => {
                let _ = writeln!(io::stderr(), "{} - {}", record.level(), record.args());
            },
        }
    }

    fn flush(&self) {}
}

/// Installs the kernel's logger, configured from `GILOG_LOG` and `GILOG_LOG_FILE`.
pub fn init() -> Result<(), SetLoggerError> {
    ::log::set_logger(&*LOGGER)?;
    ::log::set_max_level(LOGGER.level);
    Ok(())
}
