use std::path::Path;

use anyhow::Result;
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    {ContentLimit, FileRotate},
};
use log::{Level, Log};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Writes everything to a rotating file and mirrors warnings and errors to
/// stderr so command-line callers still see them.
pub struct MainLogger {
    write_logger: Box<WriteLogger<FileRotate<AppendTimestamp>>>,
}

impl MainLogger {
    fn new(write_logger: Box<WriteLogger<FileRotate<AppendTimestamp>>>) -> Self {
        Self { write_logger }
    }
}

impl Log for MainLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.write_logger.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        self.write_logger.log(record);
        if record.level() <= Level::Warn {
            eprintln!(
                "{}:{} -- {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        self.write_logger.flush();
    }
}

/// Installs the process-wide logger, writing to `<log_dir>/logs/main.log`.
/// Fails if a logger is already installed.
pub fn init(log_dir: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    let path = log_dir.as_ref().join("logs/main.log");
    let log = FileRotate::new(
        path,
        AppendTimestamp::default(FileLimit::MaxFiles(3)),
        ContentLimit::Lines(1000),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let write_logger = WriteLogger::new(level, config, log);
    let main_logger = MainLogger::new(write_logger);
    log::set_boxed_logger(Box::new(main_logger))?;
    log::set_max_level(level);
    Ok(())
}
