//! Logging backend which logs to a file.

use chrono::Local;
use eyre::{format_err, Context, Result};
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;
use std::{
    fs::File,
    io::Write,
    path::Path,
    sync::{mpsc, Mutex},
};

#[derive(Clone, Copy)]
enum MessageType {
    Normal,
    Error,
    Warning,
    Debug,
}

struct Message {
    module: String,
    msg_type: MessageType,
    string: String,
    time: String,
}

impl Message {
    fn from_record(record: &Record) -> Message {
        let msg_type = match record.level() {
            Level::Error => MessageType::Error,
            Level::Warn => MessageType::Warning,
            Level::Info => MessageType::Normal,
            Level::Debug | Level::Trace => MessageType::Debug,
        };

        Message {
            module: record
                .module_path()
                .and_then(|path| path.split("::").last())
                .unwrap_or("unknown")
                .to_string(),
            msg_type,
            string: format!("{}", record.args()),
            time: Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        }
    }

    /// Formats the message as a single log line.
    ///
    /// The format is `[date time] [module] [level] Text`.
    fn line(&self) -> String {
        let level_name = match self.msg_type {
            MessageType::Normal => "info",
            MessageType::Error => "error",
            MessageType::Warning => "warning",
            MessageType::Debug => "debug",
        };

        format!(
            "[{}] [{}] [{}] {}",
            self.time, self.module, level_name, self.string
        )
    }

    fn write_to(&self, out: &mut impl Write) {
        let _ = writeln!(out, "{}", self.line());
    }
}

pub struct Logger;

impl Logger {
    pub fn commit(&self, record: &Record) {
        let message = Message::from_record(record);

        // The sender is only missing if the logger was installed by hand without `init`.
        if let Some(sender) = MSG_SENDER.get() {
            if let Ok(sender) = sender.lock() {
                let _ = sender.send(message);
            }
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.commit(record);
        }
    }

    fn flush(&self) {}
}

static MSG_SENDER: OnceCell<Mutex<mpsc::Sender<Message>>> = OnceCell::new();
static LOGGER: Logger = Logger;

/// Installs the logger, writing to a new file at `path` and recording messages up to `level`.
///
/// Fails if the file can't be created or if a logger has already been installed.
pub fn init(path: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    let path = path.as_ref();

    let mut file =
        File::create(path).wrap_err_with(|| format!("Unable to create log file {:?}", path))?;

    let (sender, receiver) = mpsc::channel::<Message>();

    MSG_SENDER
        .set(Mutex::new(sender))
        .map_err(|_| format_err!("Logging has already been initialised"))?;

    log::set_logger(&LOGGER).map_err(|err| format_err!("Unable to install logger: {}", err))?;
    log::set_max_level(level);

    // Writing happens on a background thread so that the host's own loop never waits on the disk.
    std::thread::spawn(move || {
        for msg in receiver {
            msg.write_to(&mut file);

            if cfg!(feature = "debug") {
                eprintln!("{}", msg.line());
            }
        }
    });

    log::info!("Logging to {:?}", path);

    Ok(())
}
