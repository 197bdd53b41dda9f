extern crate chrono;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[cfg_attr(test, macro_use)]
extern crate serde_json;

use chrono::{DateTime, Utc};
use env_logger::{Builder, Env};
use std::io::Write;

const TIMESTAMP_FORMAT: &str = "[%Y-%m-%d][%H:%M:%S]";

#[derive(Serialize, Debug)]
struct LogEntry {
    level: String,
    #[serde(serialize_with = "serialize_timestamp")]
    time: DateTime<Utc>,
    target: String,
    message: String,
    #[serde(flatten)]
    meta: Option<serde_json::Value>,
}

fn serialize_timestamp<S>(x: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&format!("{}", x.format(TIMESTAMP_FORMAT)))
}

/// Wrapper around the log! macro that emits a single JSON object per line so
/// log aggregators can ingest entries without a parsing step.
///
/// `jlog!(Level::Info, "Log message")` produces
/// `{"level": "INFO", "target": "my_module", "message": "Log message"}`.
///
/// Metadata can be attached as a JSON literal:
/// ```text
///   jlog!(Error, "Could not reserve ticket", {"event_id": id})
/// ```
/// and an explicit target can be given as the second argument:
/// ```text
///   jlog!(Warn, "ticketgate_api::communications", "Send failed", {})
/// ```
#[macro_export]
macro_rules! jlog {
    ($level:path, $msg:expr) => {{
        use $crate::log_message;
        log_message($level, None, $msg, None)
    }};
    ($level:path, $msg:expr, $json:tt) => {{
        use $crate::log_message;
        let meta = json!($json);
        log_message($level, None, $msg, Some(meta))
    }};
    ($level:path, $target:expr, $msg:expr, $json:tt) => {{
        use $crate::log_message;
        let meta = json!($json);
        log_message($level, Some($target), $msg, Some(meta))
    }};
}

pub fn log_message(level: log::Level, target: Option<&str>, msg: &str, meta: Option<serde_json::Value>) {
    let entry = LogEntry {
        level: level.to_string(),
        time: Utc::now(),
        target: target.unwrap_or("none").to_string(),
        message: msg.trim().to_string(),
        meta,
    };
    let json = match serde_json::to_string(&entry) {
        Ok(json) => json,
        Err(_) => entry.message,
    };
    match target {
        Some(t) => log!(target: t, level, "{}", json),
        None => log!(level, "{}", json),
    }
}

fn is_json(msg: &str) -> bool {
    msg.starts_with('{') && msg.ends_with('}')
}

/// Installs an env_logger that leaves pre-formatted JSON lines untouched and
/// wraps everything else in the same envelope.
pub fn setup_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let msg = format!("{}", record.args());
            if is_json(&msg) {
                writeln!(buf, "{}", msg)
            } else {
                let entry = LogEntry {
                    level: record.level().to_string(),
                    time: Utc::now(),
                    target: record.target().to_string(),
                    message: msg.trim().to_string(),
                    meta: None,
                };
                match serde_json::to_string(&entry) {
                    Ok(s) => writeln!(buf, "{}", s),
                    Err(err) => writeln!(buf, "Could not serialize log entry: {:?}: {:?}", err, entry),
                }
            }
        })
        .init();
}
