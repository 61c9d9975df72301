// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::LogRouter;
use crate::global;
use crate::record::Record;
use crate::record::Severity;

/// Each `log` level maps to the severity of the same name.
///
/// [`Severity::Debug`] ranks below [`Severity::Trace`], so `log::Level::Debug` is the more verbose
/// of the two here, the reverse of the `log` crate's order.
impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

struct LogCrateProxy(());

impl log::Log for LogCrateProxy {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let Some(router) = global::get() else {
            return false;
        };

        log::Log::enabled(router, metadata)
    }

    fn log(&self, record: &log::Record) {
        if let Some(router) = global::get() {
            log::Log::log(router, record);
        }
    }

    fn flush(&self) {
        if let Some(router) = global::get() {
            log::Log::flush(router);
        }
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_logger`] to set up a `LogCrateProxy`, and all logs from the log
/// crate are forwarded to the router installed by [`global::init`]. Any log events that occur
/// before the router is installed are ignored.
///
/// This function will set the global maximum log level to `Trace`. To override this, call
/// [`log::set_max_level`] after this function.
///
/// Levels map by name, and [`Severity::Debug`] ranks below [`Severity::Trace`]. A router at
/// `TRACE` therefore keeps `log::trace!` but drops `log::debug!`, while a router at `DEBUG` keeps
/// both.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// let dir = tempfile::tempdir().unwrap();
///
/// logroute::bridge::try_setup_log_crate().unwrap();
/// logroute::global::init(logroute::builder("svc").log_dir(dir.path())).unwrap();
///
/// log::warn!("disk almost full");
/// logroute::global::shutdown().unwrap();
/// ```
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static PROXY: LogCrateProxy = LogCrateProxy(());
    log::set_logger(&PROXY)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate() {
    try_setup_log_crate().expect(
        "logroute::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}

impl log::Log for LogRouter {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        LogRouter::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let severity = record.level().into();
        if !LogRouter::enabled(self, severity) {
            return;
        }

        let payload = match record.args().as_str() {
            Some(message) => std::borrow::Cow::Borrowed(message),
            None => std::borrow::Cow::Owned(record.args().to_string()),
        };

        let record = Record::builder()
            .severity(severity)
            .target(record.target())
            .file(record.file())
            .line(record.line())
            .payload(payload)
            .build();

        LogRouter::log(self, &record);
    }

    fn flush(&self) {
        if let Err(err) = LogRouter::flush(self) {
            self.trap().trap(&err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(Severity::from(log::Level::Error), Severity::Error);
        assert_eq!(Severity::from(log::Level::Warn), Severity::Warning);
        assert_eq!(Severity::from(log::Level::Info), Severity::Info);
        assert_eq!(Severity::from(log::Level::Debug), Severity::Debug);
        assert_eq!(Severity::from(log::Level::Trace), Severity::Trace);
    }

    #[test]
    fn test_debug_is_below_trace() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let enabled = |level: &str, record_level: log::Level| {
            let router = crate::builder("svc")
                .log_dir(temp_dir.path())
                .level(level)
                .non_blocking(false)
                .build()
                .unwrap();
            let metadata = log::Metadata::builder().level(record_level).build();
            log::Log::enabled(&router, &metadata)
        };

        assert!(enabled("TRACE", log::Level::Trace));
        assert!(!enabled("TRACE", log::Level::Debug));
        assert!(enabled("DEBUG", log::Level::Debug));
        assert!(enabled("DEBUG", log::Level::Trace));
    }
}
