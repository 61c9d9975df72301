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

use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::Error;
use crate::layout::Layout;
use crate::layout::write_prefix;
use crate::record::Record;

/// A layout for debugging sessions, carrying the process id and the source location.
///
/// The source location is `file:line` when the record knows it, and the record target otherwise.
///
/// Output format:
///
/// ```text
/// [2024/08/11 22:44:57] [DEBUG] [41723] (src/db.rs:42) opening pool
/// [2024/08/11 22:44:57] [INFO] [41723] (svc) listening on 0.0.0.0:8080
/// ```
///
/// # Examples
///
/// ```
/// use logroute::layout::VerboseLayout;
///
/// let layout = VerboseLayout::default();
/// ```
#[derive(Debug, Clone)]
pub struct VerboseLayout {
    timezone: TimeZone,
    colored: bool,
    pid: u32,
}

impl Default for VerboseLayout {
    fn default() -> Self {
        Self {
            timezone: TimeZone::system(),
            colored: false,
            pid: std::process::id(),
        }
    }
}

impl VerboseLayout {
    /// Set the timezone for timestamps.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Color the severity name.
    ///
    /// No effect unless the `colored` feature is enabled.
    pub fn colored(mut self) -> Self {
        self.colored = true;
        self
    }
}

impl Layout for VerboseLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = String::new();
        write_prefix(&mut text, record, &self.timezone, self.colored)?;

        let pid = self.pid;
        let message = record.payload();
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => write!(&mut text, " [{pid}] ({file}:{line}) {message}"),
            _ => write!(&mut text, " [{pid}] ({}) {message}", record.target()),
        }
        .map_err(Error::from_fmt_error)?;
        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::SystemTime;

    use super::*;
    use crate::record::Severity;

    #[test]
    fn test_verbose_format_carries_pid_and_target() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_723_387_497);
        let record = Record::builder()
            .time(time)
            .severity(Severity::Debug)
            .target("svc::db")
            .payload("opening pool")
            .build();

        let layout = VerboseLayout::default().timezone(TimeZone::UTC);
        let line = String::from_utf8(layout.format(&record).unwrap()).unwrap();
        let pid = std::process::id();
        assert_eq!(
            line,
            format!("[2024/08/11 14:44:57] [DEBUG] [{pid}] (svc::db) opening pool")
        );
    }

    #[test]
    fn test_verbose_format_prefers_source_location() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_723_387_497);
        let record = Record::builder()
            .time(time)
            .severity(Severity::Critical)
            .target("svc::db")
            .file(Some("src/db.rs"))
            .line(Some(42))
            .payload("pool exhausted")
            .build();

        let layout = VerboseLayout::default().timezone(TimeZone::UTC);
        let line = String::from_utf8(layout.format(&record).unwrap()).unwrap();
        let pid = std::process::id();
        assert_eq!(
            line,
            format!("[2024/08/11 14:44:57] [CRITICAL] [{pid}] (src/db.rs:42) pool exhausted")
        );
    }
}
