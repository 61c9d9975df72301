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

//! Layouts for formatting log records.

use std::fmt;
use std::fmt::Write;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::record::Record;
use crate::record::Severity;

mod compact;
mod verbose;

pub use self::compact::CompactLayout;
pub use self::verbose::VerboseLayout;

/// A layout for formatting log records.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log record into a single line, without the trailing newline.
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

// date and time separated by a space, e.g. 2024/08/11 22:44:57
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Writes `[<date> <time>] [<LEVEL>]`, the prefix shared by every layout.
fn write_prefix(
    text: &mut String,
    record: &Record,
    timezone: &TimeZone,
    colored: bool,
) -> Result<(), Error> {
    let ts = Timestamp::try_from(record.time())
        .map_err(|err| Error::new("failed to convert record time").with_source(err))?;
    let time = ts.to_zoned(timezone.clone()).strftime(TIMESTAMP_FORMAT).to_string();
    let severity = format_severity(record.severity(), colored);
    write!(text, "[{time}] [{severity}]").map_err(Error::from_fmt_error)
}

#[cfg(feature = "colored")]
fn format_severity(severity: Severity, colored: bool) -> String {
    use colored::Color;
    use colored::Colorize;

    if !colored {
        return severity.to_string();
    }

    let color = match severity {
        Severity::Critical => Color::BrightRed,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Green,
        Severity::Debug => Color::Blue,
        Severity::Trace => Color::Magenta,
    };
    severity.as_str().color(color).to_string()
}

#[cfg(not(feature = "colored"))]
fn format_severity(severity: Severity, _colored: bool) -> String {
    severity.to_string()
}
