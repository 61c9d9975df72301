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

/// A layout that formats log records as compact text.
///
/// Output format:
///
/// ```text
/// [2024/08/11 22:44:57] [ERROR] Hello error!
/// [2024/08/11 22:44:57] [WARNING] Hello warn!
/// [2024/08/11 22:44:57] [INFO] Hello info!
/// ```
///
/// Timestamps are rendered in the system time zone unless [`timezone`](CompactLayout::timezone)
/// says otherwise.
///
/// # Examples
///
/// ```
/// use logroute::layout::CompactLayout;
///
/// let layout = CompactLayout::default();
/// ```
#[derive(Debug, Clone)]
pub struct CompactLayout {
    timezone: TimeZone,
    colored: bool,
}

impl Default for CompactLayout {
    fn default() -> Self {
        Self {
            timezone: TimeZone::system(),
            colored: false,
        }
    }
}

impl CompactLayout {
    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logroute::layout::CompactLayout;
    ///
    /// let layout = CompactLayout::default().timezone(TimeZone::UTC);
    /// ```
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

impl Layout for CompactLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = String::new();
        write_prefix(&mut text, record, &self.timezone, self.colored)?;
        write!(&mut text, " {}", record.payload()).map_err(Error::from_fmt_error)?;
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
    fn test_compact_format() {
        // 2024-08-11T14:44:57Z
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_723_387_497);
        let record = Record::builder()
            .time(time)
            .severity(Severity::Warning)
            .target("svc")
            .payload("disk almost full")
            .build();

        let layout = CompactLayout::default().timezone(TimeZone::UTC);
        let line = String::from_utf8(layout.format(&record).unwrap()).unwrap();
        assert_eq!(line, "[2024/08/11 14:44:57] [WARNING] disk almost full");
    }
}
