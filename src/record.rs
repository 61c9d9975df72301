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

//! Log record and severity.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use crate::Error;

/// The urgency of a log event.
///
/// Severities are ordered by increasing urgency, so `Severity::Debug` is the least and
/// `Severity::Critical` is the greatest. Note that `Trace` ranks above `Debug`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Severity {
    /// Designates debugging information.
    Debug,
    /// Designates tracing information.
    Trace,
    /// Designates useful information.
    Info,
    /// Designates hazardous situations.
    Warning,
    /// Designates errors.
    Error,
    /// Designates failures the program cannot recover from.
    Critical,
}

impl Severity {
    /// All severities, from the least to the most urgent.
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Trace,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Return the string representation of the `Severity`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Map a level name to a severity, falling back to [`Severity::Info`].
    ///
    /// Names are matched case-insensitively against `DEBUG`, `TRACE`, `INFO`, `WARNING`,
    /// `ERROR` and `CRITICAL`. Any other input, including the empty string, yields `Info`
    /// rather than an error. Call [`str::parse`] instead to reject unknown names.
    ///
    /// # Examples
    ///
    /// ```
    /// use logroute::Severity;
    ///
    /// assert_eq!(Severity::from_name_or_info("warning"), Severity::Warning);
    /// assert_eq!(Severity::from_name_or_info("BOGUS"), Severity::Info);
    /// ```
    pub fn from_name_or_info(name: &str) -> Severity {
        name.parse().unwrap_or(Severity::Info)
    }
}

impl fmt::Debug for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Severity, Self::Err> {
        for severity in Severity::ALL {
            if s.eq_ignore_ascii_case(severity.as_str()) {
                return Ok(severity);
            }
        }

        Err(Error::new(format!("malformed severity: {s:?}")))
    }
}

/// The payload of a log message.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    now: SystemTime,

    severity: Severity,
    target: &'a str,
    file: Option<&'a str>,
    line: Option<u32>,

    payload: Cow<'a, str>,
}

impl<'a> Record<'a> {
    /// Returns a new builder.
    pub fn builder() -> RecordBuilder<'a> {
        RecordBuilder::default()
    }

    /// The observed time.
    pub fn time(&self) -> SystemTime {
        self.now
    }

    /// The severity of the message.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The name of the target of the directive, usually a module path.
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// The source file containing the message.
    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    /// The line containing the message.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// The message body.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Convert to an owned record.
    pub fn to_owned(&self) -> RecordOwned {
        RecordOwned {
            now: self.now,
            severity: self.severity,
            target: self.target.to_string(),
            file: self.file.map(str::to_string),
            line: self.line,
            payload: self.payload.to_string(),
        }
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl Default for RecordBuilder<'_> {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                now: SystemTime::now(),
                severity: Severity::Info,
                target: "",
                file: None,
                line: None,
                payload: Cow::Borrowed(""),
            },
        }
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set [`payload`](Record::payload).
    pub fn payload(mut self, payload: impl Into<Cow<'a, str>>) -> Self {
        self.record.payload = payload.into();
        self
    }

    /// Set [`severity`](Record::severity).
    pub fn severity(mut self, severity: Severity) -> Self {
        self.record.severity = severity;
        self
    }

    /// Set [`target`](Record::target).
    pub fn target(mut self, target: &'a str) -> Self {
        self.record.target = target;
        self
    }

    /// Set [`file`](Record::file).
    pub fn file(mut self, file: Option<&'a str>) -> Self {
        self.record.file = file;
        self
    }

    /// Set [`line`](Record::line).
    pub fn line(mut self, line: Option<u32>) -> Self {
        self.record.line = line;
        self
    }

    /// Set [`time`](Record::time).
    pub fn time(mut self, now: SystemTime) -> Self {
        self.record.now = now;
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record<'a> {
        self.record
    }
}

/// Owned version of a log record, used to move records across threads.
#[derive(Clone, Debug)]
pub struct RecordOwned {
    now: SystemTime,
    severity: Severity,
    target: String,
    file: Option<String>,
    line: Option<u32>,
    payload: String,
}

impl RecordOwned {
    /// Create a `Record` referencing the data in this `RecordOwned`.
    pub fn as_record(&self) -> Record<'_> {
        Record {
            now: self.now,
            severity: self.severity,
            target: &self.target,
            file: self.file.as_deref(),
            line: self.line,
            payload: Cow::Borrowed(&self.payload),
        }
    }
}
