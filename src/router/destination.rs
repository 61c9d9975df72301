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

use crate::Append;
use crate::Error;
use crate::record::Record;
use crate::record::Severity;

/// A sink paired with the minimum severity it accepts.
#[derive(Debug)]
pub struct Destination {
    name: String,
    threshold: Severity,
    append: Box<dyn Append>,
}

impl Destination {
    /// Create a destination accepting records at `threshold` and above.
    pub fn new(
        name: impl Into<String>,
        threshold: Severity,
        append: impl Into<Box<dyn Append>>,
    ) -> Self {
        Self {
            name: name.into(),
            threshold,
            append: append.into(),
        }
    }

    /// The name of the destination, such as `stdout` or the log file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The minimum severity of the destination.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Whether a record of `severity` reaches this destination.
    pub fn accepts(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    pub(crate) fn append(&self, record: &Record) -> Result<(), Error> {
        if !self.accepts(record.severity()) {
            return Ok(());
        }

        self.append.append(record).map_err(|err| self.annotate(err))
    }

    pub(crate) fn flush(&self) -> Result<(), Error> {
        self.append.flush().map_err(|err| self.annotate(err))
    }

    pub(crate) fn close(&self) -> Result<(), Error> {
        self.append.close().map_err(|err| self.annotate(err))
    }

    fn annotate(&self, err: Error) -> Error {
        err.with_context("destination", &self.name)
    }
}
