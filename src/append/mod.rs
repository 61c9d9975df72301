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

//! Sinks that write formatted records somewhere.
//!
//! A router only talks to its sinks through the [`Append`] trait. Opening a sink happens in the
//! sink's own builder; the router then appends, flushes, and finally closes it.

use std::fmt;

use crate::Error;
use crate::record::Record;

mod asynchronous;
pub mod file;
mod stdio;

pub use self::asynchronous::Async;
pub use self::asynchronous::AsyncBuilder;
pub use self::file::File;
pub use self::file::FileBuilder;
pub use self::stdio::Stdout;

/// An appender that can process log records.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Dispatch a log record to the append target.
    fn append(&self, record: &Record) -> Result<(), Error>;

    /// Flush any buffered records.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Flush and release the resources held by this appender.
    ///
    /// Called at most once per appender by the router. Default to [`Append::flush`].
    fn close(&self) -> Result<(), Error> {
        self.flush()
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
