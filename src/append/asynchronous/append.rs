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

use std::sync::Arc;

use crate::Append;
use crate::Error;
use crate::ErrorKind;
use crate::Trap;
use crate::append::asynchronous::Task;
use crate::append::asynchronous::state::AsyncState;
use crate::append::asynchronous::worker::Worker;
use crate::record::Record;
use crate::trap::DefaultTrap;

/// A composable appender, logging asynchronously on a dedicated thread.
///
/// [`append`](Append::append) only enqueues the record. [`flush`](Append::flush) and
/// [`close`](Append::close) block until the worker has processed everything queued before them,
/// so no grace delay is needed before the process exits.
#[derive(Debug)]
pub struct Async {
    state: AsyncState,
    trap: Arc<dyn Trap>,
}

impl Append for Async {
    fn append(&self, record: &Record) -> Result<(), Error> {
        self.state.send_task(Task::Log(Box::new(record.to_owned())))
    }

    fn flush(&self) -> Result<(), Error> {
        self.state.request(Task::Flush)
    }

    fn close(&self) -> Result<(), Error> {
        self.state.close()
    }
}

impl Drop for Async {
    fn drop(&mut self) {
        if let Err(err) = self.state.close() {
            self.trap.trap(&err);
        }
    }
}

/// A builder for configuring an async appender.
///
/// # Examples
///
/// ```
/// use logroute::append::AsyncBuilder;
/// use logroute::append::Stdout;
///
/// let asynchronous = AsyncBuilder::new("logroute-stdout")
///     .append(Stdout::default())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct AsyncBuilder {
    thread_name: String,
    appends: Vec<Box<dyn Append>>,
    trap: Arc<dyn Trap>,
}

impl AsyncBuilder {
    /// Create a new async appender builder.
    pub fn new(thread_name: impl Into<String>) -> AsyncBuilder {
        AsyncBuilder {
            thread_name: thread_name.into(),
            appends: vec![],
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Set the trap for failures on the worker thread.
    pub fn trap(mut self, trap: Arc<dyn Trap>) -> Self {
        self.trap = trap;
        self
    }

    /// Add an appender to this async appender.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.appends.push(append.into());
        self
    }

    /// Build the async appender and spawn its worker thread.
    ///
    /// # Errors
    ///
    /// Return [`ErrorKind::SinkCreateError`] if the worker thread cannot be spawned.
    pub fn build(self) -> Result<Async, Error> {
        let Self {
            thread_name,
            appends,
            trap,
        } = self;

        let (sender, receiver) = crossbeam_channel::unbounded();
        let worker = Worker::new(appends, receiver, trap.clone());
        let handle = std::thread::Builder::new()
            .name(thread_name)
            .spawn(move || worker.run())
            .map_err(|err| {
                Error::with_kind(
                    ErrorKind::SinkCreateError,
                    "failed to spawn async appender thread",
                )
                .with_source(err)
            })?;

        Ok(Async {
            state: AsyncState::new(sender, handle),
            trap,
        })
    }
}
