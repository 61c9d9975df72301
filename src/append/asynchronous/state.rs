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
use std::sync::Mutex;
use std::thread::JoinHandle;

use arc_swap::ArcSwapOption;
use crossbeam_channel::Sender;

use crate::Error;
use crate::append::asynchronous::Task;

/// The sending half of an async appender, `None` once closed.
#[derive(Debug)]
pub(crate) struct AsyncState {
    sender: ArcSwapOption<Sender<Task>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl AsyncState {
    pub(crate) fn new(sender: Sender<Task>, handle: JoinHandle<()>) -> Self {
        Self {
            sender: ArcSwapOption::from(Some(Arc::new(sender))),
            handle: Mutex::new(Some(handle)),
        }
    }

    pub(crate) fn send_task(&self, task: Task) -> Result<(), Error> {
        let sender = self.sender.load();
        let Some(sender) = sender.as_ref() else {
            return Err(Error::new("async appender is closed"));
        };

        sender.send(task).map_err(|err| {
            Error::new(match err.0 {
                Task::Log(_) => "failed to send log task to async appender",
                Task::Flush(_) => "failed to send flush task to async appender",
                Task::Close(_) => "failed to send close task to async appender",
            })
        })
    }

    /// Sends a task carrying a reply channel and waits for the worker to answer.
    pub(crate) fn request(
        &self,
        task: impl FnOnce(Sender<Result<(), Error>>) -> Task,
    ) -> Result<(), Error> {
        let (done, wait) = crossbeam_channel::bounded(1);
        self.send_task(task(done))?;
        wait.recv()
            .map_err(|_| Error::new("async appender worker exited before replying"))?
    }

    /// Drains and closes the worker, then joins its thread.
    ///
    /// Returns `Ok(())` without doing anything if already closed.
    pub(crate) fn close(&self) -> Result<(), Error> {
        let Some(sender) = self.sender.swap(None) else {
            return Ok(());
        };

        let (done, wait) = crossbeam_channel::bounded(1);
        let sent = sender.send(Task::Close(done)).is_ok();
        drop(sender);

        let handle = self
            .handle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                return Err(Error::new("async appender worker panicked"));
            }
        }

        if sent {
            wait.recv()
                .map_err(|_| Error::new("async appender worker exited before closing"))?
        } else {
            Ok(())
        }
    }
}
