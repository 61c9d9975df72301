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

use crossbeam_channel::Receiver;

use crate::Append;
use crate::Error;
use crate::Trap;
use crate::append::asynchronous::Task;

pub(crate) struct Worker {
    appends: Vec<Box<dyn Append>>,
    receiver: Receiver<Task>,
    trap: Arc<dyn Trap>,
}

impl Worker {
    pub(crate) fn new(
        appends: Vec<Box<dyn Append>>,
        receiver: Receiver<Task>,
        trap: Arc<dyn Trap>,
    ) -> Self {
        Self {
            appends,
            receiver,
            trap,
        }
    }

    pub(crate) fn run(self) {
        while let Ok(task) = self.receiver.recv() {
            match task {
                Task::Log(record) => {
                    let record = record.as_record();
                    for append in self.appends.iter() {
                        if let Err(err) = append.append(&record) {
                            let err = Error::new("failed to append record").with_source(err);
                            self.trap.trap(&err);
                        }
                    }
                }
                Task::Flush(done) => {
                    let _ = done.send(self.flush());
                }
                Task::Close(done) => {
                    let _ = done.send(self.close());
                    return;
                }
            }
        }

        // every sender is gone without an explicit close
        if let Err(err) = self.close() {
            self.trap.trap(&err);
        }
    }

    fn flush(&self) -> Result<(), Error> {
        let mut result = Ok(());
        for append in self.appends.iter() {
            if let Err(err) = append.flush() {
                let err = Error::new("failed to flush").with_source(err);
                if result.is_ok() {
                    result = Err(err);
                } else {
                    self.trap.trap(&err);
                }
            }
        }
        result
    }

    fn close(&self) -> Result<(), Error> {
        let mut result = Ok(());
        for append in self.appends.iter() {
            if let Err(err) = append.close() {
                let err = Error::new("failed to close").with_source(err);
                if result.is_ok() {
                    result = Err(err);
                } else {
                    self.trap.trap(&err);
                }
            }
        }
        result
    }
}
