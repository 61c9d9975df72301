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

//! A composable appender, logging asynchronously and flushing synchronously.

use crossbeam_channel::Sender;

use crate::Error;
use crate::record::RecordOwned;

mod append;
mod state;
mod worker;

pub use self::append::Async;
pub use self::append::AsyncBuilder;

enum Task {
    Log(Box<RecordOwned>),
    Flush(Sender<Result<(), Error>>),
    Close(Sender<Result<(), Error>>),
}
