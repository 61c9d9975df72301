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

//! Appender for writing log records to single file or rolling files.
//!
//! # Example
//!
//!```
//! use std::num::NonZeroUsize;
//!
//! use logroute::append::Append;
//! use logroute::append::FileBuilder;
//! use logroute::append::file::Rotation;
//! use logroute::record::Record;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let file = FileBuilder::new(dir.path(), "app")
//!     .rotation(Rotation::Daily)
//!     .max_backups(NonZeroUsize::new(7).unwrap())
//!     .build()
//!     .unwrap();
//!
//! file.append(&Record::builder().payload("hello").build()).unwrap();
//! ```

pub use self::append::File;
pub use self::append::FileBuilder;
pub use self::rolling::RollingFileWriter;
pub use self::rolling::RollingFileWriterBuilder;
pub use self::rotation::Rotation;

mod append;
mod clock;
mod naming;
mod rolling;
mod rotation;
