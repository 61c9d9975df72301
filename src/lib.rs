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

//! Logroute routes log records of a program to the console, a main log file and a separate
//! warning file, with rotation and retention of the files.
//!
//! # Overview
//!
//! A [`RouterBuilder`] collects the settings of a program: its name, log directory, level and
//! rotation policy. Building it creates the log directory and opens the destinations:
//!
//! * `{log_dir}/{program_name}.log` receives every record at or above the level;
//! * `{log_dir}/{program_name}.log.wf` receives records at `WARNING` and above, unless disabled;
//! * the standard output receives the same records as the main file, if enabled.
//!
//! # Examples
//!
//! ```
//! let dir = tempfile::tempdir().unwrap();
//!
//! let router = logroute::builder("svc")
//!     .log_dir(dir.path())
//!     .level("INFO")
//!     .when("MIDNIGHT")
//!     .backup_count(7)
//!     .build()
//!     .unwrap();
//!
//! router.debug("not written");
//! router.info("listening on 0.0.0.0:8080");
//! router.error("lost connection to the database");
//! router.close().unwrap();
//!
//! let main = std::fs::read_to_string(dir.path().join("svc.log")).unwrap();
//! assert_eq!(main.lines().count(), 2);
//! let warn = std::fs::read_to_string(dir.path().join("svc.log.wf")).unwrap();
//! assert_eq!(warn.lines().count(), 1);
//! ```
//!
//! Records of the `log` crate can be routed as well, see [`bridge`] and [`global`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod global;
pub mod layout;
pub mod record;
pub mod router;
pub mod trap;

mod error;

pub use append::Append;
pub use error::Error;
pub use error::ErrorKind;
pub use layout::Layout;
pub use record::Record;
pub use record::Severity;
pub use router::LogRouter;
pub use router::RouterBuilder;
pub use router::RouterConfig;
pub use router::builder;
pub use trap::Trap;
