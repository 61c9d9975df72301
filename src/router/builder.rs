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

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::Error;
use crate::LogRouter;
use crate::Trap;
use crate::router::RouterConfig;
use crate::trap::DefaultTrap;

/// Create a new [`RouterBuilder`] for `program_name`.
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
///
/// let router = logroute::builder("svc")
///     .log_dir(dir.path())
///     .level("WARNING")
///     .build()
///     .unwrap();
///
/// router.warn("disk almost full");
/// router.close().unwrap();
/// ```
pub fn builder(program_name: impl Into<String>) -> RouterBuilder {
    RouterBuilder::new(program_name)
}

/// A fluent builder for a [`LogRouter`].
///
/// Setters only record the setting; nothing is validated and nothing touches the filesystem
/// until [`build`](RouterBuilder::build).
#[must_use = "call `build` to create the router"]
#[derive(Debug, Clone)]
pub struct RouterBuilder {
    config: RouterConfig,
    trap: Arc<dyn Trap>,
}

impl RouterBuilder {
    /// Create a builder for `program_name` with every other setting at its default.
    ///
    /// See [`RouterConfig::new`] for the defaults.
    pub fn new(program_name: impl Into<String>) -> Self {
        Self::from_config(RouterConfig::new(program_name))
    }

    /// Create a builder seeded from an existing config.
    pub fn from_config(config: RouterConfig) -> Self {
        Self {
            config,
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// The settings recorded so far.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Set the level name, such as `INFO` or `warning`.
    ///
    /// Unknown names resolve to `INFO`.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// Set the directory holding the log files. It is created on build if absent.
    pub fn log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = log_dir.into();
        self
    }

    /// Set the roll interval: `M`, `H`, `D` or `MIDNIGHT`, in any case.
    pub fn when(mut self, when: impl Into<String>) -> Self {
        self.config.when = when.into();
        self
    }

    /// Set how many rolled files are kept besides the active one. `0` keeps every file.
    pub fn backup_count(mut self, backup_count: usize) -> Self {
        self.config.backup_count = backup_count;
        self
    }

    /// Roll a log file over once it grows past `max_file_size` bytes.
    pub fn max_file_size(mut self, max_file_size: NonZeroUsize) -> Self {
        self.config.max_file_size = Some(max_file_size);
        self
    }

    /// Enable or disable rollover. Retention still applies to files rolled earlier.
    pub fn rotate(mut self, rotate: bool) -> Self {
        self.config.rotate = rotate;
        self
    }

    /// Enable or disable writing to the standard output.
    pub fn stdout(mut self, stdout: bool) -> Self {
        self.config.stdout = stdout;
        self
    }

    /// Enable or disable the `{program_name}.log.wf` file for `WARNING` and above.
    pub fn warn_file(mut self, warn_file: bool) -> Self {
        self.config.warn_file = warn_file;
        self
    }

    /// Enable or disable the verbose debugging layout. Enabling it forces the level to `DEBUG`.
    pub fn debug_format(mut self, debug_format: bool) -> Self {
        self.config.debug_format = debug_format;
        self
    }

    /// Write files on dedicated worker threads (the default) or on the calling thread.
    pub fn non_blocking(mut self, non_blocking: bool) -> Self {
        self.config.non_blocking = non_blocking;
        self
    }

    /// Set the trap receiving write failures once the router is running.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = Arc::from(trap.into());
        self
    }

    /// Validate the settings, open every destination and return the router.
    ///
    /// # Errors
    ///
    /// See [`LogRouter::new`].
    pub fn build(self) -> Result<LogRouter, Error> {
        LogRouter::with_trap(self.config, self.trap)
    }
}
