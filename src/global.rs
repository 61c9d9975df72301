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

//! A process-wide router.
//!
//! Most programs build one router at startup and log through it everywhere. [`init`] installs
//! it once; [`get`] returns it from anywhere afterwards.
//!
//! A router installed here is never dropped, so call [`shutdown`] before the process exits to
//! write out records still queued on worker threads.
//!
//! ```rust
//! let dir = tempfile::tempdir().unwrap();
//!
//! let router = logroute::global::init(logroute::builder("svc").log_dir(dir.path())).unwrap();
//! router.info("started");
//!
//! logroute::global::get().unwrap().warn("disk almost full");
//! logroute::global::shutdown().unwrap();
//! ```

use std::sync::Mutex;
use std::sync::OnceLock;

use crate::Error;
use crate::LogRouter;
use crate::RouterBuilder;

static GLOBAL_ROUTER: OnceLock<LogRouter> = OnceLock::new();
// serializes builds, so at most one builder ever touches the filesystem
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Build the process-wide router and install it.
///
/// If a router is already installed, `builder` is ignored and the installed router is returned.
/// Concurrent calls build one router only; the others wait for it and return it.
///
/// # Errors
///
/// Return the error of [`RouterBuilder::build`]; nothing is installed in that case.
pub fn init(builder: RouterBuilder) -> Result<&'static LogRouter, Error> {
    if let Some(router) = GLOBAL_ROUTER.get() {
        return Ok(router);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(router) = GLOBAL_ROUTER.get() {
        return Ok(router);
    }

    let router = builder.build()?;
    Ok(GLOBAL_ROUTER.get_or_init(|| router))
}

/// Return the process-wide router, if installed.
pub fn get() -> Option<&'static LogRouter> {
    GLOBAL_ROUTER.get()
}

/// Close the process-wide router, if installed.
///
/// Later records sent to it are dropped.
///
/// # Errors
///
/// See [`LogRouter::close`].
pub fn shutdown() -> Result<(), Error> {
    match GLOBAL_ROUTER.get() {
        Some(router) => router.close(),
        None => Ok(()),
    }
}
