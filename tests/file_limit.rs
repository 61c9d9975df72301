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

use std::fs;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;

use logroute::append::file::RollingFileWriterBuilder;
use logroute::append::file::Rotation;
use tempfile::TempDir;

#[test]
fn test_file_count_limit() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let max_backups = NonZeroUsize::new(9).unwrap();
    let max_size = NonZeroUsize::new(100).unwrap();

    let mut writer = RollingFileWriterBuilder::new(temp_dir.path(), "svc")
        .rotation(Rotation::Hourly)
        .filename_suffix("log")
        .max_backups(max_backups)
        .max_file_size(max_size)
        .build()
        .unwrap();

    for i in 0..50 {
        let data = format!("Log entry {}: {}\n", i, "A".repeat(50));
        writer.write_all(data.as_bytes()).unwrap();
        writer.flush().unwrap();
    }

    // the archives plus the active file
    let files = count_log_files(temp_dir.path(), "svc.");
    assert!(
        files.len() <= max_backups.get() + 1,
        "Expected at most {} files, but found {}: {:?}",
        max_backups.get() + 1,
        files.len(),
        files
    );
    assert!(files.contains(&"svc.log".to_string()), "{files:?}");
}

#[test]
fn test_file_count_limit_with_random_sizes() {
    use rand::Rng;

    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let max_backups = NonZeroUsize::new(3).unwrap();

    let mut writer = RollingFileWriterBuilder::new(temp_dir.path(), "svc")
        .filename_suffix("log.wf")
        .max_backups(max_backups)
        .max_file_size(NonZeroUsize::new(256).unwrap())
        .build()
        .unwrap();

    let mut rng = rand::rng();
    let mut written = 0;
    for i in 0..200 {
        let data = format!("{i}: {}\n", "B".repeat(rng.random_range(1..64)));
        writer.write_all(data.as_bytes()).unwrap();
        written += data.len();
    }
    writer.flush().unwrap();
    assert!(written > 256 * (max_backups.get() + 1));

    let files = count_log_files(temp_dir.path(), "svc.");
    assert_eq!(files.len(), max_backups.get() + 1, "{files:?}");
    assert!(files.contains(&"svc.log.wf".to_string()), "{files:?}");
    assert!(files.contains(&"svc.1.log.wf".to_string()), "{files:?}");
}

fn count_log_files(dir: &Path, prefix: &str) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let filename = entry.file_name().to_str()?.to_string();
            if filename.starts_with(prefix) {
                Some(filename)
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
}
