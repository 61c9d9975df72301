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
use std::sync::Barrier;

use tempfile::TempDir;

#[test]
fn test_concurrent_init_builds_one_router() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles = (0..threads)
        .map(|i| {
            let barrier = barrier.clone();
            let log_dir = temp_dir.path().join(format!("dir-{i}"));
            std::thread::spawn(move || {
                barrier.wait();
                let router = logroute::global::init(
                    logroute::builder("svc").log_dir(log_dir).non_blocking(false),
                )
                .unwrap();
                router as *const logroute::LogRouter as usize
            })
        })
        .collect::<Vec<_>>();
    let routers = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    assert!(routers.iter().all(|r| *r == routers[0]), "{routers:?}");
    let dirs = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(dirs, 1);

    logroute::global::shutdown().unwrap();
}
