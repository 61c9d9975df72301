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

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// The names of the files owned by one rolling writer.
///
/// The active file is `{stem}.{suffix}`. Archives are `{stem}.{period}.{index}.{suffix}` with
/// time rotation, `{stem}.{index}.{suffix}` without; index 1 is the newest archive of its period.
#[derive(Debug)]
pub(crate) struct LogNaming {
    dir: PathBuf,
    stem: String,
    suffix: String,
}

/// An archive found in the log directory.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Archive {
    pub(crate) path: PathBuf,
    pub(crate) period: Option<String>,
    pub(crate) index: usize,
}

impl Archive {
    /// Order from the oldest to the newest archive.
    pub(crate) fn by_age(a: &Archive, b: &Archive) -> Ordering {
        a.period
            .cmp(&b.period)
            .then_with(|| b.index.cmp(&a.index))
    }
}

impl LogNaming {
    pub(crate) fn new(dir: PathBuf, stem: String, suffix: String) -> Self {
        Self { dir, stem, suffix }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.stem, self.suffix))
    }

    pub(crate) fn archive_path(&self, period: Option<&str>, index: usize) -> PathBuf {
        let (stem, suffix) = (&self.stem, &self.suffix);
        match period {
            Some(period) => self.dir.join(format!("{stem}.{period}.{index}.{suffix}")),
            None => self.dir.join(format!("{stem}.{index}.{suffix}")),
        }
    }

    /// Recognize the archive name `filename`, returning its period and index.
    ///
    /// With a period format, the period must parse with it; without one, there is no period part.
    pub(crate) fn parse_archive(
        &self,
        filename: &str,
        period_format: Option<&str>,
    ) -> Option<(Option<String>, usize)> {
        let middle = filename
            .strip_prefix(self.stem.as_str())?
            .strip_prefix('.')?
            .strip_suffix(self.suffix.as_str())?
            .strip_suffix('.')?;

        let (period, index) = match period_format {
            Some(format) => {
                let (period, index) = middle.rsplit_once('.')?;
                jiff::fmt::strtime::parse(format, period).ok()?;
                (Some(period.to_string()), index)
            }
            None => (None, middle),
        };

        // reject signs and leading zeros that `parse` would accept
        if index.is_empty() || index.starts_with('0') || !index.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let index = index.parse().ok()?;
        Some((period, index))
    }

    /// List the archives in the log directory. Anything else in it is ignored.
    pub(crate) fn list_archives(&self, period_format: Option<&str>) -> io::Result<Vec<Archive>> {
        let mut archives = vec![];
        for entry in fs::read_dir(&self.dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }

            let filename = entry.file_name();
            let Some(filename) = filename.to_str() else {
                continue;
            };
            if let Some((period, index)) = self.parse_archive(filename, period_format) {
                archives.push(Archive {
                    path: entry.path(),
                    period,
                    index,
                });
            }
        }
        Ok(archives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURLY: Option<&str> = Some("%Y-%m-%d-%H");

    fn naming(suffix: &str) -> LogNaming {
        LogNaming::new(PathBuf::from("/var/log/svc"), "svc".into(), suffix.into())
    }

    #[test]
    fn test_paths() {
        let main = naming("log");
        assert_eq!(main.active_path(), Path::new("/var/log/svc/svc.log"));
        assert_eq!(
            main.archive_path(Some("2024-08-10-17"), 2),
            Path::new("/var/log/svc/svc.2024-08-10-17.2.log")
        );

        let warn = naming("log.wf");
        assert_eq!(warn.active_path(), Path::new("/var/log/svc/svc.log.wf"));
        assert_eq!(
            warn.archive_path(None, 1),
            Path::new("/var/log/svc/svc.1.log.wf")
        );
    }

    #[test]
    fn test_main_and_warn_archives_do_not_mix() {
        let main = naming("log");
        let warn = naming("log.wf");

        assert_eq!(main.parse_archive("svc.3.log", None), Some((None, 3)));
        assert_eq!(main.parse_archive("svc.3.log.wf", None), None);
        assert_eq!(warn.parse_archive("svc.3.log.wf", None), Some((None, 3)));
        assert_eq!(warn.parse_archive("svc.3.log", None), None);

        assert_eq!(
            warn.parse_archive("svc.2024-08-10-17.1.log.wf", HOURLY),
            Some((Some("2024-08-10-17".to_string()), 1))
        );
        assert_eq!(main.parse_archive("svc.2024-08-10-17.1.log.wf", HOURLY), None);
    }

    #[test]
    fn test_foreign_names_are_not_archives() {
        let main = naming("log");
        for name in [
            "svc.log",
            "svc.log.wf",
            "svclog",
            "svc..log",
            "svc.0.log",
            "svc.01.log",
            "svc.+1.log",
            "svc.db.log",
            "svc-other.1.log",
            "svc.1.log.bak",
            "notes.txt",
        ] {
            assert_eq!(main.parse_archive(name, None), None, "{name}");
        }

        // a period that does not match the current rotation
        assert_eq!(main.parse_archive("svc.2024-08-10.1.log", HOURLY), None);
        assert_eq!(main.parse_archive("svc.db.1.log", HOURLY), None);
        // a dated archive is foreign without time rotation
        assert_eq!(main.parse_archive("svc.2024-08-10-17.1.log", None), None);
    }

    #[test]
    fn test_archives_order_by_age() {
        let archive = |period: &str, index| Archive {
            path: PathBuf::new(),
            period: Some(period.to_string()),
            index,
        };
        let mut archives = vec![
            archive("2024-08-11", 1),
            archive("2024-08-10", 1),
            archive("2024-08-11", 2),
            archive("2024-08-10", 2),
        ];
        archives.sort_by(Archive::by_age);

        let order = archives
            .iter()
            .map(|a| (a.period.as_deref().unwrap(), a.index))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                ("2024-08-10", 2),
                ("2024-08-10", 1),
                ("2024-08-11", 2),
                ("2024-08-11", 1),
            ]
        );
    }
}
