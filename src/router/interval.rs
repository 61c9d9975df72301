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

use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::ErrorKind;
use crate::append::file::Rotation;

/// How often a log file is rolled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollInterval {
    /// `M`: every minute.
    Minute,
    /// `H`: every hour.
    Hour,
    /// `D`: every day.
    Day,
    /// `MIDNIGHT`: every day, at local midnight.
    Midnight,
}

impl RollInterval {
    /// Return the canonical code of the interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            RollInterval::Minute => "M",
            RollInterval::Hour => "H",
            RollInterval::Day => "D",
            RollInterval::Midnight => "MIDNIGHT",
        }
    }

    /// The file rotation performing this interval.
    ///
    /// Days always start at local midnight, so `Day` and `Midnight` share a rotation.
    pub fn rotation(&self) -> Rotation {
        match self {
            RollInterval::Minute => Rotation::Minutely,
            RollInterval::Hour => Rotation::Hourly,
            RollInterval::Day | RollInterval::Midnight => Rotation::Daily,
        }
    }
}

impl fmt::Display for RollInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RollInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<RollInterval, Self::Err> {
        const ALL: [RollInterval; 4] = [
            RollInterval::Minute,
            RollInterval::Hour,
            RollInterval::Day,
            RollInterval::Midnight,
        ];

        ALL.into_iter()
            .find(|interval| s.eq_ignore_ascii_case(interval.as_str()))
            .ok_or_else(|| {
                Error::with_kind(
                    ErrorKind::InvalidRotationInterval,
                    "unknown rotation interval",
                )
                .with_context("when", s)
                .with_context("expected", "M, H, D or MIDNIGHT")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("m".parse::<RollInterval>().unwrap(), RollInterval::Minute);
        assert_eq!("H".parse::<RollInterval>().unwrap(), RollInterval::Hour);
        assert_eq!("d".parse::<RollInterval>().unwrap(), RollInterval::Day);
        assert_eq!(
            "Midnight".parse::<RollInterval>().unwrap(),
            RollInterval::Midnight
        );
    }

    #[test]
    fn test_unknown_interval_is_rejected() {
        for input in ["", "W", "S", "hourly", " H"] {
            let err = input.parse::<RollInterval>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRotationInterval, "{input:?}");
        }
    }

    #[test]
    fn test_day_and_midnight_roll_daily() {
        assert_eq!(RollInterval::Day.rotation(), Rotation::Daily);
        assert_eq!(RollInterval::Midnight.rotation(), Rotation::Daily);
        assert_eq!(RollInterval::Minute.rotation(), Rotation::Minutely);
        assert_eq!(RollInterval::Hour.rotation(), Rotation::Hourly);
    }
}
