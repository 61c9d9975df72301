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

use jiff::Timestamp;
use jiff::ToSpan;
use jiff::Zoned;

/// Defines a fixed period for rolling of a log file.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Rotation {
    /// Roll over at the start of every minute.
    Minutely,
    /// Roll over at the start of every hour.
    Hourly,
    /// Roll over at 00:00 in the time zone of the clock.
    Daily,
    /// Never roll over on time.
    Never,
}

impl Rotation {
    /// The first rollover strictly after `now`, or `None` if there is none.
    pub(crate) fn next_rollover(&self, now: &Zoned) -> Option<Timestamp> {
        let next = match *self {
            Rotation::Minutely => now
                .with()
                .second(0)
                .subsec_nanosecond(0)
                .build()
                .and_then(|start| start.checked_add(1.minute())),
            Rotation::Hourly => now
                .with()
                .minute(0)
                .second(0)
                .subsec_nanosecond(0)
                .build()
                .and_then(|start| start.checked_add(1.hour())),
            Rotation::Daily => now.start_of_day().and_then(|start| start.tomorrow()),
            Rotation::Never => return None,
        };

        // an out of range date never rolls over
        next.ok().map(|next| next.timestamp())
    }

    /// The `strftime` format of the period part of archive names.
    ///
    /// Every format is zero padded from the most significant field down, so periods sort
    /// chronologically as strings.
    pub(crate) fn period_format(&self) -> Option<&'static str> {
        match *self {
            Rotation::Minutely => Some("%Y-%m-%d-%H-%M"),
            Rotation::Hourly => Some("%Y-%m-%d-%H"),
            Rotation::Daily => Some("%Y-%m-%d"),
            Rotation::Never => None,
        }
    }
}
