// This file is part of Searchcost.
// Copyright © 2025 The Searchcost developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Progress reporting for long computations.
use std::borrow::Cow;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::{log_enabled, Level};

/// Interval when spinners are automatically ticked.
const UPDATE_MS: Duration = Duration::from_millis(1000);

fn style(template: &str, default: fn() -> ProgressStyle) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| default())
}

/// A progress bar, hidden when the `Info` log level is disabled.
#[derive(Debug, Clone)]
pub struct SearchProgressBar(ProgressBar);

impl SearchProgressBar {
    /// Returns a [SearchProgressBar] of given length.
    pub fn new(length: usize) -> Self {
        let bp = if log_enabled!(Level::Info) {
            ProgressBar::new(length as u64)
        } else {
            ProgressBar::hidden()
        };
        bp.set_style(style("{bar:60} {pos}/{len} ETA: {eta}", ProgressStyle::default_bar));
        SearchProgressBar(bp)
    }

    /// Adds a message to the [SearchProgressBar].
    pub fn with_message(self, msg: impl Into<Cow<'static, str>>) -> Self {
        let bp = self.0.with_message(msg);
        bp.set_style(style(
            "{bar:40} {msg} {pos}/{len} ({eta})",
            ProgressStyle::default_bar,
        ));
        SearchProgressBar(bp)
    }

    /// Sets a message to the [SearchProgressBar].
    pub fn set_message(&self, msg: impl Into<Cow<'static, str>>) {
        self.0.set_message(msg);
    }

    /// Increments the progress bar by one.
    pub fn inc(&self) {
        self.0.inc(1);
    }

    /// Sets the progress bar to finished.
    pub fn finish(&self) {
        self.0.finish_and_clear();
    }
}

/// A spinner.
#[derive(Debug)]
pub struct Spinner(ProgressBar);

impl Spinner {
    /// Starts a [Spinner] with the given message.
    pub fn new(msg: &str) -> Self {
        let bp = if log_enabled!(Level::Info) {
            ProgressBar::new(1).with_message(msg.to_owned())
        } else {
            ProgressBar::hidden()
        };
        bp.set_style(style("{spinner} {msg}", ProgressStyle::default_spinner));
        bp.enable_steady_tick(UPDATE_MS);
        Spinner(bp)
    }

    /// Sets the spinner to finished.
    pub fn finish(&mut self) {
        self.0.finish_and_clear();
    }
}
