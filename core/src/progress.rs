//! Progress Reporter

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Thread-safe work counter shown as a terminal progress bar.
pub struct ProgressReporter {
    /// The progress bar. Hidden in quiet mode.
    bar: ProgressBar,

    /// Work completed so far.
    work_done: AtomicU64,

    /// Total amount of work.
    total_work: u64,

    /// Time the reporter was created.
    start_time: Instant,
}

impl ProgressReporter {
    /// Create a new `ProgressReporter`.
    ///
    /// * `total_work` - Total units of work.
    /// * `title`      - Message shown next to the bar.
    /// * `quiet`      - Hide the progress bar. Work is still counted.
    pub fn new(total_work: u64, title: &str, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::with_draw_target(Some(total_work), ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new(total_work)
        };
        bar.set_style(
            ProgressStyle::with_template(
                "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(title.to_string());

        Self {
            bar,
            work_done: AtomicU64::new(0),
            total_work,
            start_time: Instant::now(),
        }
    }

    /// Records completed work.
    ///
    /// * `n` - Units of work completed.
    pub fn update(&self, n: u64) {
        if n == 0 {
            return;
        }
        self.work_done.fetch_add(n, Ordering::AcqRel);
        self.bar.inc(n);
    }

    /// Returns the units of work completed so far.
    pub fn completed(&self) -> u64 {
        self.work_done.load(Ordering::Acquire)
    }

    /// Returns the total units of work.
    pub fn total(&self) -> u64 {
        self.total_work
    }

    /// Returns seconds elapsed since the reporter was created.
    pub fn elapsed_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Finishes the progress bar.
    pub fn done(&self) {
        let done = self.completed();
        if done != self.total_work {
            warn!(
                "Progress finished with {} of {} units of work",
                done, self.total_work
            );
        }
        self.bar.finish();
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
