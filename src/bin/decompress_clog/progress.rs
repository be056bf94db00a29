//! Utilities for displaying a progress monitor while `.clog` files are decompressed
//!
//! This implementation relies heavily on the `indicatif` crate, see <https://docs.rs/indicatif>

use std::io::Read;
use std::path::Path;

use indicatif::{HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

/// A generic wrapper around a reader that keeps track of how many bytes have been read
/// from the total.
///
/// The bar is drawn on stderr, and only if a person is watching it.
pub struct ProgressMonitor<R: Read> {
    /// The total amount that the reader will read
    pub total: u64,
    /// Amount read so far
    pub read: u64,
    /// The internal reader
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    /// Create a new progress monitor for the file at `path`, initialized with zero bytes read
    pub fn new(reader: R, size: u64, path: &Path) -> Self {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{msg} {wide_bar} {binary_bytes}/{binary_total_bytes} [est. {eta} remaining]",
        )
        .unwrap();
        let progress_bar = ProgressBar::new(size)
            .with_style(style)
            .with_message(path.display().to_string());
        if console::user_attended_stderr() {
            // The default is 20hz, this reduces rendering overhead
            progress_bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
        } else {
            progress_bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self {
            reader,
            total: size,
            read: 0,
            progress_bar,
        }
    }

    /// This function is called whenever a new read is made, and is responsible for updating the UI
    fn update(&mut self, delta: u64) {
        self.progress_bar.inc(delta);
        if self.read >= self.total && !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
            debug!(
                "read {} in {}",
                fmt_size(self.total as f64),
                HumanDuration(self.progress_bar.elapsed()),
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        // Fall back on the internally stored reader, but filch the number of bytes read
        // along the way
        let out = self.reader.read(buf)?;
        self.read += out as u64;
        self.update(out as u64);
        Ok(out)
    }
}

impl<R: Read> Drop for ProgressMonitor<R> {
    fn drop(&mut self) {
        // Decoding can stop before the whole file was read
        if !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
        }
    }
}

/// Converts a quantity in bytes to a human readable size, "GiB, MiB, KiB, etc"
pub fn fmt_size(size_in_bytes: f64) -> String {
    let units = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    if size_in_bytes < 1.0 {
        return format!("{:.0}{}", size_in_bytes, units[0]);
    }
    let order_of_magnitude = (size_in_bytes).log10() as usize;
    // Overflow to the next order of magnitude if there are more than `upper_bound` figures
    // before the decimal
    let upper_bound = 3;
    let unit_index = (order_of_magnitude / upper_bound).clamp(0, units.len() - 1);
    let decimal = size_in_bytes / 2_f64.powi((unit_index * 10) as i32);
    // Only use a decimal if displaying a unit larger than a byte
    if unit_index > 0 {
        format!("{:.2}{}", decimal, units[unit_index])
    } else {
        format!("{:.0}{}", decimal, units[unit_index])
    }
}
