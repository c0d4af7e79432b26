//! Text progress bars drawn through an [`Output`].
//!
//! A [`ProgressBar`] tracks steps; its [`ProgressBarFormatter`] decides when
//! to redraw and renders each frame from a format string with the
//! placeholders `%bar%`, `%progress%`, `%maxSteps%` and `%timeRemaining%`.
//!
//! ```rust
//! use tagtint::{OutputMode, ProgressBar, ProgressBarFormatter, StreamOutput};
//! use tagtint_markup::Registry;
//!
//! let mut output = StreamOutput::new(Vec::new(), &b""[..], Registry::new(), OutputMode::Text);
//! {
//!     let formatter = ProgressBarFormatter::new(&mut output).format("%progress%/%maxSteps%");
//!     let mut bar = ProgressBar::new(4, formatter).unwrap();
//!     bar.advance(1).unwrap();
//!     bar.finish().unwrap();
//!     assert!(bar.is_complete());
//! }
//! let (written, _) = output.into_parts();
//! assert!(String::from_utf8(written).unwrap().ends_with("4/4\n"));
//! ```

use std::time::Instant;

use crate::error::{ProgressError, Result};
use crate::output::Output;

/// Frame layout used when no format is given.
pub const DEFAULT_FORMAT: &str = "%bar% %progress%/%maxSteps%\nTime remaining: %timeRemaining%";

/// Total bar width, brackets included.
pub const BAR_WIDTH: usize = 80;

const ERASE_LINE: &str = "\x1b[2K\x1b[0G";

/// Renders progress updates to an output.
pub struct ProgressBarFormatter<'o> {
    output: &'o mut dyn Output,
    format: String,
    progress_char: char,
    remaining_char: char,
    redraw_frequency: usize,
    started: Instant,
    first_output: bool,
}

impl<'o> ProgressBarFormatter<'o> {
    pub fn new(output: &'o mut dyn Output) -> Self {
        Self {
            output,
            format: DEFAULT_FORMAT.to_string(),
            progress_char: '=',
            remaining_char: '-',
            redraw_frequency: 1,
            started: Instant::now(),
            first_output: true,
        }
    }

    /// Sets the frame format. The format may contain markup tags.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn progress_char(mut self, c: char) -> Self {
        self.progress_char = c;
        self
    }

    pub fn remaining_char(mut self, c: char) -> Self {
        self.remaining_char = c;
        self
    }

    /// Redraw only when progress crosses a multiple of `frequency` steps.
    /// Zero is treated as one.
    pub fn redraw_frequency(mut self, frequency: usize) -> Self {
        self.redraw_frequency = frequency.max(1);
        self
    }

    /// Overrides the instant time estimates are measured from.
    pub fn started_at(mut self, started: Instant) -> Self {
        self.started = started;
        self
    }

    /// Handles a change of progress from `prev` to `curr`.
    pub fn on_progress(&mut self, prev: usize, curr: usize, max: usize) -> Result<()> {
        let freq = self.redraw_frequency;
        if prev == max || prev / freq != curr / freq {
            let frame = self.render(curr, max);
            self.output.write(&frame)?;
        }

        if curr == max {
            self.output.writeln("")?;
        }
        Ok(())
    }

    fn render(&mut self, progress: usize, max: usize) -> String {
        let elapsed = self.started.elapsed().as_secs();
        let frame = self
            .format
            .replace("%progress%", &progress.to_string())
            .replace("%maxSteps%", &max.to_string())
            .replace("%bar%", &self.bar(progress, max))
            .replace("%timeRemaining%", &time_remaining(elapsed, progress, max));

        if self.first_output {
            self.first_output = false;
            return frame;
        }

        let lines = self.format.matches('\n').count();
        let mut erase = String::from(ERASE_LINE);
        if lines > 0 {
            erase.push_str(&format!("\x1b[{}A\x1b[2K", lines));
        }
        erase + &frame
    }

    fn bar(&self, progress: usize, max: usize) -> String {
        let cells = BAR_WIDTH - 2;
        let mut bar = String::with_capacity(BAR_WIDTH);
        bar.push('[');

        if progress >= max {
            bar.extend(std::iter::repeat_n(self.progress_char, cells));
        } else {
            let mut marker = format!("{}%", scale(progress, max, 100));
            while marker.len() < 3 {
                marker.push(self.remaining_char);
            }
            let filled = scale(progress, max, cells).saturating_sub(marker.len());
            bar.extend(std::iter::repeat_n(self.progress_char, filled));
            bar.push_str(&marker);
            let remaining = cells.saturating_sub(filled + marker.len());
            bar.extend(std::iter::repeat_n(self.remaining_char, remaining));
        }

        bar.push(']');
        bar
    }
}

/// `progress * width / max`, rounded down. Widened so huge step counts
/// cannot overflow; callers guarantee `progress < max`.
fn scale(progress: usize, max: usize, width: usize) -> usize {
    (progress as u128 * width as u128 / max as u128) as usize
}

fn time_remaining(elapsed_secs: u64, progress: usize, max: usize) -> String {
    if progress == 0 {
        return "Estimating...".to_string();
    }
    if progress >= max {
        return "Complete".to_string();
    }
    let elapsed = elapsed_secs as f64;
    let remaining = (elapsed * max as f64 / progress as f64 - elapsed).round();
    format_time_remaining(remaining.max(0.0) as u64)
}

/// Describes a number of seconds in the coarsest whole unit.
///
/// ```rust
/// use tagtint::format_time_remaining;
///
/// assert_eq!(format_time_remaining(0), "less than 1 sec");
/// assert_eq!(format_time_remaining(150), "2 mins");
/// ```
pub fn format_time_remaining(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match seconds {
        0 => "less than 1 sec".to_string(),
        1 => "1 sec".to_string(),
        s if s < MINUTE => format!("{} secs", s),
        s if s < 2 * MINUTE => "1 min".to_string(),
        s if s < HOUR => format!("{} mins", s / MINUTE),
        s if s < 2 * HOUR => "1 hr".to_string(),
        s if s < DAY => format!("{} hrs", s / HOUR),
        s if s < 2 * DAY => "1 day".to_string(),
        s => format!("{} days", s / DAY),
    }
}

/// A bounded step counter that redraws through its formatter.
pub struct ProgressBar<'o> {
    max_steps: usize,
    progress: usize,
    formatter: ProgressBarFormatter<'o>,
}

impl<'o> ProgressBar<'o> {
    pub fn new(
        max_steps: usize,
        formatter: ProgressBarFormatter<'o>,
    ) -> std::result::Result<Self, ProgressError> {
        if max_steps == 0 {
            return Err(ProgressError::InvalidMaxSteps);
        }
        Ok(Self {
            max_steps,
            progress: 0,
            formatter,
        })
    }

    pub fn advance(&mut self, step: usize) -> Result<()> {
        self.set_progress(self.progress.saturating_add(step))
    }

    pub fn finish(&mut self) -> Result<()> {
        self.set_progress(self.max_steps)
    }

    pub fn is_complete(&self) -> bool {
        self.progress == self.max_steps
    }

    /// Sets the progress, clamped to `max_steps`.
    pub fn set_progress(&mut self, progress: usize) -> Result<()> {
        let prev = self.progress;
        self.progress = progress.min(self.max_steps);
        tracing::trace!(prev, curr = self.progress, max = self.max_steps, "progress");
        self.formatter
            .on_progress(prev, self.progress, self.max_steps)
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{OutputMode, StreamOutput};
    use tagtint_markup::Registry;

    type Buffer = StreamOutput<Vec<u8>, &'static [u8]>;

    fn buffer() -> Buffer {
        StreamOutput::new(Vec::new(), &b""[..], Registry::new(), OutputMode::Text)
    }

    fn written(output: Buffer) -> String {
        String::from_utf8(output.into_parts().0).unwrap()
    }

    mod bar_rendering {
        use super::*;

        #[test]
        fn empty_bar_has_marker_then_remaining() {
            let mut output = buffer();
            let formatter = ProgressBarFormatter::new(&mut output);
            let bar = formatter.bar(0, 10);
            assert_eq!(bar.chars().count(), BAR_WIDTH);
            assert_eq!(bar, format!("[0%-{}]", "-".repeat(75)));
        }

        #[test]
        fn half_bar() {
            let mut output = buffer();
            let formatter = ProgressBarFormatter::new(&mut output);
            let bar = formatter.bar(5, 10);
            assert_eq!(bar, format!("[{}50%{}]", "=".repeat(36), "-".repeat(39)));
        }

        #[test]
        fn complete_bar_has_no_marker() {
            let mut output = buffer();
            let formatter = ProgressBarFormatter::new(&mut output);
            assert_eq!(formatter.bar(10, 10), format!("[{}]", "=".repeat(78)));
        }

        #[test]
        fn custom_chars() {
            let mut output = buffer();
            let formatter = ProgressBarFormatter::new(&mut output)
                .progress_char('#')
                .remaining_char('.');
            let bar = formatter.bar(1, 2);
            assert_eq!(bar, format!("[{}50%{}]", "#".repeat(36), ".".repeat(39)));
        }

        #[test]
        fn huge_step_counts_do_not_overflow() {
            let mut output = buffer();
            {
                let formatter = ProgressBarFormatter::new(&mut output).format("%bar%");
                let mut bar = ProgressBar::new(usize::MAX, formatter).unwrap();
                bar.set_progress(usize::MAX / 2).unwrap();
                bar.advance(usize::MAX).unwrap();
                assert!(bar.is_complete());
            }
            let text = written(output);
            assert!(text.starts_with(&format!("[{}49%{}]", "=".repeat(35), "-".repeat(40))));
            assert!(text.ends_with(&format!("[{}]\n", "=".repeat(78))));
        }

        #[test]
        fn every_bar_is_full_width() {
            let mut output = buffer();
            let formatter = ProgressBarFormatter::new(&mut output);
            for progress in 0..=7 {
                assert_eq!(formatter.bar(progress, 7).chars().count(), BAR_WIDTH);
            }
        }
    }

    mod drawing {
        use super::*;

        #[test]
        fn first_frame_has_no_erase_sequence() {
            let mut output = buffer();
            {
                let formatter = ProgressBarFormatter::new(&mut output).format("%progress%/%maxSteps%");
                let mut bar = ProgressBar::new(3, formatter).unwrap();
                bar.advance(1).unwrap();
            }
            assert_eq!(written(output), "1/3");
        }

        #[test]
        fn later_frames_erase_the_previous_one() {
            let mut output = buffer();
            {
                let formatter = ProgressBarFormatter::new(&mut output).format("%progress%/%maxSteps%");
                let mut bar = ProgressBar::new(3, formatter).unwrap();
                bar.advance(1).unwrap();
                bar.advance(1).unwrap();
            }
            assert_eq!(written(output), "1/3\x1b[2K\x1b[0G2/3");
        }

        #[test]
        fn multi_line_formats_move_the_cursor_up() {
            let mut output = buffer();
            {
                let formatter = ProgressBarFormatter::new(&mut output).format("%progress%\n%maxSteps%");
                let mut bar = ProgressBar::new(3, formatter).unwrap();
                bar.advance(1).unwrap();
                bar.advance(1).unwrap();
            }
            assert_eq!(written(output), "1\n3\x1b[2K\x1b[0G\x1b[1A\x1b[2K2\n3");
        }

        #[test]
        fn finishing_adds_a_newline() {
            let mut output = buffer();
            {
                let formatter = ProgressBarFormatter::new(&mut output).format("%progress%");
                let mut bar = ProgressBar::new(2, formatter).unwrap();
                bar.finish().unwrap();
            }
            assert_eq!(written(output), "2\n");
        }

        #[test]
        fn redraw_frequency_skips_intermediate_steps() {
            let mut output = buffer();
            {
                let formatter = ProgressBarFormatter::new(&mut output)
                    .format("%progress%")
                    .redraw_frequency(5);
                let mut bar = ProgressBar::new(10, formatter).unwrap();
                for _ in 0..10 {
                    bar.advance(1).unwrap();
                }
            }
            assert_eq!(written(output), "5\x1b[2K\x1b[0G10\n");
        }

        #[test]
        fn format_markup_is_compiled() {
            let mut output = StreamOutput::new(
                Vec::new(),
                &b""[..],
                Registry::new(),
                OutputMode::Term,
            );
            {
                let formatter =
                    ProgressBarFormatter::new(&mut output).format("<info>%progress%</info>");
                let mut bar = ProgressBar::new(2, formatter).unwrap();
                bar.advance(1).unwrap();
            }
            assert_eq!(written(output), "\x1b[32m1\x1b[0m");
        }

        #[test]
        fn default_format_at_completion() {
            let mut output = buffer();
            {
                let formatter = ProgressBarFormatter::new(&mut output);
                let mut bar = ProgressBar::new(4, formatter).unwrap();
                bar.finish().unwrap();
            }
            assert_eq!(
                written(output),
                format!("[{}] 4/4\nTime remaining: Complete\n", "=".repeat(78))
            );
        }
    }

    mod progress_bar {
        use super::*;

        #[test]
        fn zero_max_steps_is_rejected() {
            let mut output = buffer();
            let formatter = ProgressBarFormatter::new(&mut output);
            assert_eq!(
                ProgressBar::new(0, formatter).err(),
                Some(ProgressError::InvalidMaxSteps)
            );
        }

        #[test]
        fn progress_is_clamped() {
            let mut output = buffer();
            let formatter = ProgressBarFormatter::new(&mut output).format("");
            let mut bar = ProgressBar::new(5, formatter).unwrap();
            bar.advance(3).unwrap();
            assert_eq!(bar.progress(), 3);
            assert!(!bar.is_complete());
            bar.advance(10).unwrap();
            assert_eq!(bar.progress(), 5);
            assert!(bar.is_complete());
            assert_eq!(bar.max_steps(), 5);
        }

        #[test]
        fn set_progress_can_go_backwards() {
            let mut output = buffer();
            let formatter = ProgressBarFormatter::new(&mut output).format("");
            let mut bar = ProgressBar::new(5, formatter).unwrap();
            bar.set_progress(4).unwrap();
            bar.set_progress(1).unwrap();
            assert_eq!(bar.progress(), 1);
        }
    }

    mod time {
        use super::*;

        #[test]
        fn buckets() {
            let cases = [
                (0, "less than 1 sec"),
                (1, "1 sec"),
                (2, "2 secs"),
                (59, "59 secs"),
                (60, "1 min"),
                (119, "1 min"),
                (120, "2 mins"),
                (3599, "59 mins"),
                (3600, "1 hr"),
                (7200, "2 hrs"),
                (86399, "23 hrs"),
                (86400, "1 day"),
                (172800, "2 days"),
                (864000, "10 days"),
            ];
            for (secs, expected) in cases {
                assert_eq!(format_time_remaining(secs), expected, "{} seconds", secs);
            }
        }

        #[test]
        fn estimate_edges() {
            assert_eq!(time_remaining(30, 0, 10), "Estimating...");
            assert_eq!(time_remaining(30, 10, 10), "Complete");
        }

        #[test]
        fn estimate_scales_elapsed_time() {
            // 10s for 1 of 4 steps leaves 30s.
            assert_eq!(time_remaining(10, 1, 4), "30 secs");
            // 60s for half the work leaves a minute.
            assert_eq!(time_remaining(60, 5, 10), "1 min");
        }
    }
}
