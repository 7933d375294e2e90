//! Terminal output for command results
//!
//! Status lines and the run summary go to stdout. Errors are rendered for
//! stderr by [`errors::ErrorFormatter`].

pub mod colors;
pub mod errors;

use depinfo_resolver::PipelineSummary;

use colors::{Palette, Tone};

/// Prints status lines styled for stdout
pub struct OutputHandler {
    palette: Palette,
}

impl OutputHandler {
    pub fn new() -> Self {
        Self::with_palette(Palette::for_stdout())
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self { palette }
    }

    /// Secondary detail, muted
    pub fn info(&self, message: &str) {
        println!("{}", self.palette.paint(Tone::Muted, message));
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", self.palette.paint(Tone::Good, "✓"), message);
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", self.palette.paint(Tone::Caution, "⚠"), message);
    }

    /// Announce a stage of a command
    pub fn step(&self, emoji: &str, message: &str) {
        println!("{} {}", emoji, message);
    }

    /// Print the counters of a report run
    pub fn summary(&self, summary: &PipelineSummary) {
        println!("{}", self.summary_line(summary));
    }

    fn summary_line(&self, summary: &PipelineSummary) -> String {
        let counts = [
            (summary.resolved, "resolved", Tone::Good),
            (summary.not_found, "not on the registry", Tone::Caution),
            (summary.dropped, "dropped", Tone::Bad),
        ];

        let mut parts = vec![format!("{} processed", summary.processed)];
        for (count, label, tone) in counts {
            let text = format!("{} {}", count, label);
            // zero counts stay plain
            parts.push(if count == 0 { text } else { self.palette.paint(tone, &text) });
        }
        parts.push(format!("{} package variants", summary.variants));

        format!(
            "{} {}",
            parts.join(", "),
            self.palette.paint(
                Tone::Muted,
                &format!("({:.1}s)", summary.elapsed_ms as f64 / 1000.0)
            )
        )
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
