// ============================================================
// Layer 6 — Validation Progress Bar
// ============================================================
// Thin wrapper over indicatif showing utterances processed and the
// running averages:
//
//   Valid [#####-----] 384/1000 uttr [00:00:04] loss=2.31 accuracy=0.47
//
// Purely cosmetic: nothing reads it back. indicatif hides the bar
// on its own when stderr is not a terminal. Dropping the wrapper
// finishes the bar, so a panic mid-pass does not leave it half drawn.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{prefix} [{bar:30}] {pos}/{len} uttr [{elapsed_precise}] {msg}";

pub struct ValidProgress {
    bar: ProgressBar,
}

impl ValidProgress {
    /// A bar over `total_items` utterances.
    pub fn new(total_items: usize) -> Self {
        let bar = ProgressBar::new(total_items as u64);
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.set_prefix("Valid");
        Self { bar }
    }

    /// A bar that never draws.
    pub fn hidden() -> Self {
        Self { bar: ProgressBar::hidden() }
    }

    /// Count `items` more utterances and show the running averages.
    pub fn advance(&self, items: usize, avg_loss: f64, avg_accuracy: f64) {
        self.bar.inc(items as u64);
        self.bar
            .set_message(format!("loss={avg_loss:.2} accuracy={avg_accuracy:.2}"));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl Drop for ValidProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }
}
