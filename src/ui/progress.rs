use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for one translation pass.
///
/// Hidden when `visible` is false or output is quiet. Clears itself when
/// dropped.
pub struct PassBar {
    progress_bar: ProgressBar,
}

impl PassBar {
    #[allow(clippy::unwrap_used)]
    pub fn new(label: &str, len: usize, visible: bool) -> Self {
        if !visible || crate::output::is_quiet() {
            return Self {
                progress_bar: ProgressBar::hidden(),
            };
        }

        let progress_bar = ProgressBar::new(len as u64);
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:>12} [{bar:30}] {pos}/{len}")
                .unwrap()
                .progress_chars("=> "),
        );
        progress_bar.set_message(label.to_string());

        Self { progress_bar }
    }

    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Drop for PassBar {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
