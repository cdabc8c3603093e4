//! Terminal presentation: loading spinner, saved result, error line.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use salon_core::{ImagePayload, Presenter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Where a generated image is written.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    /// Explicit file path; wins over `dir`
    pub path: Option<PathBuf>,
    /// Directory for auto-named files
    pub dir: PathBuf,
}

impl OutputTarget {
    /// Resolve the destination, naming files `salon_<unix-millis>.<ext>`.
    pub fn resolve(&self, image: &ImagePayload) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.dir
            .join(format!("salon_{millis}.{}", image.extension()))
    }
}

/// Presenter for the flag-based and interactive CLI.
///
/// Progress and messages go to stderr; the saved file path goes to stdout
/// so it can be piped.
pub struct TerminalPresenter {
    output: OutputTarget,
    spinner: Mutex<Option<ProgressBar>>,
    saved: Mutex<Option<PathBuf>>,
}

impl TerminalPresenter {
    pub fn new(output: OutputTarget) -> Self {
        Self {
            output,
            spinner: Mutex::new(None),
            saved: Mutex::new(None),
        }
    }

    /// Path of the image saved by the most recent successful attempt.
    pub fn saved_path(&self) -> Option<PathBuf> {
        self.saved.lock().ok().and_then(|s| s.clone())
    }

    fn save(&self, image: &ImagePayload) -> anyhow::Result<PathBuf> {
        let bytes = image
            .decode()
            .map_err(|e| anyhow::anyhow!("generated image is not valid base64: {e}"))?;
        let path = self.output.resolve(image);
        write_image(&path, &bytes)?;
        Ok(path)
    }
}

fn write_image(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Generating your new look...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

impl Presenter for TerminalPresenter {
    fn show_loading(&self, loading: bool) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };
        if loading {
            *spinner = Some(create_spinner());
        } else if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn show_result(&self, image: &ImagePayload) {
        match self.save(image) {
            Ok(path) => {
                let green = Style::new().for_stderr().green();
                eprintln!(
                    "  {} Try-on image saved to {}",
                    green.apply_to("✓"),
                    path.display()
                );
                println!("{}", path.display());
                tracing::info!("Saved {} result to {:?}", image.mime_type, path);
                if let Ok(mut saved) = self.saved.lock() {
                    *saved = Some(path);
                }
            }
            Err(e) => {
                let red = Style::new().for_stderr().red();
                eprintln!("  {} Could not save image: {e}", red.apply_to("✗"));
            }
        }
    }

    fn show_error(&self, message: &str) {
        let red = Style::new().for_stderr().red();
        eprintln!("  {} {}", red.apply_to("✗ Error:"), message);
    }

    fn prompt_credential(&self) {
        let warn = Style::new().for_stderr().yellow();
        eprintln!(
            "  {}",
            warn.apply_to("No access code set. Run `salon token set` to enter one.")
        );
    }
}
