/// Progress bar and failure bookkeeping for `tomosino` executable
pub (super) struct Progress {
    files_bar: ProgressBar,
    n_files_given: usize,
    failed_files: Vec<PathBuf>,
}

impl Progress {

    /// The bar is only drawn when there is more than one file to process.
    pub (super) fn new(infiles: &[PathBuf]) -> Result<Self, TemplateError> {
        let files_bar = if infiles.len() > 1 {
            let bar = ProgressBar::new(infiles.len() as u64);
            bar.set_style(ProgressStyle::default_bar()
                          .template("Processing file: {msg}\n[{elapsed_precise}] {wide_bar} {pos}/{len} ({eta_precise})")?
            );
            bar.tick();
            bar
        } else {
            ProgressBar::hidden()
        };
        Ok(Self { files_bar, n_files_given: infiles.len(), failed_files: vec![] })
    }

    pub (super) fn file_start(&self, file: &Path) {
        self.files_bar.set_message(file.display().to_string());
    }

    /// Print without mangling the bar
    pub (super) fn println(&self, text: &str) {
        self.files_bar.suspend(|| println!("{text}"));
    }

    pub (super) fn file_done<T>(&mut self, file: &Path, result: &Result<T, tomosino::Error>) {
        if let Err(e) = result {
            self.files_bar.suspend(|| eprintln!("ERROR: {}: {e}", file.display()));
            self.failed_files.push(file.to_path_buf());
        }
        self.files_bar.inc(1);
    }

    /// Number of files which could not be processed
    pub (super) fn final_report(&self) -> usize {
        self.files_bar.finish_with_message("<finished processing files>");
        let n_failed = self.failed_files.len();
        if n_failed > 0 {
            eprintln!("{n_failed} / {} files failed:", self.n_files_given);
            for file in &self.failed_files {
                eprintln!("  {}", file.display());
            }
        }
        n_failed
    }
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::path::{Path, PathBuf};
use indicatif::{style::TemplateError, ProgressBar, ProgressStyle};
