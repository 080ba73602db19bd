mod cli;
mod progress;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => read_config_file(path)?,
        None       => Config::default(),
    };
    debug!("{config:?}");

    // Make sure that results can be written before starting to read anything
    if let Some(out) = args.command.out() {
        std::fs::create_dir_all(out)?;
        info!("Writing output to {}", out.display());
    }

    let files = args.command.files();
    let mut progress = Progress::new(files)?;
    let mut timing = timing::Progress::new();
    for file in files {
        progress.file_start(file);
        timing.start(&file.display().to_string());
        let result = io::read_sinogram(file)
            .map(|sinogram| match &args.projections {
                Some(range) => sinogram.select_projections(range.clone()),
                None        => sinogram,
            })
            .and_then(|sinogram| run(&args.command, &config, file, &sinogram));
        if let Ok(text) = &result { progress.println(text) }
        progress.file_done(file, &result);
        timing.done();
    }

    // --- Report any files that failed to be processed ------------------------------
    let n_failed = progress.final_report();
    if n_failed > 0 {
        return Err(format!("{n_failed} of {} files could not be processed", files.len()).into());
    }
    Ok(())
}

/// Apply `command` to one sinogram, returning the text to be shown to the user.
fn run(command: &Command, config: &Config, file: &Path, sinogram: &Sinogram) -> tomosino::Result<String> {
    let stem = file.file_stem().map_or("sinogram".into(), |s| s.to_string_lossy());
    let name = |dir: &Path, suffix: &str, extension: &str| dir.join(format!("{stem}{suffix}.{extension}"));
    let mut text = format!("{}\n", file.display());
    use Command::*;
    match command {

        Info { .. } => {
            let document = sinogram.document_id().unwrap_or("-");
            text += &format!("  document: {document}\n  {sinogram}");
        },

        Crop { out, .. } => {
            let cropped = sinogram.crop();
            text += &format!("  {cropped}\n  retained leaves: {:?}", sinogram.retained_leaves());
            if let Some(dir) = out {
                raw::write_sinogram(&cropped, &name(dir.as_path(), "_cropped", "bin"))?;
            }
        },

        Png { out, scale, no_crop, .. } => {
            let scale = scale.unwrap_or(config.scale);
            let path = name(out.as_path(), "", "png");
            if config.crop && !no_crop {
                export::to_png(&sinogram.crop(), &path, scale)?;
            } else {
                export::to_png(sinogram, &path, scale)?;
            }
            text += &format!("  -> {}", path.display());
        },

        Unshuffle { out, .. } => {
            let path = name(out.as_path(), "_unshuffled", "png");
            export::unshuffled_to_png(sinogram, &path, config.scale)?;
            for (angle, n) in sinogram.angles() {
                text += &format!("  {angle:6.2} deg: {n} projections\n");
            }
            text += &format!("  -> {}", path.display());
        },

        Histogram { bins, policy, out, .. } => {
            let histogram = sinogram.histogram(
                bins.unwrap_or(config.bins),
                policy.unwrap_or(config.policy),
            )?;
            text += &format!("{histogram}  {} values counted", group_digits(histogram.total()));
            if let Some(dir) = out {
                export::histogram_to_png(&histogram, &name(dir.as_path(), "_histogram", "png"))?;
            }
        },

        Modulation { .. } => {
            text += &format!("  modulation factor: {:.6}", sinogram.modulation_factor()?);
        },
    }
    Ok(text)
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::{error::Error, path::Path};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use tomosino::{
    config::{read_config_file, Config},
    export,
    io::{self, raw},
    utils::{group_digits, timing},
    Sinogram,
};
use cli::{Cli, Command};
use progress::Progress;
