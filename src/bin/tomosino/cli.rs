/// Command line interface for `tomosino` executable
#[derive(clap::Parser, Debug, Clone)]
#[clap(
    name = "tomosino",
    about = "Inspect tomotherapy sinograms: crop, unshuffle, histogram, modulation factor",
)]
pub (super) struct Cli {
    /// TOML file with default settings (bins, policy, scale, crop)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Only analyse projections in this range, e.g. `51..102`
    #[clap(short, long, global = true, value_parser = parse_range::<usize>)]
    pub projections: Option<Range<usize>>,

    #[clap(subcommand)]
    pub (super) command: Command,
}

#[derive(clap::Args, Debug, Clone)]
pub (super) struct Inputs {
    /// Sinogram files: RayStation CSV exports or Accuray BIN files
    #[clap(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub (super) enum Command {

    /// Describe each sinogram
    Info {
        #[clap(flatten)]
        inputs: Inputs,
    },

    /// Remove leaves which never open, keeping the MLC symmetric
    Crop {
        /// Write the cropped sinograms as BIN to this directory
        #[clap(short, long)]
        out: Option<PathBuf>,

        #[clap(flatten)]
        inputs: Inputs,
    },

    /// Render each sinogram as a PNG image
    Png {
        /// Directory where images are written
        #[clap(short, long)]
        out: PathBuf,

        /// Pixels per leaf and per projection
        #[clap(short, long)]
        scale: Option<u32>,

        /// Render all 64 leaves
        #[clap(long)]
        no_crop: bool,

        #[clap(flatten)]
        inputs: Inputs,
    },

    /// Render the leaf-open-times at each of the 51 gantry angles
    Unshuffle {
        /// Directory where images are written
        #[clap(short, long)]
        out: PathBuf,

        #[clap(flatten)]
        inputs: Inputs,
    },

    /// Histogram of leaf-open-times
    Histogram {
        /// Number of bins
        #[clap(short, long)]
        bins: Option<usize>,

        /// Which open-times are counted
        #[clap(long, value_enum)]
        policy: Option<Policy>,

        /// Also draw the histograms as PNG in this directory
        #[clap(short, long)]
        out: Option<PathBuf>,

        #[clap(flatten)]
        inputs: Inputs,
    },

    /// Maximum over mean of the open leaf-open-times
    Modulation {
        #[clap(flatten)]
        inputs: Inputs,
    },
}

impl Command {
    pub (super) fn files(&self) -> &[PathBuf] {
        use Command::*;
        match self {
            Info       { inputs, .. } |
            Crop       { inputs, .. } |
            Png        { inputs, .. } |
            Unshuffle  { inputs, .. } |
            Histogram  { inputs, .. } |
            Modulation { inputs, .. } => &inputs.files,
        }
    }

    /// Directory to which this command writes, if any
    pub (super) fn out(&self) -> Option<&Path> {
        use Command::*;
        match self {
            Png       { out, .. } |
            Unshuffle { out, .. } => Some(out.as_path()),
            Crop      { out, .. } |
            Histogram { out, .. } => out.as_deref(),
            Info { .. } | Modulation { .. } => None,
        }
    }
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::{
    ops::Range,
    path::{Path, PathBuf},
};
use tomosino::{utils::parse_range, Policy};
