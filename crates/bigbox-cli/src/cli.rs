//! Command-line arguments

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use bigbox_core::{FaceImage, FaceSet};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bigbox")]
#[command(
    about = "Pack box face photos into an atlas and render the textured box",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack the face images into one atlas PNG
    Atlas {
        #[command(flatten)]
        faces: FaceArgs,

        /// Output PNG
        #[arg(long)]
        out: PathBuf,

        /// Also write the face regions as RON
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Draw face borders and labels
        #[arg(long)]
        debug: bool,
    },
    /// Render the box headless to a PNG
    Render {
        #[command(flatten)]
        faces: FaceArgs,

        /// Output PNG
        #[arg(long)]
        out: PathBuf,

        #[arg(long, default_value_t = 512)]
        width: u32,

        #[arg(long, default_value_t = 512)]
        height: u32,

        /// Pitch in degrees (clamped to the box's range)
        #[arg(long, allow_hyphen_values = true)]
        angle_x: Option<f32>,

        /// Yaw in degrees
        #[arg(long, allow_hyphen_values = true)]
        angle_y: Option<f32>,

        #[arg(long)]
        zoom: Option<f32>,

        /// Frames to draw before capturing (auto-rotate advances per frame)
        #[arg(long, default_value_t = 1)]
        frames: u32,

        /// Renderer config (RON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Face image paths. Top and bottom go together.
#[derive(Args, Debug)]
pub struct FaceArgs {
    #[arg(long)]
    pub front: PathBuf,
    #[arg(long)]
    pub back: PathBuf,
    #[arg(long)]
    pub left: PathBuf,
    #[arg(long)]
    pub right: PathBuf,
    #[arg(long)]
    pub top: Option<PathBuf>,
    #[arg(long)]
    pub bottom: Option<PathBuf>,
}

impl FaceArgs {
    /// Decode the images into a face set.
    pub fn load(&self) -> Result<FaceSet> {
        let open = |path: &PathBuf| {
            FaceImage::open(path).with_context(|| format!("Failed to load {}", path.display()))
        };
        let front = open(&self.front)?;
        let back = open(&self.back)?;
        let left = open(&self.left)?;
        let right = open(&self.right)?;

        match (&self.top, &self.bottom) {
            (Some(top), Some(bottom)) => Ok(FaceSet::Full {
                front,
                back,
                top: open(top)?,
                bottom: open(bottom)?,
                left,
                right,
            }),
            (None, None) => Ok(FaceSet::Equatorial {
                front,
                back,
                left,
                right,
            }),
            _ => bail!("--top and --bottom must be given together"),
        }
    }
}
