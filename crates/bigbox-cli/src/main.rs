//! BigBox command-line tool

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use bigbox_core::AtlasBitmap;
use bigbox_renderer::{BoxRenderer, OffscreenTarget, RendererConfig};
use clap::Parser;

use cli::{Cli, Command, FaceArgs};

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bigbox_cli=info,bigbox_renderer=info,bigbox_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Command::Atlas {
            faces,
            out,
            layout,
            debug,
        } => build_atlas(&faces, &out, layout.as_deref(), debug),
        Command::Render {
            faces,
            out,
            width,
            height,
            angle_x,
            angle_y,
            zoom,
            frames,
            config,
        } => {
            let mut config = match config {
                Some(path) => RendererConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => RendererConfig::default(),
            };
            if let Some(angle) = angle_x {
                config.interaction.initial_angle_x = angle;
            }
            if let Some(angle) = angle_y {
                config.interaction.initial_angle_y = angle;
            }
            if let Some(zoom) = zoom {
                config.interaction.initial_zoom = zoom;
            }
            render(&faces, &out, width, height, frames, config)
        }
    }
}

fn build_atlas(faces: &FaceArgs, out: &Path, layout: Option<&Path>, debug: bool) -> Result<()> {
    let atlas = AtlasBitmap::from_face_set(faces.load()?, debug).context("Failed to build atlas")?;
    let (image, atlas_layout) = atlas.into_parts();

    image
        .save(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!("Wrote atlas {}x{} to {}", image.width(), image.height(), out.display());

    if let Some(path) = layout {
        atlas_layout
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote layout to {}", path.display());
    }
    Ok(())
}

fn render(
    faces: &FaceArgs,
    out: &Path,
    width: u32,
    height: u32,
    frames: u32,
    config: RendererConfig,
) -> Result<()> {
    let mut renderer = BoxRenderer::from_face_set(faces.load()?, config)?;
    let target = OffscreenTarget::new(width, height).context("Failed to create GPU device")?;
    target.attach(&mut renderer)?;

    let image = target.render_frames(&mut renderer, frames)?;
    let state = renderer.interaction_state();
    renderer.release();

    image
        .save(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!(
        "Rendered {}x{} (pitch {:.1}, yaw {:.1}, zoom {:.2}) to {}",
        width,
        height,
        state.angle_x,
        state.angle_y,
        state.zoom_factor,
        out.display()
    );
    Ok(())
}
