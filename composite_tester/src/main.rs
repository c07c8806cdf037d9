use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use face_composite::batch::BatchRenderer;
use face_composite::catalog;
use face_composite::export::export;
use face_composite::{CompositorConfig, FaceCompositor, FeatureSet};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use log::info;
use std::path::PathBuf;

const THUMBNAIL_SIZE: u32 = 128;

#[derive(Parser)]
#[command(name = "composite_tester", about = "Render facial-feature composites to PNG")]
struct Cli {
    /// TOML compositor configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one composite.
    Render {
        /// JSON file holding the feature object.
        #[arg(long, conflicts_with = "json")]
        file: Option<PathBuf>,
        /// Inline JSON feature object.
        #[arg(long)]
        json: Option<String>,
        /// `key=value` pairs, e.g. `faceShape=oval "hairType=receding hairline"`.
        features: Vec<String>,
        /// Fixed stubble seed.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, default_value = "composite.png")]
        output: PathBuf,
        /// Also print the image as a data URL.
        #[arg(long)]
        data_url: bool,
    },
    /// List every category and its options.
    Catalog,
    /// Render every catalog option into one grid, a row per category.
    ContactSheet {
        #[arg(short, long, default_value = "contact_sheet.png")]
        output: PathBuf,
        #[arg(long)]
        workers: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Logging, Argument Parsing & Setup ---
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CompositorConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => CompositorConfig::default(),
    };

    match cli.command {
        Command::Render { file, json, features, seed, output, data_url } => {
            // --- 2. Feature Input ---
            let mut set = match (file, json) {
                (Some(path), _) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    FeatureSet::from_json_str(&text)?
                }
                (None, Some(text)) => FeatureSet::from_json_str(&text)?,
                (None, None) => FeatureSet::new(),
            };
            for pair in &features {
                let Some((key, value)) = pair.split_once('=') else {
                    bail!("expected key=value, got `{pair}`");
                };
                set.insert(key.trim(), value.trim());
            }

            // --- 3. Render & Export ---
            let compositor = FaceCompositor::new(config);
            let image = match seed {
                Some(seed) => compositor.create_composite_seeded(&set, seed),
                None => compositor.create_composite(&set),
            };
            export::save_png(&image, &output).with_context(|| format!("writing {}", output.display()))?;
            info!("Wrote {} ({} features)", output.display(), set.len());

            if data_url {
                println!("{}", export::to_data_url(&image)?);
            }
        }
        Command::Catalog => {
            for entry in catalog::catalog() {
                println!("{} ({}): {}", entry.label, entry.category.key(), entry.options.join(", "));
            }
        }
        Command::ContactSheet { output, workers } => {
            let renderer = match workers {
                Some(n) => BatchRenderer::with_workers(config, n),
                None => BatchRenderer::new(config),
            };
            let sheet = contact_sheet(&renderer).await?;
            export::save_png(&sheet, &output).with_context(|| format!("writing {}", output.display()))?;
            info!("Wrote contact sheet {}", output.display());
        }
    }

    Ok(())
}

/// One row per category, one thumbnail per option.
async fn contact_sheet(renderer: &BatchRenderer) -> Result<RgbImage> {
    let variants = catalog::every_variant();
    let columns = catalog::catalog().iter().map(|e| e.options.len()).max().unwrap_or(1) as u32;
    let rows = catalog::catalog().len() as u32;

    let batch = variants.iter().map(|(_, _, set)| set.clone()).collect();
    let images = renderer.render_all(batch).await?;

    let mut sheet = RgbImage::from_pixel(columns * THUMBNAIL_SIZE, rows * THUMBNAIL_SIZE, Rgb([255, 255, 255]));
    let mut column = 0;
    let mut previous = None;
    let mut row = 0;
    for ((category, option, _), image) in variants.iter().zip(images) {
        match previous {
            Some(p) if p == *category => column += 1,
            Some(_) => {
                row += 1;
                column = 0;
            }
            None => {}
        }
        previous = Some(*category);

        let thumbnail = imageops::resize(&image, THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);
        imageops::replace(
            &mut sheet,
            &thumbnail,
            (column * THUMBNAIL_SIZE) as i64,
            (row * THUMBNAIL_SIZE) as i64,
        );
        info!("Placed {category}: {option} at row {row}, column {column}");
    }

    Ok(sheet)
}
