mod logging;
mod output;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use kp_core::{supported_formats, CompressionSettings, SettingsOverrides};
use kp_media::{Dispatcher, ImageTarget, VideoCompressor, ZipArchiver};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kompres")]
#[command(version, about = "Shrink images, video, code and files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show size, category and text counts without compressing
    Stats {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Compress files into an output directory
    Compress {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "compressed")]
        out_dir: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Image output format (auto|jpeg|png)
        #[arg(long, default_value = "auto")]
        format: String,

        /// ffmpeg binary used for video
        #[arg(long, value_name = "PATH")]
        ffmpeg: Option<PathBuf>,
    },

    /// List supported extensions
    Formats,

    /// Extract a ZIP archive
    Unpack {
        archive: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// JSON settings file (camelCase keys); flags override it
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Quality percent for images and video
    #[arg(long)]
    quality: Option<u8>,

    #[arg(long)]
    max_width: Option<u32>,

    #[arg(long)]
    max_height: Option<u32>,

    #[arg(long)]
    fps: Option<u32>,

    /// Video bitrate in bits per second
    #[arg(long)]
    bitrate: Option<u32>,

    /// Keep comments in code files
    #[arg(long)]
    keep_comments: bool,

    /// Keep whitespace in code files
    #[arg(long)]
    keep_whitespace: bool,

    /// Shorten well-known JSON key names
    #[arg(long)]
    minify_keys: bool,
}

impl SettingsArgs {
    fn flag_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            quality: self.quality,
            max_width: self.max_width,
            max_height: self.max_height,
            fps: self.fps,
            bitrate: self.bitrate,
            remove_comments: self.keep_comments.then_some(false),
            remove_whitespace: self.keep_whitespace.then_some(false),
            minify_keys: self.minify_keys.then_some(true),
        }
    }

    /// Defaults, then the settings file, then flags.
    fn resolve(&self) -> Result<CompressionSettings> {
        let base = match &self.settings {
            Some(path) => SettingsOverrides::from_file(path)
                .with_context(|| format!("reading settings from {}", path.display()))?,
            None => SettingsOverrides::new(),
        };
        Ok(base.merge(self.flag_overrides()).build()?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Stats { paths } => {
            let dispatcher = Dispatcher::default();
            let stats = paths
                .iter()
                .map(|p| dispatcher.stats(p).with_context(|| format!("reading {}", p.display())))
                .collect::<Result<Vec<_>>>()?;
            output::print_stats(&stats, cli.json)
        }
        Commands::Compress { paths, out_dir, settings, format, ffmpeg } => {
            let settings = settings.resolve()?;
            let target: ImageTarget = format.parse()?;
            let mut dispatcher = Dispatcher::new(target);
            if let Some(program) = ffmpeg {
                dispatcher = dispatcher.with_video(VideoCompressor::with_program(program));
            }
            tracing::debug!(?settings, files = paths.len(), "starting batch");

            let outputs = dispatcher.output_paths(&paths, &out_dir);
            let results: Vec<_> = paths
                .par_iter()
                .zip(outputs.par_iter())
                .map(|(p, o)| (p.clone(), dispatcher.compress_to(p, o, &settings)))
                .collect();
            let failed = output::print_outcomes(&results, cli.json)?;
            if failed > 0 {
                bail!("{failed} of {} files could not be compressed", results.len());
            }
            Ok(())
        }
        Commands::Formats => output::print_formats(&supported_formats(), cli.json),
        Commands::Unpack { archive, out_dir } => {
            let entries = ZipArchiver::new()
                .unpack(&archive, &out_dir)
                .with_context(|| format!("unpacking {}", archive.display()))?;
            output::print_entries(&entries, cli.json)
        }
    }
}
