//! streetlevel CLI - Command-line interface
//!
//! Downloads Streetside and Street View panoramas tile by tile and writes
//! the stitched result to disk.

mod commands;
mod error;
mod runner;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::common::Stitching;
use commands::streetside::StreetsideArgs;
use commands::streetview::StreetViewArgs;
use commands::tiles::TilesTarget;

#[derive(Parser)]
#[command(name = "streetlevel")]
#[command(version, about = "Download and stitch street-level panoramas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Identifies a Streetside panorama either by id or by a JSON record.
#[derive(Args)]
struct StreetsideSource {
    /// Numeric panorama id
    #[arg(long, required_unless_present = "pano", conflicts_with = "pano")]
    id: Option<u64>,

    /// Highest zoom level the panorama offers (with --id, default: 4)
    #[arg(long, requires = "id")]
    max_zoom: Option<u8>,

    /// JSON file with the panorama record ({"id": .., "max_zoom": ..})
    #[arg(long)]
    pano: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the configuration file with defaults (~/.streetlevel/config.ini)
    Init,

    /// Download a Streetside cubemap panorama
    Streetside {
        #[command(flatten)]
        source: StreetsideSource,

        /// Zoom level 0-4, clamped to the panorama maximum (default from config)
        #[arg(long)]
        zoom: Option<u8>,

        /// How to arrange the six faces (default from config)
        #[arg(long, value_enum)]
        stitching: Option<Stitching>,

        /// Output image path; the format follows the extension
        #[arg(long, short)]
        output: PathBuf,

        /// JPEG quality 1-100 for .jpg output
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Fetch tiles with the async driver
        #[arg(long = "async")]
        async_mode: bool,
    },

    /// Download a Street View equirectangular panorama
    Streetview {
        /// JSON file with the panorama record (id, tile_size, image_sizes)
        #[arg(long)]
        pano: PathBuf,

        /// Zoom level, clamped to the available levels (default from config)
        #[arg(long)]
        zoom: Option<u8>,

        /// Output image path; the format follows the extension
        #[arg(long, short)]
        output: PathBuf,

        /// JPEG quality 1-100 for .jpg output
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Fetch tiles with the async driver
        #[arg(long = "async")]
        async_mode: bool,
    },

    /// Print the tile URLs of a panorama without downloading
    Tiles {
        #[command(subcommand)]
        engine: TilesCommand,
    },
}

#[derive(Subcommand)]
enum TilesCommand {
    /// Streetside cubemap tiles, grouped by face
    Streetside {
        #[command(flatten)]
        source: StreetsideSource,

        #[arg(long)]
        zoom: Option<u8>,
    },

    /// Street View grid tiles, column by column
    Streetview {
        #[arg(long)]
        pano: PathBuf,

        #[arg(long)]
        zoom: Option<u8>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Streetside {
            source,
            zoom,
            stitching,
            output,
            quality,
            async_mode,
        } => commands::streetside::run(StreetsideArgs {
            id: source.id,
            max_zoom: source.max_zoom,
            pano: source.pano,
            zoom,
            stitching,
            output,
            quality,
            async_mode,
        }),
        Commands::Streetview {
            pano,
            zoom,
            output,
            quality,
            async_mode,
        } => commands::streetview::run(StreetViewArgs {
            pano,
            zoom,
            output,
            quality,
            async_mode,
        }),
        Commands::Tiles { engine } => commands::tiles::run(match engine {
            TilesCommand::Streetside { source, zoom } => TilesTarget::Streetside {
                id: source.id,
                max_zoom: source.max_zoom,
                pano: source.pano,
                zoom,
            },
            TilesCommand::Streetview { pano, zoom } => TilesTarget::StreetView { pano, zoom },
        }),
    };

    if let Err(e) = result {
        e.exit();
    }
}
