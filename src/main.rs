//! Batch driver: packs every map under the input directory.
//!
//! Each map is a subdirectory holding `image.png` and `info.json`. For each
//! one this writes `map.bin`, `map4x.bin`, `map16x.bin`, `thumbnail.webp`,
//! and an enriched `manifest.json` to the output directory. File names and
//! manifest keys are a contract with the game's map loader.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use map_packer::generator::{generate_map, GeneratorArgs, MapInfo};

#[derive(Parser, Debug)]
#[command(name = "map_packer")]
#[command(about = "Pack PNG terrain maps into the runtime's binary format")]
struct Args {
    /// Directory containing one subdirectory per map (image.png + info.json)
    #[arg(short, long, default_value = "assets/maps")]
    input: PathBuf,

    /// Output directory for packed maps
    #[arg(short, long, default_value = "resources/maps")]
    output: PathBuf,

    /// Treat inputs as test fixtures: keep small islands and lakes
    #[arg(long)]
    test_fixtures: bool,

    /// Process only these maps (default: every map in the input directory)
    #[arg(long)]
    maps: Vec<String>,
}

type DriverError = Box<dyn Error + Send + Sync>;

/// Manifest entry for one packed grid.
#[derive(Serialize)]
struct GridMeta {
    width: usize,
    height: usize,
    num_land_tiles: usize,
}

impl From<&MapInfo> for GridMeta {
    fn from(info: &MapInfo) -> Self {
        Self {
            width: info.width,
            height: info.height,
            num_land_tiles: info.num_land_tiles,
        }
    }
}

/// List every subdirectory of `input` that contains an `image.png`.
fn discover_maps(input: &Path) -> Result<Vec<String>, DriverError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if !entry.path().join("image.png").is_file() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

fn process_map(name: &str, args: &Args) -> Result<(), DriverError> {
    let map_dir = args.input.join(name);
    let image = fs::read(map_dir.join("image.png"))?;
    let manifest_bytes = fs::read(map_dir.join("info.json"))?;

    let mut manifest: serde_json::Value = serde_json::from_slice(&manifest_bytes)?;
    let fields = manifest
        .as_object_mut()
        .ok_or_else(|| format!("info.json for {} is not a JSON object", name))?;

    let result = generate_map(GeneratorArgs {
        name,
        image: &image,
        remove_small: !args.test_fixtures,
    })?;

    fields.insert("map".into(), serde_json::to_value(GridMeta::from(&result.map))?);
    fields.insert("map4x".into(), serde_json::to_value(GridMeta::from(&result.map4x))?);
    fields.insert("map16x".into(), serde_json::to_value(GridMeta::from(&result.map16x))?);

    let out_dir = args.output.join(name);
    fs::create_dir_all(&out_dir)?;
    fs::write(out_dir.join("map.bin"), &result.map.data)?;
    fs::write(out_dir.join("map4x.bin"), &result.map4x.data)?;
    fs::write(out_dir.join("map16x.bin"), &result.map16x.data)?;
    fs::write(out_dir.join("thumbnail.webp"), &result.thumbnail)?;
    fs::write(
        out_dir.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;

    Ok(())
}

fn main() {
    let args = Args::parse();

    let names = if args.maps.is_empty() {
        match discover_maps(&args.input) {
            Ok(names) => names,
            Err(e) => {
                eprintln!("Failed to scan {}: {}", args.input.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        args.maps.clone()
    };

    if names.is_empty() {
        eprintln!("No maps found under {}", args.input.display());
        std::process::exit(1);
    }

    println!("Packing {} maps...", names.len());

    // One task per map; maps share no state.
    let failures: Vec<(String, DriverError)> = names
        .par_iter()
        .filter_map(|name| {
            process_map(name, &args)
                .err()
                .map(|e| (name.clone(), e))
        })
        .collect();

    for (name, err) in &failures {
        eprintln!("Failed to pack {}: {}", name, err);
    }
    if !failures.is_empty() {
        std::process::exit(1);
    }

    println!("Packed {} maps successfully", names.len());
}
