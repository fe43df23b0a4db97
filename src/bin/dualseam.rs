// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use dualseam::{calculate_energy_with, MaybeSync, Normalization, Raster, SeamCarver};
use image::{ImageBuffer, Pixel, PixelWithColorType, Rgb, Rgba};
use log::{info, LevelFilter};
use std::error::Error;
use std::path::Path;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("dualseam")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image narrowing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result; the format follows the extension")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("seams")
                .short("s")
                .long("seams")
                .takes_value(true)
                .value_name("N")
                .help("Number of vertical seams to remove [default: 1]"),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .takes_value(true)
                .value_name("W")
                .conflicts_with("seams")
                .help("Carve down to this width instead of counting seams"),
        )
        .arg(
            Arg::with_name("saturate")
                .long("saturate")
                .help("Clamp energies above 255 instead of truncating them"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .help("Write the energy map of the input instead of carving it"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more"),
        )
}

fn init_logging(occurrences: u64) {
    let level = match occurrences {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn parse_u32(matches: &ArgMatches, name: &str) -> CliResult<Option<u32>> {
    match matches.value_of(name) {
        Some(v) => Ok(Some(
            v.parse()
                .map_err(|e| format!("invalid value for --{}: {}: {}", name, v, e))?,
        )),
        None => Ok(None),
    }
}

// An explicit --width wins; otherwise count seams off the current width.
fn target_width(matches: &ArgMatches, width: u32) -> CliResult<u32> {
    if let Some(w) = parse_u32(matches, "width")? {
        return Ok(w);
    }
    let seams = parse_u32(matches, "seams")?.unwrap_or(1);
    Ok(width
        .checked_sub(seams)
        .ok_or_else(|| format!("cannot remove {} seams from {} columns", seams, width))?)
}

// Carve (or render the energy of) one decoded image, RGB or RGBA alike.
fn run<P>(image: ImageBuffer<P, Vec<u8>>, matches: &ArgMatches, output: &Path) -> CliResult<()>
where
    P: Pixel<Subpixel = u8> + PixelWithColorType + MaybeSync,
{
    let normalization = if matches.is_present("saturate") {
        Normalization::Saturate
    } else {
        Normalization::Truncate
    };

    let result: ImageBuffer<P, Vec<u8>> = if matches.is_present("energy") {
        calculate_energy_with(&image, normalization)?.to_raster(Raster::channels(&image))?
    } else {
        let width = Raster::width(&image);
        let target = target_width(matches, width)?;
        info!("carving {} -> {} columns", width, target);
        SeamCarver::new(&image)
            .with_normalization(normalization)
            .carve(target)?
    };

    result.save(output)?;
    info!("wrote {}", output.display());
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("dualseam: {}", e);
        std::process::exit(1);
    }
}

fn try_main() -> CliResult<()> {
    let matches = app().get_matches();
    init_logging(matches.occurrences_of("verbose"));

    let input = Path::new(matches.value_of("input").unwrap_or_default());
    let output = Path::new(matches.value_of("output").unwrap_or_default());
    let decoded = image::open(input)?;
    info!(
        "read {} ({}x{}, {:?})",
        input.display(),
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    if decoded.color().has_alpha() {
        run::<Rgba<u8>>(decoded.to_rgba8(), &matches, output)
    } else {
        run::<Rgb<u8>>(decoded.to_rgb8(), &matches, output)
    }
}
