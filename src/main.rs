#[macro_use]
extern crate clap;

use std::path::{Path, PathBuf};
use std::process::exit;
use std::str::FromStr;

use clap::{App, ArgGroup, ArgMatches};
use log::{info, warn};
use rand::thread_rng;

use nonogen::{import, Board, ImageRenderer, Renderer, ShellRenderer};

fn main() {
    #[cfg(feature = "logger")]
    env_logger::init();

    let matches = app().get_matches();

    let board = match board_from_args(&matches) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    info!("puzzle of {0}x{0} cells ready", board.size());
    println!("{}", ShellRenderer::with_board(&board).render());

    let cell_size = parse_arg::<u32>(&matches, "cell-size").unwrap_or(30);
    let output = matches.value_of("output").unwrap_or("puzzle.png");

    let renderer = ImageRenderer::with_board(&board);
    if let Err(err) = renderer.save(output, cell_size, false) {
        eprintln!("{}", err);
        exit(1);
    }
    info!("blank puzzle saved to {}", output);

    if matches.is_present("solution") {
        let solution_path = solution_path(output);
        if let Err(err) = renderer.save(&solution_path, cell_size, true) {
            eprintln!("{}", err);
            exit(1);
        }
        info!("solution saved to {}", solution_path.display());
    }
}

fn app() -> App<'static, 'static> {
    App::new("Nonogen")
        .version(crate_version!())
        .about("Nonogram puzzle generator")
        .args_from_usage(
            "-i, --image [PATH]    'path to the source raster image'
             -g, --generate [SIZE] 'generate a random puzzle with the given side'",
        )
        .group(
            ArgGroup::with_name("source")
                .required(true)
                .args(&["image", "generate"]),
        )
        .arg_from_usage("-f, --fill-prob=[PROB] 'fill probability for random generation (default 0.3)'")
        .arg_from_usage("-r, --resolution=[CELLS] 'cells along the longer side in image mode (default 25)'")
        .arg_from_usage("-t, --threshold=[LUMA] 'darker-than-threshold pixels become ink (default 128)'")
        .arg_from_usage("-c, --cell-size=[PIXELS] 'rendered size of one cell (default 30)'")
        .arg_from_usage("-o, --output=[PATH] 'where to write the blank puzzle PNG (default puzzle.png)'")
        .arg_from_usage("-s, --solution 'also write the solved view next to the output'")
}

fn board_from_args(matches: &ArgMatches<'_>) -> nonogen::Result<Board> {
    if let Some(path) = matches.value_of("image") {
        let resolution = parse_arg::<u32>(matches, "resolution").unwrap_or(25);
        let threshold = parse_arg::<u8>(matches, "threshold").unwrap_or(128);

        info!("sampling {} at resolution {}", path, resolution);
        return import::from_path(path, resolution, threshold);
    }

    let size = value_t!(matches, "generate", usize).unwrap_or_else(|e| e.exit());
    let fill_prob = parse_arg::<f64>(matches, "fill-prob").unwrap_or(0.3);
    if !(0.0..=1.0).contains(&fill_prob) {
        warn!("fill probability {} is outside [0, 1]", fill_prob);
    }

    Board::randomized(size, fill_prob, &mut thread_rng())
}

/// `None` only when the flag is absent; a present but malformed value
/// reports the usage error instead of falling back to a default.
fn parse_arg<T>(matches: &ArgMatches<'_>, name: &str) -> Option<T>
where
    T: FromStr,
{
    if matches.is_present(name) {
        let value = value_t!(matches, name, T).unwrap_or_else(|e| e.exit());
        return Some(value);
    }

    None
}

/// `puzzle.png` -> `puzzle_solution.png`, keeping the output's extension
/// (and with it the encoder `save` picks)
fn solution_path(output: &str) -> PathBuf {
    let path = Path::new(output);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("puzzle");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_solution.{}", stem, ext),
        None => format!("{}_solution", stem),
    };
    path.with_file_name(file_name)
}
