//! Rotation Puzzle CLI
//!
//! Administrative front end for the puzzle engine: seeds the outline
//! catalogue, creates random solvable puzzles, and solves or checks puzzle
//! files supplied as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use rotile::board::FixedAreas;
use rotile::creation::{self, CreatePayload, DEFAULT_MAX_TRIES};
use rotile::moves::DisabledMoves;
use rotile::outlines::generate_outline_boards;
use rotile::solver::{MoveSequence, MoveStep};
use rotile::{is_solved, persistence, solve};

/// Seeds outline catalogues and creates, solves and checks rotation puzzles.
#[derive(Parser)]
#[command(name = "rotile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding outlines.bin / outlines.txt.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the outline catalogue and save it to disk.
    Outlines,
    /// Show the number of saved outlines.
    Count,
    /// Create a random solvable puzzle and print it as JSON.
    Create {
        /// 1-based outline index into the saved catalogue (random if absent).
        #[arg(long)]
        outline: Option<usize>,
        /// Retry budget for the generate-and-test loop.
        #[arg(long, default_value_t = DEFAULT_MAX_TRIES)]
        tries: usize,
        /// Seed for reproducible puzzle creation.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Solve a puzzle file (JSON payload) and print the move sequence.
    Solve { file: PathBuf },
    /// Check a submitted move sequence against a puzzle file.
    Check { file: PathBuf },
}

/// A puzzle file with a submitted solution attached.
#[derive(Deserialize)]
struct Submission {
    outline: Vec<i32>,
    board: Vec<i32>,
    #[serde(default)]
    fixed_areas: FixedAreas,
    #[serde(default)]
    disabled_nodes: DisabledMoves,
    moves: MoveSequence,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Some(Command::Outlines) | None => run_outlines(&cli.dir),
        Some(Command::Count) => run_count(&cli.dir),
        Some(Command::Create { outline, tries, seed }) => {
            run_create(&cli.dir, outline, tries, seed)
        }
        Some(Command::Solve { file }) => run_solve(&file),
        Some(Command::Check { file }) => run_check(&file),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Generates the catalogue, saves it, and reports the count.
fn run_outlines(dir: &Path) -> Result<(), String> {
    let outlines = generate_outline_boards();
    persistence::save(dir, &outlines)
        .map_err(|e| format!("Failed to save outlines: {e}"))?;
    println!("Found {} outlines", outlines.len());
    println!("Wrote outlines.txt and outlines.bin");
    Ok(())
}

fn run_count(dir: &Path) -> Result<(), String> {
    match persistence::count(dir) {
        Some(count) => {
            println!("{count} outlines");
            Ok(())
        }
        None => Err("No outlines.bin found. Run 'rotile outlines' first.".into()),
    }
}

fn run_create(
    dir: &Path,
    outline_index: Option<usize>,
    tries: usize,
    seed: Option<u64>,
) -> Result<(), String> {
    // fall back to the generated catalogue when none is saved yet
    let catalogue = persistence::load_all(dir).unwrap_or_else(generate_outline_boards);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outline = match outline_index {
        Some(index) => *catalogue
            .get(index.wrapping_sub(1))
            .ok_or_else(|| creation::CreationError::UnknownOutline.to_string())?,
        None => {
            use rand::seq::SliceRandom;
            *catalogue
                .choose(&mut rng)
                .ok_or_else(|| "The outline catalogue is empty.".to_string())?
        }
    };
    let outline: Vec<i32> = outline.iter().map(|&g| i32::from(g)).collect();

    let (puzzle, solution) =
        creation::random_puzzle(&outline, tries, &mut rng).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&puzzle)
        .map_err(|e| format!("Failed to serialize puzzle: {e}"))?;
    println!("{json}");
    eprintln!("Solution: {}", render_moves(&solution));
    Ok(())
}

fn run_solve(file: &Path) -> Result<(), String> {
    let payload = read_payload(file)?;
    match solve(
        &payload.board,
        &payload.outline,
        &payload.disabled_nodes,
        &payload.fixed_areas,
    ) {
        Some(solution) if solution.is_empty() => {
            println!("Already solved");
            Ok(())
        }
        Some(solution) => {
            println!("{} moves: {}", solution.len(), render_moves(&solution));
            Ok(())
        }
        None => Err("Unsolvable within the search bound".into()),
    }
}

fn run_check(file: &Path) -> Result<(), String> {
    let submission: Submission = read_json(file)?;
    let payload = creation::normalize_payload(
        &submission.outline,
        &submission.board,
        &submission.fixed_areas,
        &submission.disabled_nodes,
    )
    .map_err(|e| e.to_string())?;
    let solved = is_solved(
        &payload.board,
        &payload.outline,
        &submission.moves,
        &payload.fixed_areas,
        &payload.disabled_nodes,
    );
    println!("{}", if solved { "Solved" } else { "Not solved" });
    Ok(())
}

fn read_payload(file: &Path) -> Result<CreatePayload, String> {
    let raw: CreatePayload = read_json(file)?;
    creation::normalize_payload(
        &raw.outline,
        &raw.board,
        &raw.fixed_areas,
        &raw.disabled_nodes,
    )
    .map_err(|e| e.to_string())
}

fn read_json<T: serde::de::DeserializeOwned>(file: &Path) -> Result<T, String> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid puzzle file: {e}"))
}

/// Renders a move sequence as node indices with their turn sense.
fn render_moves(moves: &[MoveStep]) -> String {
    if moves.is_empty() {
        return "(none)".into();
    }
    moves
        .iter()
        .map(|mv| format!("{}{}", mv.node, if mv.clockwise { "CW" } else { "CCW" }))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use rotile::outlines::format_outline;

    use super::*;

    #[test]
    fn test_catalogue_snapshot() {
        let outlines = generate_outline_boards();

        let mut output = format!("Found {} outlines:\n\n", outlines.len());
        for (i, outline) in outlines.iter().enumerate() {
            output.push_str(&format!("Outline {}:\n", i + 1));
            output.push_str(&format_outline(outline));
            output.push('\n');
        }

        insta::assert_snapshot!(output);
    }

    #[test]
    fn test_catalogue_count() {
        assert_eq!(generate_outline_boards().len(), 117);
    }

    #[test]
    fn test_render_moves() {
        let moves = vec![
            MoveStep { node: 5, clockwise: true },
            MoveStep { node: 12, clockwise: false },
        ];
        assert_eq!(render_moves(&moves), "5CW 12CCW");
        assert_eq!(render_moves(&[]), "(none)");
    }
}
