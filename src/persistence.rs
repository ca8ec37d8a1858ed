//! File I/O for the generated outline catalogue.
//!
//! Binary format for `outlines.bin` (little endian):
//! - u32: outline count
//! - repeat per outline: 16 bytes, one group id (0..=3) per cell, row-major

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::outlines::{format_outline, OutlineBoard, CELLS_TOTAL};

const OUTLINES_BIN: &str = "outlines.bin";
const OUTLINES_TXT: &str = "outlines.txt";

/// Saves the catalogue to both binary and text files in `dir`.
pub fn save(dir: &Path, outlines: &[OutlineBoard]) -> std::io::Result<()> {
    save_text(&dir.join(OUTLINES_TXT), outlines)?;
    save_binary(&dir.join(OUTLINES_BIN), outlines)?;
    Ok(())
}

/// Saves the catalogue in human-readable text format.
fn save_text(path: &Path, outlines: &[OutlineBoard]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "Found {} outlines:\n", outlines.len())?;
    for (i, outline) in outlines.iter().enumerate() {
        writeln!(file, "Outline {}:", i + 1)?;
        write!(file, "{}", format_outline(outline))?;
        writeln!(file)?;
    }
    Ok(())
}

/// Saves the catalogue in compact binary format for fast loading.
fn save_binary(path: &Path, outlines: &[OutlineBoard]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(&(outlines.len() as u32).to_le_bytes())?;
    for outline in outlines {
        file.write_all(outline)?;
    }
    Ok(())
}

/// Loads the full catalogue from the binary file in `dir`.
pub fn load_all(dir: &Path) -> Option<Vec<OutlineBoard>> {
    let mut file = File::open(dir.join(OUTLINES_BIN)).ok()?;
    let mut u32_buffer = [0u8; 4];

    file.read_exact(&mut u32_buffer).ok()?;
    let outline_count = u32::from_le_bytes(u32_buffer) as usize;

    let mut outlines = Vec::with_capacity(outline_count);
    for _ in 0..outline_count {
        let mut board = [0u8; CELLS_TOTAL];
        file.read_exact(&mut board).ok()?;
        outlines.push(board);
    }
    Some(outlines)
}

/// Returns the number of saved outlines without loading them all.
pub fn count(dir: &Path) -> Option<usize> {
    let mut file = File::open(dir.join(OUTLINES_BIN)).ok()?;
    let mut u32_buffer = [0u8; 4];
    file.read_exact(&mut u32_buffer).ok()?;
    Some(u32::from_le_bytes(u32_buffer) as usize)
}
