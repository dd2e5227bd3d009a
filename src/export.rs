use crate::grid::Grid;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the rendered grid to `writer`
///
/// The first line is a comment holding the grid dimensions, followed by
/// one line per row.
pub fn write_grid<W: Write>(grid: &Grid, writer: &mut W) -> Result<()> {
    writeln!(writer, "# Grid dimensions: {} x {}", grid.width(), grid.height())?;

    for line in grid.render() {
        writeln!(writer, "{}", line)?;
    }

    Ok(())
}

/// Exports the rendered grid to a text file
///
/// # Arguments
/// * `grid` - The grid to render
/// * `path` - Where the text file will be written
pub fn export_grid_to_file(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_grid(grid, &mut writer)?;
    writer.flush()?;

    log::debug!("Wrote {}x{} grid to {}", grid.width(), grid.height(), path.display());
    Ok(())
}
