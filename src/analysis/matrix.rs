//! Text missingness matrix.
//!
//! One text column per table column and one line per row. Tables taller than
//! [`ChartOptions::max_rows`] are bucketed: each line then covers a block of consecutive
//! rows, and a cell shows as present only if every row in the block has a value. The number
//! after the last column is how many cells on that line are present.

use std::io::Write;

use super::ChartOptions;
use crate::dataset::Dataset;
use crate::error::CleaningResult;

pub(crate) fn render_matrix<D, W>(
    dataset: &D,
    options: &ChartOptions,
    out: &mut W,
) -> CleaningResult<()>
where
    D: Dataset,
    W: Write + ?Sized,
{
    let columns = dataset.column_names();
    let rows = dataset.row_count();
    let presence = columns
        .iter()
        .map(|c| dataset.presence(c))
        .collect::<CleaningResult<Vec<_>>>()?;

    let cell_width = digits(columns.len().saturating_sub(1));
    let label_width = digits(rows.saturating_sub(1));
    let bucket = bucket_size(rows, options.max_rows);

    write!(out, "{:>label_width$} |", "")?;
    for idx in 0..columns.len() {
        write!(out, " {idx:>cell_width$}")?;
    }
    writeln!(out, " |")?;

    let mut start = 0usize;
    while start < rows {
        let end = (start + bucket).min(rows);
        write!(out, "{start:>label_width$} |")?;
        let mut populated = 0usize;
        for col in &presence {
            let present = col[start..end].iter().all(|p| *p);
            let glyph = if present {
                populated += 1;
                options.present_glyph
            } else {
                options.missing_glyph
            };
            write!(out, " {}", glyph.to_string().repeat(cell_width))?;
        }
        writeln!(out, " | {populated}")?;
        start = end;
    }

    if bucket > 1 {
        writeln!(out, "({rows} rows, {bucket} per line)")?;
    }
    for (idx, name) in columns.iter().enumerate() {
        writeln!(out, "{idx:>cell_width$} = {name}")?;
    }
    Ok(())
}

fn bucket_size(rows: usize, max_rows: usize) -> usize {
    if rows <= max_rows {
        1
    } else {
        rows.div_ceil(max_rows)
    }
}

fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}
