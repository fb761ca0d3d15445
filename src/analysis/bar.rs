//! Text bar chart of non-missing counts per column.

use std::io::Write;

use super::population::columns_population;
use super::ChartOptions;
use crate::dataset::Dataset;
use crate::error::CleaningResult;

pub(crate) fn render_bar<D, W>(
    dataset: &D,
    options: &ChartOptions,
    out: &mut W,
) -> CleaningResult<()>
where
    D: Dataset,
    W: Write + ?Sized,
{
    let population = columns_population(dataset)?;
    let name_width = population
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    for col in &population {
        let filled = (col.fill_ratio * options.bar_width as f64).round() as usize;
        let filled = filled.min(options.bar_width);
        let bar: String = std::iter::repeat_n(options.present_glyph, filled)
            .chain(std::iter::repeat_n(options.missing_glyph, options.bar_width - filled))
            .collect();
        writeln!(
            out,
            "{:<name_width$} | {bar} | {}/{} ({:.2}%)",
            col.name,
            col.non_missing,
            col.rows,
            col.fill_ratio * 100.0
        )?;
    }
    Ok(())
}
