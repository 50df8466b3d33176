//! Static Chart Renderer
//! Decides what each dashboard chart shows and writes the PNG files.
//!
//! Files (overwritten on every start):
//! 1. `bar.png`  - top-N regions of the reference year
//! 2. `line.png` - total cases per year
//! 3. `pie.png`  - category proportions of the reference year
//!
//! A chart without data is written as a placeholder image, never skipped,
//! so the page always finds all three files.

use super::{ChartBackend, ChartKind, ImageBytes, RenderError};
use crate::data::{CategoryTally, RegionRecord};
use std::fs;
use std::path::PathBuf;

const NO_DATA: &str = "Tidak ada data";

/// Everything the three charts are drawn from.
#[derive(Debug, Clone)]
pub struct ChartInputs<'a> {
    pub year: i64,
    pub top_n: usize,
    /// Reference-year records already ranked, highest first.
    pub ranked: &'a [RegionRecord],
    pub yearly_totals: &'a [(i64, i64)],
    pub tally: &'a CategoryTally,
}

/// Paths of the written chart files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSet {
    pub dir: PathBuf,
    /// Charts that were written as placeholders.
    pub placeholders: Vec<ChartKind>,
}

impl ChartSet {
    pub fn path(&self, kind: ChartKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

pub struct StaticChartRenderer<'b, B: ChartBackend> {
    backend: &'b B,
    out_dir: PathBuf,
}

impl<'b, B: ChartBackend> StaticChartRenderer<'b, B> {
    pub fn new(backend: &'b B, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            out_dir: out_dir.into(),
        }
    }

    /// Render and write all three charts. Any failure aborts the whole set.
    pub fn render_all(&self, inputs: &ChartInputs<'_>) -> Result<ChartSet, RenderError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| RenderError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut placeholders = Vec::new();
        for kind in ChartKind::ALL {
            let (bytes, placeholder) = self.render(kind, inputs)?;
            if placeholder {
                log::warn!("No data for the {} chart, writing a placeholder", kind);
                placeholders.push(kind);
            }
            self.write(kind, &bytes)?;
        }

        Ok(ChartSet {
            dir: self.out_dir.clone(),
            placeholders,
        })
    }

    fn render(
        &self,
        kind: ChartKind,
        inputs: &ChartInputs<'_>,
    ) -> Result<(ImageBytes, bool), RenderError> {
        let title = Self::title(kind, inputs);
        let has_data = match kind {
            ChartKind::Bar => !inputs.ranked.is_empty(),
            ChartKind::Line => !inputs.yearly_totals.is_empty(),
            ChartKind::Pie => !inputs.tally.is_empty(),
        };
        if !has_data {
            let bytes = self.backend.render_placeholder(kind, &title, NO_DATA)?;
            return Ok((bytes, true));
        }

        let bytes = match kind {
            ChartKind::Bar => self.backend.render_bar(inputs.ranked, &title)?,
            ChartKind::Line => self.backend.render_line(inputs.yearly_totals, &title)?,
            ChartKind::Pie => self.backend.render_pie(inputs.tally, &title)?,
        };
        Ok((bytes, false))
    }

    fn title(kind: ChartKind, inputs: &ChartInputs<'_>) -> String {
        match kind {
            ChartKind::Bar => format!(
                "Top {} Kabupaten/Kota DM Tertinggi ({})",
                inputs.top_n, inputs.year
            ),
            ChartKind::Line => "Total Penderita DM per Tahun".to_string(),
            ChartKind::Pie => format!("Proporsi Kategori DM ({})", inputs.year),
        }
    }

    fn write(&self, kind: ChartKind, bytes: &[u8]) -> Result<(), RenderError> {
        let path = self.out_dir.join(kind.file_name());
        fs::write(&path, bytes).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
