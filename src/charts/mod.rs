//! Charts module - Static chart rendering

mod plotter;
mod renderer;

pub use plotter::PlottersBackend;
pub use renderer::{ChartInputs, ChartSet, StaticChartRenderer};

#[cfg(test)]
pub(crate) use renderer::tests::RecordingBackend;

use crate::data::{CategoryTally, RegionRecord};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Encoded PNG image.
pub type ImageBytes = Vec<u8>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw {chart} chart: {message}")]
    Draw { chart: ChartKind, message: String },
    #[error("Failed to encode {chart} chart: {source}")]
    Encode {
        chart: ChartKind,
        source: image::ImageError,
    },
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The three dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar.png",
            ChartKind::Line => "line.png",
            ChartKind::Pie => "pie.png",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.file_name() == name)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        };
        f.write_str(name)
    }
}

/// Drawing backend behind the renderer. Implementations only produce bytes;
/// the renderer decides what to draw and where the files go.
pub trait ChartBackend {
    /// Horizontal bars, `ranked` highest first.
    fn render_bar(&self, ranked: &[RegionRecord], title: &str) -> Result<ImageBytes, RenderError>;

    /// One line with markers through `(year, total)` points, ascending by year.
    fn render_line(&self, totals: &[(i64, i64)], title: &str) -> Result<ImageBytes, RenderError>;

    /// One slice per non-empty bucket of `tally`.
    fn render_pie(&self, tally: &CategoryTally, title: &str) -> Result<ImageBytes, RenderError>;

    /// Stand-in image for a chart that has no data to show.
    fn render_placeholder(&self, kind: ChartKind, title: &str, message: &str)
        -> Result<ImageBytes, RenderError>;
}
