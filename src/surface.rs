//! Rendering surfaces
//! Where presented figures end up: PNG files or a viewer window.

use crate::charts::{Figure, StaticChartRenderer};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::gui::EdaViewerApp;
use std::path::{Path, PathBuf};

/// Receives figures from the plotting operations.
pub trait Surface {
    fn present(&mut self, figure: Figure) -> Result<()>;
}

/// Collects figures in memory.
impl Surface for Vec<Figure> {
    fn present(&mut self, figure: Figure) -> Result<()> {
        self.push(figure);
        Ok(())
    }
}

/// Writes each figure as a PNG under an output directory.
pub struct PngSurface {
    out_dir: PathBuf,
    config: PlotConfig,
    open_after: bool,
    written: Vec<PathBuf>,
}

impl PngSurface {
    pub fn new(out_dir: impl Into<PathBuf>, config: PlotConfig) -> Self {
        Self {
            out_dir: out_dir.into(),
            config,
            open_after: false,
            written: Vec::new(),
        }
    }

    /// Open each written file with the system viewer.
    pub fn open_after(mut self, open: bool) -> Self {
        self.open_after = open;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Paths written so far, in presentation order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Target path for a figure; repeated stems get a numeric suffix.
    pub fn path_for(&self, figure: &Figure) -> PathBuf {
        let stem = figure.file_stem();
        let mut path = self.out_dir.join(format!("{}.png", stem));
        let mut n = 2;
        while self.written.contains(&path) {
            path = self.out_dir.join(format!("{}_{}.png", stem, n));
            n += 1;
        }
        path
    }
}

impl Surface for PngSurface {
    fn present(&mut self, figure: Figure) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.path_for(&figure);
        StaticChartRenderer::render_to_file(&figure, &path, &self.config)?;

        if self.open_after {
            if let Err(e) = open::that(&path) {
                log::warn!("Could not open {}: {}", path.display(), e);
            }
        }

        self.written.push(path);
        Ok(())
    }
}

/// Gathers figures, then shows them together in a window.
#[derive(Default)]
pub struct ViewerSurface {
    figures: Vec<Figure>,
}

impl ViewerSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Block in the viewer window until it is closed.
    pub fn show(self, title: &str) -> Result<()> {
        if self.figures.is_empty() {
            log::warn!("Nothing to show");
            return Ok(());
        }
        EdaViewerApp::run(title, self.figures)
    }
}

impl Surface for ViewerSurface {
    fn present(&mut self, figure: Figure) -> Result<()> {
        log::debug!("Queued '{}' for display", figure.title());
        self.figures.push(figure);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DiagnosticSummary;

    fn figure(name: &str) -> Figure {
        Figure::Diagnostics(DiagnosticSummary::from_values(
            name,
            &[1.0, 2.0, 3.0],
            &PlotConfig::default(),
        ))
    }

    #[test]
    fn test_vec_surface_collects() {
        let mut figures: Vec<Figure> = Vec::new();
        figures.present(figure("a")).unwrap();
        figures.present(figure("b")).unwrap();
        assert_eq!(figures.len(), 2);
    }

    #[test]
    fn test_viewer_surface_queues_in_order() {
        let mut surface = ViewerSurface::new();
        surface.present(figure("first")).unwrap();
        surface.present(figure("second")).unwrap();

        let titles: Vec<String> = surface.figures().iter().map(Figure::title).collect();
        assert_eq!(titles, vec!["Diagnostics: first", "Diagnostics: second"]);
    }

    #[test]
    fn test_empty_viewer_does_not_open_window() {
        assert!(ViewerSurface::new().show("empty").is_ok());
    }

    #[test]
    fn test_png_path_for() {
        let surface = PngSurface::new("/tmp/out", PlotConfig::default());
        assert_eq!(
            surface.path_for(&figure("tenure months")),
            PathBuf::from("/tmp/out/diagnostics_tenure_months.png")
        );
        assert_eq!(surface.out_dir(), Path::new("/tmp/out"));
        assert!(surface.written().is_empty());
    }

    #[test]
    fn test_png_path_for_avoids_collisions() {
        let mut surface = PngSurface::new("out", PlotConfig::default());
        let first = surface.path_for(&figure("x"));
        surface.written.push(first.clone());

        let second = surface.path_for(&figure("x"));
        assert_ne!(first, second);
        assert_eq!(second, PathBuf::from("out/diagnostics_x_2.png"));
    }
}
