//! # Visualization
//!
//! $$
//! \big(S_i,\ \textstyle\sum_{j\le i}\mathrm{PnL}_j,\ \Delta_i,\ \Gamma_i\big)_{i=0}^{n}\mapsto \text{diagnostic charts}
//! $$
//!
use std::path::Path;

use plotly::common::Line;
use plotly::common::Mode;
use plotly::layout::GridPattern;
use plotly::layout::LayoutGrid;
use plotly::Layout;
use plotly::Plot;
use plotly::Scatter;
use tracing::info;

use crate::error::Result;
use crate::quant::hedging::SimulationResult;
use crate::stochastic::PricePath;

struct GridEntry {
  title: String,
  values: Vec<f64>,
}

/// Grid of line charts, one series per panel, shared day axis.
pub struct HedgePlotter {
  entries: Vec<GridEntry>,
  cols: usize,
  line_width: f64,
  title: String,
}

impl Default for HedgePlotter {
  fn default() -> Self {
    Self::new()
  }
}

impl HedgePlotter {
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
      cols: 2,
      line_width: 1.5,
      title: String::new(),
    }
  }

  /// Stock path, cumulative P&L, delta and gamma in a 2x2 grid.
  pub fn hedging_report(path: &PricePath, result: &SimulationResult) -> Self {
    Self::new()
      .title("Delta hedging")
      .register(path.to_vec(), "Simulated Stock Path")
      .register(result.cumulative_pnl().to_vec(), "Cumulative Hedging PnL")
      .register(result.deltas().to_vec(), "Delta Over Time")
      .register(result.gammas().to_vec(), "Gamma Over Time")
  }

  pub fn title(mut self, title: &str) -> Self {
    self.title = title.into();
    self
  }

  pub fn cols(mut self, n: usize) -> Self {
    self.cols = n.max(1);
    self
  }

  pub fn line_width(mut self, w: f64) -> Self {
    self.line_width = w;
    self
  }

  pub fn register(mut self, values: Vec<f64>, title: &str) -> Self {
    if !values.is_empty() {
      self.entries.push(GridEntry {
        title: title.into(),
        values,
      });
    }
    self
  }

  pub fn n_panels(&self) -> usize {
    self.entries.len()
  }

  pub fn plot(self) -> Plot {
    let cols = self.cols;
    let rows = self.entries.len().div_ceil(cols).max(1);

    let axis_name = |subplot_idx: usize, axis: &str| -> String {
      if subplot_idx == 1 {
        axis.to_string()
      } else {
        format!("{axis}{subplot_idx}")
      }
    };

    let mut plot = Plot::new();
    plot.set_layout(
      Layout::new()
        .title(self.title.as_str())
        .height(rows * 420 + 120)
        .grid(
          LayoutGrid::new()
            .rows(rows)
            .columns(cols)
            .pattern(GridPattern::Independent),
        ),
    );

    for (idx, entry) in self.entries.into_iter().enumerate() {
      let subplot_idx = idx + 1;
      let days: Vec<usize> = (0..entry.values.len()).collect();
      let trace = Scatter::new(days, entry.values)
        .name(entry.title.as_str())
        .mode(Mode::Lines)
        .line(Line::new().width(self.line_width))
        .x_axis(axis_name(subplot_idx, "x").as_str())
        .y_axis(axis_name(subplot_idx, "y").as_str());
      plot.add_trace(trace);
    }

    plot
  }

  /// Render to a standalone HTML file, creating parent directories.
  pub fn write_html(self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, self.plot().to_html())?;
    info!(path = %path.display(), "wrote hedging chart");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::HedgeError;
  use crate::quant::hedging::run_delta_hedging;
  use crate::quant::OptionType;

  #[test]
  fn report_has_four_panels() {
    let path = PricePath::from(vec![100.0, 101.0, 99.5, 102.0]);
    let result = run_delta_hedging(&path, 100.0, 0.02, 0.2, 0.25, OptionType::Call).unwrap();

    assert_eq!(HedgePlotter::hedging_report(&path, &result).n_panels(), 4);
  }

  #[test]
  fn empty_series_are_skipped() {
    let plotter = HedgePlotter::new().register(vec![], "empty").register(vec![1.0], "one");
    assert_eq!(plotter.n_panels(), 1);
  }

  #[test]
  fn writes_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("chart.html");
    let path = PricePath::from(vec![100.0, 101.0, 99.5]);
    let result = run_delta_hedging(&path, 100.0, 0.02, 0.2, 0.25, OptionType::Put).unwrap();

    HedgePlotter::hedging_report(&path, &result)
      .write_html(&out)
      .unwrap();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("Cumulative Hedging PnL"));
  }

  #[test]
  fn write_into_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = PricePath::from(vec![100.0, 101.0, 99.5]);
    let result = run_delta_hedging(&path, 100.0, 0.02, 0.2, 0.25, OptionType::Call).unwrap();

    let err = HedgePlotter::hedging_report(&path, &result)
      .write_html(dir.path())
      .unwrap_err();
    assert!(matches!(err, HedgeError::Io(_)));
  }
}
