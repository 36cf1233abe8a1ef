//! ASCII chart rendering for the forecast panel.
//!
//! Output is plain characters with no ANSI escapes, so the rendered
//! block can be embedded verbatim inside a bordered dashboard panel.
//! Two layouts share one `Chart` type: `Linear` draws one marker run per
//! category, `Grid` draws an axis grid with tick markers and a day-label
//! baseline.

#![allow(dead_code)]

use thiserror::Error;

/// Canvas height in rows; only the width is negotiated from the terminal.
const CANVAS_HEIGHT: usize = 18;
/// Row the grid-style markers are written on.
const PLOT_ROW: usize = 5;
/// Number of y-axis value ticks.
const Y_TICK_COUNT: usize = 4;
/// Number of x-axis anchor columns.
const X_TICK_COUNT: usize = 9;
/// Dimensions assumed when no terminal is attached.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

const LINEAR_TITLE: &str = "Temperature °C";
const GRID_TITLE: &str = "Weather Forecast (Temperature) ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("marker must be length 1")]
    InvalidMarker,
}

/// Source of terminal dimensions. Swappable so layout arithmetic can be
/// tested without a real tty.
pub trait SizeProbe {
    /// Returns `(columns, rows)`. Total: implementations fall back to a
    /// default instead of failing.
    fn probe(&self) -> (u16, u16);
}

/// Queries the attached terminal, falling back to 80x24 when there is none.
pub struct TerminalProbe;

impl SizeProbe for TerminalProbe {
    fn probe(&self) -> (u16, u16) {
        crossterm::terminal::size().unwrap_or(FALLBACK_SIZE)
    }
}

/// Fixed `(columns, rows)`, for tests and non-interactive rendering.
pub struct FixedProbe(pub u16, pub u16);

impl SizeProbe for FixedProbe {
    fn probe(&self) -> (u16, u16) {
        (self.0, self.1)
    }
}

/// Ordered label -> magnitude data. Keys are unique; inserting an existing
/// key updates its value in place. Insertion order is display order.
#[derive(Clone, Debug, Default)]
pub struct Series {
    entries: Vec<(String, u64)>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &str, value: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| l == label) {
            entry.1 = value;
        } else {
            self.entries.push((label.to_string(), value));
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Series {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut series = Series::new();
        for (label, value) in iter {
            series.insert(&label.into(), value);
        }
        series
    }
}

/// Fixed-size grid of display characters, all cells blank on allocation.
struct Canvas {
    cells: Vec<Vec<char>>,
    width: usize,
}

impl Canvas {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            width,
        }
    }

    /// Writes `text` one cell at a time starting at `col`, dropping any
    /// character that would land outside the row.
    fn write_clamped(&mut self, row: usize, col: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            let c = col + i;
            if c < self.width {
                self.cells[row][c] = ch;
            }
        }
    }
}

/// Chart width for a terminal of `columns` columns, clamped so very narrow
/// terminals still get a drawable grid.
fn canvas_width(columns: u16) -> usize {
    let raw = (i64::from(columns) / 3) * 2 - 10;
    raw.max(1) as usize
}

/// Evenly spaced integer positions across `[0, extent]`, both endpoints
/// included. Positions that round onto an earlier one are dropped, so the
/// first tick at a position wins.
fn tick_positions(extent: usize, count: usize) -> Vec<usize> {
    let mut ticks = Vec::with_capacity(count);
    for i in 0..count {
        let pos = (i as f64 * extent as f64 / (count - 1) as f64).round() as usize;
        if ticks.last() != Some(&pos) {
            ticks.push(pos);
        }
    }
    ticks
}

/// Which layout a chart renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartStyle {
    /// One row per category: label, separator, then a run of markers.
    Linear,
    /// Axis grid with static tick markers and a day-label baseline.
    Grid,
}

/// A single-use chart over one `Series`. Dimensions are fixed at
/// construction from the probed terminal size; every render call draws on
/// a fresh canvas, so repeated renders produce identical output.
pub struct Chart {
    series: Series,
    width: usize,
    height: usize,
}

impl Chart {
    pub fn new(series: Series) -> Self {
        Self::with_probe(series, &TerminalProbe)
    }

    pub fn with_probe(series: Series, probe: &dyn SizeProbe) -> Self {
        let (columns, _rows) = probe.probe();
        Self {
            series,
            width: canvas_width(columns),
            height: CANVAS_HEIGHT,
        }
    }

    /// Linear bar layout with the default title.
    pub fn bar(&self, marker: &str) -> Result<String, ChartError> {
        self.render(ChartStyle::Linear, marker, LINEAR_TITLE)
    }

    /// Grid layout with the default title.
    pub fn grid(&self, marker: &str) -> Result<String, ChartError> {
        self.render(ChartStyle::Grid, marker, GRID_TITLE)
    }

    /// Renders the chart to a plain-text block: title line, canvas rows,
    /// and (grid style) a trailing x-axis line. An empty series yields the
    /// literal string `"No data"`.
    pub fn render(
        &self,
        style: ChartStyle,
        marker: &str,
        title: &str,
    ) -> Result<String, ChartError> {
        let mut chars = marker.chars();
        let marker = match (chars.next(), chars.next()) {
            (Some(m), None) => m,
            _ => return Err(ChartError::InvalidMarker),
        };

        if self.series.is_empty() {
            return Ok("No data".to_string());
        }

        Ok(match style {
            ChartStyle::Linear => self.render_linear(marker, title),
            ChartStyle::Grid => self.render_grid(marker, title),
        })
    }

    fn render_linear(&self, marker: char, title: &str) -> String {
        let mut out = String::new();
        out.push_str(title);
        out.push('\n');

        for (label, value) in self.series.iter() {
            out.push_str(label);
            out.push_str(" |");
            out.extend(std::iter::repeat(marker).take(value as usize));
            out.push_str(" \n");
        }

        out
    }

    fn render_grid(&self, marker: char, title: &str) -> String {
        let mut canvas = Canvas::blank(self.width, self.height);

        // y-axis value labels in the left column, one per tick row
        let y_ticks = tick_positions(self.height, Y_TICK_COUNT);
        for row in 0..self.height {
            let value = self.height - 1 - row;
            if y_ticks.contains(&value) {
                canvas.write_clamped(row, 0, &value.to_string());
            }
        }

        // tick markers on the plot row, interior anchors only so the
        // canvas edges stay clear
        let x_ticks = tick_positions(self.width, X_TICK_COUNT);
        let interior: &[usize] = if x_ticks.len() > 2 {
            &x_ticks[1..x_ticks.len() - 1]
        } else {
            &[]
        };
        for &col in interior {
            if col < self.width {
                canvas.cells[PLOT_ROW][col] = marker;
            }
        }

        let mut out = String::new();
        out.push_str(title);
        out.push('\n');
        for row in &canvas.cells {
            out.extend(row.iter());
            out.push('\n');
        }

        // baseline with "day" centered on each anchor except the leftmost
        let mut axis = Canvas::blank(self.width, 1);
        for &col in x_ticks.iter().skip(1) {
            axis.write_clamped(0, col.saturating_sub(1), "day");
        }
        out.extend(axis.cells[0].iter());

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> Series {
        [
            ("mon", 1),
            ("tue", 2),
            ("wed", 3),
            ("thu", 4),
            ("fri", 4),
            ("sat", 2),
            ("sun", 1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_canvas_width() {
        assert_eq!(canvas_width(80), 42);
        assert_eq!(canvas_width(24), 6);
        // floor(10/3)*2 - 10 = -4, clamped
        assert_eq!(canvas_width(10), 1);
        assert_eq!(canvas_width(0), 1);
    }

    #[test]
    fn test_fixed_probe() {
        assert_eq!(FixedProbe(80, 24).probe(), (80, 24));
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        assert_eq!(chart.width, 42);
        assert_eq!(chart.height, 18);
    }

    #[test]
    fn test_tick_positions() {
        assert_eq!(tick_positions(18, 4), vec![0, 6, 12, 18]);
        assert_eq!(tick_positions(42, 9), vec![0, 5, 11, 16, 21, 26, 32, 37, 42]);
    }

    #[test]
    fn test_tick_positions_dedup_on_rounding() {
        // 0, 0.67, 1.33, 2 all round into three distinct rows
        assert_eq!(tick_positions(2, 4), vec![0, 1, 2]);
        assert_eq!(tick_positions(0, 4), vec![0]);
    }

    #[test]
    fn test_marker_must_be_one_char() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        assert_eq!(chart.bar(""), Err(ChartError::InvalidMarker));
        assert_eq!(chart.bar("##"), Err(ChartError::InvalidMarker));
        assert_eq!(chart.grid("++"), Err(ChartError::InvalidMarker));
    }

    #[test]
    fn test_empty_series_sentinel() {
        let chart = Chart::with_probe(Series::new(), &FixedProbe(80, 24));
        assert_eq!(chart.bar("#").unwrap(), "No data");
        assert_eq!(chart.grid("+").unwrap(), "No data");
    }

    #[test]
    fn test_linear_bar_output() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        let out = chart.bar("+").unwrap();
        let expected = "Temperature °C\n\
                        mon |+ \n\
                        tue |++ \n\
                        wed |+++ \n\
                        thu |++++ \n\
                        fri |++++ \n\
                        sat |++ \n\
                        sun |+ \n";
        assert_eq!(out, expected);
        assert_eq!(out.lines().count(), 8);
    }

    #[test]
    fn test_linear_marker_counts_match_values() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        let out = chart.bar("#").unwrap();
        for (line, (label, value)) in out.lines().skip(1).zip(sample_series().iter()) {
            assert!(line.starts_with(label));
            let markers = line.chars().filter(|&c| c == '#').count();
            assert_eq!(markers as u64, value, "row for {label}");
        }
    }

    #[test]
    fn test_grid_geometry() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        let out = chart.grid("+").unwrap();
        let lines: Vec<&str> = out.lines().collect();

        // title + 18 canvas rows + x-axis line
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], "Weather Forecast (Temperature) ");
        for line in &lines[1..] {
            assert_eq!(line.chars().count(), 42);
        }
    }

    #[test]
    fn test_grid_markers_on_plot_row() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        let out = chart.grid("+").unwrap();
        let lines: Vec<&str> = out.lines().collect();

        let plot_line: Vec<char> = lines[1 + PLOT_ROW].chars().collect();
        for col in [5, 11, 16, 21, 26, 32, 37] {
            assert_eq!(plot_line[col], '+', "anchor at column {col}");
        }
        assert_eq!(plot_line.iter().filter(|&&c| c == '+').count(), 7);

        // no markers anywhere else
        for (idx, line) in lines[1..19].iter().enumerate() {
            if idx != PLOT_ROW {
                assert!(!line.contains('+'), "stray marker on row {idx}");
            }
        }
    }

    #[test]
    fn test_grid_y_axis_labels() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        let out = chart.grid("+").unwrap();
        let lines: Vec<&str> = out.lines().collect();

        // tick values {0, 6, 12, 18}; 18 exceeds the top row's reverse
        // index (17) so only three rows carry labels
        for (row, expect) in [(17, "0"), (11, "6"), (5, "12")] {
            assert!(lines[1 + row].starts_with(expect), "row {row}");
        }
        for row in 0..18 {
            if ![17, 11, 5].contains(&row) {
                assert!(lines[1 + row].starts_with(' '), "row {row} should be blank");
            }
        }
    }

    #[test]
    fn test_grid_day_labels() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        let out = chart.grid("+").unwrap();
        let axis: Vec<char> = out.lines().last().unwrap().chars().collect();

        // "day" centered on every anchor except the leftmost; the anchor
        // at the right edge shrinks to what fits
        for anchor in [5, 11, 16, 21, 26, 32, 37] {
            assert_eq!(axis[anchor - 1], 'd');
            assert_eq!(axis[anchor], 'a');
            assert_eq!(axis[anchor + 1], 'y');
        }
        assert_eq!(axis[41], 'd');
        assert_eq!(axis[..4].iter().collect::<String>(), "    ");
    }

    #[test]
    fn test_narrow_terminal_does_not_overflow() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(10, 24));
        let out = chart.grid("+").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 20);
        for line in &lines[1..] {
            assert_eq!(line.chars().count(), 1);
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let chart = Chart::with_probe(sample_series(), &FixedProbe(80, 24));
        let first = chart.grid("+").unwrap();
        let second = chart.grid("+").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_series_insert_updates_in_place() {
        let mut series = Series::new();
        series.insert("mon", 1);
        series.insert("tue", 2);
        series.insert("mon", 5);

        let entries: Vec<(&str, u64)> = series.iter().collect();
        assert_eq!(entries, vec![("mon", 5), ("tue", 2)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.get("mon"), Some(5));
        assert_eq!(series.get("wed"), None);
    }
}
