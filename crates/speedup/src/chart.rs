//! Bar chart rendering for kernel speedups.
//!
//! Both renderers draw one bar per operation on a fixed `[0, 2]` ratio axis
//! with a reference line at 1.0. Bars taller than the axis are clipped.

use crate::result::SpeedupRecord;
use std::fmt::Write;

/// Upper bound of the ratio axis.
pub const Y_MAX: f64 = 2.0;

/// Ratio at which a specialized kernel is exactly as fast as the baseline.
pub const REFERENCE_RATIO: f64 = 1.0;

/// Terminal cell marking [`REFERENCE_RATIO`].
pub const REFERENCE_MARKER: char = '|';

/// Caption for the ratio axis.
pub const Y_LABEL: &str = "Time taken of fastest kernel relative to generic kernel";

/// Turns ordered speedups into a chart document.
pub trait ChartRenderer {
    /// Render the chart for `records`, in the given order.
    fn render(&self, records: &[SpeedupRecord]) -> String;
}

/// Clamp a ratio into the drawable `[0, Y_MAX]` range.
fn clip(ratio: f64) -> f64 {
    ratio.clamp(0.0, Y_MAX)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

// ─── SVG ─────────────────────────────────────────────────────────────────────

/// Vertical SVG bar chart with rotated operation labels.
#[derive(Debug, Clone)]
pub struct SvgChart {
    /// Horizontal space per bar slot.
    pub bar_slot: f64,
    /// Height of the plotting area.
    pub plot_height: f64,
    /// Bar fill colour.
    pub bar_colour: String,
}

impl Default for SvgChart {
    fn default() -> Self {
        Self {
            bar_slot: 14.0,
            plot_height: 400.0,
            bar_colour: "#1F77B4".to_string(),
        }
    }
}

impl SvgChart {
    const LEFT: f64 = 70.0;
    const RIGHT: f64 = 20.0;
    const TOP: f64 = 20.0;
    const LABEL_AREA: f64 = 190.0;
    const TICKS: [f64; 5] = [0.0, 0.5, 1.0, 1.5, 2.0];
}

impl ChartRenderer for SvgChart {
    fn render(&self, records: &[SpeedupRecord]) -> String {
        // One empty slot either side, like an axis spanning [-1, n].
        let slots = records.len() as f64 + 1.0;
        let plot_w = slots * self.bar_slot;
        let width = Self::LEFT + plot_w + Self::RIGHT;
        let height = Self::TOP + self.plot_height + Self::LABEL_AREA;
        let x0 = Self::LEFT;
        let y0 = Self::TOP + self.plot_height;
        let y_of = |ratio: f64| y0 - clip(ratio) / Y_MAX * self.plot_height;
        let x_of = |i: usize| x0 + (i as f64 + 1.0) * self.bar_slot;
        let bar_w = self.bar_slot * 0.8;

        let mut w = String::new();
        let _ = writeln!(
            w,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.1}\" height=\"{height:.1}\" font-family=\"sans-serif\">"
        );
        let _ = writeln!(
            w,
            "<rect width=\"{width:.1}\" height=\"{height:.1}\" fill=\"white\"/>"
        );

        // y ticks and caption
        for t in Self::TICKS {
            let ty = y_of(t);
            let _ = writeln!(
                w,
                "<line class=\"tick\" x1=\"{:.1}\" y1=\"{ty:.1}\" x2=\"{x0:.1}\" y2=\"{ty:.1}\" stroke=\"#000\" stroke-width=\"1\"/>",
                x0 - 4.0
            );
            let _ = writeln!(
                w,
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\">{t:.1}</text>",
                x0 - 6.0,
                ty + 3.5
            );
        }
        let cy = Self::TOP + self.plot_height / 2.0;
        let _ = writeln!(
            w,
            "<text x=\"18\" y=\"{cy:.1}\" text-anchor=\"middle\" font-size=\"10\" transform=\"rotate(-90 18 {cy:.1})\">{}</text>",
            escape_xml(Y_LABEL)
        );

        // bars and rotated labels
        for (i, r) in records.iter().enumerate() {
            let cx = x_of(i);
            let top = y_of(r.ratio);
            let _ = writeln!(
                w,
                "<rect class=\"bar\" x=\"{:.1}\" y=\"{top:.1}\" width=\"{bar_w:.1}\" height=\"{:.1}\" fill=\"{}\"><title>{} {:.3}</title></rect>",
                cx - bar_w / 2.0,
                y0 - top,
                self.bar_colour,
                escape_xml(&r.display_name),
                r.ratio
            );
            let ly = y0 + 6.0;
            let _ = writeln!(
                w,
                "<text x=\"{cx:.1}\" y=\"{ly:.1}\" text-anchor=\"end\" font-size=\"9\" transform=\"rotate(-90 {cx:.1} {ly:.1})\">{}</text>",
                escape_xml(&r.display_name)
            );
        }

        // axes frame
        let _ = writeln!(
            w,
            "<rect x=\"{x0:.1}\" y=\"{:.1}\" width=\"{plot_w:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"#000\" stroke-width=\"1\"/>",
            Self::TOP,
            self.plot_height
        );

        // reference line spans the full plot width
        let ry = y_of(REFERENCE_RATIO);
        let _ = writeln!(
            w,
            "<line class=\"reference\" x1=\"{x0:.1}\" y1=\"{ry:.1}\" x2=\"{:.1}\" y2=\"{ry:.1}\" stroke=\"red\" stroke-width=\"1.5\" stroke-dasharray=\"6,4\"/>",
            x0 + plot_w
        );

        let _ = writeln!(w, "</svg>");
        w
    }
}

// ─── Terminal ────────────────────────────────────────────────────────────────

/// Horizontal text bar chart for terminal output.
#[derive(Debug, Clone)]
pub struct TerminalChart {
    /// Cells used by a bar of height [`Y_MAX`].
    pub width: usize,
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self { width: 50 }
    }
}

impl TerminalChart {
    /// Create a chart with the given full-scale width.
    pub fn new(width: usize) -> Self {
        Self { width: width.max(2) }
    }

    fn cells(&self, ratio: f64) -> usize {
        (clip(ratio) / Y_MAX * self.width as f64).round() as usize
    }

    fn render_bar(&self, ratio: f64) -> String {
        let filled = self.cells(ratio);
        let marker = self.cells(REFERENCE_RATIO);
        let mut bar = String::with_capacity(self.width * 3 + 1);
        for cell in 0..self.width {
            let ch = if cell == marker {
                REFERENCE_MARKER
            } else if cell < filled {
                '█'
            } else {
                ' '
            };
            bar.push(ch);
        }
        bar.push(if ratio > Y_MAX { '>' } else { ' ' });
        bar
    }
}

impl ChartRenderer for TerminalChart {
    fn render(&self, records: &[SpeedupRecord]) -> String {
        let label_w = records
            .iter()
            .map(|r| r.display_name.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{Y_LABEL}");
        let _ = writeln!(
            out,
            "{:label_w$} 0{:>half$}{:>half$}",
            "",
            format!("{REFERENCE_RATIO:.0}"),
            format!("{Y_MAX:.0}"),
            half = self.width / 2,
        );
        for r in records {
            let _ = writeln!(
                out,
                "{:<label_w$} {} {:.3}",
                r.display_name,
                self.render_bar(r.ratio),
                r.ratio
            );
        }
        out
    }
}
