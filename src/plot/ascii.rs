//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - price/yield curve: `*`
//! - face value reference: `-` horizontal line

use crate::domain::{CurveFile, PricePoint};
use crate::report::{format_currency, format_percent};

/// Fallback x-range when the curve has fewer than two distinct yields.
const DEFAULT_YTM_RANGE: (f64, f64) = (0.01, 0.10);

/// Render a price/yield curve with an optional face-value line.
pub fn render_price_yield_plot(
    points: &[PricePoint],
    face_value: Option<f64>,
    width: usize,
    height: usize,
) -> String {
    let curve: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.yield_to_maturity.is_finite() && p.price.is_finite())
        .map(|p| (p.yield_to_maturity, p.price))
        .collect();
    render_plot(&curve, face_value, width, height)
}

/// Render a plot from a saved curve JSON file.
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    render_price_yield_plot(&curve.points, Some(curve.bond.face_value), width, height)
}

fn render_plot(curve: &[(f64, f64)], face_value: Option<f64>, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let face_value = face_value.filter(|v| v.is_finite());

    let (x_min, x_max) = x_range(curve).unwrap_or(DEFAULT_YTM_RANGE);
    let (y_min, y_max) = y_range(curve, face_value).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so the reference line only fills the gaps.
    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);
    if let Some(face) = face_value {
        let row = map_y(face, y_min, y_max, height);
        for cell in grid[row].iter_mut() {
            if *cell == ' ' {
                *cell = '-';
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: ytm=[{}, {}] | price=[{}, {}]\n",
        format_percent(x_min, 2),
        format_percent(x_max, 2),
        format_currency(y_min),
        format_currency(y_max),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    if let Some(face) = face_value {
        out.push_str(&format!("* price  - face value {}\n", format_currency(face)));
    }

    out
}

fn x_range(curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in curve {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(curve: &[(f64, f64)], face_value: Option<f64>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in curve {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if let Some(face) = face_value {
        min_y = min_y.min(face);
        max_y = max_y.max(face);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '*');
        } else {
            grid[row][col] = '*';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let points = [
            PricePoint { yield_to_maturity: 0.0, price: 110.0 },
            PricePoint { yield_to_maturity: 0.1, price: 90.0 },
        ];

        let txt = render_price_yield_plot(&points, Some(100.0), 10, 5);
        let expected = concat!(
            "Plot: ytm=[0.00%, 10.00%] | price=[$89.00, $111.00]\n",
            "**        \n",
            "  **      \n",
            "----**----\n",
            "      **  \n",
            "        **\n",
            "* price  - face value $100.00\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn plot_without_face_line_or_points() {
        let txt = render_price_yield_plot(&[], None, 12, 6);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("Plot: ytm=[1.00%, 10.00%]"));
        assert!(lines[1..].iter().all(|l| l.trim().is_empty() && l.len() == 12));
    }

    #[test]
    fn non_finite_prices_are_skipped() {
        let points = [
            PricePoint { yield_to_maturity: 0.01, price: 105.0 },
            PricePoint { yield_to_maturity: 0.05, price: f64::NAN },
            PricePoint { yield_to_maturity: 0.10, price: 95.0 },
        ];
        let txt = render_price_yield_plot(&points, None, 10, 5);
        assert!(txt.contains("price=[$94.50, $105.50]"));
        assert!(txt.contains('*'));
    }
}
