//! 차트 데이터를 독립 실행 가능한 SVG 문서로 그린다.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use super::{value_bounds, BarChart, LineChart};

// viewBox="0 0 640 400" 안의 그림 영역
const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const PLOT_LEFT: f64 = 70.0;
const PLOT_RIGHT: f64 = 610.0;
const PLOT_TOP: f64 = 50.0;
const PLOT_BOTTOM: f64 = 340.0;
const TICKS: usize = 5;

/// 차트 파일 저장 오류.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot write chart {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn map(v: f64, lo: f64, hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    out_lo + (v - lo) / (hi - lo) * (out_hi - out_lo)
}

/// 데이터 좌표를 SVG polyline의 points 문자열로 바꾼다.
pub fn to_polyline_points(points: &[(f64, f64)], x: (f64, f64), y: (f64, f64)) -> String {
    points
        .iter()
        .map(|(px, py)| {
            let sx = map(*px, x.0, x.1, PLOT_LEFT, PLOT_RIGHT);
            let sy = map(*py, y.0, y.1, PLOT_BOTTOM, PLOT_TOP);
            format!("{sx:.1},{sy:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
    );
    let _ = writeln!(out, "<title>{}</title>", escape(title));
    let _ = writeln!(out, r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#);
    let _ = writeln!(
        out,
        r#"<text x="{}" y="28" text-anchor="middle" font-size="16">{}</text>"#,
        WIDTH / 2.0,
        escape(title)
    );
}

fn y_axis(out: &mut String, y_label: &str, lo: f64, hi: f64) {
    let _ = writeln!(
        out,
        r#"<line x1="{PLOT_LEFT}" y1="{PLOT_TOP}" x2="{PLOT_LEFT}" y2="{PLOT_BOTTOM}" stroke="black"/>"#
    );
    for i in 0..=TICKS {
        let v = lo + (hi - lo) * i as f64 / TICKS as f64;
        let y = map(v, lo, hi, PLOT_BOTTOM, PLOT_TOP);
        let _ = writeln!(
            out,
            r##"<line x1="{PLOT_LEFT}" y1="{y:.1}" x2="{PLOT_RIGHT}" y2="{y:.1}" stroke="#dddddd"/>"##
        );
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{:.1}" text-anchor="end">{v:.0}</text>"#,
            PLOT_LEFT - 6.0,
            y + 4.0
        );
    }
    let mid = (PLOT_TOP + PLOT_BOTTOM) / 2.0;
    let _ = writeln!(
        out,
        r#"<text x="18" y="{mid}" text-anchor="middle" transform="rotate(-90 18 {mid})">{}</text>"#,
        escape(y_label)
    );
}

/// 꺾은선 차트를 SVG 문자열로 만든다.
pub fn render_line_chart(chart: &LineChart) -> String {
    let xs = chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
    let x_bounds = {
        let (lo, hi) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if lo.is_finite() && hi > lo {
            (lo, hi)
        } else {
            (0.0, 1.0)
        }
    };
    let y_bounds = value_bounds(
        chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1)),
        false,
    );

    let mut out = String::new();
    header(&mut out, &chart.title);
    y_axis(&mut out, &chart.y_label, y_bounds.0, y_bounds.1);

    let _ = writeln!(
        out,
        r#"<line x1="{PLOT_LEFT}" y1="{PLOT_BOTTOM}" x2="{PLOT_RIGHT}" y2="{PLOT_BOTTOM}" stroke="black"/>"#
    );
    for i in 0..=TICKS {
        let v = x_bounds.0 + (x_bounds.1 - x_bounds.0) * i as f64 / TICKS as f64;
        let x = map(v, x_bounds.0, x_bounds.1, PLOT_LEFT, PLOT_RIGHT);
        let _ = writeln!(
            out,
            r#"<text x="{x:.1}" y="{}" text-anchor="middle">{v:.1}</text>"#,
            PLOT_BOTTOM + 18.0
        );
    }
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
        (PLOT_LEFT + PLOT_RIGHT) / 2.0,
        HEIGHT - 20.0,
        escape(&chart.x_label)
    );

    for (idx, s) in chart.series.iter().enumerate() {
        let dash = if s.dashed { r#" stroke-dasharray="8 5""# } else { "" };
        let _ = writeln!(
            out,
            r#"<polyline fill="none" stroke="{}" stroke-width="2"{dash} points="{}"/>"#,
            s.color.hex(),
            to_polyline_points(&s.points, x_bounds, y_bounds)
        );
        // 범례
        let ly = PLOT_TOP + 12.0 + idx as f64 * 18.0;
        let _ = writeln!(
            out,
            r#"<line x1="{}" y1="{ly}" x2="{}" y2="{ly}" stroke="{}" stroke-width="2"{dash}/>"#,
            PLOT_LEFT + 10.0,
            PLOT_LEFT + 40.0,
            s.color.hex()
        );
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}">{}</text>"#,
            PLOT_LEFT + 46.0,
            ly + 4.0,
            escape(&s.label)
        );
    }
    out.push_str("</svg>\n");
    out
}

/// 막대 차트를 SVG 문자열로 만든다. 막대 위에 값을 적는다.
pub fn render_bar_chart(chart: &BarChart) -> String {
    let (lo, hi) = value_bounds(chart.bars.iter().map(|b| b.value), true);
    let mut out = String::new();
    header(&mut out, &chart.title);
    y_axis(&mut out, &chart.y_label, lo, hi);

    let zero_y = map(0.0, lo, hi, PLOT_BOTTOM, PLOT_TOP);
    let _ = writeln!(
        out,
        r#"<line x1="{PLOT_LEFT}" y1="{zero_y:.1}" x2="{PLOT_RIGHT}" y2="{zero_y:.1}" stroke="black"/>"#
    );

    let n = chart.bars.len().max(1) as f64;
    let slot = (PLOT_RIGHT - PLOT_LEFT) / n;
    for (i, bar) in chart.bars.iter().enumerate() {
        let x = PLOT_LEFT + slot * i as f64 + slot * 0.2;
        let w = slot * 0.6;
        let y = map(bar.value, lo, hi, PLOT_BOTTOM, PLOT_TOP);
        let (top, h) = if y < zero_y { (y, zero_y - y) } else { (zero_y, y - zero_y) };
        let _ = writeln!(
            out,
            r#"<rect x="{x:.1}" y="{top:.1}" width="{w:.1}" height="{h:.1}" fill="{}"/>"#,
            bar.color.hex()
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{:.1}</text>"#,
            x + w / 2.0,
            top - 6.0,
            bar.value
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{}" text-anchor="middle">{}</text>"#,
            x + w / 2.0,
            PLOT_BOTTOM + 18.0,
            escape(&bar.label)
        );
    }
    out.push_str("</svg>\n");
    out
}

/// 두 차트를 `dir`에 저장하고 경로를 반환한다. 디렉터리가 없으면 만든다.
pub fn write_charts(
    dir: &Path,
    line: &LineChart,
    bars: &BarChart,
) -> Result<[PathBuf; 2], ChartError> {
    fs::create_dir_all(dir).map_err(|source| ChartError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let line_path = dir.join("temperature_over_time.svg");
    let bar_path = dir.join("surface_temperatures.svg");
    write_file(&line_path, &render_line_chart(line))?;
    write_file(&bar_path, &render_bar_chart(bars))?;
    Ok([line_path, bar_path])
}

pub fn write_file(path: &Path, content: &str) -> Result<(), ChartError> {
    fs::write(path, content).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("chart written to {}", path.display());
    Ok(())
}
