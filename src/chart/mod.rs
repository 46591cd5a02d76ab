//! 표시 계층에 넘기는 차트 데이터. 그리는 방법(SVG, egui)은 소비하는 쪽이 정한다.

pub mod svg;

use serde::Serialize;

use crate::i18n::{keys, Translator};
use crate::plate::ThermalResult;

/// sRGB 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const BLUE: Rgb = Rgb(31, 119, 180);
    pub const ORANGE: Rgb = Rgb(255, 127, 14);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// 꺾은선 하나. 점은 (x, y) 순서.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub dashed: bool,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

/// 평균/최고 온도의 시간 변화. x축은 분 단위.
pub fn temperature_chart(result: &ThermalResult, tr: &Translator) -> LineChart {
    let minutes: Vec<f64> = result.time_series_sec.iter().map(|t| t / 60.0).collect();
    let zip = |values: &[f64]| -> Vec<(f64, f64)> {
        minutes.iter().copied().zip(values.iter().copied()).collect()
    };
    LineChart {
        title: tr.t(keys::CHART_TIME_TITLE).to_string(),
        x_label: tr.t(keys::CHART_TIME_X).to_string(),
        y_label: tr.t(keys::CHART_TEMP_Y).to_string(),
        series: vec![
            LineSeries {
                label: tr.t(keys::CHART_MEAN_SERIES).to_string(),
                points: zip(&result.mean_temp_series),
                dashed: false,
                color: Rgb::BLUE,
            },
            LineSeries {
                label: tr.t(keys::CHART_MAX_SERIES).to_string(),
                points: zip(&result.max_temp_series),
                dashed: true,
                color: Rgb::ORANGE,
            },
        ],
    }
}

/// 화염 쪽/반대쪽 면 온도 막대 두 개.
pub fn surface_chart(result: &ThermalResult, tr: &Translator) -> BarChart {
    BarChart {
        title: tr.t(keys::CHART_SURFACE_TITLE).to_string(),
        y_label: tr.t(keys::CHART_TEMP_Y).to_string(),
        bars: vec![
            Bar {
                label: tr.t(keys::CHART_BAR_LOWER).to_string(),
                value: result.lower_surface_temp_c,
                color: Rgb::RED,
            },
            Bar {
                label: tr.t(keys::CHART_BAR_UPPER).to_string(),
                value: result.upper_surface_temp_c,
                color: Rgb::BLUE,
            },
        ],
    }
}

/// 값 범위에 여백을 더한 축 범위. 막대 차트를 위해 0을 포함시킬 수 있다.
/// 범위가 0이면 ±1을 둔다.
pub fn value_bounds<I>(values: I, include_zero: bool) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let (mut lo, mut hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let span = hi - lo;
    if span.abs() < 1e-9 {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = span * 0.05;
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
    (lo, hi + pad)
}
