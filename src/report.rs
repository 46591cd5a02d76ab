//! 계산 결과를 화면 출력용 문자열로 정리한다. 값은 소수 첫째 자리까지 표시한다.

use serde::Serialize;

use crate::i18n::{keys, Translator};
use crate::plate::ThermalResult;

/// 라벨과 표시 문자열 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

/// 다섯 개의 스칼라 결과(평균, 최고, 구배, 아랫면, 윗면).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub mean_temp: SummaryLine,
    pub max_temp: SummaryLine,
    pub gradient: SummaryLine,
    pub lower_surface: SummaryLine,
    pub upper_surface: SummaryLine,
}

pub fn format_celsius(value: f64) -> String {
    format!("{value:.1} °C")
}

/// 구배는 근사치임을 나타내기 위해 `~`를 붙인다.
pub fn format_gradient(value: f64) -> String {
    format!("~{value:.1} °C/cm")
}

impl ResultSummary {
    pub fn from_result(result: &ThermalResult, tr: &Translator) -> Self {
        let line = |key: &str, value: String| SummaryLine {
            label: tr.t(key).to_string(),
            value,
        };
        Self {
            mean_temp: line(keys::RESULT_MEAN_TEMP, format_celsius(result.mean_temp_c)),
            max_temp: line(keys::RESULT_MAX_TEMP, format_celsius(result.max_temp_c)),
            gradient: line(keys::RESULT_GRADIENT, format_gradient(result.gradient_c_per_cm)),
            lower_surface: line(
                keys::RESULT_LOWER_SURFACE,
                format_celsius(result.lower_surface_temp_c),
            ),
            upper_surface: line(
                keys::RESULT_UPPER_SURFACE,
                format_celsius(result.upper_surface_temp_c),
            ),
        }
    }

    /// 표시 순서대로 반환한다.
    pub fn lines(&self) -> [&SummaryLine; 5] {
        [
            &self.mean_temp,
            &self.max_temp,
            &self.gradient,
            &self.lower_surface,
            &self.upper_surface,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_decimal_place() {
        assert_eq!(format_celsius(731.96), "732.0 °C");
        assert_eq!(format_celsius(-3.04), "-3.0 °C");
        assert_eq!(format_gradient(0.254), "~0.3 °C/cm");
    }
}
