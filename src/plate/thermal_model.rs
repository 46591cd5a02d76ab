use std::f64::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};

use super::inputs::{InputLimits, PlateInput, ThermalCalcError};
use super::series::{linear_ramp, linspace, scaled};

/// 반대쪽 면 온도를 구할 때 두께 방향 온도차를 어떻게 환산할지 정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceDropMode {
    /// 구배 값에 100을 곱해 뺀다. 기존 화면과 같은 숫자를 내기 위한 기본값.
    PerCentimeterTimesHundred,
    /// 푸리에 식 ΔT = q·L/k 를 그대로 뺀다.
    Fourier,
}

/// 경험적 상수. 물리적으로 유도된 값이 아니므로 설정으로 바꿀 수 있게 둔다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConstants {
    /// 주위(초기) 온도 [°C]
    pub ambient_c: f64,
    /// 화염 직상부 최고 온도 / 평균 온도 배율
    pub hotspot_factor: f64,
    /// 시간 곡선 샘플 수 (양 끝점 포함)
    pub sample_count: usize,
    pub surface_drop: SurfaceDropMode,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            ambient_c: 25.0,
            hotspot_factor: 1.3,
            sample_count: 200,
            surface_drop: SurfaceDropMode::PerCentimeterTimesHundred,
        }
    }
}

impl ModelConstants {
    fn validate(&self) -> Result<(), ThermalCalcError> {
        if !self.ambient_c.is_finite() {
            return Err(ThermalCalcError::Validation {
                field: "ambient temperature",
                value: self.ambient_c,
                reason: "must be a finite number",
            });
        }
        if !self.hotspot_factor.is_finite() || self.hotspot_factor <= 0.0 {
            return Err(ThermalCalcError::Validation {
                field: "hotspot factor",
                value: self.hotspot_factor,
                reason: "must be greater than zero",
            });
        }
        if self.sample_count < 2 {
            return Err(ThermalCalcError::Validation {
                field: "sample count",
                value: self.sample_count as f64,
                reason: "needs at least two samples",
            });
        }
        Ok(())
    }
}

/// 플레이트 가열 계산 결과. 한 번 계산해서 표시한 뒤 버린다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalResult {
    /// 면적 [m²]
    pub area_m2: f64,
    /// 체적 [m³]
    pub volume_m3: f64,
    /// 질량 [kg]
    pub mass_kg: f64,
    /// 공급 에너지 [J]
    pub total_energy_j: f64,
    /// 플레이트가 흡수한 에너지 [J]
    pub effective_energy_j: f64,
    /// 평균 온도 상승 [K]
    pub delta_t_mean_c: f64,
    /// 노출 시간 평균 열유속 [W/m²]
    pub heat_flux_w_m2: f64,
    pub mean_temp_c: f64,
    pub max_temp_c: f64,
    /// 두께 방향 온도 구배 [°C/cm]
    pub gradient_c_per_cm: f64,
    /// 화염 쪽(아래) 면 온도
    pub lower_surface_temp_c: f64,
    /// 반대쪽(위) 면 온도
    pub upper_surface_temp_c: f64,
    pub time_series_sec: Vec<f64>,
    pub mean_temp_series: Vec<f64>,
    pub max_temp_series: Vec<f64>,
}

/// 기본 상수와 기본 허용 범위로 계산한다.
pub fn compute_thermal_result(input: PlateInput) -> Result<ThermalResult, ThermalCalcError> {
    compute_with(input, &ModelConstants::default(), &InputLimits::default())
}

/// 집중 열용량(lumped) 열수지로 평균 온도를, 정상상태 푸리에 전도로 두께 방향 온도차를 구한다.
pub fn compute_with(
    input: PlateInput,
    constants: &ModelConstants,
    limits: &InputLimits,
) -> Result<ThermalResult, ThermalCalcError> {
    constants.validate()?;
    input.validate(limits)?;

    let props = input.material.properties();
    let g = input.geometry;
    let s = input.scenario;
    let duration_min = f64::from(s.duration_min);
    let duration_s = s.duration_s();

    // cm -> m
    let radius_m = g.diameter_cm / 2.0 / 100.0;
    let area_m2 = PI * (radius_m * radius_m);
    let volume_m3 = g.thickness_cm / 100.0 * area_m2;
    let mass_kg = props.density_kg_m3 * volume_m3;
    if mass_kg == 0.0 || !mass_kg.is_finite() {
        return Err(ThermalCalcError::DegenerateDivision("mass"));
    }

    let total_energy_j = s.power_kw * 1000.0 * duration_min * 60.0;
    let effective_energy_j = total_energy_j * (f64::from(s.efficiency_percent) / 100.0);

    let delta_t_mean_c = effective_energy_j / (mass_kg * props.specific_heat_j_kg_k);
    // 극히 작은(비정규) 질량·비열이면 0이 아니어도 온도 상승이 무한대로 넘친다.
    if !delta_t_mean_c.is_finite() {
        return Err(ThermalCalcError::DegenerateDivision("heat capacity"));
    }
    let mean_temp_c = constants.ambient_c + delta_t_mean_c;
    let max_temp_c = mean_temp_c * constants.hotspot_factor;

    // q = k·ΔT/L 를 ΔT에 대해 푼다. 열유속은 노출 시간 평균값.
    let heat_flux_w_m2 = (effective_energy_j / duration_s) / area_m2;
    let gradient_c_per_cm = heat_flux_w_m2 * (g.thickness_cm / 100.0) / props.conductivity_w_m_k;
    if !gradient_c_per_cm.is_finite() {
        return Err(ThermalCalcError::DegenerateDivision("thermal conductivity"));
    }

    let lower_surface_temp_c = max_temp_c;
    let drop = match constants.surface_drop {
        SurfaceDropMode::PerCentimeterTimesHundred => gradient_c_per_cm * 100.0,
        // q·L/k 자체가 이미 전체 두께에 걸친 온도차다.
        SurfaceDropMode::Fourier => gradient_c_per_cm,
    };
    let upper_surface_temp_c = lower_surface_temp_c - drop;

    let time_series_sec = linspace(0.0, duration_s, constants.sample_count);
    let mean_temp_series = linear_ramp(
        &time_series_sec,
        duration_s,
        constants.ambient_c,
        delta_t_mean_c,
    );
    let max_temp_series = scaled(&mean_temp_series, constants.hotspot_factor);

    debug!(
        "plate {:?}: m={mass_kg:.4} kg, E_eff={effective_energy_j:.0} J, T_mean={mean_temp_c:.1} C, T_max={max_temp_c:.1} C, grad={gradient_c_per_cm:.2} C/cm",
        input.material
    );

    Ok(ThermalResult {
        area_m2,
        volume_m3,
        mass_kg,
        total_energy_j,
        effective_energy_j,
        delta_t_mean_c,
        heat_flux_w_m2,
        mean_temp_c,
        max_temp_c,
        gradient_c_per_cm,
        lower_surface_temp_c,
        upper_surface_temp_c,
        time_series_sec,
        mean_temp_series,
        max_temp_series,
    })
}
