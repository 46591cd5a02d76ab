use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material_db::{MaterialProperties, PlateMaterial};

/// 플레이트 열수지 계산 오류를 표현한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThermalCalcError {
    /// 입력값이 0 이하이거나 유한하지 않거나 허용 범위를 벗어난 경우
    #[error("invalid {field} = {value}: {reason}")]
    Validation {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// 질량, 열용량, 열전도율이 0이나 무한대로 떨어져 나눗셈이 성립하지 않는 경우
    #[error("degenerate division: {0} is zero or not finite")]
    DegenerateDivision(&'static str),
}

/// 원판 형상 [cm].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub diameter_cm: f64,
    pub thickness_cm: f64,
}

/// 가열 조건.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatingScenario {
    /// 버너 출력 [kW]
    pub power_kw: f64,
    /// 노출 시간 [분], 정수
    pub duration_min: u32,
    /// 열전달 효율 [%], 정수
    pub efficiency_percent: u32,
}

impl HeatingScenario {
    pub fn duration_s(&self) -> f64 {
        f64::from(self.duration_min) * 60.0
    }
}

/// 한 번의 계산에 쓰이는 입력 묶음. 계산마다 새로 만들어 값으로 넘긴다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateInput {
    pub material: PlateMaterial,
    pub geometry: Geometry,
    pub scenario: HeatingScenario,
}

/// 닫힌 구간 [min, max].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// 입력 허용 범위. UI 슬라이더 범위와 같다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputLimits {
    pub diameter_cm: Bounds,
    pub thickness_cm: Bounds,
    pub power_kw: Bounds,
    pub duration_min: Bounds,
    pub efficiency_percent: Bounds,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            diameter_cm: Bounds::new(10.0, 100.0),
            thickness_cm: Bounds::new(0.5, 5.0),
            power_kw: Bounds::new(0.5, 10.0),
            duration_min: Bounds::new(1.0, 60.0),
            efficiency_percent: Bounds::new(10.0, 80.0),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ThermalCalcError> {
    if !value.is_finite() {
        return Err(ThermalCalcError::Validation {
            field,
            value,
            reason: "must be a finite number",
        });
    }
    if value <= 0.0 {
        return Err(ThermalCalcError::Validation {
            field,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

fn within(field: &'static str, value: f64, bounds: Bounds) -> Result<(), ThermalCalcError> {
    if !bounds.contains(value) {
        return Err(ThermalCalcError::Validation {
            field,
            value,
            reason: "outside the allowed range",
        });
    }
    Ok(())
}

/// 재료 물성이 모두 유한한 양수인지 확인한다.
pub fn validate_material(props: &MaterialProperties) -> Result<(), ThermalCalcError> {
    positive("density", props.density_kg_m3)?;
    positive("specific heat", props.specific_heat_j_kg_k)?;
    positive("thermal conductivity", props.conductivity_w_m_k)?;
    Ok(())
}

impl PlateInput {
    /// 계산 전에 모든 입력을 검증한다. 첫 번째 오류에서 바로 반환한다.
    pub fn validate(&self, limits: &InputLimits) -> Result<(), ThermalCalcError> {
        validate_material(&self.material.properties())?;

        let g = &self.geometry;
        positive("diameter", g.diameter_cm)?;
        positive("thickness", g.thickness_cm)?;
        within("diameter", g.diameter_cm, limits.diameter_cm)?;
        within("thickness", g.thickness_cm, limits.thickness_cm)?;

        let s = &self.scenario;
        positive("power", s.power_kw)?;
        within("power", s.power_kw, limits.power_kw)?;
        within("duration", f64::from(s.duration_min), limits.duration_min)?;
        within(
            "efficiency",
            f64::from(s.efficiency_percent),
            limits.efficiency_percent,
        )?;
        if s.duration_min == 0 {
            return Err(ThermalCalcError::Validation {
                field: "duration",
                value: 0.0,
                reason: "must be greater than zero",
            });
        }
        if s.efficiency_percent == 0 || s.efficiency_percent > 100 {
            return Err(ThermalCalcError::Validation {
                field: "efficiency",
                value: f64::from(s.efficiency_percent),
                reason: "must be within (0, 100]",
            });
        }
        Ok(())
    }
}
