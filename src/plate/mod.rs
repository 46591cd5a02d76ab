//! 가열 플레이트 열수지 계산 모듈을 모아둔다.
//! 입력 검증, 평균/최고 온도와 두께 방향 온도차, 시간에 따른 온도 곡선으로 구성한다.

pub mod inputs;
pub mod series;
pub mod thermal_model;

pub use inputs::{Geometry, HeatingScenario, InputLimits, PlateInput, ThermalCalcError};
pub use thermal_model::{
    compute_thermal_result, compute_with, ModelConstants, SurfaceDropMode, ThermalResult,
};
