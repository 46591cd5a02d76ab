//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 모델을 쓰도록 한다.

pub mod app;
pub mod chart;
pub mod config;
pub mod i18n;
pub mod material_db;
pub mod plate;
pub mod report;
pub mod ui_cli;
