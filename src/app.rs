use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::chart::{self, svg::ChartError};
use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::plate::{self, PlateInput, ThermalCalcError, ThermalResult};
use crate::report::ResultSummary;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/터미널 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 입력 검증 또는 계산 오류
    #[error("calculation error: {0}")]
    Thermal(#[from] ThermalCalcError),
    /// 차트 저장 오류
    #[error(transparent)]
    Chart(#[from] ChartError),
    /// JSON 출력 오류
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
    /// 알 수 없는 재료 코드
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
    /// 내장 재료와 사용자 정의 물성을 동시에 지정함
    #[error("material '{0}' cannot be combined with --density/--specific-heat/--conductivity")]
    ConflictingMaterial(String),
}

/// 계산 결과와 화면 표시용 요약.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub input: PlateInput,
    pub result: ThermalResult,
    pub summary: ResultSummary,
}

/// 설정의 상수와 허용 범위로 한 번 계산한다.
pub fn simulate(input: PlateInput, config: &Config, tr: &Translator) -> Result<Simulation, AppError> {
    let result = plate::compute_with(input, &config.model, &config.limits)?;
    let summary = ResultSummary::from_result(&result, tr);
    Ok(Simulation {
        input,
        result,
        summary,
    })
}

/// 두 차트를 설정의 출력 디렉터리(또는 지정 경로)에 SVG로 저장한다.
pub fn export_charts(
    sim: &Simulation,
    dir: &Path,
    tr: &Translator,
) -> Result<[PathBuf; 2], AppError> {
    let line = chart::temperature_chart(&sim.result, tr);
    let bars = chart::surface_chart(&sim.result, tr);
    Ok(chart::svg::write_charts(dir, &line, &bars)?)
}

/// 설정의 언어와 언어팩 디렉터리로 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: Option<&str>) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&lang, &config.locale_dir)
}

/// 대화형 CLI의 메인 루프를 표준 입력으로 실행한다.
/// 설정은 읽어 온 파일(`config_path`)에 다시 저장한다.
pub fn run(config: &mut Config, config_path: &Path, cli_lang: Option<&str>) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with(config, config_path, cli_lang, &mut input)
}

/// 입력 스트림을 받아 메인 루프를 실행한다.
pub fn run_with(
    config: &mut Config,
    config_path: &Path,
    cli_lang: Option<&str>,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    let mut lang_override = cli_lang.map(str::to_string);
    loop {
        let tr = translator_for(config, lang_override.as_deref());
        match ui_cli::main_menu(&tr, input)? {
            MenuChoice::Simulate => {
                ui_cli::handle_simulate(&tr, config, input)?;
            }
            MenuChoice::Materials => ui_cli::handle_materials(&tr),
            MenuChoice::Settings => {
                ui_cli::handle_settings(&tr, config, input)?;
                config.save_to(config_path)?;
                // 설정에서 고른 언어가 CLI 플래그보다 우선한다.
                lang_override = None;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                info!("interactive session finished");
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
