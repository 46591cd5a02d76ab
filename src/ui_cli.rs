use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app::{self, AppError, Simulation};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::material_db::{MaterialProperties, PlateMaterial};
use crate::plate::{Geometry, HeatingScenario, PlateInput, SurfaceDropMode};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Simulate,
    Materials,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator, input: &mut dyn BufRead) -> Result<MenuChoice, AppError> {
    println!("\n=== {} ===", tr.t(keys::APP_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_SIMULATE));
    println!("{}", tr.t(keys::MAIN_MENU_MATERIALS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(input, tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Simulate),
            "2" => return Ok(MenuChoice::Materials),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 재료, 형상, 가열 조건을 묻고 결과를 출력한다.
/// 엔터만 누르면 설정의 기본값을 쓴다. 차트는 사용자가 원할 때만 저장한다.
pub fn handle_simulate(
    tr: &Translator,
    cfg: &Config,
    input: &mut dyn BufRead,
) -> Result<Option<[PathBuf; 2]>, AppError> {
    let d = &cfg.defaults;
    let material = read_material(tr, input, &d.material, d.custom)?;
    let plate = PlateInput {
        material,
        geometry: Geometry {
            diameter_cm: read_parsed_or(tr, input, keys::PROMPT_DIAMETER, d.diameter_cm)?,
            thickness_cm: read_parsed_or(tr, input, keys::PROMPT_THICKNESS, d.thickness_cm)?,
        },
        scenario: HeatingScenario {
            power_kw: read_parsed_or(tr, input, keys::PROMPT_POWER, d.power_kw)?,
            duration_min: read_parsed_or(tr, input, keys::PROMPT_DURATION, d.duration_min)?,
            efficiency_percent: read_parsed_or(
                tr,
                input,
                keys::PROMPT_EFFICIENCY,
                d.efficiency_percent,
            )?,
        },
    };
    // 검증 실패는 세션을 끝내지 않고 메시지만 보여준다.
    match app::simulate(plate, cfg, tr) {
        Ok(sim) => {
            print_summary(&sim, tr);
            let answer = read_line(input, tr.t(keys::PROMPT_EXPORT_CHARTS))?;
            if !is_yes(&answer) {
                return Ok(None);
            }
            match app::export_charts(&sim, &cfg.output_dir, tr) {
                Ok(paths) => {
                    for p in &paths {
                        println!("{} {}", tr.t(keys::CHART_SAVED), p.display());
                    }
                    return Ok(Some(paths));
                }
                Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
            }
        }
        Err(AppError::Thermal(e)) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
        Err(e) => return Err(e),
    }
    Ok(None)
}

/// y/yes/s/si/sì/예 만 동의로 본다. 빈 입력은 거절.
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sì" | "예" | "네"
    )
}

/// 내장 재료 물성표를 출력한다.
pub fn handle_materials(tr: &Translator) {
    println!("\n{}", tr.t(keys::MATERIAL_TABLE_HEADER));
    for m in PlateMaterial::BUILT_IN {
        let p = m.properties();
        println!(
            "{:<18} {:>12.0} {:>11.0} {:>10.0}   [{}]",
            tr.t(m.label_key()),
            p.density_kg_m3,
            p.specific_heat_j_kg_k,
            p.conductivity_w_m_k,
            m.code()
        );
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::SETTINGS_HEADING));
    let lang = read_line(input, &format!(
        "{} [{}]: ",
        tr.t(keys::SETTINGS_LANGUAGE),
        cfg.language
    ))?;
    if !lang.trim().is_empty() {
        cfg.language = lang.trim().to_lowercase();
    }
    println!("{}", tr.t(keys::SETTINGS_SURFACE_DROP));
    let sel = read_line(input, tr.t(keys::PROMPT_MENU_SELECT))?;
    cfg.model.surface_drop = match sel.trim() {
        "1" => SurfaceDropMode::PerCentimeterTimesHundred,
        "2" => SurfaceDropMode::Fourier,
        _ => cfg.model.surface_drop,
    };
    Ok(())
}

/// 다섯 개의 결과 줄을 출력한다.
pub fn print_summary(sim: &Simulation, tr: &Translator) {
    println!("\n{} - {}", tr.t(keys::RESULTS_HEADING), tr.t(sim.input.material.label_key()));
    for line in sim.summary.lines() {
        println!("{}: {}", line.label, line.value);
    }
}

fn read_material(
    tr: &Translator,
    input: &mut dyn BufRead,
    default_code: &str,
    custom_default: MaterialProperties,
) -> Result<PlateMaterial, AppError> {
    println!("{}:", tr.t(keys::PROMPT_MATERIAL));
    for (i, m) in PlateMaterial::BUILT_IN.iter().enumerate() {
        println!("  {}) {}", i + 1, tr.t(m.label_key()));
    }
    println!("  5) {}", tr.t(keys::MATERIAL_CUSTOM));
    loop {
        let sel = read_line(input, &format!(
            "{} [{default_code}] ({}): ",
            tr.t(keys::PROMPT_MATERIAL),
            tr.t(keys::PROMPT_KEEP_DEFAULT)
        ))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(crate::material_db::find_material(default_code)
                .unwrap_or(PlateMaterial::Custom(custom_default)));
        }
        match sel.parse::<usize>() {
            Ok(n @ 1..=4) => return Ok(PlateMaterial::BUILT_IN[n - 1]),
            Ok(5) => {
                let props = MaterialProperties::new(
                    read_parsed_or(tr, input, keys::PROMPT_DENSITY, custom_default.density_kg_m3)?,
                    read_parsed_or(
                        tr,
                        input,
                        keys::PROMPT_SPECIFIC_HEAT,
                        custom_default.specific_heat_j_kg_k,
                    )?,
                    read_parsed_or(
                        tr,
                        input,
                        keys::PROMPT_CONDUCTIVITY,
                        custom_default.conductivity_w_m_k,
                    )?,
                );
                return Ok(PlateMaterial::Custom(props));
            }
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 한 줄을 읽는다. 입력이 끝나면 무한히 다시 묻지 않도록 오류로 끝낸다.
fn read_line(input: &mut dyn BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
    }
    Ok(buf)
}

fn read_parsed_or<T>(
    tr: &Translator,
    input: &mut dyn BufRead,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    let prompt = format!("{} [{default}] ({}): ", tr.t(key), tr.t(keys::PROMPT_KEEP_DEFAULT));
    loop {
        let s = read_line(input, &prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<T>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::NOT_A_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_answer_defaults_to_no() {
        assert!(!is_yes(""));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("maybe"));
        assert!(is_yes("y\n"));
        assert!(is_yes(" Yes "));
        assert!(is_yes("sì"));
        assert!(is_yes("예"));
    }
}
