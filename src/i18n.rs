use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const ERROR_PREFIX: &str = "general.error_prefix";

    pub const MAIN_MENU_SIMULATE: &str = "main_menu.simulate";
    pub const MAIN_MENU_MATERIALS: &str = "main_menu.materials";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const NOT_A_NUMBER: &str = "error.not_a_number";

    pub const MATERIAL_STAINLESS: &str = "material.stainless";
    pub const MATERIAL_CAST_IRON: &str = "material.cast_iron";
    pub const MATERIAL_ALUMINUM: &str = "material.aluminum";
    pub const MATERIAL_COPPER: &str = "material.copper";
    pub const MATERIAL_CUSTOM: &str = "material.custom";
    pub const MATERIAL_TABLE_HEADER: &str = "material.table_header";

    pub const PROMPT_MATERIAL: &str = "prompt.material";
    pub const PROMPT_DENSITY: &str = "prompt.density";
    pub const PROMPT_SPECIFIC_HEAT: &str = "prompt.specific_heat";
    pub const PROMPT_CONDUCTIVITY: &str = "prompt.conductivity";
    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_THICKNESS: &str = "prompt.thickness";
    pub const PROMPT_POWER: &str = "prompt.power";
    pub const PROMPT_DURATION: &str = "prompt.duration";
    pub const PROMPT_EFFICIENCY: &str = "prompt.efficiency";
    pub const PROMPT_KEEP_DEFAULT: &str = "prompt.keep_default";

    pub const RESULTS_HEADING: &str = "results.heading";
    pub const RESULT_MEAN_TEMP: &str = "results.mean_temp";
    pub const RESULT_MAX_TEMP: &str = "results.max_temp";
    pub const RESULT_GRADIENT: &str = "results.gradient";
    pub const RESULT_LOWER_SURFACE: &str = "results.lower_surface";
    pub const RESULT_UPPER_SURFACE: &str = "results.upper_surface";

    pub const CHART_TIME_TITLE: &str = "chart.time_title";
    pub const CHART_TIME_X: &str = "chart.time_x";
    pub const CHART_TEMP_Y: &str = "chart.temp_y";
    pub const CHART_MEAN_SERIES: &str = "chart.mean_series";
    pub const CHART_MAX_SERIES: &str = "chart.max_series";
    pub const CHART_SURFACE_TITLE: &str = "chart.surface_title";
    pub const CHART_BAR_LOWER: &str = "chart.bar_lower";
    pub const CHART_BAR_UPPER: &str = "chart.bar_upper";
    pub const CHART_SAVED: &str = "chart.saved";
    pub const PROMPT_EXPORT_CHARTS: &str = "prompt.export_charts";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_SURFACE_DROP: &str = "settings.surface_drop";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_INPUTS: &str = "gui.inputs";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_EXPORT_SVG: &str = "gui.export_svg";
    pub const GUI_EXPORT_JSON: &str = "gui.export_json";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    It,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("it") {
            Language::It
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::It => "it",
            Language::Ko => "ko",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/it/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어팩 디렉터리(`locales/` 등)의 `<code>.toml`로 내장 문자열을 덮어쓴다.
    /// 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: &Path) -> Self {
        let overrides = load_overrides(pack_dir, lang_code);
        if overrides.is_some() {
            debug!("language pack loaded from {}", pack_dir.display());
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 → 키 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        let built_in: Option<&'a str> = match self.lang {
            Language::En => en(key),
            Language::It => it(key).or_else(|| en(key)),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        built_in.unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("it") => Some("it".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc.split(['.', '_', '-']).next().unwrap_or_default();
    normalize_lang(lang)
}

/// TOML 기반 언어팩을 로드한다. 형식: 섹션 또는 점 표기 키 = "value".
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(&path).ok()?;
    let map = parse_toml_to_map(&content);
    if map.is_none() {
        warn!("ignoring empty or malformed language pack {}", path.display());
    }
    map
}

/// 중첩 테이블을 "section.key" 형태의 평탄한 맵으로 바꾼다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "Plate Heating Simulator",
        APP_EXIT => "Goodbye.",
        ERROR_PREFIX => "Error",
        MAIN_MENU_SIMULATE => "1) Simulate plate heating",
        MAIN_MENU_MATERIALS => "2) Material table",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid selection, try again.",
        NOT_A_NUMBER => "Please enter a number.",
        MATERIAL_STAINLESS => "Stainless steel",
        MATERIAL_CAST_IRON => "Cast iron",
        MATERIAL_ALUMINUM => "Aluminum",
        MATERIAL_COPPER => "Copper",
        MATERIAL_CUSTOM => "Custom",
        MATERIAL_TABLE_HEADER => "Material            rho [kg/m3]  c [J/kg.K]  k [W/m.K]",
        PROMPT_MATERIAL => "Plate material",
        PROMPT_DENSITY => "Density (kg/m³)",
        PROMPT_SPECIFIC_HEAT => "Specific heat (J/kg·K)",
        PROMPT_CONDUCTIVITY => "Thermal conductivity (W/m·K)",
        PROMPT_DIAMETER => "Plate diameter (cm)",
        PROMPT_THICKNESS => "Plate thickness (cm)",
        PROMPT_POWER => "Burner power (kW)",
        PROMPT_DURATION => "Exposure time (minutes)",
        PROMPT_EFFICIENCY => "Heat transfer efficiency (%)",
        PROMPT_KEEP_DEFAULT => "press Enter to keep",
        RESULTS_HEADING => "Results",
        RESULT_MEAN_TEMP => "Estimated mean temperature",
        RESULT_MAX_TEMP => "Maximum temperature (flame zone)",
        RESULT_GRADIENT => "Thermal gradient through the thickness",
        RESULT_LOWER_SURFACE => "Lower side temperature",
        RESULT_UPPER_SURFACE => "Upper side temperature",
        CHART_TIME_TITLE => "Temperature evolution over time",
        CHART_TIME_X => "Time (minutes)",
        CHART_TEMP_Y => "Temperature (°C)",
        CHART_MEAN_SERIES => "Mean temperature",
        CHART_MAX_SERIES => "Maximum temperature (flame zone)",
        CHART_SURFACE_TITLE => "Thermal gradient through the thickness",
        CHART_BAR_LOWER => "flame side (lower)",
        CHART_BAR_UPPER => "opposite side (upper)",
        CHART_SAVED => "Chart saved:",
        PROMPT_EXPORT_CHARTS => "Save both charts as SVG? [y/N]: ",
        SETTINGS_HEADING => "Settings",
        SETTINGS_LANGUAGE => "Language (en/it/ko)",
        SETTINGS_SURFACE_DROP => "Surface drop: 1) gradient x 100 (classic)  2) Fourier q·L/k",
        SETTINGS_SAVED => "Settings saved.",
        GUI_INPUTS => "Inputs",
        GUI_LANGUAGE => "Language",
        GUI_EXPORT_SVG => "Export charts (SVG)...",
        GUI_EXPORT_JSON => "Export result (JSON)...",
        _ => return None,
    };
    Some(s)
}

fn it(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "Simulatore Avanzato Riscaldamento Piastra",
        APP_EXIT => "Arrivederci.",
        ERROR_PREFIX => "Errore",
        MAIN_MENU_SIMULATE => "1) Simula riscaldamento piastra",
        MAIN_MENU_MATERIALS => "2) Tabella materiali",
        MAIN_MENU_SETTINGS => "3) Impostazioni",
        MAIN_MENU_EXIT => "0) Esci",
        PROMPT_MENU_SELECT => "Scelta: ",
        INVALID_SELECTION_RETRY => "Scelta non valida, riprova.",
        NOT_A_NUMBER => "Inserire un numero.",
        MATERIAL_STAINLESS => "Acciaio inox",
        MATERIAL_CAST_IRON => "Ghisa",
        MATERIAL_ALUMINUM => "Alluminio",
        MATERIAL_COPPER => "Rame",
        MATERIAL_CUSTOM => "Personalizzato",
        PROMPT_MATERIAL => "Materiale della piastra",
        PROMPT_DENSITY => "Densità (kg/m³)",
        PROMPT_SPECIFIC_HEAT => "Calore specifico (J/kg·K)",
        PROMPT_CONDUCTIVITY => "Conduttività termica (W/m·K)",
        PROMPT_DIAMETER => "Diametro piastra (cm)",
        PROMPT_THICKNESS => "Spessore piastra (cm)",
        PROMPT_POWER => "Potenza fornello (kW)",
        PROMPT_DURATION => "Tempo esposizione (minuti)",
        PROMPT_EFFICIENCY => "Efficienza trasferimento calore (%)",
        PROMPT_KEEP_DEFAULT => "Invio per mantenere",
        RESULTS_HEADING => "Risultati",
        RESULT_MEAN_TEMP => "Temperatura media stimata",
        RESULT_MAX_TEMP => "Temperatura massima (zona fiamma)",
        RESULT_GRADIENT => "Gradiente termico attraverso lo spessore",
        RESULT_LOWER_SURFACE => "Temperatura lato inferiore",
        RESULT_UPPER_SURFACE => "Temperatura lato superiore",
        CHART_TIME_TITLE => "Evoluzione temperatura nel tempo",
        CHART_TIME_X => "Tempo (minuti)",
        CHART_TEMP_Y => "Temperatura (°C)",
        CHART_MEAN_SERIES => "Temperatura media",
        CHART_MAX_SERIES => "Temperatura massima zona fiamma",
        CHART_SURFACE_TITLE => "Gradiente termico attraverso lo spessore",
        CHART_BAR_LOWER => "Lato fiamma (inferiore)",
        CHART_BAR_UPPER => "Lato opposto (superiore)",
        CHART_SAVED => "Grafico salvato:",
        PROMPT_EXPORT_CHARTS => "Salvare i grafici in SVG? [s/N]: ",
        SETTINGS_HEADING => "Impostazioni",
        SETTINGS_LANGUAGE => "Lingua (en/it/ko)",
        SETTINGS_SAVED => "Impostazioni salvate.",
        GUI_INPUTS => "Input utente",
        GUI_LANGUAGE => "Lingua",
        GUI_EXPORT_SVG => "Esporta grafici (SVG)...",
        GUI_EXPORT_JSON => "Esporta risultati (JSON)...",
        _ => return None,
    };
    Some(s)
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "플레이트 가열 시뮬레이터",
        APP_EXIT => "프로그램을 종료합니다.",
        ERROR_PREFIX => "오류",
        MAIN_MENU_SIMULATE => "1) 플레이트 가열 계산",
        MAIN_MENU_MATERIALS => "2) 재료 물성표",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        NOT_A_NUMBER => "숫자를 입력하세요.",
        MATERIAL_STAINLESS => "스테인리스강",
        MATERIAL_CAST_IRON => "주철",
        MATERIAL_ALUMINUM => "알루미늄",
        MATERIAL_COPPER => "구리",
        MATERIAL_CUSTOM => "사용자 정의",
        PROMPT_MATERIAL => "플레이트 재료",
        PROMPT_DENSITY => "밀도 (kg/m³)",
        PROMPT_SPECIFIC_HEAT => "비열 (J/kg·K)",
        PROMPT_CONDUCTIVITY => "열전도율 (W/m·K)",
        PROMPT_DIAMETER => "플레이트 지름 (cm)",
        PROMPT_THICKNESS => "플레이트 두께 (cm)",
        PROMPT_POWER => "버너 출력 (kW)",
        PROMPT_DURATION => "가열 시간 (분)",
        PROMPT_EFFICIENCY => "열전달 효율 (%)",
        PROMPT_KEEP_DEFAULT => "엔터 시 유지",
        RESULTS_HEADING => "계산 결과",
        RESULT_MEAN_TEMP => "평균 온도 추정",
        RESULT_MAX_TEMP => "최고 온도 (화염부)",
        RESULT_GRADIENT => "두께 방향 온도 구배",
        RESULT_LOWER_SURFACE => "아랫면 온도",
        RESULT_UPPER_SURFACE => "윗면 온도",
        CHART_TIME_TITLE => "시간에 따른 온도 변화",
        CHART_TIME_X => "시간 (분)",
        CHART_TEMP_Y => "온도 (°C)",
        CHART_MEAN_SERIES => "평균 온도",
        CHART_MAX_SERIES => "최고 온도 (화염부)",
        CHART_SURFACE_TITLE => "두께 방향 온도 구배",
        CHART_BAR_LOWER => "화염 쪽 (아래)",
        CHART_BAR_UPPER => "반대쪽 (위)",
        CHART_SAVED => "차트 저장:",
        PROMPT_EXPORT_CHARTS => "두 차트를 SVG로 저장할까요? [y/N]: ",
        SETTINGS_HEADING => "설정",
        SETTINGS_LANGUAGE => "언어 (en/it/ko)",
        SETTINGS_SURFACE_DROP => "면 온도차: 1) 구배 x 100 (기존)  2) 푸리에 q·L/k",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        GUI_INPUTS => "입력",
        GUI_LANGUAGE => "언어",
        GUI_EXPORT_SVG => "차트 내보내기 (SVG)...",
        GUI_EXPORT_JSON => "결과 내보내기 (JSON)...",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::CHART_BAR_LOWER), "flame side (lower)");
    }

    #[test]
    fn missing_italian_key_uses_english() {
        let tr = Translator::new("it");
        assert_eq!(tr.t(keys::MATERIAL_ALUMINUM), "Alluminio");
        assert_eq!(
            tr.t(keys::SETTINGS_SURFACE_DROP),
            en(keys::SETTINGS_SURFACE_DROP).unwrap()
        );
    }

    #[test]
    fn unknown_key_is_echoed() {
        let tr = Translator::new("en");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn flattens_nested_tables() {
        let map = parse_toml_to_map("[chart]\nbar_lower = \"hot\"\n").unwrap();
        assert_eq!(map.get(keys::CHART_BAR_LOWER).map(String::as_str), Some("hot"));
    }

    #[test]
    fn explicit_flag_wins() {
        assert_eq!(resolve_language(Some("it-IT"), Some("ko")), "it");
        assert_eq!(resolve_language(Some("auto"), Some("ko")), "ko");
    }
}
