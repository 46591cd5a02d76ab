use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::material_db::{MaterialProperties, PlateMaterial, CUSTOM_DEFAULT};
use crate::plate::{Geometry, HeatingScenario, InputLimits, ModelConstants, PlateInput};

/// 기본 설정 파일 이름. 작업 디렉터리 기준.
pub const CONFIG_FILE: &str = "config.toml";

/// 입력 화면을 처음 열었을 때의 값.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateDefaults {
    /// 재료 코드 (stainless/cast-iron/aluminum/copper/custom)
    pub material: String,
    pub diameter_cm: f64,
    pub thickness_cm: f64,
    pub power_kw: f64,
    pub duration_min: u32,
    pub efficiency_percent: u32,
    /// 사용자 정의 재료의 초기 물성
    pub custom: MaterialProperties,
}

impl Default for PlateDefaults {
    fn default() -> Self {
        Self {
            material: PlateMaterial::StainlessSteel.code().to_string(),
            diameter_cm: 40.0,
            thickness_cm: 1.0,
            power_kw: 4.0,
            duration_min: 20,
            efficiency_percent: 45,
            custom: CUSTOM_DEFAULT,
        }
    }
}

impl PlateDefaults {
    /// 기본값으로 입력 묶음을 만든다. 알 수 없는 재료 코드는 사용자 정의로 본다.
    pub fn to_input(&self) -> PlateInput {
        let material = crate::material_db::find_material(&self.material)
            .unwrap_or(PlateMaterial::Custom(self.custom));
        PlateInput {
            material,
            geometry: Geometry {
                diameter_cm: self.diameter_cm,
                thickness_cm: self.thickness_cm,
            },
            scenario: HeatingScenario {
                power_kw: self.power_kw,
                duration_min: self.duration_min,
                efficiency_percent: self.efficiency_percent,
            },
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en/it/ko)
    pub language: String,
    /// 언어팩 디렉터리
    pub locale_dir: PathBuf,
    /// SVG/JSON 내보내기 기본 디렉터리
    pub output_dir: PathBuf,
    pub model: ModelConstants,
    pub limits: InputLimits,
    pub defaults: PlateDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            locale_dir: PathBuf::from("locales"),
            output_dir: PathBuf::from("charts"),
            model: ModelConstants::default(),
            limits: InputLimits::default(),
            defaults: PlateDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장하고 반환한다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        log::info!("created default configuration at {}", path.display());
        Ok(cfg)
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
