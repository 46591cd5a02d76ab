//! 플레이트 재료의 물성 테이블.
//! 값은 상온 기준 대표값이며 온도 의존성은 고려하지 않는다.

use serde::{Deserialize, Serialize};

/// 재료 물성(밀도, 비열, 열전도율).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// 밀도 [kg/m³]
    pub density_kg_m3: f64,
    /// 비열 [J/(kg·K)]
    pub specific_heat_j_kg_k: f64,
    /// 열전도율 [W/(m·K)]
    pub conductivity_w_m_k: f64,
}

impl MaterialProperties {
    pub const fn new(density_kg_m3: f64, specific_heat_j_kg_k: f64, conductivity_w_m_k: f64) -> Self {
        Self {
            density_kg_m3,
            specific_heat_j_kg_k,
            conductivity_w_m_k,
        }
    }
}

/// 사용자 정의 재료를 고를 때 처음 제시하는 값.
pub const CUSTOM_DEFAULT: MaterialProperties = MaterialProperties::new(7800.0, 500.0, 50.0);

/// 플레이트 재료. 내장 재료는 고정 물성을 가지며 `Custom`은 값을 직접 받는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "properties", rename_all = "snake_case")]
pub enum PlateMaterial {
    StainlessSteel,
    CastIron,
    Aluminum,
    Copper,
    Custom(MaterialProperties),
}

impl PlateMaterial {
    /// 내장 재료 목록 (Custom 제외).
    pub const BUILT_IN: [PlateMaterial; 4] = [
        PlateMaterial::StainlessSteel,
        PlateMaterial::CastIron,
        PlateMaterial::Aluminum,
        PlateMaterial::Copper,
    ];

    pub fn properties(&self) -> MaterialProperties {
        match self {
            PlateMaterial::StainlessSteel => MaterialProperties::new(8000.0, 500.0, 16.0),
            PlateMaterial::CastIron => MaterialProperties::new(7200.0, 460.0, 50.0),
            PlateMaterial::Aluminum => MaterialProperties::new(2700.0, 900.0, 235.0),
            PlateMaterial::Copper => MaterialProperties::new(8900.0, 385.0, 400.0),
            PlateMaterial::Custom(props) => *props,
        }
    }

    /// CLI/설정 파일에서 쓰는 짧은 코드.
    pub fn code(&self) -> &'static str {
        match self {
            PlateMaterial::StainlessSteel => "stainless",
            PlateMaterial::CastIron => "cast-iron",
            PlateMaterial::Aluminum => "aluminum",
            PlateMaterial::Copper => "copper",
            PlateMaterial::Custom(_) => "custom",
        }
    }

    /// i18n 키. 화면 표시용 이름은 Translator를 거친다.
    pub fn label_key(&self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            PlateMaterial::StainlessSteel => MATERIAL_STAINLESS,
            PlateMaterial::CastIron => MATERIAL_CAST_IRON,
            PlateMaterial::Aluminum => MATERIAL_ALUMINUM,
            PlateMaterial::Copper => MATERIAL_COPPER,
            PlateMaterial::Custom(_) => MATERIAL_CUSTOM,
        }
    }

    /// 표에 없는 사용자 정의 물성인지 여부.
    pub fn is_custom(&self) -> bool {
        matches!(self, PlateMaterial::Custom(_))
    }
}

/// 코드 또는 별칭으로 내장 재료를 찾는다. 대소문자는 구분하지 않는다.
/// "custom"은 물성이 없으므로 여기서는 찾지 않는다.
pub fn find_material(code: &str) -> Option<PlateMaterial> {
    let c = code.trim().to_lowercase().replace(['_', ' '], "-");
    match c.as_str() {
        "stainless" | "stainless-steel" | "inox" | "acciaio-inox" => {
            Some(PlateMaterial::StainlessSteel)
        }
        "cast-iron" | "castiron" | "ghisa" => Some(PlateMaterial::CastIron),
        "aluminum" | "aluminium" | "alluminio" => Some(PlateMaterial::Aluminum),
        "copper" | "rame" => Some(PlateMaterial::Copper),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_aliases() {
        assert_eq!(find_material("Aluminium"), Some(PlateMaterial::Aluminum));
        assert_eq!(find_material("cast_iron"), Some(PlateMaterial::CastIron));
        assert_eq!(find_material("Stainless Steel"), Some(PlateMaterial::StainlessSteel));
        assert_eq!(find_material("custom"), None);
        assert_eq!(find_material("wood"), None);
    }

    #[test]
    fn custom_bypasses_table() {
        let props = MaterialProperties::new(1.0, 2.0, 3.0);
        assert_eq!(PlateMaterial::Custom(props).properties(), props);
        assert!(PlateMaterial::Custom(props).is_custom());
        assert!(PlateMaterial::BUILT_IN.iter().all(|m| !m.is_custom()));
    }

    #[test]
    fn built_in_codes_resolve_back() {
        for m in PlateMaterial::BUILT_IN {
            assert_eq!(find_material(m.code()), Some(m));
        }
    }
}
