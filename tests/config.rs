//! config.toml 로드/저장 테스트.
use plate_heating_simulator::config::{self, Config};
use plate_heating_simulator::i18n::{keys, Translator};
use plate_heating_simulator::material_db::PlateMaterial;
use plate_heating_simulator::plate::SurfaceDropMode;

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let cfg = config::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(cfg.model.ambient_c, 25.0);
    assert_eq!(cfg.model.hotspot_factor, 1.3);
    assert_eq!(cfg.model.sample_count, 200);
    assert_eq!(cfg.defaults.to_input().material, PlateMaterial::StainlessSteel);
}

#[test]
fn saved_settings_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    cfg.language = "it".into();
    cfg.model.surface_drop = SurfaceDropMode::Fourier;
    cfg.defaults.material = "copper".into();
    cfg.defaults.duration_min = 5;
    cfg.save_to(&path).unwrap();

    let loaded = config::load_from(&path).unwrap();
    assert_eq!(loaded.language, "it");
    assert_eq!(loaded.model, cfg.model);
    assert_eq!(loaded.limits, cfg.limits);
    assert_eq!(loaded.defaults.to_input().material, PlateMaterial::Copper);
    assert_eq!(loaded.defaults.duration_min, 5);
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = \"ko\"\n").unwrap();
    let cfg = config::load_from(&path).unwrap();
    assert_eq!(cfg.language, "ko");
    assert_eq!(cfg.model.ambient_c, 25.0);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = [").unwrap();
    assert!(matches!(
        config::load_from(&path),
        Err(config::ConfigError::Parse(_))
    ));
}

#[test]
fn unknown_material_code_uses_custom_properties() {
    let mut cfg = Config::default();
    cfg.defaults.material = "custom".into();
    assert_eq!(
        cfg.defaults.to_input().material,
        PlateMaterial::Custom(cfg.defaults.custom)
    );
}

#[test]
fn language_pack_overrides_built_in_strings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("en.toml"),
        "[chart]\nbar_lower = \"burner side\"\n",
    )
    .unwrap();
    let tr = Translator::new_with_pack("en", dir.path());
    assert_eq!(tr.t(keys::CHART_BAR_LOWER), "burner side");
    assert_eq!(tr.t(keys::CHART_BAR_UPPER), "opposite side (upper)");
}
