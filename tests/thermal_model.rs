//! 플레이트 가열 모델 회귀 테스트.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use plate_heating_simulator::material_db::{MaterialProperties, PlateMaterial};
use plate_heating_simulator::plate::{
    compute_thermal_result, compute_with, Geometry, HeatingScenario, InputLimits,
    ModelConstants, PlateInput, SurfaceDropMode, ThermalCalcError,
};

fn scenario_a() -> PlateInput {
    PlateInput {
        material: PlateMaterial::Aluminum,
        geometry: Geometry {
            diameter_cm: 40.0,
            thickness_cm: 1.0,
        },
        scenario: HeatingScenario {
            power_kw: 4.0,
            duration_min: 20,
            efficiency_percent: 45,
        },
    }
}

#[test]
fn aluminum_reference_case() {
    let res = compute_thermal_result(scenario_a()).expect("scenario A");
    assert_relative_eq!(res.area_m2, 0.125_663_706, max_relative = 1e-8);
    assert_relative_eq!(res.volume_m3, 0.001_256_637, max_relative = 1e-6);
    assert_relative_eq!(res.mass_kg, 3.392_920_066, max_relative = 1e-9);
    assert_eq!(res.total_energy_j, 4_800_000.0);
    assert_eq!(res.effective_energy_j, 2_160_000.0);
    assert_relative_eq!(res.delta_t_mean_c, 707.355_302_6, max_relative = 1e-9);
    assert_relative_eq!(res.mean_temp_c, 732.355_302_6, max_relative = 1e-9);
    assert_relative_eq!(res.max_temp_c, 952.061_893_4, max_relative = 1e-9);
    assert_relative_eq!(res.heat_flux_w_m2, 14_323.944_878, max_relative = 1e-9);
    assert_relative_eq!(res.gradient_c_per_cm, 0.609_529_569, max_relative = 1e-8);
    assert_relative_eq!(res.upper_surface_temp_c, 891.108_936_5, max_relative = 1e-9);
}

#[test]
fn efficiency_scales_linearly() {
    let mut input = scenario_a();
    input.scenario.efficiency_percent = 10;
    let res = compute_thermal_result(input).unwrap();
    assert_eq!(res.effective_energy_j, 480_000.0);
    assert_abs_diff_eq!(res.delta_t_mean_c, 157.19, epsilon = 0.01);
    assert_abs_diff_eq!(res.mean_temp_c, 182.19, epsilon = 0.01);
    assert_abs_diff_eq!(res.max_temp_c, 236.85, epsilon = 0.01);

    let full = compute_thermal_result(scenario_a()).unwrap();
    assert_relative_eq!(full.delta_t_mean_c / res.delta_t_mean_c, 4.5, max_relative = 1e-12);
}

#[test]
fn custom_material_bypasses_table() {
    let mut input = scenario_a();
    input.material = PlateMaterial::Custom(MaterialProperties::new(7800.0, 500.0, 50.0));
    let res = compute_thermal_result(input).unwrap();
    assert_abs_diff_eq!(res.mass_kg, 9.8018, epsilon = 1e-3);
    assert_relative_eq!(
        res.delta_t_mean_c,
        2_160_000.0 / (res.mass_kg * 500.0),
        max_relative = 1e-12
    );
    assert_abs_diff_eq!(res.mean_temp_c, 465.74, epsilon = 0.01);
    assert_abs_diff_eq!(res.gradient_c_per_cm, 2.8648, epsilon = 1e-4);
}

#[test]
fn identical_inputs_are_bit_identical() {
    let a = compute_thermal_result(scenario_a()).unwrap();
    let b = compute_thermal_result(scenario_a()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.mean_temp_c.to_bits(), b.mean_temp_c.to_bits());
}

#[test]
fn max_is_fixed_multiple_of_mean() {
    let res = compute_thermal_result(scenario_a()).unwrap();
    assert_eq!(res.max_temp_c, res.mean_temp_c * 1.3);
    assert_eq!(res.lower_surface_temp_c, res.max_temp_c);
    for (mean, max) in res.mean_temp_series.iter().zip(&res.max_temp_series) {
        assert_eq!(*max, mean * 1.3);
    }
}

#[test]
fn series_span_the_exposure() {
    for minutes in [1, 7, 20, 60] {
        let mut input = scenario_a();
        input.scenario.duration_min = minutes;
        let res = compute_thermal_result(input).unwrap();
        assert_eq!(res.time_series_sec.len(), 200);
        assert_eq!(res.mean_temp_series.len(), 200);
        assert_eq!(res.max_temp_series.len(), 200);
        assert_eq!(res.time_series_sec[0], 0.0);
        assert_eq!(res.time_series_sec[199], f64::from(minutes) * 60.0);
        assert_eq!(res.mean_temp_series[0], 25.0);
        assert_relative_eq!(res.mean_temp_series[199], res.mean_temp_c, max_relative = 1e-12);
    }
}

#[test]
fn more_energy_means_hotter_plate() {
    let base = compute_thermal_result(scenario_a()).unwrap();

    let mut more_power = scenario_a();
    more_power.scenario.power_kw = 5.0;
    let mut longer = scenario_a();
    longer.scenario.duration_min = 21;
    let mut efficient = scenario_a();
    efficient.scenario.efficiency_percent = 46;

    for input in [more_power, longer, efficient] {
        let res = compute_thermal_result(input).unwrap();
        assert!(res.mean_temp_c > base.mean_temp_c);
        assert!(res.max_temp_c > base.max_temp_c);
    }
}

#[test]
fn more_thermal_mass_means_smaller_rise() {
    let base = compute_thermal_result(scenario_a()).unwrap();
    let props = PlateMaterial::Aluminum.properties();

    let mut denser = scenario_a();
    denser.material = PlateMaterial::Custom(MaterialProperties {
        density_kg_m3: props.density_kg_m3 * 1.1,
        ..props
    });
    let mut higher_c = scenario_a();
    higher_c.material = PlateMaterial::Custom(MaterialProperties {
        specific_heat_j_kg_k: props.specific_heat_j_kg_k + 1.0,
        ..props
    });
    let mut thicker = scenario_a();
    thicker.geometry.thickness_cm = 1.5;
    let mut wider = scenario_a();
    wider.geometry.diameter_cm = 41.0;

    for input in [denser, higher_c, thicker, wider] {
        let res = compute_thermal_result(input).unwrap();
        assert!(res.delta_t_mean_c < base.delta_t_mean_c);
    }
}

#[test]
fn minimum_inputs_stay_finite_for_every_material() {
    for material in PlateMaterial::BUILT_IN {
        let input = PlateInput {
            material,
            geometry: Geometry {
                diameter_cm: 10.0,
                thickness_cm: 0.5,
            },
            scenario: HeatingScenario {
                power_kw: 0.5,
                duration_min: 1,
                efficiency_percent: 10,
            },
        };
        let res = compute_thermal_result(input).unwrap();
        assert_eq!(res.effective_energy_j, 3000.0);
        for v in [
            res.mean_temp_c,
            res.max_temp_c,
            res.gradient_c_per_cm,
            res.lower_surface_temp_c,
            res.upper_surface_temp_c,
        ] {
            assert!(v.is_finite(), "{material:?} produced {v}");
        }
        assert!(res.mean_temp_series.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn fourier_drop_is_hundredth_of_legacy_drop() {
    let legacy = ModelConstants::default();
    let fourier = ModelConstants {
        surface_drop: SurfaceDropMode::Fourier,
        ..legacy
    };
    let limits = InputLimits::default();

    for thickness_cm in [0.5, 1.0, 2.0, 5.0] {
        let mut input = scenario_a();
        input.geometry.thickness_cm = thickness_cm;
        let a = compute_with(input, &legacy, &limits).unwrap();
        let b = compute_with(input, &fourier, &limits).unwrap();
        let legacy_drop = a.lower_surface_temp_c - a.upper_surface_temp_c;
        let fourier_drop = b.lower_surface_temp_c - b.upper_surface_temp_c;
        // q·L/k
        let expected = b.heat_flux_w_m2 * (thickness_cm / 100.0)
            / PlateMaterial::Aluminum.properties().conductivity_w_m_k;
        assert_relative_eq!(fourier_drop, expected, max_relative = 1e-9);
        assert_relative_eq!(legacy_drop, fourier_drop * 100.0, max_relative = 1e-9);
        assert_eq!(a.mean_temp_c, b.mean_temp_c);
    }
}

#[test]
fn custom_constants_are_honoured() {
    let constants = ModelConstants {
        ambient_c: 20.0,
        hotspot_factor: 1.0,
        sample_count: 11,
        ..ModelConstants::default()
    };
    let res = compute_with(scenario_a(), &constants, &InputLimits::default()).unwrap();
    assert_eq!(res.time_series_sec.len(), 11);
    assert_eq!(res.mean_temp_series[0], 20.0);
    assert_eq!(res.max_temp_c, res.mean_temp_c);
}

#[test]
fn invalid_inputs_fail_fast() {
    let mut zero_k = scenario_a();
    zero_k.material = PlateMaterial::Custom(MaterialProperties::new(7800.0, 500.0, 0.0));
    assert!(matches!(
        compute_thermal_result(zero_k),
        Err(ThermalCalcError::Validation {
            field: "thermal conductivity",
            ..
        })
    ));

    let mut inf_c = scenario_a();
    inf_c.material = PlateMaterial::Custom(MaterialProperties::new(7800.0, f64::INFINITY, 50.0));
    assert!(compute_thermal_result(inf_c).is_err());

    let mut too_wide = scenario_a();
    too_wide.geometry.diameter_cm = 150.0;
    assert!(matches!(
        compute_thermal_result(too_wide),
        Err(ThermalCalcError::Validation { field: "diameter", .. })
    ));

    let mut no_time = scenario_a();
    no_time.scenario.duration_min = 0;
    assert!(compute_thermal_result(no_time).is_err());

    let one_sample = ModelConstants {
        sample_count: 1,
        ..ModelConstants::default()
    };
    assert!(compute_with(scenario_a(), &one_sample, &InputLimits::default()).is_err());
}

fn with_custom(props: MaterialProperties) -> PlateInput {
    let mut input = scenario_a();
    input.material = PlateMaterial::Custom(props);
    input
}

#[test]
fn underflowing_mass_is_degenerate() {
    // 가장 작은 양의 비정규수: 검증은 통과하지만 질량은 0으로 언더플로한다.
    let density = f64::from_bits(1);
    assert!(density > 0.0);
    let input = with_custom(MaterialProperties::new(density, 500.0, 50.0));
    assert_eq!(
        compute_thermal_result(input),
        Err(ThermalCalcError::DegenerateDivision("mass"))
    );
}

#[test]
fn overflowing_temperature_rise_is_degenerate() {
    let input = with_custom(MaterialProperties::new(1e-310, 500.0, 50.0));
    assert_eq!(
        compute_thermal_result(input),
        Err(ThermalCalcError::DegenerateDivision("heat capacity"))
    );
}

#[test]
fn vanishing_conductivity_is_degenerate() {
    let input = with_custom(MaterialProperties::new(2700.0, 900.0, 1e-310));
    assert_eq!(
        compute_thermal_result(input),
        Err(ThermalCalcError::DegenerateDivision("thermal conductivity"))
    );
}
