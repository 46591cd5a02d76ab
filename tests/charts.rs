//! 차트 데이터/SVG 출력 테스트.
use plate_heating_simulator::chart::{self, svg, Rgb};
use plate_heating_simulator::i18n::Translator;
use plate_heating_simulator::material_db::PlateMaterial;
use plate_heating_simulator::plate::{compute_thermal_result, Geometry, HeatingScenario, PlateInput};
use plate_heating_simulator::report::ResultSummary;

fn result() -> plate_heating_simulator::plate::ThermalResult {
    compute_thermal_result(PlateInput {
        material: PlateMaterial::CastIron,
        geometry: Geometry {
            diameter_cm: 28.0,
            thickness_cm: 0.8,
        },
        scenario: HeatingScenario {
            power_kw: 3.0,
            duration_min: 10,
            efficiency_percent: 40,
        },
    })
    .expect("cast iron pan")
}

#[test]
fn time_chart_uses_minutes_on_x_axis() {
    let res = result();
    let tr = Translator::new("en");
    let c = chart::temperature_chart(&res, &tr);
    assert_eq!(c.series.len(), 2);
    assert_eq!(c.x_label, "Time (minutes)");
    let mean = &c.series[0];
    let max = &c.series[1];
    assert!(!mean.dashed && max.dashed);
    assert_eq!(mean.points.len(), 200);
    assert_eq!(mean.points.first().map(|p| p.0), Some(0.0));
    assert_eq!(mean.points.last().map(|p| p.0), Some(10.0));
    assert_eq!(max.points[50].1, res.max_temp_series[50]);
}

#[test]
fn surface_chart_has_flame_and_opposite_bars() {
    let res = result();
    let c = chart::surface_chart(&res, &Translator::new("en"));
    assert_eq!(c.bars.len(), 2);
    assert_eq!(c.bars[0].label, "flame side (lower)");
    assert_eq!(c.bars[0].value, res.lower_surface_temp_c);
    assert_eq!(c.bars[0].color, Rgb::RED);
    assert_eq!(c.bars[1].label, "opposite side (upper)");
    assert_eq!(c.bars[1].value, res.upper_surface_temp_c);
    assert_eq!(c.bars[1].color, Rgb::BLUE);
}

#[test]
fn italian_labels() {
    let c = chart::surface_chart(&result(), &Translator::new("it"));
    assert_eq!(c.bars[0].label, "Lato fiamma (inferiore)");
    assert_eq!(c.title, "Gradiente termico attraverso lo spessore");
}

#[test]
fn svg_documents_contain_series_and_bars() {
    let res = result();
    let tr = Translator::new("en");
    let line = svg::render_line_chart(&chart::temperature_chart(&res, &tr));
    assert!(line.starts_with("<svg"));
    assert!(line.trim_end().ends_with("</svg>"));
    assert_eq!(line.matches("<polyline").count(), 2);
    assert!(line.contains("stroke-dasharray"));
    assert!(line.contains("Mean temperature"));

    let bars = svg::render_bar_chart(&chart::surface_chart(&res, &tr));
    assert!(bars.contains("flame side (lower)"));
    assert!(bars.contains("opposite side (upper)"));
    assert!(bars.contains(&format!("{:.1}", res.lower_surface_temp_c)));
}

#[test]
fn charts_are_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested");
    let res = result();
    let tr = Translator::new("en");
    let paths = svg::write_charts(
        &out,
        &chart::temperature_chart(&res, &tr),
        &chart::surface_chart(&res, &tr),
    )
    .unwrap();
    for p in paths {
        let content = std::fs::read_to_string(&p).unwrap();
        assert!(content.contains("<svg"), "{}", p.display());
    }
}

#[test]
fn summary_formats_one_decimal() {
    let res = result();
    let s = ResultSummary::from_result(&res, &Translator::new("en"));
    assert_eq!(s.mean_temp.label, "Estimated mean temperature");
    assert_eq!(s.mean_temp.value, format!("{:.1} °C", res.mean_temp_c));
    assert!(s.gradient.value.starts_with('~'));
    assert!(s.gradient.value.ends_with("°C/cm"));
    assert_eq!(s.lines().len(), 5);
}
