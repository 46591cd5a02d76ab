#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use log::{info, warn};
use rfd::FileDialog;
use std::{env, fs, path::Path};
use plate_heating_simulator::{
    app::{self, Simulation},
    chart::{self, BarChart, LineChart, Rgb},
    config,
    i18n::{self, keys},
    material_db::{MaterialProperties, PlateMaterial},
    plate::{Geometry, HeatingScenario, PlateInput},
};

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/it/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(1100.0, 760.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("using default configuration: {e}");
            config::Config::default()
        }
    };
    eframe::run_native(
        "Plate Heating Simulator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("font setup: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone(), cli_lang.as_deref()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["assets/icon.png", "icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (width, height) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width,
        height,
    })
}

/// 한글 라벨을 그리기 위해 CJK 폰트를 찾아 기본 폰트 앞에 둔다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/NotoSansKR-Regular.ttf").to_path_buf(),
        Path::new("/usr/share/fonts/truetype/nanum/NanumGothic.ttf").to_path_buf(),
        Path::new("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc").to_path_buf(),
        Path::new("/System/Library/Fonts/AppleSDGothicNeo.ttc").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        candidates.push(Path::new(&windir).join("Fonts").join("malgun.ttf"));
    }
    let path = candidates
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| "no CJK font found, Korean labels may not render".to_string())?;
    let bytes = fs::read(&path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        // 라틴 글리프는 기본 폰트가 그리고, 없는 글리프만 CJK 폰트로 넘어간다.
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
    info!("loaded font {}", path.display());
    Ok(())
}

/// 콤보 박스에서 고르는 재료. 사용자 정의 물성은 따로 들고 있는다.
#[derive(Debug, Clone, Copy, PartialEq)]
enum MaterialChoice {
    BuiltIn(PlateMaterial),
    Custom,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    material: MaterialChoice,
    custom: MaterialProperties,
    diameter_cm: f64,
    thickness_cm: f64,
    power_kw: f64,
    duration_min: u32,
    efficiency_percent: u32,
    outcome: Result<Simulation, String>,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, cli_lang: Option<&str>) -> Self {
        let tr = app::translator_for(&config, cli_lang);
        let defaults = config.defaults.to_input();
        let material = if defaults.material.is_custom() {
            MaterialChoice::Custom
        } else {
            MaterialChoice::BuiltIn(defaults.material)
        };
        let mut gui = Self {
            lang_input: tr.language_code().to_string(),
            tr,
            material,
            custom: config.defaults.custom,
            diameter_cm: defaults.geometry.diameter_cm,
            thickness_cm: defaults.geometry.thickness_cm,
            power_kw: defaults.scenario.power_kw,
            duration_min: defaults.scenario.duration_min,
            efficiency_percent: defaults.scenario.efficiency_percent,
            outcome: Err(String::new()),
            status: None,
            config,
        };
        gui.recompute();
        gui
    }

    fn input(&self) -> PlateInput {
        let material = match self.material {
            MaterialChoice::BuiltIn(m) => m,
            MaterialChoice::Custom => PlateMaterial::Custom(self.custom),
        };
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

    /// 입력이 바뀔 때마다 처음부터 다시 계산한다.
    fn recompute(&mut self) {
        self.outcome = app::simulate(self.input(), &self.config, &self.tr).map_err(|e| e.to_string());
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) -> bool {
        let tr = self.tr.clone();
        let lim = self.config.limits;
        let mut changed = false;

        ui.heading(tr.t(keys::GUI_INPUTS));
        ui.separator();

        let selected_label = match self.material {
            MaterialChoice::BuiltIn(m) => tr.t(m.label_key()),
            MaterialChoice::Custom => tr.t(keys::MATERIAL_CUSTOM),
        };
        let before = self.material;
        ui.label(tr.t(keys::PROMPT_MATERIAL));
        egui::ComboBox::from_id_source("material_choice")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                for m in PlateMaterial::BUILT_IN {
                    ui.selectable_value(&mut self.material, MaterialChoice::BuiltIn(m), tr.t(m.label_key()));
                }
                ui.selectable_value(&mut self.material, MaterialChoice::Custom, tr.t(keys::MATERIAL_CUSTOM));
            });
        changed |= before != self.material;

        if self.material == MaterialChoice::Custom {
            egui::Grid::new("custom_props").num_columns(2).show(ui, |ui| {
                ui.label(tr.t(keys::PROMPT_DENSITY));
                changed |= ui
                    .add(egui::DragValue::new(&mut self.custom.density_kg_m3).speed(10.0))
                    .changed();
                ui.end_row();
                ui.label(tr.t(keys::PROMPT_SPECIFIC_HEAT));
                changed |= ui
                    .add(egui::DragValue::new(&mut self.custom.specific_heat_j_kg_k).speed(5.0))
                    .changed();
                ui.end_row();
                ui.label(tr.t(keys::PROMPT_CONDUCTIVITY));
                changed |= ui
                    .add(egui::DragValue::new(&mut self.custom.conductivity_w_m_k).speed(1.0))
                    .changed();
                ui.end_row();
            });
        } else {
            let p = self.input().material.properties();
            ui.label(format!(
                "ρ = {:.0} kg/m³, c = {:.0} J/(kg·K), k = {:.0} W/(m·K)",
                p.density_kg_m3, p.specific_heat_j_kg_k, p.conductivity_w_m_k
            ));
        }
        ui.add_space(6.0);

        ui.label(tr.t(keys::PROMPT_DIAMETER));
        changed |= ui
            .add(egui::Slider::new(&mut self.diameter_cm, lim.diameter_cm.min..=lim.diameter_cm.max).step_by(1.0))
            .changed();
        ui.label(tr.t(keys::PROMPT_THICKNESS));
        changed |= ui
            .add(egui::Slider::new(&mut self.thickness_cm, lim.thickness_cm.min..=lim.thickness_cm.max).step_by(0.1))
            .changed();
        ui.label(tr.t(keys::PROMPT_POWER));
        changed |= ui
            .add(egui::Slider::new(&mut self.power_kw, lim.power_kw.min..=lim.power_kw.max).step_by(0.1))
            .changed();
        ui.label(tr.t(keys::PROMPT_DURATION));
        changed |= ui
            .add(egui::Slider::new(
                &mut self.duration_min,
                lim.duration_min.min as u32..=lim.duration_min.max as u32,
            ))
            .changed();
        ui.label(tr.t(keys::PROMPT_EFFICIENCY));
        changed |= ui
            .add(
                egui::Slider::new(
                    &mut self.efficiency_percent,
                    lim.efficiency_percent.min as u32..=lim.efficiency_percent.max as u32,
                )
                .suffix(" %"),
            )
            .changed();
        changed
    }

    fn ui_language(&mut self, ui: &mut egui::Ui) {
        let before = self.lang_input.clone();
        ui.label(self.tr.t(keys::GUI_LANGUAGE));
        egui::ComboBox::from_id_source("lang_choice")
            .selected_text(self.lang_input.clone())
            .show_ui(ui, |ui| {
                for code in ["en", "it", "ko"] {
                    ui.selectable_value(&mut self.lang_input, code.to_string(), code);
                }
            });
        if before != self.lang_input {
            self.config.language = self.lang_input.clone();
            self.tr = app::translator_for(&self.config, None);
            if let Err(e) = self.config.save() {
                self.status = Some(e.to_string());
            }
            self.recompute();
        }
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let sim = match &self.outcome {
            Ok(sim) => sim.clone(),
            Err(msg) => {
                ui.colored_label(egui::Color32::RED, format!("{}: {msg}", tr.t(keys::ERROR_PREFIX)));
                return;
            }
        };

        ui.heading(tr.t(keys::RESULTS_HEADING));
        egui::Grid::new("results").num_columns(2).striped(true).show(ui, |ui| {
            for line in sim.summary.lines() {
                ui.label(&line.label);
                ui.strong(&line.value);
                ui.end_row();
            }
        });
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::GUI_EXPORT_SVG)).clicked() {
                if let Some(dir) = FileDialog::new()
                    .set_directory(&self.config.output_dir)
                    .pick_folder()
                {
                    self.status = Some(match app::export_charts(&sim, &dir, &tr) {
                        Ok(paths) => format!("{} {}", tr.t(keys::CHART_SAVED), paths[0].display()),
                        Err(e) => e.to_string(),
                    });
                }
            }
            if ui.button(tr.t(keys::GUI_EXPORT_JSON)).clicked() {
                if let Some(path) = FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .set_file_name("plate_result.json")
                    .save_file()
                {
                    let written = serde_json::to_string_pretty(&sim.result)
                        .map_err(|e| e.to_string())
                        .and_then(|json| fs::write(&path, json).map_err(|e| e.to_string()));
                    self.status = Some(match written {
                        Ok(()) => path.display().to_string(),
                        Err(e) => e,
                    });
                }
            }
        });
        if let Some(status) = &self.status {
            ui.small(status);
        }
        ui.separator();

        draw_line_chart(ui, &chart::temperature_chart(&sim.result, &tr));
        ui.add_space(8.0);
        draw_bar_chart(ui, &chart::surface_chart(&sim.result, &tr));
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                self.ui_language(ui);
            });
        });

        egui::SidePanel::left("inputs").min_width(280.0).show(ctx, |ui| {
            if self.ui_inputs(ui) {
                self.status = None;
                self.recompute();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.ui_results(ui));
        });
    }
}

fn color(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.0, c.1, c.2)
}

/// 차트 제목과 축을 그리고 그림 영역을 반환한다.
fn chart_frame(ui: &mut egui::Ui, title: &str, y_label: &str, y: (f64, f64)) -> (egui::Painter, egui::Rect) {
    let size = egui::vec2(ui.available_width().max(320.0), 260.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let outer = response.rect;
    let text_color = ui.visuals().text_color();
    let font = egui::FontId::proportional(12.0);

    painter.text(
        egui::pos2(outer.center().x, outer.top()),
        egui::Align2::CENTER_TOP,
        title,
        egui::FontId::proportional(15.0),
        text_color,
    );
    let plot = egui::Rect::from_min_max(
        egui::pos2(outer.left() + 60.0, outer.top() + 28.0),
        egui::pos2(outer.right() - 12.0, outer.bottom() - 36.0),
    );
    let axis = egui::Stroke::new(1.0, text_color);
    let grid = egui::Stroke::new(0.5, ui.visuals().weak_text_color());
    painter.line_segment([plot.left_top(), plot.left_bottom()], axis);
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);

    for i in 0..=4 {
        let v = y.0 + (y.1 - y.0) * i as f64 / 4.0;
        let py = to_screen_y(v, y, plot);
        painter.line_segment([egui::pos2(plot.left(), py), egui::pos2(plot.right(), py)], grid);
        painter.text(
            egui::pos2(plot.left() - 6.0, py),
            egui::Align2::RIGHT_CENTER,
            format!("{v:.0}"),
            font.clone(),
            text_color,
        );
    }
    painter.text(
        egui::pos2(outer.left() + 2.0, plot.top() - 14.0),
        egui::Align2::LEFT_BOTTOM,
        y_label,
        font,
        text_color,
    );
    (painter, plot)
}

fn to_screen_y(v: f64, y: (f64, f64), plot: egui::Rect) -> f32 {
    let frac = ((v - y.0) / (y.1 - y.0)) as f32;
    plot.bottom() - frac * plot.height()
}

fn draw_line_chart(ui: &mut egui::Ui, chart: &LineChart) {
    let y = chart::value_bounds(chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)), false);
    let x_max = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);
    let (painter, plot) = chart_frame(ui, &chart.title, &chart.y_label, y);
    let text_color = ui.visuals().text_color();
    let font = egui::FontId::proportional(12.0);

    for i in 0..=4 {
        let v = x_max * i as f64 / 4.0;
        let px = plot.left() + (v / x_max) as f32 * plot.width();
        painter.text(
            egui::pos2(px, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            format!("{v:.0}"),
            font.clone(),
            text_color,
        );
    }
    painter.text(
        egui::pos2(plot.center().x, plot.bottom() + 20.0),
        egui::Align2::CENTER_TOP,
        &chart.x_label,
        font.clone(),
        text_color,
    );

    for (idx, s) in chart.series.iter().enumerate() {
        let pts: Vec<egui::Pos2> = s
            .points
            .iter()
            .map(|(px, py)| {
                egui::pos2(
                    plot.left() + (px / x_max) as f32 * plot.width(),
                    to_screen_y(*py, y, plot),
                )
            })
            .collect();
        let stroke = egui::Stroke::new(2.0, color(s.color));
        if s.dashed {
            painter.extend(egui::Shape::dashed_line(&pts, stroke, 8.0, 5.0));
        } else {
            painter.add(egui::Shape::line(pts, stroke));
        }
        // 범례
        let ly = plot.top() + 10.0 + idx as f32 * 16.0;
        painter.line_segment(
            [egui::pos2(plot.left() + 10.0, ly), egui::pos2(plot.left() + 36.0, ly)],
            stroke,
        );
        painter.text(
            egui::pos2(plot.left() + 42.0, ly),
            egui::Align2::LEFT_CENTER,
            &s.label,
            font.clone(),
            text_color,
        );
    }
}

fn draw_bar_chart(ui: &mut egui::Ui, chart: &BarChart) {
    let y = chart::value_bounds(chart.bars.iter().map(|b| b.value), true);
    let (painter, plot) = chart_frame(ui, &chart.title, &chart.y_label, y);
    let text_color = ui.visuals().text_color();
    let font = egui::FontId::proportional(12.0);
    let zero = to_screen_y(0.0, y, plot);
    let slot = plot.width() / chart.bars.len().max(1) as f32;

    for (i, bar) in chart.bars.iter().enumerate() {
        let left = plot.left() + slot * i as f32 + slot * 0.2;
        let right = left + slot * 0.6;
        let top = to_screen_y(bar.value, y, plot);
        let rect = egui::Rect::from_two_pos(egui::pos2(left, top), egui::pos2(right, zero));
        painter.rect_filled(rect, 2.0, color(bar.color));
        painter.text(
            egui::pos2(rect.center().x, rect.top() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            format!("{:.1}", bar.value),
            font.clone(),
            text_color,
        );
        painter.text(
            egui::pos2(rect.center().x, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            &bar.label,
            font.clone(),
            text_color,
        );
    }
}
