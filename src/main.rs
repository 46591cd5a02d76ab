use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use plate_heating_simulator::app::{self, AppError};
use plate_heating_simulator::config::{self, Config};
use plate_heating_simulator::i18n::keys;
use plate_heating_simulator::material_db::{self, MaterialProperties, PlateMaterial};
use plate_heating_simulator::plate::PlateInput;
use plate_heating_simulator::ui_cli;

/// Estimate mean/max temperature and through-thickness gradient of a heated metal plate
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plate material: stainless, cast-iron, aluminum, copper or custom
    #[arg(short, long)]
    material: Option<String>,

    /// Custom density [kg/m³] (implies --material custom, conflicts with a built-in --material)
    #[arg(long)]
    density: Option<f64>,

    /// Custom specific heat [J/(kg·K)] (implies --material custom)
    #[arg(long)]
    specific_heat: Option<f64>,

    /// Custom thermal conductivity [W/(m·K)] (implies --material custom)
    #[arg(long)]
    conductivity: Option<f64>,

    /// Plate diameter [cm], 10 to 100
    #[arg(short, long)]
    diameter_cm: Option<f64>,

    /// Plate thickness [cm], 0.5 to 5.0
    #[arg(short, long)]
    thickness_cm: Option<f64>,

    /// Burner power [kW], 0.5 to 10
    #[arg(short, long)]
    power_kw: Option<f64>,

    /// Exposure time [min], 1 to 60
    #[arg(short = 'T', long)]
    duration_min: Option<u32>,

    /// Heat transfer efficiency [%], 10 to 80
    #[arg(short, long)]
    efficiency: Option<u32>,

    /// Print the full result (including series) as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write both charts as SVG into this directory
    #[arg(long, value_name = "DIR")]
    svg_dir: Option<PathBuf>,

    /// Language: auto, en, it, ko
    #[arg(short = 'L', long)]
    lang: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// Start the interactive menu instead of a one-shot calculation
    #[arg(short, long, default_value_t = false)]
    interactive: bool,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 한 번 계산하거나 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    match try_run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: Args) -> Result<(), AppError> {
    let mut cfg = config::load_or_create(&args.config)?;
    if args.interactive {
        return app::run(&mut cfg, &args.config, args.lang.as_deref());
    }

    let tr = app::translator_for(&cfg, args.lang.as_deref());
    let input = input_from_args(&args, &cfg)?;
    let sim = app::simulate(input, &cfg, &tr)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sim.result)?);
    } else {
        ui_cli::print_summary(&sim, &tr);
    }
    if let Some(dir) = &args.svg_dir {
        for p in app::export_charts(&sim, dir, &tr)? {
            eprintln!("{} {}", tr.t(keys::CHART_SAVED), p.display());
        }
    }
    Ok(())
}

/// 설정의 기본값 위에 CLI 플래그를 덮어써 입력 묶음을 만든다.
fn input_from_args(args: &Args, cfg: &Config) -> Result<PlateInput, AppError> {
    let mut input = cfg.defaults.to_input();

    let base = match input.material {
        PlateMaterial::Custom(props) => props,
        _ => cfg.defaults.custom,
    };
    let requested = match args.material.as_deref() {
        None => None,
        Some(code) if code.trim().eq_ignore_ascii_case("custom") => {
            Some(PlateMaterial::Custom(base))
        }
        Some(code) => Some(
            material_db::find_material(code)
                .ok_or_else(|| AppError::UnknownMaterial(code.to_string()))?,
        ),
    };

    let has_custom_props =
        args.density.is_some() || args.specific_heat.is_some() || args.conductivity.is_some();
    if has_custom_props {
        // 내장 재료를 명시했는데 물성 플래그를 함께 주면 어느 쪽도 조용히 버리지 않는다.
        if let (Some(m), Some(code)) = (requested, &args.material) {
            if !m.is_custom() {
                return Err(AppError::ConflictingMaterial(code.clone()));
            }
        }
        input.material = PlateMaterial::Custom(MaterialProperties::new(
            args.density.unwrap_or(base.density_kg_m3),
            args.specific_heat.unwrap_or(base.specific_heat_j_kg_k),
            args.conductivity.unwrap_or(base.conductivity_w_m_k),
        ));
    } else if let Some(m) = requested {
        input.material = m;
    }

    if let Some(v) = args.diameter_cm {
        input.geometry.diameter_cm = v;
    }
    if let Some(v) = args.thickness_cm {
        input.geometry.thickness_cm = v;
    }
    if let Some(v) = args.power_kw {
        input.scenario.power_kw = v;
    }
    if let Some(v) = args.duration_min {
        input.scenario.duration_min = v;
    }
    if let Some(v) = args.efficiency {
        input.scenario.efficiency_percent = v;
    }
    Ok(input)
}
