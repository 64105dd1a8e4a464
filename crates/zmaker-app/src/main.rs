//! ZMaker 命令行工具入口
//!
//! 生成常用形状、导出模型文件、测量模型以及单位换算。

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zmaker_core::exporter::Exportable;
use zmaker_core::interop::Strictness;
use zmaker_core::math::{round, Point2, DEFAULT_ACCURACY};
use zmaker_core::measure::{model_extents, model_path_length};
use zmaker_core::model::Model;
use zmaker_core::shapes;
use zmaker_core::units::{conversion_scale, UnitType};
use zmaker_file::{dxf_io, export, json, DxfOptions, ExportFormat, SvgOptions};

#[derive(Parser, Debug)]
#[command(name = "zmaker")]
#[command(about = "2D parametric drawing toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Fail on unrecognized paths or models instead of skipping them
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a common shape and export it
    Shape {
        #[command(subcommand)]
        kind: ShapeKind,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Export a JSON model file to SVG or DXF
    Export {
        /// Model file (JSON)
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the extents and total path length of a model file
    Measure {
        /// Model file (JSON)
        input: PathBuf,
    },

    /// Convert a value between unit systems
    Convert {
        value: f64,

        #[arg(long)]
        from: UnitType,

        #[arg(long)]
        to: UnitType,
    },
}

/// 导出参数
#[derive(Args, Debug, Default)]
struct RenderArgs {
    /// Output file (.svg or .dxf); SVG goes to stdout when omitted
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Exporter options as a JSON file; flags override its fields
    #[arg(long, value_name = "JSON", global = true)]
    options: Option<PathBuf>,

    /// SVG scale factor
    #[arg(long, global = true)]
    scale: Option<f64>,

    /// SVG stroke color
    #[arg(long, global = true)]
    stroke: Option<String>,

    /// SVG stroke width, in the drawing units
    #[arg(long, global = true)]
    stroke_width: Option<f64>,

    /// Render path ids as SVG text
    #[arg(long, global = true)]
    annotate: bool,

    /// Unit system of the drawing (mm, cm, m, inch, foot)
    #[arg(long, global = true)]
    units: Option<UnitType>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum ShapeKind {
    /// Holes spaced evenly on a circle
    #[command(allow_negative_numbers = true)]
    BoltCircle {
        bolt_radius: f64,
        hole_radius: f64,
        bolt_count: usize,
        #[arg(default_value_t = 0.0)]
        first_bolt_angle: f64,
    },

    /// Holes at the corners of a rectangle
    BoltRectangle {
        width: f64,
        height: f64,
        hole_radius: f64,
    },

    /// Lines through a list of points, given as x,y
    ConnectTheDots {
        #[arg(long)]
        closed: bool,
        #[arg(required = true, allow_hyphen_values = true, value_parser = parse_point)]
        points: Vec<Point2>,
    },

    Rectangle {
        width: f64,
        height: f64,
    },

    Square {
        side: f64,
    },

    RoundRectangle {
        width: f64,
        height: f64,
        radius: f64,
    },

    Oval {
        width: f64,
        height: f64,
    },

    /// Slot swept along an arc
    #[command(allow_negative_numbers = true)]
    OvalArc {
        start_angle: f64,
        end_angle: f64,
        sweep_radius: f64,
        slot_radius: f64,
    },

    /// Two tangent arcs from (0, 0) to (width, height)
    SCurve {
        width: f64,
        height: f64,
    },
}

impl ShapeKind {
    fn build(&self) -> Model {
        match self {
            ShapeKind::BoltCircle {
                bolt_radius,
                hole_radius,
                bolt_count,
                first_bolt_angle,
            } => shapes::bolt_circle(*bolt_radius, *hole_radius, *bolt_count, *first_bolt_angle),
            ShapeKind::BoltRectangle {
                width,
                height,
                hole_radius,
            } => shapes::bolt_rectangle(*width, *height, *hole_radius),
            ShapeKind::ConnectTheDots { closed, points } => shapes::connect_the_dots(*closed, points),
            ShapeKind::Rectangle { width, height } => shapes::rectangle(*width, *height),
            ShapeKind::Square { side } => shapes::square(*side),
            ShapeKind::RoundRectangle {
                width,
                height,
                radius,
            } => shapes::round_rectangle(*width, *height, *radius),
            ShapeKind::Oval { width, height } => shapes::oval(*width, *height),
            ShapeKind::OvalArc {
                start_angle,
                end_angle,
                sweep_radius,
                slot_radius,
            } => shapes::oval_arc(*start_angle, *end_angle, *sweep_radius, *slot_radius),
            ShapeKind::SCurve { width, height } => shapes::s_curve(*width, *height),
        }
    }
}

/// 解析 `x,y` 形式的点
fn parse_point(s: &str) -> std::result::Result<Point2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("invalid x in '{}': {}", s, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("invalid y in '{}': {}", s, e))?;
    Ok(Point2::new(x, y))
}

/// 读取选项文件，未指定时使用默认值
fn load_options<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid options file {}", path.display()))
        }
        None => Ok(T::default()),
    }
}

impl RenderArgs {
    fn svg_options(&self) -> Result<SvgOptions> {
        let mut options: SvgOptions = load_options(self.options.as_deref())?;
        if let Some(scale) = self.scale {
            options.scale = scale;
        }
        if let Some(stroke) = &self.stroke {
            options.stroke = stroke.clone();
        }
        if self.stroke_width.is_some() {
            options.stroke_width = self.stroke_width;
        }
        if self.annotate {
            options.annotate = true;
        }
        if self.units.is_some() {
            options.units = self.units;
        }
        Ok(options)
    }

    fn dxf_options(&self) -> Result<DxfOptions> {
        let mut options: DxfOptions = load_options(self.options.as_deref())?;
        if self.units.is_some() {
            options.units = self.units;
        }
        Ok(options)
    }
}

/// 导出模型到文件；未指定输出文件时把 SVG 写到 `out`
fn render(model: &Model, args: &RenderArgs, out: &mut impl Write) -> Result<()> {
    let item = Exportable::Model(model);

    let Some(path) = args.output.as_deref() else {
        let mut options = args.svg_options()?;
        writeln!(out, "{}", export::to_svg(&item, &mut options))?;
        return Ok(());
    };

    match ExportFormat::from_path(path)? {
        ExportFormat::Svg => {
            let mut options = args.svg_options()?;
            export::export_to_file(&item, &mut options, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        ExportFormat::Dxf => {
            let mut options = args.dxf_options()?;
            dxf_io::export(&item, &mut options, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    info!("已写入 {}", path.display());
    Ok(())
}

fn strictness(cli: &Cli) -> Strictness {
    if cli.strict {
        Strictness::Strict
    } else {
        Strictness::Permissive
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Commands::Shape { kind, render: args } => {
            let model = kind.build();
            render(&model, args, out)
        }

        Commands::Export {
            input,
            render: args,
        } => {
            let model = json::read_model(input, strictness(cli))
                .with_context(|| format!("failed to load {}", input.display()))?;
            render(&model, args, out)
        }

        Commands::Measure { input } => {
            let model = json::read_model(input, strictness(cli))
                .with_context(|| format!("failed to load {}", input.display()))?;
            let units = model.units().map(|u| u.to_string()).unwrap_or_default();

            match model_extents(&model) {
                Some(m) => {
                    writeln!(out, "low:    [{}, {}]", round(m.low.x, 1e-4), round(m.low.y, 1e-4))?;
                    writeln!(out, "high:   [{}, {}]", round(m.high.x, 1e-4), round(m.high.y, 1e-4))?;
                    writeln!(
                        out,
                        "size:   {} x {} {}",
                        round(m.width(), 1e-4),
                        round(m.height(), 1e-4),
                        units
                    )?;
                }
                None => writeln!(out, "model has no paths")?,
            }
            writeln!(out, "length: {} {}", round(model_path_length(&model), 1e-4), units)?;
            Ok(())
        }

        Commands::Convert { value, from, to } => {
            let converted = round(value * conversion_scale(*from, *to), DEFAULT_ACCURACY);
            writeln!(out, "{} {}", converted, to)?;
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}
