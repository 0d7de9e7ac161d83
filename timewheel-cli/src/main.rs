use std::fmt::{Display, Write as FmtWrite};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use timewheel::{
    ClockTime, DocumentFormat, OutputDestination, OutputOptions, PickerSettings, TimePickerUI,
    UiOptions, WheelPalette, emit_selection, parse_color, settings_from_str,
};

const LOG_ENV: &str = "TIMEWHEEL_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "timewheel",
    version,
    about = "Pick a time of day on a pair of scrolling wheels"
)]
struct Cli {
    /// Time the wheels open on, as HH:MM
    #[arg(short = 's', long = "start", value_name = "HH:MM")]
    start: Option<ClockTime>,

    /// Earliest time that can be picked, as HH:MM
    #[arg(short = 'm', long = "min", value_name = "HH:MM")]
    min: Option<ClockTime>,

    /// Settings spec: file path, inline payload, or "-" for stdin
    #[arg(short = 'c', long = "config", value_name = "SPEC")]
    config: Option<String>,

    /// Title shown above the wheels
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Color of the guide lines around the selected row (name, index or #rrggbb)
    #[arg(long = "line-color", value_name = "COLOR")]
    line_color: Option<String>,

    /// Use the light palette
    #[arg(long = "light")]
    light: bool,

    /// Hide the key binding help in the footer
    #[arg(long = "no-help")]
    no_help: bool,

    /// JSON keymap replacing the built-in bindings
    #[arg(long = "keymap", value_name = "PATH")]
    keymap: Option<PathBuf>,

    /// Output destinations ("-" writes to stdout). Defaults to stdout.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Write logs to this file (filter with TIMEWHEEL_LOG, default "info")
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut diagnostics = DiagnosticCollector::default();

    let _log_guard = match cli.log_file.as_deref() {
        Some(path) => match init_logging(path) {
            Ok(guard) => Some(guard),
            Err(err) => {
                diagnostics.push_input("log-file", format!("{err:#}"));
                None
            }
        },
        None => None,
    };

    let settings = load_settings(cli.config.as_deref(), &mut diagnostics);
    let keymap = load_keymap(cli.keymap.as_deref(), &mut diagnostics);
    let line_color = cli
        .line_color
        .as_deref()
        .map(|raw| parse_color(raw).map_err(Report::msg))
        .transpose()
        .unwrap_or_else(|err| {
            diagnostics.push_input("line-color", err.to_string());
            None
        });

    let (output_settings, output_paths) = build_output_options(&cli, &mut diagnostics);
    ensure_output_paths_available(&output_paths, cli.force, &mut diagnostics);

    let start = resolve_time(cli.start, || settings.start_time(), &mut diagnostics);
    let min = resolve_time(cli.min, || settings.min_time(), &mut diagnostics);
    let settings_color = match settings.line_color() {
        Ok(color) => color,
        Err(err) => {
            diagnostics.push_input("config", format!("{err:#}"));
            None
        }
    };

    diagnostics.into_result()?;

    let palette = if cli.light {
        WheelPalette::light()
    } else {
        settings.palette()
    };
    let mut options = UiOptions::default()
        .with_palette(palette)
        .with_help(!cli.no_help && settings.help.unwrap_or(true));
    if let Some(color) = line_color.or(settings_color) {
        options = options.with_line_color(color);
    }
    if let Some(source) = keymap {
        options = options.with_keymap_json(&source).map_err(Report::msg)?;
    }

    let mut ui = TimePickerUI::new(start.unwrap_or(ClockTime::MIDNIGHT))
        .with_min_time(min.unwrap_or(ClockTime::MIDNIGHT))
        .with_options(options);
    if let Some(title) = cli.title.or(settings.title) {
        ui = ui.with_title(title);
    }

    let selection = ui.run().map_err(Report::msg)?;
    tracing::info!(selection = %selection.formatted, "writing selection");

    if let Some(options) = output_settings {
        emit_selection(&selection, &options).map_err(Report::msg)?;
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<WorkerGuard> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))?;
    Ok(guard)
}

/// The flag wins; the settings document is only consulted (and its errors
/// only reported) when the flag is absent.
fn resolve_time<E: Display>(
    flag: Option<ClockTime>,
    from_settings: impl FnOnce() -> std::result::Result<Option<ClockTime>, E>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<ClockTime> {
    if flag.is_some() {
        return flag;
    }
    from_settings().unwrap_or_else(|err| {
        diagnostics.push_input("config", format!("{err:#}"));
        None
    })
}

fn load_settings(spec: Option<&str>, diagnostics: &mut DiagnosticCollector) -> PickerSettings {
    let Some(raw) = spec else {
        return PickerSettings::default();
    };
    let format = match resolve_format_hint(raw, diagnostics) {
        Some(format) => format,
        None => return PickerSettings::default(),
    };
    match load_value(raw, format) {
        Ok(settings) => settings,
        Err(err) => {
            diagnostics.push_input("config", format!("{err:#}"));
            PickerSettings::default()
        }
    }
}

fn load_keymap(path: Option<&Path>, diagnostics: &mut DiagnosticCollector) -> Option<String> {
    let path = path?;
    match read_from_source(&InputSource::File(path.to_path_buf())) {
        Ok(source) => Some(source),
        Err(err) => {
            diagnostics.push_input("keymap", format!("{err:#}"));
            None
        }
    }
}

/// Format implied by the config path. `None` means the path names a format
/// this build cannot read, which has already been reported.
fn resolve_format_hint(
    spec: &str,
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    if spec == "-" {
        return Some(DocumentFormat::default());
    }
    match probe_format_from_extension(Path::new(spec)) {
        ExtensionFormat::Known(format) => Some(format),
        ExtensionFormat::UnsupportedFeature {
            format_name,
            feature_flag,
        } => {
            diagnostics.push_input(
                "config",
                format!(
                    "config '{spec}' requires {format_name} support, but this build lacks the '{feature_flag}' feature"
                ),
            );
            None
        }
        ExtensionFormat::Unknown => Some(DocumentFormat::default()),
    }
}

fn load_value(spec: &str, format: DocumentFormat) -> Result<PickerSettings> {
    if spec == "-" {
        let contents = read_from_source(&InputSource::Stdin)?;
        return parse_contents(&contents, format, "config");
    }

    let path = PathBuf::from(spec);
    match read_from_source(&InputSource::File(path.clone())) {
        Ok(contents) => parse_contents(&contents, format, "config"),
        Err(err) => {
            if is_not_found(&err) {
                return parse_contents(spec, format, "inline config");
            }
            Err(err.wrap_err(format!("failed to load config from {}", path.display())))
        }
    }
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

fn parse_contents(contents: &str, format: DocumentFormat, label: &str) -> Result<PickerSettings> {
    match settings_from_str(contents, format) {
        Ok(settings) => Ok(settings),
        Err(primary) => {
            for candidate in DocumentFormat::available_formats() {
                if candidate == format {
                    continue;
                }
                if let Ok(settings) = settings_from_str(contents, candidate) {
                    return Ok(settings);
                }
            }
            Err(Report::msg(format!(
                "failed to parse {label}: tried {} (first error: {primary:#})",
                format_list()
            )))
        }
    }
}

fn format_list() -> String {
    let items: Vec<String> = DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect();
    items.join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn len(&self) -> usize {
        self.messages.len()
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

fn build_output_options(
    cli: &Cli,
    diagnostics: &mut DiagnosticCollector,
) -> (Option<OutputOptions>, Vec<PathBuf>) {
    let mut destinations = Vec::new();

    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        if raw == "-" {
            destinations.push(OutputDestination::Stdout);
        } else {
            destinations.push(OutputDestination::file(raw));
        }
    }

    if destinations.is_empty() {
        if !cli.outputs.is_empty() {
            return (None, Vec::new());
        }
        destinations.push(OutputDestination::Stdout);
    }

    let file_paths: Vec<PathBuf> = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect();

    let start = diagnostics.len();
    let format = if file_paths.is_empty() {
        DocumentFormat::default()
    } else {
        infer_format_from_files(&file_paths, diagnostics).unwrap_or_default()
    };

    if diagnostics.len() > start {
        return (None, file_paths);
    }

    (
        Some(
            OutputOptions::new(format)
                .with_pretty(!cli.no_pretty)
                .with_destinations(destinations),
        ),
        file_paths,
    )
}

fn infer_format_from_files(
    file_paths: &[PathBuf],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for path in file_paths {
        match probe_format_from_extension(path) {
            ExtensionFormat::Known(format) => {
                if let Some(existing) = detected {
                    if existing != format {
                        diagnostics.push_output(format!(
                            "output file {} uses {format} but other destinations use {existing}; align extensions",
                            path.display()
                        ));
                    }
                } else {
                    detected = Some(format);
                }
            }
            ExtensionFormat::UnsupportedFeature {
                format_name,
                feature_flag,
            } => diagnostics.push_output(format!(
                "output file {} requires {format_name} support, but this build was compiled without the '{feature_flag}' feature",
                path.display()
            )),
            ExtensionFormat::Unknown => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use .json/.yaml/.toml",
                path.display()
            )),
        }
    }
    detected
}

fn probe_format_from_extension(path: &Path) -> ExtensionFormat {
    let Some(ext) = path.extension() else {
        return ExtensionFormat::Unknown;
    };
    let normalized = ext.to_string_lossy().to_ascii_lowercase();
    match normalized.as_str() {
        "json" => ExtensionFormat::Known(DocumentFormat::Json),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => ExtensionFormat::Known(DocumentFormat::Yaml),
        #[cfg(not(feature = "yaml"))]
        "yaml" | "yml" => ExtensionFormat::UnsupportedFeature {
            format_name: "yaml",
            feature_flag: "yaml",
        },
        #[cfg(feature = "toml")]
        "toml" => ExtensionFormat::Known(DocumentFormat::Toml),
        #[cfg(not(feature = "toml"))]
        "toml" => ExtensionFormat::UnsupportedFeature {
            format_name: "toml",
            feature_flag: "toml",
        },
        _ => ExtensionFormat::Unknown,
    }
}

#[derive(Debug)]
enum ExtensionFormat {
    Known(DocumentFormat),
    #[allow(dead_code)]
    UnsupportedFeature {
        format_name: &'static str,
        feature_flag: &'static str,
    },
    Unknown,
}

fn ensure_output_paths_available(
    paths: &[PathBuf],
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for path in paths {
        if path.exists() {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}
