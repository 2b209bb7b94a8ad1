//! maker CLI - Go project scaffolding with a generated Makefile

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use maker_core::error::{EXIT_SCAFFOLD_FAILURE, EXIT_USAGE};
use maker_core::scaffold::resolve_toolchain_version;
use maker_core::tui::CreateArgs;
use maker_core::{
    check_toolchain, compose, scaffold, Preset, ProductConfig, ScaffoldError, ScaffoldReport,
    ScaffoldRequest, Toggle, ToggleSet,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

/// maker product configuration
#[derive(Clone)]
pub struct MakerConfig;

impl ProductConfig for MakerConfig {
    fn name(&self) -> &'static str {
        "maker"
    }

    fn display_name(&self) -> &'static str {
        "maker"
    }

    fn cli_description(&self) -> &'static str {
        "Scaffold a Go project with a generated Makefile"
    }

    fn default_toolchain_version(&self) -> &'static str {
        "1.14"
    }

    fn toolchain_version_env(&self) -> &'static str {
        "MAKER_GO_VERSION"
    }
}

#[derive(clap::Parser, Debug)]
#[command(name = "maker")]
#[command(version)]
pub struct Args {
    /// Project directory to create (must not exist)
    #[arg(value_name = "DIRNAME")]
    pub directory: Option<PathBuf>,

    #[command(flatten)]
    pub features: FeatureFlags,

    /// Creates a go.mod file. Specify the source control path (github.com/user/project)
    #[arg(long = "mod", value_name = "PATH")]
    pub module: Option<String>,

    /// Go version for the go.mod directive (default 1.14, or $MAKER_GO_VERSION)
    #[arg(long = "go-version", value_name = "VERSION")]
    pub go_version: Option<String>,

    /// YAML preset with toggles, module path and Go version
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    /// Print the composed Makefile to stdout without creating anything
    #[arg(long)]
    pub print: bool,

    /// Choose features with interactive prompts
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip the Go toolchain and tool check
    #[arg(long = "skip-tool-check")]
    pub skip_tool_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

/// One flag per Makefile toggle
#[derive(clap::Args, Debug, Default)]
pub struct FeatureFlags {
    /// Adds test to makefile
    #[arg(long)]
    pub test: bool,

    /// Adds bench to makefile
    #[arg(long)]
    pub bench: bool,

    /// Adds golint to makefile
    #[arg(long)]
    pub lint: bool,

    /// Adds shadow to makefile
    #[arg(long)]
    pub shadow: bool,

    /// Adds cover to makefile (requires --test)
    #[arg(long)]
    pub cover: bool,

    /// Adds cover HTML to makefile (requires --test)
    #[arg(long)]
    pub cover_html: bool,

    /// Adds race checking to makefile
    #[arg(long)]
    pub race: bool,

    /// Adds race checking tests to makefile
    #[arg(long)]
    pub test_race: bool,

    /// Adds CPU profiling to makefile
    #[arg(long)]
    pub cpu_profile: bool,

    /// Adds memory profiling to makefile
    #[arg(long)]
    pub mem_profile: bool,

    /// Creates a library makefile
    #[arg(long)]
    pub library: bool,
}

impl FeatureFlags {
    pub fn toggle_set(&self) -> ToggleSet {
        let mut toggles = ToggleSet::new();
        for (toggle, on) in [
            (Toggle::Test, self.test),
            (Toggle::Bench, self.bench),
            (Toggle::Lint, self.lint),
            (Toggle::Shadow, self.shadow),
            (Toggle::Cover, self.cover),
            (Toggle::CoverHtml, self.cover_html),
            (Toggle::Race, self.race),
            (Toggle::TestRace, self.test_race),
            (Toggle::CpuProfile, self.cpu_profile),
            (Toggle::MemProfile, self.mem_profile),
            (Toggle::Library, self.library),
        ] {
            toggles.set(toggle, on);
        }
        toggles
    }
}

/// Toggles, module path and Go version after merging flags with a preset
#[derive(Debug)]
struct Settings {
    toggles: ToggleSet,
    module_path: Option<String>,
    go_version: Option<String>,
}

impl Settings {
    fn from_args(args: &Args) -> Result<Self> {
        let preset = match &args.preset {
            Some(path) => Preset::load(path)?,
            None => Preset::default(),
        };

        Ok(Self {
            toggles: args.features.toggle_set().union(&preset.toggle_set()?),
            module_path: args.module.clone().or(preset.module),
            go_version: args.go_version.clone().or(preset.go_version),
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = MakerConfig;

    let args = match parse_args(&config, std::env::args_os()) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_USAGE as u8);
        }
    };

    let result = run(&config, args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::from(exit_code(&err) as u8)
        }
    }
}

/// Clap command with the product's description as its about text
fn command<C: ProductConfig>(config: &C) -> clap::Command {
    Args::command().about(config.cli_description())
}

fn parse_args<C, I, T>(config: &C, argv: I) -> Result<Args, clap::Error>
where
    C: ProductConfig,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(config).try_get_matches_from(argv)?;
    Args::from_arg_matches(&matches)
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ScaffoldError>()
        .map(ScaffoldError::exit_code)
        .unwrap_or(EXIT_SCAFFOLD_FAILURE)
}

async fn run(config: &MakerConfig, args: Args) -> Result<()> {
    let settings = Settings::from_args(&args)?;

    if args.print {
        print!("{}", compose(&settings.toggles));
        return Ok(());
    }

    if args.interactive {
        let create_args = CreateArgs {
            directory: args.directory,
            toggles: settings.toggles,
            module_path: settings.module_path,
            go_version: settings.go_version,
            skip_tool_check: args.skip_tool_check,
            yes: args.yes,
        };
        maker_core::run(config, create_args).await?;
        return Ok(());
    }

    let Some(directory) = args.directory else {
        let usage = format!("Expected use: {} [OPTIONS] DIRNAME", config.name());
        return Err(ScaffoldError::Usage(usage).into());
    };

    let mut request = ScaffoldRequest {
        directory,
        toggles: settings.toggles,
        module_path: settings.module_path,
        go_version: config.default_toolchain_version().to_string(),
    };
    // Only go.mod carries the version
    if request.module_path().is_some() {
        request.go_version = resolve_toolchain_version(config, settings.go_version.as_deref())?;
    }

    println!(
        "{}",
        format!("Creating {}...", request.directory.display())
            .cyan()
            .bold()
    );
    let report = scaffold(&request).await?;
    print_report(&report);

    if !args.skip_tool_check {
        let directive = request.module_path().map(|_| request.go_version.as_str());
        let toolchain = check_toolchain(&request.toggles, directive);
        if toolchain.is_clean() {
            println!("{} Go toolchain ready", "✓".green());
        }
        for warning in toolchain.warnings {
            eprintln!("{} {}", "Warning:".yellow(), warning);
        }
    }

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in config
        .next_steps(&report.directory, &request.toggles)
        .iter()
        .enumerate()
    {
        println!("  {}.  {}", i + 1, step);
    }

    Ok(())
}

fn print_report(report: &ScaffoldReport) {
    for file in &report.files {
        println!("  {} {}", "->".blue(), file);
    }
    println!(
        "{} {} file(s) in {}",
        "Created".green().bold(),
        report.files.len(),
        report.directory.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_toggles() {
        let args = parse_args(&MakerConfig, ["maker", "--test", "--cover-html", "--library", "demo"])
            .unwrap();
        let toggles = args.features.toggle_set();
        assert_eq!(
            toggles.enabled(),
            vec![Toggle::Test, Toggle::CoverHtml, Toggle::Library]
        );
        assert_eq!(args.directory, Some(PathBuf::from("demo")));
    }

    #[test]
    fn test_every_toggle_has_a_flag() {
        for toggle in Toggle::ALL {
            let flag = format!("--{}", toggle.name());
            let args = parse_args(&MakerConfig, ["maker", flag.as_str(), "demo"]).unwrap();
            assert_eq!(args.features.toggle_set().enabled(), vec![toggle]);
        }
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        assert!(parse_args(&MakerConfig, ["maker", "a", "b"]).is_err());
    }

    #[test]
    fn test_mod_flag() {
        let args = parse_args(&MakerConfig, ["maker", "--mod", "github.com/u/p", "demo"]).unwrap();
        assert_eq!(args.module.as_deref(), Some("github.com/u/p"));
    }

    #[test]
    fn test_settings_without_preset_use_flags() {
        let args = parse_args(&MakerConfig, ["maker", "--bench", "--go-version", "1.21", "demo"])
            .unwrap();
        let settings = Settings::from_args(&args).unwrap();
        assert_eq!(settings.toggles.enabled(), vec![Toggle::Bench]);
        assert_eq!(settings.go_version.as_deref(), Some("1.21"));
        assert!(settings.module_path.is_none());
    }

    #[test]
    fn test_preset_merges_with_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.yaml");
        std::fs::write(&path, "toggles: [lint]\nmodule: github.com/p/p\ngo_version: \"1.20\"\n")
            .unwrap();

        let args = parse_args(&MakerConfig, [
            "maker",
            "--test",
            "--go-version",
            "1.22",
            "--preset",
            path.to_str().unwrap(),
            "demo",
        ])
        .unwrap();
        let settings = Settings::from_args(&args).unwrap();

        assert_eq!(settings.toggles.enabled(), vec![Toggle::Test, Toggle::Lint]);
        assert_eq!(settings.module_path.as_deref(), Some("github.com/p/p"));
        assert_eq!(settings.go_version.as_deref(), Some("1.22"));
    }

    #[test]
    fn test_about_text_comes_from_config() {
        let about = command(&MakerConfig).get_about().map(|a| a.to_string());
        assert_eq!(about.as_deref(), Some(MakerConfig.cli_description()));
    }

    #[tokio::test]
    async fn test_go_version_is_ignored_without_module_path() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("demo");
        let args = parse_args(
            &MakerConfig,
            [
                "maker",
                "--skip-tool-check",
                "--go-version",
                "not-a-version",
                dir.to_str().unwrap(),
            ],
        )
        .unwrap();

        run(&MakerConfig, args).await.unwrap();
        assert!(dir.join("Makefile").exists());
        assert!(!dir.join("go.mod").exists());
    }

    #[tokio::test]
    async fn test_invalid_go_version_with_module_path_creates_nothing() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("demo");
        let args = parse_args(
            &MakerConfig,
            [
                "maker",
                "--skip-tool-check",
                "--mod",
                "github.com/u/demo",
                "--go-version",
                "not-a-version",
                dir.to_str().unwrap(),
            ],
        )
        .unwrap();

        let err = run(&MakerConfig, args).await.unwrap_err();
        assert_eq!(exit_code(&err), EXIT_USAGE);
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::InvalidToolchainVersion { .. })
        ));
        assert!(!dir.exists());
    }

    #[test]
    fn test_unknown_preset_toggle_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.yaml");
        std::fs::write(&path, "toggles: [test, coverage]\n").unwrap();

        let args = parse_args(
            &MakerConfig,
            ["maker", "--preset", path.to_str().unwrap(), "demo"],
        )
        .unwrap();
        let err = Settings::from_args(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::UnknownToggle(name)) if name == "coverage"
        ));
        assert_eq!(exit_code(&err), EXIT_USAGE);
    }

    #[test]
    fn test_usage_error_exit_code() {
        let err: anyhow::Error = ScaffoldError::Usage("usage".to_string()).into();
        assert_eq!(exit_code(&err), EXIT_USAGE);
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code(&err), EXIT_SCAFFOLD_FAILURE);
    }
}
