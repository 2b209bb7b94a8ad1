//! Charm-style CLI prompts using cliclack

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::runtime::{check, tool};
use crate::scaffold::{self, ScaffoldReport, ScaffoldRequest};
use crate::toggles::{Toggle, ToggleSet};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Arguments for an interactive create
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create; prompted for when absent
    pub directory: Option<PathBuf>,

    /// Toggles pre-selected in the multiselect
    pub toggles: ToggleSet,

    /// Module path for `go.mod`; prompted for when absent
    pub module_path: Option<String>,

    /// Explicit Go version for `go.mod`
    pub go_version: Option<String>,

    /// Skip the Go/tool installation check
    pub skip_tool_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<ScaffoldReport> {
    cliclack::intro(config.display_name())?;

    // Step 1: Select directory
    let project_dir = select_directory(config, &args)?;

    // Step 2: Select toggles
    let toggles = select_toggles(&args)?;

    // Step 3: Module path and Go version
    let module_path = select_module_path(&args)?;

    let mut request = ScaffoldRequest {
        directory: project_dir,
        toggles,
        module_path,
        go_version: config.default_toolchain_version().to_string(),
    };
    if request.module_path().is_some() {
        request.go_version =
            scaffold::resolve_toolchain_version(config, args.go_version.as_deref())?;
    }

    // Step 4: Create project
    let report = create_project(&request).await?;

    // Step 5: Check toolchain
    if args.skip_tool_check {
        cliclack::log::info("Skipping tool check")?;
    } else {
        handle_tool_check(&request, &args).await?;
    }

    // Step 6: Show next steps
    print_next_steps(config, &report.directory, &request.toggles)?;

    Ok(report)
}

fn select_directory<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = if let Some(dir) = &args.directory {
        cliclack::log::info(format!("Using directory: {}", dir.display()))?;
        dir.clone()
    } else if args.yes {
        let usage = format!("Expected use: {} --yes [OPTIONS] DIRNAME", config.name());
        return Err(ScaffoldError::Usage(usage).into());
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder("my-project")
            .validate(|input: &String| {
                if input.trim().is_empty() {
                    Err("Please enter a directory name")
                } else {
                    Ok(())
                }
            })
            .interact()?;
        PathBuf::from(input.trim())
    };

    let absolute = if path.is_absolute() {
        path.clone()
    } else {
        current_dir.join(&path)
    };

    if absolute.exists() {
        return Err(ScaffoldError::DirectoryExists(absolute).into());
    }

    Ok(path)
}

fn select_toggles(args: &CreateArgs) -> Result<ToggleSet> {
    if args.yes {
        log_toggles(&args.toggles)?;
        return Ok(args.toggles);
    }

    let mut multi = cliclack::multiselect("Select Makefile features");
    for toggle in Toggle::ALL {
        multi = multi.item(toggle, toggle.name(), toggle.description());
    }

    let selected: Vec<Toggle> = multi
        .initial_values(args.toggles.enabled())
        .required(false)
        .interact()?;

    let toggles: ToggleSet = selected.into_iter().collect();
    warn_soft_dependencies(&toggles)?;
    log_toggles(&toggles)?;
    Ok(toggles)
}

/// Coverage targets are dropped silently by the composer; say so here
fn warn_soft_dependencies(toggles: &ToggleSet) -> Result<()> {
    if toggles.is_on(Toggle::Test) {
        return Ok(());
    }
    for toggle in [Toggle::Cover, Toggle::CoverHtml] {
        if toggles.is_on(toggle) {
            cliclack::log::warning(format!("{} has no effect without test", toggle))?;
        }
    }
    Ok(())
}

fn log_toggles(toggles: &ToggleSet) -> Result<()> {
    let names: Vec<&str> = toggles.enabled().iter().map(|t| t.name()).collect();
    if names.is_empty() {
        cliclack::log::info("Features: none")?;
    } else {
        cliclack::log::success(format!("Features: {}", names.join(", ")))?;
    }
    Ok(())
}

fn select_module_path(args: &CreateArgs) -> Result<Option<String>> {
    if args.module_path.is_some() || args.yes {
        return Ok(args.module_path.clone());
    }

    let input: String = cliclack::input("Module path (leave empty to skip go.mod)")
        .placeholder("github.com/user/project")
        .required(false)
        .interact()?;

    let trimmed = input.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

async fn create_project(request: &ScaffoldRequest) -> Result<ScaffoldReport> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match scaffold::scaffold(request).await {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files.len(),
                report.directory.display()
            ));
            Ok(report)
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            Err(e.into())
        }
    }
}

async fn handle_tool_check(request: &ScaffoldRequest, args: &CreateArgs) -> Result<()> {
    let directive = request
        .module_path()
        .map(|_| request.go_version.as_str());
    let report = check::check_toolchain(&request.toggles, directive);

    for runtime in report.runtimes.iter().filter(|r| r.available) {
        let version = runtime.version.as_deref().unwrap_or("unknown");
        cliclack::log::success(format!("{} installed ({})", runtime.name, version))?;
    }
    for warning in &report.warnings {
        cliclack::log::warning(warning)?;
    }

    let go_available = report.runtimes.iter().any(|r| r.name == "Go" && r.available);
    let missing: Vec<tool::ToolManager> = tool::required_tools(&request.toggles)
        .into_iter()
        .filter(|t| !t.is_installed())
        .collect();

    // Installing needs go itself and a user to ask
    if missing.is_empty() || !go_available || args.yes {
        return Ok(());
    }

    for tool in missing {
        let install: bool = cliclack::confirm(format!(
            "Install {} now? ({})",
            tool.config().display_name,
            tool.install_command()
        ))
        .initial_value(true)
        .interact()?;

        if !install {
            cliclack::log::info(format!(
                "Continuing without {}. Install it later with: {}",
                tool.config().display_name,
                tool.install_command()
            ))?;
            continue;
        }

        match tool.install().await {
            Ok(()) => cliclack::log::success(format!(
                "{} installed successfully",
                tool.config().display_name
            ))?,
            Err(e) => cliclack::log::error(format!("{}", e))?,
        }
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    toggles: &ToggleSet,
) -> Result<()> {
    let steps = config.next_steps(project_dir, toggles);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}
