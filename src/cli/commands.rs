//! Command implementations

use std::path::PathBuf;
use tracing::{debug, info};

use super::args::{Action, Args};
use crate::builders::{Builder, NodeJsBuilder};
use crate::config::{load_config, CliArgs, DEFAULT_CONFIG_FILE};
use crate::error::{BuildError, ErrorSeverity, Result};
use crate::models::config::Settings;
use crate::models::module::Module;
use crate::models::report::AnalysisReport;
use crate::models::toolchain::ToolchainOverrides;
use crate::output::{create_formatter, create_writer, ReportView, Spinner};
use crate::utils::logging::{init_logging, LoggingConfig};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Run an action against a module
    Run(Args),
    /// Write a default configuration file
    Init(PathBuf),
}

impl Command {
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init(PathBuf::from(DEFAULT_CONFIG_FILE));
        }
        Command::Run(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Run(args) => {
                let settings = load_config(CliArgs::from_args(args))?;
                init_logging(LoggingConfig::from_settings(&settings));
                debug!(?settings, "Loaded settings");

                let mut builder = builder_for(&settings)?;
                let (report, view) = perform(args.action, &settings, &mut builder)?;

                let formatter = create_formatter(&settings.output_format, settings.use_colors, settings.quiet);
                let content = formatter.format(&report, view)?;
                create_writer(settings.output_file.as_ref()).write(&content)?;

                if let Some(path) = &settings.output_file {
                    info!(path = %path.display(), "Report written");
                }
                Ok(())
            }
            Command::Init(path) => {
                if path.exists() {
                    println!("Configuration file already exists at: {}", path.display());
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(());
                }

                crate::config::parser::create_default_config(path)?;
                println!("Created default configuration file at: {}", path.display());
                println!("Every setting is commented out; uncomment the ones you want to change.");
                Ok(())
            }
        }
    }

    /// Run the command, print any error, and return the exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                report_error(&err);
                exit_code(&err)
            }
        }
    }
}

/// Print an error and its suggestion to stderr
pub fn report_error(err: &BuildError) {
    eprintln!("{}: {}", err.severity(), err.user_message());
    if let Some(suggestion) = err.suggestion() {
        eprintln!("Suggestion: {}", suggestion);
    }
}

/// Exit code for an error: 1 for failures, 2 for critical problems
pub fn exit_code(err: &BuildError) -> i32 {
    match err.severity() {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

/// Node.js builder configured from settings
///
/// Overrides in the environment win over configured ones.
pub fn builder_for(settings: &Settings) -> Result<NodeJsBuilder> {
    let overrides = ToolchainOverrides::from_env().or(settings.toolchain_overrides());
    let builder = NodeJsBuilder::new().with_overrides(overrides);
    match settings.threads {
        Some(threads) => builder.with_threads(threads),
        None => Ok(builder),
    }
}

/// Run `action` on the module at `settings.module_path`
///
/// Returns the report and the part of it the action asked for.
pub fn perform(
    action: Action,
    settings: &Settings,
    builder: &mut dyn Builder,
) -> Result<(AnalysisReport, ReportView)> {
    let module = Module::from_dir(&settings.module_path);
    let spinners = settings.show_progress && !settings.quiet;

    match action {
        Action::Status => {
            let built = builder.is_built(&module, settings.allow_unresolved)?;
            Ok((AnalysisReport::new(&module, built, Vec::new()), ReportView::Status))
        }
        Action::Toolchains => {
            builder.initialize()?;
            let built = builder.is_built(&module, settings.allow_unresolved)?;
            Ok((
                AnalysisReport::new(&module, built, builder.toolchains()),
                ReportView::Toolchains,
            ))
        }
        Action::Build => {
            builder.initialize()?;
            install(builder, &module, settings.force, spinners)?;
            let built = builder.is_built(&module, settings.allow_unresolved)?;
            Ok((
                AnalysisReport::new(&module, built, builder.toolchains()),
                ReportView::Status,
            ))
        }
        Action::Analyze => {
            let mut built = builder.is_built(&module, settings.allow_unresolved)?;

            if !built && settings.auto_build {
                info!(module = %module.name, "Module is not built; building first");
                builder.initialize()?;
                install(builder, &module, settings.force, spinners)?;
                built = builder.is_built(&module, settings.allow_unresolved)?;
            }

            if !built && !settings.allow_unresolved {
                return Err(BuildError::NotBuilt {
                    path: module.dir.clone(),
                });
            }

            let spinner = Spinner::new(spinners, "Reading installed packages");
            let dependencies = builder.analyze(&module, settings.allow_unresolved)?;
            spinner.clear();

            let report = AnalysisReport::new(&module, built, builder.toolchains())
                .with_dependencies(&dependencies);
            Ok((report, ReportView::Dependencies))
        }
    }
}

fn install(builder: &dyn Builder, module: &Module, force: bool, spinners: bool) -> Result<()> {
    let spinner = Spinner::new(spinners, &format!("Installing dependencies of {}", module.name));
    let result = builder.build(module, force);
    match &result {
        Ok(()) => spinner.finish(&format!("Installed dependencies of {}", module.name)),
        Err(_) => spinner.clear(),
    }
    result
}
