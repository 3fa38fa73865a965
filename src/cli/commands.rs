//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::render::format_catalog;
use crate::application::TreeRender;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, OutputFormat, Settings};
use crate::domain::BehaviorTreeDocument;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { file, no_params }) => _tree(container, file, !no_params),
        Some(Commands::Catalog { file, all }) => _catalog(container, file, *all),
        Some(Commands::Check { file }) => _check(container, file),
        Some(Commands::Export {
            file,
            format,
            output,
        }) => _export(
            container,
            file,
            format.unwrap_or(container.settings.format),
            output.as_deref(),
        ),
        Some(Commands::Config { command }) => _config(container, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `btxml --help`".to_string(),
        )),
    }
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, file: &Path, show_params: bool) -> CliResult<()> {
    let document = container.document_service.load(file)?;
    let show_params = show_params && container.settings.show_parameters;
    for tree in &document.trees {
        if let Some(id) = &tree.id {
            output::header(id);
        }
        output::info(&tree.root.to_tree_string(show_params));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _catalog(container: &ServiceContainer, file: &Path, all: bool) -> CliResult<()> {
    let document = container.document_service.load(file)?;
    let include_actions = all || container.settings.list_actions;
    let lines = format_catalog(&document.catalog, include_actions);
    debug!(
        "{} of {} models listed",
        lines.len(),
        document.catalog.len()
    );
    for line in lines {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let report = container.document_service.check(file)?;
    let nodes: usize = report
        .document
        .trees
        .iter()
        .map(|t| t.root.node_count())
        .sum();

    if report.is_clean() {
        output::success(&format!(
            "{}: {} tree(s), {} node(s), {} model(s)",
            file.display(),
            report.document.trees.len(),
            nodes,
            report.document.catalog.len()
        ));
        return Ok(());
    }

    output::warning(&format!(
        "{}: {} parameter issue(s)",
        file.display(),
        report.issues.len()
    ));
    for issue in &report.issues {
        output::failure(issue);
    }
    if container.settings.lint.deny_warnings {
        return Err(CliError::LintFailed(report.issues.len()));
    }
    Ok(())
}

/// Serialize a parsed document in the requested format.
pub fn render_document(
    document: &BehaviorTreeDocument,
    format: OutputFormat,
) -> Result<String, InfraError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(document).map_err(InfraError::serialize),
        OutputFormat::Toml => toml::to_string_pretty(document).map_err(InfraError::serialize),
    }
}

#[instrument(skip(container))]
fn _export(
    container: &ServiceContainer,
    file: &Path,
    format: OutputFormat,
    target: Option<&Path>,
) -> CliResult<()> {
    let document = container.document_service.load(file)?;
    let rendered = render_document(&document, format)?;
    match target {
        Some(path) => {
            container
                .fs
                .ensure_parent(path)
                .and_then(|_| container.fs.write(path, &rendered))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Exported", &path.display());
        }
        None => output::info(&rendered),
    }
    Ok(())
}

fn _config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if container.fs.exists(&path) {
                    "exists"
                } else {
                    "not found"
                };
                output::detail(&format!("global: {} ({})", path.display(), state));
            }
            None => output::warning("no config directory available on this platform"),
        },
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("no config directory available on this platform".to_string())
            })?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
