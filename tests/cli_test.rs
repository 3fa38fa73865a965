//! Tests for CLI parsing and command execution

use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use btxml::cli::commands::{execute_command, render_document};
use btxml::cli::{Cli, CliError, Commands};
use btxml::config::{OutputFormat, Settings};
use btxml::exitcode;
use btxml::infrastructure::di::ServiceContainer;
use btxml::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn container(settings: Settings) -> ServiceContainer {
    ServiceContainer::new(settings)
}

#[test]
fn given_export_args_when_parsing_then_reads_format_and_output() {
    let cli = Cli::try_parse_from([
        "btxml", "-dd", "export", "tree.xml", "--format", "toml", "-o", "out.toml",
    ])
    .unwrap();

    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Export {
            file,
            format,
            output,
        }) => {
            assert_eq!(file, PathBuf::from("tree.xml"));
            assert_eq!(format, Some(OutputFormat::Toml));
            assert_eq!(output, Some(PathBuf::from("out.toml")));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_fixture_when_exporting_to_file_then_writes_json() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("patrol.json");
    let cli = Cli::try_parse_from([
        "btxml",
        "export",
        "tests/resources/patrol.xml",
        "-o",
        target.to_str().unwrap(),
    ])
    .unwrap();

    // Act
    execute_command(&cli, &container(Settings::default())).unwrap();

    // Assert
    let written = std::fs::read_to_string(&target).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["trees"].as_array().unwrap().len(), 2);
    assert_eq!(json["trees"][0]["id"], "Patrol");
}

#[test]
fn given_document_when_rendering_toml_then_contains_tree_ids() {
    let service = container(Settings::default());
    let xml = r#"<Root><BehaviorTree ID="Main"><Control ID="Seq"><Action name="go" speed="5"/></Control></BehaviorTree></Root>"#;
    let doc = service.document_service.parse_str(xml).unwrap();

    let rendered = render_document(&doc, OutputFormat::Toml).unwrap();

    assert!(rendered.contains("Main"));
    assert!(rendered.contains("speed"));
}

#[test]
fn given_lint_issues_and_deny_warnings_when_checking_then_fails_with_dataerr() {
    // Arrange
    let mut settings = Settings::default();
    settings.lint.deny_warnings = true;
    let cli = Cli::try_parse_from(["btxml", "check", "tests/resources/lint_issues.xml"]).unwrap();

    // Act
    let err = execute_command(&cli, &container(settings)).unwrap_err();

    // Assert
    assert!(matches!(err, CliError::LintFailed(3)));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_lint_issues_without_deny_when_checking_then_succeeds() {
    let cli = Cli::try_parse_from(["btxml", "check", "tests/resources/lint_issues.xml"]).unwrap();
    assert!(execute_command(&cli, &container(Settings::default())).is_ok());
}

#[test]
fn given_missing_file_when_running_tree_then_noinput_exit_code() {
    let cli = Cli::try_parse_from(["btxml", "tree", "tests/resources/nope.xml"]).unwrap();

    let err = execute_command(&cli, &container(Settings::default())).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_no_command_when_executing_then_usage_error() {
    let cli = Cli::try_parse_from(["btxml"]).unwrap();

    let err = execute_command(&cli, &container(Settings::default())).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}
