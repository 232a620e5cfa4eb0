// Command-line interface for atl
//
// atl is a small, agent-friendly client for Atlassian Cloud. Every command prints JSON to
// stdout; every failure prints the JSON error envelope to stderr and exits with status 1.
//
// Usage:
//  atl jira issue get <KEY> [--body-format markdown|text|html] [--raw]
//  atl jira issue create --project <KEY> --type <TYPE> --summary <TEXT> [...]
//  atl confluence page get <ID> [--body-format markdown|storage] [--raw]
//  atl doctor                                    - Check credentials and connectivity
//  atl version                                   - Print version information
//  atl convert <input> --to <format> [--from <format>] [--output <file>]
//
// Configuration is layered: built-in defaults, ./atl.toml, --config <path>, then the
// ATL_CLI_* environment variables. Only commands that talk to Atlassian require credentials.

use atl_babel::FormatRegistry;
use atl_cli::cli::build_cli;
use atl_cli::confluence::{ConfluenceClient, PageFormat};
use atl_cli::doctor;
use atl_cli::error::ApiError;
use atl_cli::http::HttpGateway;
use atl_cli::jira::{split_labels, DescriptionFormat, IssueDraft, JiraClient};
use atl_cli::output::{print_json, print_raw, report_error};
use atl_cli::template::{parse_var_flags, Template};
use atl_cli::version;
use atl_config::{AtlConfig, Loader};
use clap::ArgMatches;
use std::fs;
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("debug"));

    let code = match dispatch(&matches) {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            report_error(&err);
            1
        }
    };
    std::process::exit(code);
}

/// Logs go to stderr. `--debug` turns on debug output for the atl crates; otherwise
/// `RUST_LOG` applies, falling back to warnings only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("atl_cli=debug,atl_babel=debug,atl_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the selected command and return the process exit code.
fn dispatch(matches: &ArgMatches) -> Result<i32, ApiError> {
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());

    match matches.subcommand() {
        Some(("version", _)) => {
            print_json(&version::current(), true)?;
            Ok(0)
        }
        Some(("convert", sub_matches)) => {
            handle_convert_command(sub_matches)?;
            Ok(0)
        }
        Some(("doctor", _)) => {
            let config = load_cli_config(config_path)?;
            handle_doctor_command(&config)
        }
        Some(("jira", jira)) => {
            let config = load_cli_config(config_path)?;
            match jira.subcommand() {
                Some(("issue", issue)) => match issue.subcommand() {
                    Some(("get", sub_matches)) => handle_issue_get_command(&config, sub_matches)?,
                    Some(("create", sub_matches)) => {
                        handle_issue_create_command(&config, sub_matches)?
                    }
                    _ => return Err(unknown_subcommand()),
                },
                _ => return Err(unknown_subcommand()),
            }
            Ok(0)
        }
        Some(("confluence", confluence)) => {
            let config = load_cli_config(config_path)?;
            match confluence.subcommand() {
                Some(("page", page)) => match page.subcommand() {
                    Some(("get", sub_matches)) => handle_page_get_command(&config, sub_matches)?,
                    _ => return Err(unknown_subcommand()),
                },
                _ => return Err(unknown_subcommand()),
            }
            Ok(0)
        }
        _ => Err(unknown_subcommand()),
    }
}

fn unknown_subcommand() -> ApiError {
    ApiError::validation("Unknown subcommand. Use --help for usage information.")
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<AtlConfig, ApiError> {
    let loader = Loader::new().with_optional_file("atl.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let config = loader.with_env().build()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, ApiError> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| ApiError::validation(format!("<{name}> is required")))
}

fn optional(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

/// The `--body-format` flag wins; otherwise `output.body_format` from the config is used
/// when the command understands it, and Markdown when it does not.
fn body_format<F>(matches: &ArgMatches, config: &AtlConfig) -> Result<F, ApiError>
where
    F: FromStr<Err = ApiError> + Default,
{
    match matches.get_one::<String>("body-format") {
        Some(flag) => flag.parse(),
        None => Ok(config.output.body_format.parse().unwrap_or_default()),
    }
}

fn handle_issue_get_command(config: &AtlConfig, matches: &ArgMatches) -> Result<(), ApiError> {
    config.validate()?;
    let key = required(matches, "key")?;
    let format: DescriptionFormat = body_format(matches, config)?;

    let client = JiraClient::new(
        HttpGateway::from_config(config)?,
        config.base_url(),
        config.site_host(),
    );
    let issue = client.get_issue(key, format)?;

    if matches.get_flag("raw") {
        print_raw(&issue.description);
        Ok(())
    } else {
        print_json(&issue, config.output.pretty)
    }
}

fn handle_issue_create_command(config: &AtlConfig, matches: &ArgMatches) -> Result<(), ApiError> {
    config.validate()?;

    let mut draft = IssueDraft::default();
    if let Some(path) = matches.get_one::<String>("template") {
        let template = Template::load(path)?;
        let raw_vars: Vec<&String> = matches
            .get_many::<String>("var")
            .map(|values| values.collect())
            .unwrap_or_default();
        let vars = parse_var_flags(&raw_vars)?;
        draft = IssueDraft::from_template(template.apply(&vars));
    }

    let flags = IssueDraft {
        project: optional(matches, "project"),
        issue_type: optional(matches, "type"),
        summary: optional(matches, "summary"),
        description: optional(matches, "description"),
        parent: optional(matches, "parent"),
        labels: matches
            .get_one::<String>("labels")
            .filter(|raw| !raw.is_empty())
            .map(|raw| split_labels(raw))
            .unwrap_or_default(),
    };
    let request = draft.override_with(flags).into_request()?;

    let client = JiraClient::new(
        HttpGateway::from_config(config)?,
        config.base_url(),
        config.site_host(),
    );
    let created = client.create_issue(&request)?;
    print_json(&created, config.output.pretty)
}

fn handle_page_get_command(config: &AtlConfig, matches: &ArgMatches) -> Result<(), ApiError> {
    config.validate()?;
    let id = required(matches, "id")?;
    let format: PageFormat = body_format(matches, config)?;

    let client = ConfluenceClient::new(HttpGateway::from_config(config)?, config.base_url());
    let page = client.get_page(id, format)?;

    if matches.get_flag("raw") {
        print_raw(&page.body);
        Ok(())
    } else {
        print_json(&page, config.output.pretty)
    }
}

fn handle_doctor_command(config: &AtlConfig) -> Result<i32, ApiError> {
    let report = doctor::run(config, || HttpGateway::from_config(config));
    print_json(&report, config.output.pretty)?;
    Ok(if report.is_ok() { 0 } else { 1 })
}

fn handle_convert_command(matches: &ArgMatches) -> Result<(), ApiError> {
    let input = required(matches, "input")?;
    let to = required(matches, "to")?;
    let registry = FormatRegistry::default();

    // Auto-detect --from if not provided
    let from = match matches.get_one::<String>("from") {
        Some(from) => from.to_string(),
        None if input == "-" => "markdown".to_string(),
        None => registry.detect_format_from_filename(input).ok_or_else(|| {
            ApiError::validation(format!(
                "could not detect format from filename '{input}'; specify --from explicitly"
            ))
        })?,
    };

    let source = read_input(input)?;
    let converted = registry.convert(&source, &from, to)?;

    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, converted).map_err(|err| {
            ApiError::unknown(format!("failed to write '{path}': {err}"))
        }),
        None => {
            print_raw(&converted);
            Ok(())
        }
    }
}

fn read_input(input: &str) -> Result<String, ApiError> {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    fs::read_to_string(input)
        .map_err(|err| ApiError::validation(format!("failed to read '{input}': {err}")))
}
