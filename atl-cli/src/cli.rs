// Command-line definition for atl.
//
// Kept free of crate imports so build.rs can include it to generate shell completions.

use clap::{Arg, ArgAction, Command, ValueHint};

pub fn build_cli() -> Command {
    Command::new("atl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Minimal Atlassian Cloud CLI for Jira and Confluence")
        .long_about(
            "atl queries Jira issues and Confluence pages and creates Jira issues.\n\n\
            All results are JSON on stdout; errors are JSON on stderr with exit status 1.\n\n\
            Credentials come from the environment:\n  \
            ATL_CLI_SITE   Atlassian site, e.g. example.atlassian.net\n  \
            ATL_CLI_EMAIL  Account email\n  \
            ATL_CLI_TOKEN  API token\n\n\
            Examples:\n  \
            atl jira issue get PROJ-123                        # Issue with Markdown description\n  \
            atl jira issue create --project PROJ --type task --summary \"Fix login\"\n  \
            atl confluence page get 12345 --raw                # Page body as Markdown\n  \
            atl convert notes.md --to adf                      # Offline Markdown to ADF",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Log requests and responses to stderr (credentials are redacted)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an atl.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("jira")
                .about("Jira commands")
                .subcommand_required(true)
                .subcommand(
                    Command::new("issue")
                        .about("Work with Jira issues")
                        .subcommand_required(true)
                        .subcommand(
                            Command::new("get")
                                .about("Get a Jira issue by key")
                                .arg(
                                    Arg::new("key")
                                        .help("Issue key, e.g. PROJ-123")
                                        .required(true)
                                        .index(1)
                                        .value_hint(ValueHint::Other),
                                )
                                .arg(
                                    Arg::new("body-format")
                                        .long("body-format")
                                        .help("Description format (defaults to output.body_format)")
                                        .value_parser(["markdown", "text", "html"]),
                                )
                                .arg(
                                    Arg::new("raw")
                                        .long("raw")
                                        .help("Print only the description, without the JSON wrapper")
                                        .action(ArgAction::SetTrue),
                                ),
                        )
                        .subcommand(
                            Command::new("create")
                                .about("Create a Jira issue (story, subtask, task, or bug)")
                                .long_about(
                                    "Create a Jira issue.\n\n\
                                    The description is Markdown and is sent as an ADF document.\n\
                                    With --template, values come from the template's frontmatter and\n\
                                    body first; flags then override them.\n\n\
                                    Examples:\n  \
                                    atl jira issue create --project PROJ --type story --summary \"Search\"\n  \
                                    atl jira issue create --project PROJ --type subtask --parent PROJ-1 --summary \"Spike\"\n  \
                                    atl jira issue create --template spike.md --var feature=Search",
                                )
                                .arg(
                                    Arg::new("project")
                                        .long("project")
                                        .value_name("KEY")
                                        .help("Project key, e.g. PROJ"),
                                )
                                .arg(
                                    Arg::new("type")
                                        .long("type")
                                        .value_name("TYPE")
                                        .help("Issue type: story, subtask, task, bug"),
                                )
                                .arg(
                                    Arg::new("summary")
                                        .long("summary")
                                        .help("Issue summary"),
                                )
                                .arg(
                                    Arg::new("description")
                                        .long("description")
                                        .help("Issue description (Markdown)"),
                                )
                                .arg(
                                    Arg::new("parent")
                                        .long("parent")
                                        .value_name("KEY")
                                        .help("Parent issue key (required for subtask)"),
                                )
                                .arg(
                                    Arg::new("labels")
                                        .long("labels")
                                        .help("Comma-separated labels"),
                                )
                                .arg(
                                    Arg::new("template")
                                        .long("template")
                                        .value_name("PATH")
                                        .help("Path to an issue template")
                                        .value_hint(ValueHint::FilePath),
                                )
                                .arg(
                                    Arg::new("var")
                                        .long("var")
                                        .value_name("KEY=VALUE")
                                        .help("Template variable, repeatable")
                                        .action(ArgAction::Append),
                                ),
                        ),
                ),
        )
        .subcommand(
            Command::new("confluence")
                .about("Confluence commands")
                .subcommand_required(true)
                .subcommand(
                    Command::new("page")
                        .about("Work with Confluence pages")
                        .subcommand_required(true)
                        .subcommand(
                            Command::new("get")
                                .about("Get a Confluence page by ID")
                                .arg(
                                    Arg::new("id")
                                        .help("Numeric page ID")
                                        .required(true)
                                        .index(1)
                                        .value_hint(ValueHint::Other),
                                )
                                .arg(
                                    Arg::new("body-format")
                                        .long("body-format")
                                        .help("Body format (defaults to output.body_format)")
                                        .value_parser(["markdown", "storage"]),
                                )
                                .arg(
                                    Arg::new("raw")
                                        .long("raw")
                                        .help("Print only the body, without the JSON wrapper")
                                        .action(ArgAction::SetTrue),
                                ),
                        ),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check configuration and connectivity to Jira and Confluence"),
        )
        .subcommand(Command::new("version").about("Print version information as JSON"))
        .subcommand(
            Command::new("convert")
                .about("Convert rich text offline")
                .long_about(
                    "Convert documents between rich-text formats without contacting Atlassian.\n\n\
                    Formats:\n  \
                    - markdown: Markdown (.md)\n  \
                    - adf:      Atlassian Document Format JSON (.json, .adf)\n  \
                    - storage:  Confluence storage XHTML (.xhtml, .storage), read only\n  \
                    - html:     HTML (.html, .htm), read only\n\n\
                    The source format is auto-detected from the file extension; stdin ('-')\n\
                    is read as Markdown unless --from is given.\n\n\
                    Examples:\n  \
                    atl convert notes.md --to adf\n  \
                    atl convert page.xhtml --to markdown -o page.md\n  \
                    echo '# Title' | atl convert - --to adf",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_parser(["markdown", "adf", "storage", "html"]),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .required(true)
                        .value_parser(["markdown", "adf"]),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}
