use anyhow::{bail, Context};
use checkgate_cli::config::CliConfig;
use checkgate_cli::render;
use checkgate_cli::session::Session;
use checkgate_cli::{apply_checks, parse_node_ref};
use checkgate_core::{builtin, Checklist, ChecklistDocument, Summary};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("checkgate")
        .version(checkgate_core::VERSION)
        .about("Verify a requirement checklist before submission")
        .arg(
            Arg::new("spec")
                .long("spec")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Checklist document (.json, .yaml); built-in checklist when absent"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .global(true)
                .value_name("SECTION/NODE")
                .action(ArgAction::Append)
                .help("Mark a node checked before running the command (repeatable)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(Command::new("show").about("Print the checklist tree (default)"))
        .subcommand(Command::new("summary").about("Print progress, status and incomplete items"))
        .subcommand(
            Command::new("gate").about("Exit 0 when the checklist can be submitted, 1 otherwise"),
        )
        .subcommand(
            Command::new("validate").about("Report every structural defect in the document"),
        )
        .subcommand(Command::new("session").about("Check items interactively from stdin"))
}

fn load_config(args: &ArgMatches) -> anyhow::Result<CliConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => CliConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(CliConfig::default()),
    }
}

fn init_tracing(config: &CliConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("invalid log_filter '{}'", config.log_filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_document(args: &ArgMatches, config: &CliConfig) -> anyhow::Result<ChecklistDocument> {
    let path = args.get_one::<PathBuf>("spec").or(config.spec.as_ref());
    match path {
        Some(path) => ChecklistDocument::load(path)
            .with_context(|| format!("loading checklist {}", path.display())),
        None => builtin::ipt_rec_modal().context("loading built-in checklist"),
    }
}

fn prepare(args: &ArgMatches, doc: &ChecklistDocument) -> anyhow::Result<Checklist> {
    let checklist = doc.to_checklist().with_context(|| {
        format!("checklist '{}' is invalid (run `checkgate validate`)", doc.title)
    })?;

    let mut refs = Vec::new();
    for text in args.get_many::<String>("check").unwrap_or_default() {
        match parse_node_ref(text) {
            Some(node_ref) => refs.push(node_ref),
            None => bail!("--check expects SECTION/NODE, got '{text}'"),
        }
    }
    let (checklist, missing) = apply_checks(&checklist, refs);
    for (section, node) in missing {
        eprintln!("warning: no node '{node}' in section '{section}'");
    }
    Ok(checklist)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: &str, args: &ArgMatches, config: &CliConfig) -> anyhow::Result<ExitCode> {
    let doc = load_document(args, config)?;
    let as_json = args.get_flag("json");

    if command == "validate" {
        let defects = doc.diagnose();
        if as_json {
            let defects: Vec<String> = defects.iter().map(ToString::to_string).collect();
            print_json(&json!({
                "title": doc.title,
                "valid": defects.is_empty(),
                "defects": defects,
            }))?;
        } else if defects.is_empty() {
            println!("{}: ok", doc.title);
        } else {
            for defect in &defects {
                println!("{defect}");
            }
        }
        return Ok(if defects.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let checklist = prepare(args, &doc)?;
    let submit_url = config.submit_url.clone().or_else(|| doc.submit_url.clone());
    tracing::info!(
        title = %doc.title,
        sections = checklist.len(),
        nodes = checklist.totals().total,
        "checklist loaded"
    );

    let mut stdout = io::stdout().lock();
    match command {
        "summary" => {
            let summary = Summary::of(&checklist, config.thresholds());
            if as_json {
                print_json(&summary)?;
            } else {
                render::write_summary(&mut stdout, &summary)?;
            }
        }
        "gate" => {
            let state = checklist.gate_state();
            if as_json {
                let blocking: Vec<_> = checklist
                    .blocking_items()
                    .iter()
                    .map(|item| json!({ "section": item.section_id, "node": item.node.id() }))
                    .collect();
                let target = submit_url.as_deref().and_then(|url| checklist.submission_target(url));
                print_json(&json!({ "gate": state, "blocking": blocking, "submit_url": target }))?;
            } else {
                render::write_gate(&mut stdout, &checklist)?;
                let target = submit_url
                    .as_deref()
                    .and_then(|url| checklist.submission_target(url));
                if let Some(url) = target {
                    writeln!(stdout, "submit at: {url}")?;
                }
            }
            return Ok(if state.is_ready() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        "session" => {
            writeln!(stdout, "{}", doc.title)?;
            writeln!(stdout, "type 'help' for commands")?;
            let mut session = Session::new(checklist, config.thresholds(), submit_url);
            session.run(io::stdin().lock(), &mut stdout)?;
        }
        _ => {
            if as_json {
                let current = ChecklistDocument {
                    sections: checklist.sections().iter().cloned().collect(),
                    ..doc
                };
                print_json(&current)?;
            } else {
                writeln!(stdout, "{}", doc.title)?;
                if let Some(description) = &doc.description {
                    writeln!(stdout, "{}", description.trim_end())?;
                }
                writeln!(stdout)?;
                render::write_tree(&mut stdout, &checklist)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let matches = cli().get_matches();
    let (command, args) = matches.subcommand().unwrap_or(("show", &matches));

    let config = load_config(args)?;
    init_tracing(&config)?;

    run(command, args, &config)
}
