//! Command-line definition and argument decoding

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use team_client::backend::QUERY_DATE_FORMAT;
use team_client::{DateRange, SessionToken};
use team_hierarchy::{Leg, LevelFilter, Viewer};

/// Environment variable holding the session token when `--token` is absent
pub(crate) const ENV_SESSION_TOKEN: &str = "PAMM_SESSION_TOKEN";

/// What to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Tree { expand_all: bool, json: bool },
    Table { page: usize },
    Legs { range: DateRange },
}

/// Decoded invocation
#[derive(Debug)]
pub(crate) struct Options {
    pub(crate) config: Option<PathBuf>,
    pub(crate) session: Option<SessionToken>,
    pub(crate) viewer: Viewer,
    pub(crate) leg: Leg,
    pub(crate) search: String,
    pub(crate) level: LevelFilter,
    pub(crate) verbose: bool,
    pub(crate) json_logs: bool,
    pub(crate) action: Action,
}

fn filter_args() -> [Arg; 2] {
    [
        Arg::new("search")
            .long("search")
            .short('s')
            .default_value("")
            .help("Case-insensitive name filter"),
        Arg::new("level")
            .long("level")
            .default_value("all")
            .help("Show only members at this depth ('all' or a number)"),
    ]
}

fn date_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("YYYY-MM-DD")
        .value_parser(|s: &str| NaiveDate::parse_from_str(s, QUERY_DATE_FORMAT))
        .help(help)
}

pub(crate) fn command() -> Command {
    Command::new("pamm-team")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Team hierarchy view for the PAMM investor dashboard")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML config file"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .global(true)
                .help("Session token (falls back to PAMM_SESSION_TOKEN)"),
        )
        .arg(
            Arg::new("leg")
                .long("leg")
                .short('l')
                .global(true)
                .default_value("all")
                .help("Leg tab: all, a or b"),
        )
        .arg(
            Arg::new("viewer-id")
                .long("viewer-id")
                .global(true)
                .default_value("self")
                .help("Identifier shown on the root node"),
        )
        .arg(
            Arg::new("viewer-name")
                .long("viewer-name")
                .global(true)
                .default_value("me")
                .help("Name shown on the root node"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the referral tree")
                .args(filter_args())
                .arg(
                    Arg::new("expand-all")
                        .long("expand-all")
                        .action(ArgAction::SetTrue)
                        .help("Expand every member instead of only the root"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the filtered tree as JSON"),
                ),
        )
        .subcommand(
            Command::new("table")
                .about("Print one page of the flattened member table")
                .args(filter_args())
                .arg(
                    Arg::new("page")
                        .long("page")
                        .short('p')
                        .default_value("1")
                        .value_parser(value_parser!(usize))
                        .help("1-based page"),
                ),
        )
        .subcommand(
            Command::new("legs")
                .about("Print leg business with top performers marked")
                .arg(date_arg("from", "Start date"))
                .arg(date_arg("to", "End date")),
        )
}

fn text<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches.get_one::<String>(id).map_or("", String::as_str)
}

pub(crate) fn parse(matches: &ArgMatches) -> Result<Options> {
    let leg: Leg = text(matches, "leg").parse().context("invalid --leg")?;
    let session = matches
        .get_one::<String>("token")
        .cloned()
        .and_then(SessionToken::new)
        .or_else(|| SessionToken::from_env(ENV_SESSION_TOKEN));
    let viewer = Viewer::new(text(matches, "viewer-id"), text(matches, "viewer-name"));

    let (name, sub) = matches.subcommand().context("missing subcommand")?;
    let (search, level) = if name == "legs" {
        (String::new(), LevelFilter::All)
    } else {
        let level: LevelFilter = text(sub, "level").parse().context("invalid --level")?;
        (text(sub, "search").to_string(), level)
    };

    let action = match name {
        "tree" => Action::Tree {
            expand_all: sub.get_flag("expand-all"),
            json: sub.get_flag("json"),
        },
        "table" => Action::Table {
            page: sub.get_one::<usize>("page").copied().unwrap_or(1),
        },
        "legs" => Action::Legs {
            range: DateRange::new(
                sub.get_one::<NaiveDate>("from").copied(),
                sub.get_one::<NaiveDate>("to").copied(),
            )?,
        },
        other => anyhow::bail!("unknown subcommand '{other}'"),
    };

    Ok(Options {
        config: matches.get_one::<PathBuf>("config").cloned(),
        session,
        viewer,
        leg,
        search,
        level,
        verbose: matches.get_flag("verbose"),
        json_logs: matches.get_flag("json-logs"),
        action,
    })
}
