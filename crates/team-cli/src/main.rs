//! `pamm-team` - print a viewer's referral tree, member table or leg business

mod cli;

use anyhow::{bail, Context, Result};
use cli::{Action, Options};
use std::path::Path;
use team_client::{ClientConfig, HierarchyCache, HierarchyFetcher, HttpBackend};
use team_view::{render_legs, render_table, render_tree, ApplyOutcome, TeamDashboard};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let config = match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    Ok(config.apply_env())
}

async fn run(opts: Options) -> Result<()> {
    let config = load_config(opts.config.as_deref())?;
    let page_size = config.page_size;
    let cache = HierarchyCache::from_config(&config);
    let backend = HttpBackend::new(config).context("building backend client")?;

    if opts.session.is_none() {
        warn!("no session token; pass --token or set {}", cli::ENV_SESSION_TOKEN);
    }
    let dashboard = TeamDashboard::new(
        HierarchyFetcher::new(backend, cache),
        opts.viewer,
        opts.session,
        page_size,
    );

    if let Action::Legs { range } = &opts.action {
        match dashboard.leg_summary(range).await.context("fetching leg business")? {
            Some(legs) => println!("{}", render_legs(&legs)),
            None => info!("nothing fetched"),
        }
        return Ok(());
    }

    dashboard.view().select_leg(opts.leg);
    match dashboard.load().await {
        ApplyOutcome::Applied => {}
        ApplyOutcome::Skipped => {
            info!("nothing fetched");
            return Ok(());
        }
        ApplyOutcome::Failed => {
            let reason = dashboard.view().last_error().unwrap_or("unknown error").to_string();
            bail!("fetching team failed: {reason}");
        }
        ApplyOutcome::Stale => bail!("team fetch was superseded"),
    }

    let mut view = dashboard.view();
    view.set_search(opts.search);
    view.set_level(opts.level);

    match opts.action {
        Action::Tree { expand_all, json } => {
            if expand_all {
                view.expand_all();
            }
            let tree = view.tree();
            if json {
                println!("{}", serde_json::to_string_pretty(&tree.roots)?);
            } else if tree.is_empty() {
                println!("no members match");
            } else {
                println!("{}", render_tree(&tree.visible(view.expansion())));
            }
        }
        Action::Table { page } => {
            view.set_page(page);
            println!("{}", render_table(&view.table_page()));
        }
        Action::Legs { .. } => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::command().get_matches();
    let opts = cli::parse(&matches)?;
    init_tracing(opts.verbose, opts.json_logs);
    run(opts).await
}
