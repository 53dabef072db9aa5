//! `jargon` command-line client.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jargon_cli::{render, HttpTermApi};
use jargon_core::{
    init_logging, ClientError, ClientResult, ContentEdit, Progress, StatusFilter, Tab, TermCache,
    ViewState,
};
use log::warn;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "jargon", version, about = "Track the jargon you are learning")]
struct Cli {
    /// Base URL the `/terms` routes are mounted under.
    #[arg(long, env = "JARGON_SERVER", default_value = "http://127.0.0.1:3000/api")]
    server: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "JARGON_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[arg(long, env = "JARGON_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List terms still being learned (or understood ones).
    List {
        #[arg(long)]
        understood: bool,
        /// Case-insensitive label filter.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one term in full.
    Show { id: String },
    /// Add a term to learn.
    Add {
        term: String,
        #[arg(long, default_value = "")]
        definition: String,
        /// What you think it means before looking it up.
        #[arg(long, default_value = "")]
        thoughts: String,
    },
    /// Edit a term; omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        definition: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        eli5: Option<String>,
    },
    /// Flip a term between understood and not understood.
    Toggle { id: String },
    Delete { id: String },
    /// Show learning progress.
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, None).map_err(anyhow::Error::msg)?;

    let api = HttpTermApi::new(&cli.server, Duration::from_secs(cli.timeout_secs))
        .context("invalid --server")?;
    let mut cache = TermCache::new(api);
    cache
        .load()
        .with_context(|| format!("failed to load terms from {}", cache.api().base()))?;

    run(&mut cache, cli.command)
}

fn run(cache: &mut TermCache<HttpTermApi>, command: Command) -> Result<()> {
    match command {
        Command::List { understood, search } => {
            let status = if understood {
                StatusFilter::Understood
            } else {
                StatusFilter::NotUnderstood
            };
            let mut view = ViewState::new(status);
            if let Some(query) = search {
                view.select_tab(Tab::Search);
                view.set_query(query);
            }
            println!("{}", render::term_list(&view, cache.terms()));
        }
        Command::Show { id } => {
            let term = cache
                .get(&id)
                .ok_or_else(|| ClientError::UnknownTerm(id.clone()))?;
            println!("{}", render::term_detail(term));
        }
        Command::Add {
            term,
            definition,
            thoughts,
        } => {
            let added = settle(cache, |cache| cache.add_term(&term, &definition, &thoughts))?;
            println!("added {} ({})", added.term, added.id);
        }
        Command::Edit {
            id,
            term,
            definition,
            notes,
            eli5,
        } => {
            let current = cache
                .get(&id)
                .ok_or_else(|| ClientError::UnknownTerm(id.clone()))?;
            let prefilled = ContentEdit::from_term(current);
            let edit = ContentEdit {
                term: term.unwrap_or(prefilled.term),
                definition: definition.or(prefilled.definition),
                notes: notes.or(prefilled.notes),
                eli5: eli5.or(prefilled.eli5),
            };
            settle(cache, |cache| cache.update_term(&id, edit))?;
            println!("updated {id}");
        }
        Command::Toggle { id } => {
            let status = settle(cache, |cache| cache.toggle_understood(&id))?;
            let state = if status.understood {
                "understood"
            } else {
                "not understood"
            };
            println!("{id} marked {state}");
        }
        Command::Delete { id } => {
            settle(cache, |cache| cache.delete_term(&id))?;
            println!("deleted {id}");
        }
        Command::Stats => {
            println!("{}", render::progress(&Progress::of(cache.terms())));
        }
    }
    Ok(())
}

/// Runs one cache action; a failed request is followed by a re-fetch so the
/// next command starts from the service's view.
fn settle<T>(
    cache: &mut TermCache<HttpTermApi>,
    action: impl FnOnce(&mut TermCache<HttpTermApi>) -> ClientResult<T>,
) -> Result<T> {
    match action(cache) {
        Ok(value) => Ok(value),
        Err(err @ ClientError::Api(_)) => {
            if let Err(reconcile_err) = cache.reconcile() {
                warn!("event=cache_reconcile module=cli status=error error={reconcile_err}");
            }
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
