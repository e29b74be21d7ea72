use std::{io::Write, path::PathBuf};

use nxfilter::{
    config::Config,
    objects::{self, InputFormat, ObjectRecord},
    search_query::{self, Candidate, CompiledQuery},
};

use super::errors::{CliError, CliResult};
use super::types::SavedArgs;

/// Compiles the saved query and the ad-hoc query separately; an object has
/// to match every returned query.
pub fn resolve_queries(
    config: &Config,
    saved: Option<&str>,
    query: Option<&str>,
) -> CliResult<Vec<CompiledQuery>> {
    let mut queries = vec![];

    if let Some(name) = saved {
        let saved = config
            .saved_query(name)
            .ok_or_else(|| CliError::invalid_input(format!("no saved query named {name}")))?;
        queries.push(search_query::parse(&saved.query));
    }
    if let Some(query) = query {
        queries.push(search_query::parse(query));
    }

    Ok(queries)
}

pub fn resolve_format(
    config: &Config,
    format: Option<InputFormat>,
    input: Option<&PathBuf>,
) -> InputFormat {
    format
        .or_else(|| input.and_then(|path| InputFormat::from_path(path)))
        .unwrap_or(config.default_format)
}

pub fn select<'a>(
    queries: &[CompiledQuery],
    records: &'a [ObjectRecord],
    plain: bool,
) -> Vec<&'a ObjectRecord> {
    records
        .iter()
        .filter(|record| {
            let candidate = if plain {
                Candidate::plain(*record)
            } else {
                Candidate::from(*record)
            };
            queries.iter().all(|query| query.matches(&candidate))
        })
        .collect()
}

pub struct FilterParams {
    pub query: Option<String>,
    pub input: Option<PathBuf>,
    pub format: Option<InputFormat>,
    pub saved: Option<String>,
    pub plain: bool,
    pub count: bool,
}

pub fn handle_filter(params: FilterParams, config: &Config) -> CliResult<()> {
    let queries = resolve_queries(config, params.saved.as_deref(), params.query.as_deref())?;
    for query in &queries {
        log::debug!("compiled query: {query}");
    }

    if params.plain && queries.iter().any(CompiledQuery::has_attribute_clauses) {
        log::warn!("attribute clauses are ignored in plain mode");
    }

    let format = resolve_format(config, params.format, params.input.as_ref());
    let records = match &params.input {
        Some(path) => objects::load_path(path, format, &config.text_fields)?,
        None => objects::load(std::io::stdin().lock(), format, &config.text_fields)?,
    };

    let found = select(&queries, &records, params.plain);

    let mut out = std::io::stdout().lock();
    if params.count {
        writeln!(out, "{} objects found", found.len())?;
        return Ok(());
    }

    writeln!(out, "{}", serde_json::to_string_pretty(&found)?)?;
    Ok(())
}

pub fn handle_explain(query: &str) -> CliResult<()> {
    let compiled = search_query::parse(query);
    let explained = serde_json::json!({
        "canonical": compiled.to_string(),
        "matches_everything": compiled.is_empty(),
        "clauses": compiled,
    });
    writeln!(std::io::stdout().lock(), "{}", serde_json::to_string_pretty(&explained)?)?;
    Ok(())
}

pub fn handle_saved(action: SavedArgs, config: &mut Config) -> CliResult<()> {
    let mut out = std::io::stdout().lock();
    match action {
        SavedArgs::List {} => {
            for saved in &config.saved_queries {
                match &saved.comment {
                    Some(comment) => writeln!(out, "{}: {} // {comment}", saved.name, saved.query)?,
                    None => writeln!(out, "{}: {}", saved.name, saved.query)?,
                }
            }
        }
        SavedArgs::Add {
            name,
            query,
            comment,
        } => {
            let saved = config.add_saved_query(&name, &query, comment)?;
            writeln!(out, "saved {}: {}", saved.name, saved.query)?;
            config.save()?;
        }
        SavedArgs::Remove { name } => {
            let removed = config.remove_saved_query(&name)?;
            writeln!(out, "removed {}", removed.name)?;
            config.save()?;
        }
    }
    Ok(())
}
