//! Handlers for the commands that talk to the Tilesets API.

use crate::args::{ApiArgs, Privacy, TokenArg, UploadArgs};
use crate::input::FeatureReader;
use crate::print_json;
use anyhow::{bail, Context};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tilesets_core::api::{
    ensure_token_username, ActivityOptions, ListOptions, NewTileset, ProgressFn, SpooledBody,
    TilesetUpdate, UploadTarget,
};
use tilesets_core::{validate_stream_with, ApiClient, ValidationMode};

fn client(auth: &TokenArg) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::from_env(auth.token.as_deref())?)
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a valid JSON document", path.display()))
}

fn parse_attribution(raw: Option<&str>) -> anyhow::Result<Option<Value>> {
    raw.map(serde_json::from_str::<Value>)
        .transpose()
        .context("--attribution must be a JSON array of {text, link} objects")
}

/// Asks for the full id on the terminal; anything else aborts.
fn confirm_deletion(kind: &str, id: &str) -> anyhow::Result<()> {
    eprint!("To confirm {kind} deletion please enter the full {kind} id \"{id}\": ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim();
    if answer != id {
        bail!("{answer} does not match {id}. Aborted!");
    }
    Ok(())
}

fn progress_printer() -> ProgressFn {
    let mut shown = None;
    Box::new(move |read, total| {
        let percent = if total == 0 { 100 } else { (read * 100 / total).min(100) };
        if shown == Some(percent) {
            return;
        }
        shown = Some(percent);
        eprint!("\rupload progress  [{:<50}] {percent:>3}%", "=".repeat(percent as usize / 2));
        if percent >= 100 {
            eprintln!();
        }
    })
}

// -------------------------------------------------------------------------
// TILESETS
// -------------------------------------------------------------------------

pub fn status(tileset: &str, api: &ApiArgs) -> anyhow::Result<()> {
    print_json(&client(&api.auth)?.status(tileset)?, api.indent)
}

pub fn tilejson(tilesets: &str, secure: bool, api: &ApiArgs) -> anyhow::Result<()> {
    print_json(&client(&api.auth)?.tilejson(tilesets, secure)?, api.indent)
}

pub fn list(username: &str, verbose: bool, options: &ListOptions, api: &ApiArgs) -> anyhow::Result<()> {
    let tilesets = client(&api.auth)?.list_tilesets(username, options)?;
    for tileset in tilesets.as_array().into_iter().flatten() {
        if verbose {
            print_json(tileset, api.indent)?;
        } else if let Some(id) = tileset.get("id").and_then(Value::as_str) {
            println!("{id}");
        }
    }
    Ok(())
}

pub fn create(
    tileset: &str,
    recipe: &Path,
    name: String,
    description: String,
    privacy: Option<Privacy>,
    attribution: Option<&str>,
    api: &ApiArgs,
) -> anyhow::Result<()> {
    let body = NewTileset {
        recipe: read_json(recipe)?,
        name,
        description,
        private: privacy.map(Privacy::is_private),
        attribution: parse_attribution(attribution)?,
    };
    print_json(&client(&api.auth)?.create_tileset(tileset, &body)?, api.indent)
}

pub fn publish(tileset: &str, api: &ApiArgs) -> anyhow::Result<()> {
    let response = client(&api.auth)?.publish(tileset)?;
    print_json(&response, api.indent)?;
    let job = response.get("jobId").and_then(Value::as_str).unwrap_or("<job_id>");
    eprintln!(
        "✔ Tileset job received. Visit https://studio.mapbox.com/tilesets/{tileset} or run tilesets job {tileset} {job} to view the status of your tileset."
    );
    Ok(())
}

pub fn update(
    tileset: &str,
    name: Option<String>,
    description: Option<String>,
    privacy: Option<Privacy>,
    attribution: Option<&str>,
    api: &ApiArgs,
) -> anyhow::Result<()> {
    let update = TilesetUpdate {
        name,
        description,
        private: privacy.map(Privacy::is_private),
        attribution: parse_attribution(attribution)?,
    };
    client(&api.auth)?.update_tileset(tileset, &update)?;
    eprintln!("Updated tileset.");
    Ok(())
}

pub fn delete_tileset(tileset: &str, force: bool, auth: &TokenArg) -> anyhow::Result<()> {
    if !force {
        confirm_deletion("tileset", tileset)?;
    }
    client(auth)?.delete_tileset(tileset)?;
    println!("Tileset deleted.");
    Ok(())
}

// -------------------------------------------------------------------------
// JOBS
// -------------------------------------------------------------------------

pub fn jobs(tileset: &str, stage: Option<&str>, limit: u32, api: &ApiArgs) -> anyhow::Result<()> {
    print_json(&client(&api.auth)?.jobs(tileset, stage, Some(limit))?, api.indent)
}

pub fn job(tileset: &str, job_id: &str, api: &ApiArgs) -> anyhow::Result<()> {
    print_json(&client(&api.auth)?.job(tileset, job_id)?, api.indent)
}

// -------------------------------------------------------------------------
// SOURCES & CHANGESETS
// -------------------------------------------------------------------------

/// Validates (unless disabled), spools and uploads features to a source or
/// changeset.
pub fn upload(target: UploadTarget, args: UploadArgs) -> anyhow::Result<()> {
    let client = client(&args.api.auth)?;
    ensure_token_username(&client.config().token, &args.username)?;

    let features = FeatureReader::from_args(&args.input.features)?;
    let body = if args.no_validation {
        SpooledBody::from_features(features)?
    } else {
        let mode = match target {
            UploadTarget::Source => ValidationMode::Feature,
            UploadTarget::Changeset => ValidationMode::Changeset,
        };
        SpooledBody::from_features(validate_stream_with(features, mode))?
    };

    let progress = (!args.quiet).then(progress_printer);
    let response = client.upload(target, &args.username, &args.id, body, args.replace, progress)?;
    print_json(&response, args.api.indent)
}

pub fn upload_raster(
    username: &str,
    id: &str,
    inputs: &[PathBuf],
    replace: bool,
    api: &ApiArgs,
) -> anyhow::Result<()> {
    let client = client(&api.auth)?;
    ensure_token_username(&client.config().token, username)?;
    let response = client.upload_raster_source(username, id, inputs, replace)?;
    print_json(&response, api.indent)
}

pub fn view_source(username: &str, id: &str, api: &ApiArgs) -> anyhow::Result<()> {
    print_json(&client(&api.auth)?.view_source(username, id)?, api.indent)
}

pub fn delete_source(username: &str, id: &str, force: bool, auth: &TokenArg) -> anyhow::Result<()> {
    if !force {
        confirm_deletion("source", &format!("{username}/{id}"))?;
    }
    client(auth)?.delete_source(username, id)?;
    println!("Source deleted.");
    Ok(())
}

pub fn list_sources(username: &str, auth: &TokenArg) -> anyhow::Result<()> {
    for id in client(auth)?.list_sources(username)? {
        println!("{id}");
    }
    Ok(())
}

pub fn view_changeset(username: &str, id: &str, api: &ApiArgs) -> anyhow::Result<()> {
    print_json(&client(&api.auth)?.view_changeset(username, id)?, api.indent)
}

pub fn delete_changeset(username: &str, id: &str, force: bool, auth: &TokenArg) -> anyhow::Result<()> {
    if !force {
        confirm_deletion("changeset", &format!("{username}/{id}"))?;
    }
    client(auth)?.delete_changeset(username, id)?;
    println!("Changeset deleted.");
    Ok(())
}

pub fn publish_changesets(tileset: &str, payload: &Path, api: &ApiArgs) -> anyhow::Result<()> {
    let payload = read_json(payload)?;
    print_json(&client(&api.auth)?.publish_changesets(tileset, &payload)?, api.indent)
}

// -------------------------------------------------------------------------
// RECIPES
// -------------------------------------------------------------------------

pub fn validate_recipe(recipe: &Path, api: &ApiArgs) -> anyhow::Result<()> {
    let recipe = read_json(recipe)?;
    print_json(&client(&api.auth)?.validate_recipe(&recipe)?, api.indent)
}

pub fn view_recipe(tileset: &str, api: &ApiArgs) -> anyhow::Result<()> {
    print_json(&client(&api.auth)?.view_recipe(tileset)?, api.indent)
}

pub fn update_recipe(tileset: &str, recipe: &Path, api: &ApiArgs) -> anyhow::Result<()> {
    let recipe = read_json(recipe)?;
    client(&api.auth)?.update_recipe(tileset, &recipe)?;
    eprintln!("Updated recipe.");
    Ok(())
}

// -------------------------------------------------------------------------
// ACTIVITY
// -------------------------------------------------------------------------

pub fn list_activity(username: &str, options: &ActivityOptions, api: &ApiArgs) -> anyhow::Result<()> {
    print_json(&client(&api.auth)?.list_activity(username, options)?, api.indent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribution_must_be_json() {
        assert_eq!(parse_attribution(None).unwrap(), None);
        assert_eq!(
            parse_attribution(Some(r#"[{"text":"© OSM","link":"https://osm.org"}]"#))
                .unwrap()
                .unwrap()[0]["text"],
            "© OSM"
        );
        assert!(parse_attribution(Some("not json")).is_err());
    }

    #[test]
    fn recipe_file_must_be_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"version\": 1, \"layers\": {{}}}}").unwrap();
        assert_eq!(read_json(file.path()).unwrap()["version"], 1);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "version: 1").unwrap();
        assert!(read_json(bad.path()).is_err());
    }
}
