//! tilesets: command-line client for the Tilesets API
//!
//! Validates and uploads GeoJSON sources, manages tilesets, recipes, jobs and
//! changesets, and estimates the tiled area of features for pricing.
//!
//! Usage examples
//! --------------
//!
//! - Validate a line-delimited GeoJSON file
//!   $ tilesets validate-source ./data/buildings.ldgeojson
//!
//! - Upload it as a tileset source (appends unless --replace)
//!   $ tilesets upload-source my-user buildings ./data/buildings.ldgeojson
//!
//! - Estimate the tiled area at 1m precision
//!   $ tilesets estimate-area ./data/buildings.ldgeojson -p 1m
//!
//! - Create and publish a tileset
//!   $ tilesets create my-user.buildings --recipe recipe.json --name "Buildings"
//!   $ tilesets publish my-user.buildings
//!
//! Configuration
//! -------------
//!
//! The access token comes from `--token`, `MAPBOX_ACCESS_TOKEN` or
//! `MapboxAccessToken`; `MAPBOX_API` overrides the API endpoint. Log output
//! goes to stderr and is controlled with `RUST_LOG` (default `warn`).
mod args;
mod input;
#[cfg(feature = "api")]
mod remote;

use crate::args::{CliArgs, Commands, FeaturesArg};
use crate::input::FeatureReader;
use anyhow::bail;
use clap::Parser;
use serde::Serialize;
use tilesets_core::{estimate_area, validate_stream, AreaEstimate, Precision, TilesetsError};
use tracing_subscriber::EnvFilter;

const FORCE_1CM_REQUIRED: &str = "The --force-1cm flag must be present to enable 1cm precision area calculation and may take longer for large feature inputs or data with global extents. 1cm precision for tileset processing is only available upon request after contacting Mapbox support.";
const FORCE_1CM_MISMATCH: &str = "The --force-1cm flag is enabled but the precision is not 1cm.";
const FEATURE_PARSING: &str = "Error with feature parsing. Ensure that feature inputs are valid and formatted correctly. Try 'tilesets estimate-area --help' for help.";

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::ValidateSource { input } => validate_source(&input),

        Commands::EstimateArea {
            input,
            precision,
            no_validation,
            force_1cm,
        } => estimate(&input, precision, no_validation, force_1cm),

        // Tilesets
        #[cfg(feature = "api")]
        Commands::Status { tileset, api } => remote::status(&tileset, &api),
        #[cfg(feature = "api")]
        Commands::Tilejson {
            tileset,
            secure,
            api,
        } => remote::tilejson(&tileset, secure, &api),
        #[cfg(feature = "api")]
        Commands::List {
            username,
            verbose,
            tileset_type,
            visibility,
            sortby,
            limit,
            api,
        } => {
            let options = tilesets_core::api::ListOptions {
                limit: Some(limit),
                tileset_type,
                visibility,
                sortby,
            };
            remote::list(&username, verbose, &options, &api)
        }
        #[cfg(feature = "api")]
        Commands::Create {
            tileset,
            recipe,
            name,
            description,
            privacy,
            attribution,
            api,
        } => remote::create(
            &tileset,
            &recipe,
            name,
            description,
            privacy,
            attribution.as_deref(),
            &api,
        ),
        #[cfg(feature = "api")]
        Commands::Publish { tileset, api } => remote::publish(&tileset, &api),
        #[cfg(feature = "api")]
        Commands::Update {
            tileset,
            name,
            description,
            privacy,
            attribution,
            api,
        } => remote::update(
            &tileset,
            name,
            description,
            privacy,
            attribution.as_deref(),
            &api,
        ),
        #[cfg(feature = "api")]
        Commands::Delete {
            tileset,
            force,
            auth,
        } => remote::delete_tileset(&tileset, force, &auth),

        // Jobs
        #[cfg(feature = "api")]
        Commands::Jobs {
            tileset,
            stage,
            limit,
            api,
        } => remote::jobs(&tileset, stage.as_deref(), limit, &api),
        #[cfg(feature = "api")]
        Commands::Job {
            tileset,
            job_id,
            api,
        } => remote::job(&tileset, &job_id, &api),

        // Sources
        #[cfg(feature = "api")]
        Commands::UploadSource(upload) => {
            remote::upload(tilesets_core::api::UploadTarget::Source, upload)
        }
        #[cfg(feature = "api")]
        Commands::UploadRasterSource {
            username,
            id,
            inputs,
            quiet: _,
            replace,
            api,
        } => remote::upload_raster(&username, &id, &inputs, replace, &api),
        #[cfg(feature = "api")]
        Commands::AddSource {
            username,
            id,
            input,
            no_validation,
            quiet,
            api,
        } => {
            tracing::warn!("add-source is deprecated, use upload-source instead");
            remote::upload(
                tilesets_core::api::UploadTarget::Source,
                crate::args::UploadArgs {
                    username,
                    id,
                    input,
                    no_validation,
                    quiet,
                    replace: false,
                    api,
                },
            )
        }
        #[cfg(feature = "api")]
        Commands::ViewSource { username, id, api } => remote::view_source(&username, &id, &api),
        #[cfg(feature = "api")]
        Commands::DeleteSource {
            username,
            id,
            force,
            auth,
        } => remote::delete_source(&username, &id, force, &auth),
        #[cfg(feature = "api")]
        Commands::ListSources { username, auth } => remote::list_sources(&username, &auth),

        // Recipes
        #[cfg(feature = "api")]
        Commands::ValidateRecipe { recipe, api } => remote::validate_recipe(&recipe, &api),
        #[cfg(feature = "api")]
        Commands::ViewRecipe { tileset, api } => remote::view_recipe(&tileset, &api),
        #[cfg(feature = "api")]
        Commands::UpdateRecipe {
            tileset,
            recipe,
            api,
        } => remote::update_recipe(&tileset, &recipe, &api),

        // Changesets
        #[cfg(feature = "api")]
        Commands::PublishChangesets {
            tileset,
            changeset_payload,
            api,
        } => remote::publish_changesets(&tileset, &changeset_payload, &api),
        #[cfg(feature = "api")]
        Commands::ViewChangeset { username, id, api } => {
            remote::view_changeset(&username, &id, &api)
        }
        #[cfg(feature = "api")]
        Commands::DeleteChangeset {
            username,
            id,
            force,
            auth,
        } => remote::delete_changeset(&username, &id, force, &auth),
        #[cfg(feature = "api")]
        Commands::UploadChangeset(upload) => {
            remote::upload(tilesets_core::api::UploadTarget::Changeset, upload)
        }

        // Activity
        #[cfg(feature = "api")]
        Commands::ListActivity {
            username,
            sortby,
            orderby,
            limit,
            start,
            api,
        } => {
            let options = tilesets_core::api::ActivityOptions {
                sortby: Some(sortby),
                orderby: Some(orderby),
                limit: Some(limit),
                start,
            };
            remote::list_activity(&username, &options, &api)
        }
    }
}

/// Prints `value` as JSON on stdout; `indent` switches to pretty output.
pub(crate) fn print_json<T: Serialize>(value: &T, indent: Option<usize>) -> anyhow::Result<()> {
    let text = match indent {
        None => serde_json::to_string(value)?,
        Some(width) => {
            let pad = " ".repeat(width);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
            let mut out = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
            value.serialize(&mut serializer)?;
            String::from_utf8(out)?
        }
    };
    println!("{text}");
    Ok(())
}

fn validate_source(input: &FeaturesArg) -> anyhow::Result<()> {
    eprintln!("Validating features");
    let features = FeatureReader::from_args(&input.features)?;
    for feature in validate_stream(features) {
        feature?;
    }
    println!("✔ valid");
    Ok(())
}

fn estimate(
    input: &FeaturesArg,
    precision: Precision,
    no_validation: bool,
    force_1cm: bool,
) -> anyhow::Result<()> {
    match (precision, force_1cm) {
        (Precision::OneCentimeter, false) => bail!(FORCE_1CM_REQUIRED),
        (p, true) if p != Precision::OneCentimeter => bail!(FORCE_1CM_MISMATCH),
        _ => {}
    }

    let features = FeatureReader::from_args(&input.features)?;
    let area = if no_validation {
        estimate_area(features, precision)
    } else {
        estimate_area(validate_stream(features), precision)
    };
    let area = match area {
        Ok(area) => area,
        Err(e @ (TilesetsError::Json(_) | TilesetsError::FeatureParse { .. })) => {
            return Err(anyhow::Error::new(e).context(FEATURE_PARSING));
        }
        Err(e) => return Err(e.into()),
    };

    print_json(&AreaEstimate::new(area, precision), None)
}
