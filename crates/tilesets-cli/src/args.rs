use clap::{Args, Parser, Subcommand};
use tilesets_core::{Precision, TilesetsError};

/// CLI arguments for tilesets
#[derive(Debug, Parser)]
#[command(
    name = "tilesets",
    version,
    about = "Command line interface for the Tilesets API",
    long_about = "Command line interface for the Tilesets API.\n\n\
        Requires an access token. Set it in your environment as MAPBOX_ACCESS_TOKEN \
        or MapboxAccessToken, or pass it to each command with --token."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

// Access token flag shared by every API command.
#[cfg(feature = "api")]
#[derive(Debug, Clone, Args)]
pub struct TokenArg {
    /// Access token
    #[arg(short = 't', long = "token")]
    pub token: Option<String>,
}

// Token plus JSON output formatting.
#[cfg(feature = "api")]
#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    #[command(flatten)]
    pub auth: TokenArg,

    /// Indent for JSON output
    #[arg(long)]
    pub indent: Option<usize>,
}

// Feature inputs: file paths, directories, coordinate pairs or `-` for stdin.
#[derive(Debug, Clone, Args)]
pub struct FeaturesArg {
    /// GeoJSON files, directories, "lng,lat" pairs, or - for stdin (default)
    #[arg(value_name = "FEATURES")]
    pub features: Vec<String>,
}

#[cfg(feature = "api")]
#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    pub username: String,

    #[arg(value_parser = source_id)]
    pub id: String,

    #[command(flatten)]
    pub input: FeaturesArg,

    /// Bypass source file validation
    #[arg(long)]
    pub no_validation: bool,

    /// Don't show progress
    #[arg(long)]
    pub quiet: bool,

    /// Replace the existing data with the new file
    #[arg(long)]
    pub replace: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[cfg(feature = "api")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Privacy {
    Public,
    Private,
}

#[cfg(feature = "api")]
impl Privacy {
    pub fn is_private(self) -> bool {
        self == Privacy::Private
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    // ---------------------------------------------------------------------
    // Tilesets
    // ---------------------------------------------------------------------
    /// View the current queue/processing/complete status of a tileset
    #[cfg(feature = "api")]
    Status {
        tileset: String,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// View the TileJSON of a tileset, or a composite of comma-separated tilesets
    #[cfg(feature = "api")]
    Tilejson {
        tileset: String,
        /// Receive HTTPS resource URLs
        #[arg(long)]
        secure: bool,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// List all tilesets for an account (ids only unless --verbose)
    #[cfg(feature = "api")]
    List {
        username: String,
        /// Print all tileset information
        #[arg(short = 'v', long)]
        verbose: bool,
        /// Filter results by tileset type
        #[arg(long = "type", value_parser = ["vector", "raster", "rasterarray"])]
        tileset_type: Option<String>,
        /// Filter results by visibility
        #[arg(long, value_parser = ["public", "private"])]
        visibility: Option<String>,
        /// Sort the results by their created or modified timestamps
        #[arg(long, value_parser = ["created", "modified"])]
        sortby: Option<String>,
        /// Maximum number of results, from 1 to 500
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=500))]
        limit: u32,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// Create a new tileset with a recipe
    #[cfg(feature = "api")]
    Create {
        /// Tileset id in the form username.handle
        tileset: String,
        /// Path to a Recipe JSON document
        #[arg(short = 'r', long)]
        recipe: std::path::PathBuf,
        /// Name of the tileset
        #[arg(short = 'n', long)]
        name: String,
        /// Description of the tileset
        #[arg(short = 'd', long, default_value = "")]
        description: String,
        /// Tileset privacy
        #[arg(short = 'p', long, value_enum)]
        privacy: Option<Privacy>,
        /// Attribution as a JSON array of {text, link} objects
        #[arg(short = 'a', long)]
        attribution: Option<String>,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// Publish a tileset
    #[cfg(feature = "api")]
    Publish {
        tileset: String,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// Update the metadata of a tileset
    #[cfg(feature = "api")]
    Update {
        tileset: String,
        #[arg(short = 'n', long)]
        name: Option<String>,
        #[arg(short = 'd', long)]
        description: Option<String>,
        #[arg(short = 'p', long, value_enum)]
        privacy: Option<Privacy>,
        /// Attribution as a JSON array of {text, link} objects
        #[arg(short = 'a', long)]
        attribution: Option<String>,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// Delete a tileset
    #[cfg(feature = "api")]
    Delete {
        tileset: String,
        /// Skip the confirmation prompt
        #[arg(short = 'f', long)]
        force: bool,
        #[command(flatten)]
        auth: TokenArg,
    },

    // ---------------------------------------------------------------------
    // Jobs
    // ---------------------------------------------------------------------
    /// View all jobs for a tileset
    #[cfg(feature = "api")]
    Jobs {
        tileset: String,
        /// Job stage
        #[arg(short = 's', long)]
        stage: Option<String>,
        /// Maximum number of results, from 1 to 500
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=500))]
        limit: u32,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// View a single job of a tileset
    #[cfg(feature = "api")]
    Job {
        tileset: String,
        job_id: String,
        #[command(flatten)]
        api: ApiArgs,
    },

    // ---------------------------------------------------------------------
    // Sources
    // ---------------------------------------------------------------------
    /// Validate GeoJSON features without uploading them
    ValidateSource {
        #[command(flatten)]
        input: FeaturesArg,
    },

    /// Create a tileset source, or add data to (or replace) an existing one
    #[cfg(feature = "api")]
    UploadSource(UploadArgs),

    /// Create or add to a raster tileset source (at most 10 files)
    #[cfg(feature = "api")]
    UploadRasterSource {
        username: String,
        #[arg(value_parser = source_id)]
        id: String,
        #[arg(required = true)]
        inputs: Vec<std::path::PathBuf>,
        /// Don't show progress
        #[arg(long)]
        quiet: bool,
        /// Replace the existing source with the raster files
        #[arg(long)]
        replace: bool,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// [DEPRECATED] Create or add to a tileset source. Use upload-source instead
    #[cfg(feature = "api")]
    #[command(hide = true)]
    AddSource {
        username: String,
        id: String,
        #[command(flatten)]
        input: FeaturesArg,
        #[arg(long)]
        no_validation: bool,
        #[arg(long)]
        quiet: bool,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// View a tileset source's information
    #[cfg(feature = "api")]
    ViewSource {
        username: String,
        id: String,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// Delete a tileset source and all of its files
    #[cfg(feature = "api")]
    DeleteSource {
        username: String,
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'f', long)]
        force: bool,
        #[command(flatten)]
        auth: TokenArg,
    },

    /// List the tileset source ids of an account
    #[cfg(feature = "api")]
    ListSources {
        username: String,
        #[command(flatten)]
        auth: TokenArg,
    },

    /// Estimate the tiled area of features at a precision level
    ///
    /// Features are GeoJSON files, feature sequences on stdin, or coordinate
    /// pairs of the form "[lng, lat]", "lng, lat" or "lng lat".
    EstimateArea {
        #[command(flatten)]
        input: FeaturesArg,
        /// Precision level: 10m, 1m, 30cm or 1cm
        #[arg(short = 'p', long, value_parser = precision)]
        precision: Precision,
        /// Bypass feature validation
        #[arg(long)]
        no_validation: bool,
        /// Enables 1cm precision
        #[arg(long = "force-1cm")]
        force_1cm: bool,
    },

    // ---------------------------------------------------------------------
    // Recipes
    // ---------------------------------------------------------------------
    /// Validate a Recipe JSON document
    #[cfg(feature = "api")]
    ValidateRecipe {
        recipe: std::path::PathBuf,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// View a tileset's recipe
    #[cfg(feature = "api")]
    ViewRecipe {
        tileset: String,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// Replace the recipe of a tileset
    #[cfg(feature = "api")]
    UpdateRecipe {
        tileset: String,
        recipe: std::path::PathBuf,
        #[command(flatten)]
        api: ApiArgs,
    },

    // ---------------------------------------------------------------------
    // Changesets
    // ---------------------------------------------------------------------
    /// Publish changesets for a tileset
    #[cfg(feature = "api")]
    PublishChangesets {
        tileset: String,
        /// Path to the changeset payload JSON document
        changeset_payload: std::path::PathBuf,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// View a changeset's information
    #[cfg(feature = "api")]
    ViewChangeset {
        username: String,
        id: String,
        #[command(flatten)]
        api: ApiArgs,
    },

    /// Permanently delete a changeset and all of its files
    #[cfg(feature = "api")]
    DeleteChangeset {
        username: String,
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'f', long)]
        force: bool,
        #[command(flatten)]
        auth: TokenArg,
    },

    /// Create a changeset, or add data to (or replace) an existing one
    #[cfg(feature = "api")]
    UploadChangeset(UploadArgs),

    // ---------------------------------------------------------------------
    // Activity
    // ---------------------------------------------------------------------
    /// List tileset activity (request counts over the past 30 days)
    #[cfg(feature = "api")]
    ListActivity {
        username: String,
        #[arg(long, default_value = "requests", value_parser = ["requests", "modified"])]
        sortby: String,
        #[arg(long, default_value = "desc", value_parser = ["asc", "desc"])]
        orderby: String,
        /// Maximum number of results, from 1 to 500
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=500))]
        limit: u32,
        /// Pagination key from the `next` value of a previous response
        #[arg(long)]
        start: Option<String>,
        #[command(flatten)]
        api: ApiArgs,
    },
}

fn precision(s: &str) -> Result<Precision, TilesetsError> {
    s.parse()
}

#[cfg(feature = "api")]
fn source_id(s: &str) -> Result<String, TilesetsError> {
    tilesets_core::validate::validate_source_id(s)?;
    Ok(s.to_string())
}
