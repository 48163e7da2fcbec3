//! tilesets-cli
//! ============
//!
//! Command-line client for the Tilesets API, built on [`tilesets-core`].
//!
//! This crate primarily provides a binary (`tilesets`). The library target
//! exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install tilesets-cli
//! export MAPBOX_ACCESS_TOKEN=pk.xxx
//! tilesets validate-source ./buildings.ldgeojson
//! tilesets upload-source my-user buildings ./buildings.ldgeojson
//! tilesets estimate-area ./buildings.ldgeojson --precision 1m
//! tilesets list my-user --verbose --indent 2
//! ```
//!
//! Build without the HTTP client (`--no-default-features`) to get an offline
//! tool that only validates features and estimates area.
//!
//! Links
//! -----
//! - Core crate: <https://docs.rs/tilesets-core>
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
