//! # javadoc-index
//!
//! Extracts JavaDoc blocks from Java sources into a searchable index keyed by
//! canonical paths such as `pkg`, `pkg.Class` and `pkg.Class#method(params)`.
//!
//! ## Architecture
//!
//! - **location**: Package, class and method locations and their canonical paths
//! - **javadoc**: Comment blocks parsed into free text plus named tags
//! - **scanner**: Lexical, brace-depth scanner pairing declarations with their doc blocks
//! - **extractor**: Builder that scans a set of files into an index
//! - **documentation**: The ordered, path-keyed index
//! - **render**: Plain-text rendering of parsed JavaDoc
//! - **logging**: Injected log sink, a recording sink for tests, and `tracing` setup
//! - **error**: Scanner and extraction errors
//! - **discover**: Java source discovery below directory roots
//! - **cli** / **config**: Command line and its env var fallbacks

pub mod cli;
pub mod config;
pub mod discover;
pub mod documentation;
pub mod error;
pub mod extractor;
pub mod javadoc;
pub mod location;
pub mod logging;
pub mod render;
pub mod scanner;

pub use documentation::{DocEntry, SearchableDocumentation};
pub use extractor::JavaDocExtractor;
pub use javadoc::JavaDocData;
pub use location::{Location, LocationKind};
pub use logging::{BufferingLog, Log, TracingLog};
pub use render::{DefaultJavaDocRenderer, JavaDocRenderer};
