//! Flattens a layered stylesheet tree (tokens, base, layout, components,
//! utilities) into one file per layer plus an aggregate `index.css`, by
//! inlining `@import` directives depth-first.

pub mod build;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod locator;
pub mod resolver;

pub use build::{BuildReport, run};
pub use config::{Config, Settings};
pub use diagnostics::{Diagnostics, Warning};
pub use emitter::{Artifact, Emitter};
pub use error::{Error, Result};
pub use locator::{Locator, Target};
pub use resolver::{Directive, Resolver, Visited, scan_directives};
