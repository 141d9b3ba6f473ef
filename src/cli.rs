use crate::build;
use crate::config::{self, Overrides, Settings};
use crate::diagnostics::Diagnostics;
use crate::emitter::Emitter;
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser, PartialEq, Eq)]
#[command(name = "css-bundle")]
#[command(version)]
#[command(about = "Flatten layered CSS sources into distributable stylesheets", long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Trace every resolved import
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Flatten every layer and the aggregate entry into the output directory
    Build {
        #[command(flatten)]
        project: ProjectArgs,

        /// Source stylesheet root (default: src/css)
        #[arg(short, long, value_name = "DIR")]
        source: Option<PathBuf>,

        /// Output directory (default: dist)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Package directory for bare imports (default: node_modules)
        #[arg(short, long, value_name = "DIR")]
        dependencies: Option<PathBuf>,
    },

    /// Flatten a single stylesheet and print it to stdout
    Resolve {
        /// Stylesheet to flatten
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        project: ProjectArgs,

        /// Package directory for bare imports (default: node_modules)
        #[arg(short, long, value_name = "DIR")]
        dependencies: Option<PathBuf>,
    },

    /// List configured layers and whether their entry files exist
    Layers {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

#[derive(Debug, Args, Clone, PartialEq, Eq)]
pub struct ProjectArgs {
    /// Project root that FILE and the configured paths are resolved against
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Config file, relative to the working directory rather than --root
    /// (default: <root>/css-bundle.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

impl ProjectArgs {
    fn settings(&self, overrides: &Overrides) -> Result<Settings> {
        let config = config::discover(&self.root, self.config.as_deref())?;
        Ok(config.settings(&self.root, overrides))
    }
}

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Build {
            project,
            source,
            output,
            dependencies,
        } => {
            let settings = project.settings(&Overrides {
                source,
                output,
                dependencies,
            })?;
            build::run(&settings)?;
            Ok(())
        }
        Command::Resolve {
            file,
            project,
            dependencies,
        } => {
            let settings = project.settings(&Overrides {
                dependencies,
                ..Overrides::default()
            })?;
            print!("{}", flatten_file(&settings, &project.root.join(file)));
            Ok(())
        }
        Command::Layers { project } => {
            let settings = project.settings(&Overrides::default())?;
            for (layer, present) in layer_status(&settings) {
                let state = if present { "ok" } else { "missing" };
                println!("{:<12} {}", layer, state);
            }
            Ok(())
        }
    }
}

/// Flattens `file` the same way a layer entry is flattened.
pub fn flatten_file(settings: &Settings, file: &Path) -> String {
    let mut diagnostics = Diagnostics::new();
    Emitter::new(settings)
        .resolver()
        .flatten(file, &mut diagnostics)
}

pub fn layer_status(settings: &Settings) -> Vec<(String, bool)> {
    settings
        .layers
        .iter()
        .map(|layer| (layer.clone(), settings.layer_entry_path(layer).is_file()))
        .collect()
}
