//! Shared context for running CLI commands.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sdlx_config::{Config, schema_id};
use sdlx_index::{SearchEngine, default_index_root};
use sdlx_schema::SchemaModel;
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

/// A schema loaded from disk, with the text it was parsed from.
pub struct LoadedSchema {
    /// Configured id, or the file stem for ad-hoc paths.
    pub id: String,
    /// Path the source was read from.
    pub path: PathBuf,
    /// Raw source text, kept for staleness hashing.
    pub source: String,
    /// Parsed model.
    pub model: SchemaModel,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file
    /// is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Finds the schema named by a command argument.
    ///
    /// A configured schema id wins; otherwise the argument is a file path
    /// relative to the working directory and its stem becomes the id.
    pub fn schema_location(&self, arg: &str) -> Result<(String, PathBuf), ExitCode> {
        if let Some(source) = self.config.schema(arg) {
            return Ok((source.id.clone(), source.path.clone()));
        }

        let path = self.cwd.join(arg);
        if !path.is_file() {
            eprintln!("error: unknown schema '{arg}': not a configured schema id or a schema file");
            if self.config.schemas.is_empty() {
                eprintln!("Run 'sdlx init' to create a configuration file, then add [schema.<id>] tables.");
            }
            return Err(ExitCode::FAILURE);
        }

        let Some(id) = schema_id(&path) else {
            eprintln!("error: cannot derive a schema id from {}", path.display());
            return Err(ExitCode::FAILURE);
        };
        Ok((id, path))
    }

    /// Reads and parses the schema named by a command argument.
    pub fn load_schema(&self, arg: &str) -> Result<LoadedSchema, ExitCode> {
        let (id, path) = self.schema_location(arg)?;

        let source = fs::read_to_string(&path).map_err(|e| {
            eprintln!("error: failed to read {}: {e}", path.display());
            ExitCode::FAILURE
        })?;

        let model = SchemaModel::parse(&source).map_err(|e| {
            eprintln!("error: failed to parse {}: {e}", path.display());
            ExitCode::FAILURE
        })?;

        debug!(id, path = %path.display(), types = model.type_count(), "loaded schema");
        Ok(LoadedSchema {
            id,
            path,
            source,
            model,
        })
    }

    /// Returns the directory holding all schema indexes.
    pub fn index_root(&self) -> Result<PathBuf, ExitCode> {
        if let Some(root) = self.config.index_root() {
            return Ok(root.to_path_buf());
        }
        default_index_root().ok_or_else(|| {
            eprintln!("error: could not determine a data directory for the search index");
            eprintln!("Set [index] directory in .sdlx.toml.");
            ExitCode::FAILURE
        })
    }

    /// Builds a search engine from the configuration.
    ///
    /// If `fuzzy_override` is provided, it overrides the config's fuzzy_distance setting.
    pub fn engine(&self, fuzzy_override: Option<u8>) -> Result<SearchEngine, ExitCode> {
        let root = self.index_root()?;
        let fuzzy = fuzzy_override.unwrap_or(self.config.search.fuzzy_distance);
        SearchEngine::new(root, &self.config.search.stemmer, fuzzy).map_err(|e| {
            eprintln!("error: failed to initialize search: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Rebuilds the index for `schema` unless it was built from the same source.
pub fn ensure_index_fresh(engine: &SearchEngine, schema: &LoadedSchema) -> Result<(), ExitCode> {
    let hash = engine.fingerprint(&schema.source);
    let status = engine.status(&schema.id, &hash).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })?;

    if !status.needs_update() {
        return Ok(());
    }

    eprintln!("Index for '{}' is {}, updating...", schema.id, status.description());
    index_or_failure(engine, &schema.id, schema, &hash).map(|_| ())
}

/// Rebuilds the index for `schema` under `id`, returning the record count.
pub fn index_or_failure(
    engine: &SearchEngine,
    id: &str,
    schema: &LoadedSchema,
    hash: &str,
) -> Result<usize, ExitCode> {
    engine
        .index_with_hash(id, &schema.model, hash)
        .map_err(|e| {
            eprintln!("error: indexing failed: {e}");
            ExitCode::FAILURE
        })
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
