//! Configuration loading, validation, and env substitution.
//!
//! Config files: `emofuse.toml`, `emofuse.yaml`, or `emofuse.json`
//! Searched in `./` then `~/.config/emofuse/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod template;
pub mod validate;

pub use {
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{
        EmofuseConfig, FusionConfig, ImageFallback, LexiconConfig, PipelineConfig,
        SmoothingConfig,
    },
    validate::{Diagnostic, Severity, ValidationResult},
};
