//! tidymove - sort files into category folders
//!
//! This library scans a source directory recursively, classifies each file
//! by extension, and relocates it into a destination tree organized as
//! `<Category>/[<YYYY-MM-DD>/]<EXT-or-MISC>/`, avoiding name collisions and
//! optionally skipping duplicate content. Supports move, copy and dry-run
//! modes, plus TOML-configurable category overrides and file filters.

pub mod category;
pub mod cli;
pub mod config;
pub mod hasher;
pub mod organizer;
pub mod output;
pub mod planner;

pub use category::{Category, CategoryMap};
pub use config::{AppConfig, CompiledFilters, ConfigError, FilterRules};
pub use organizer::{OrganizeError, OrganizeOptions, OrganizeResult, Organizer, RunSummary};
pub use output::OutputFormatter;

pub use cli::{Cli, run};
