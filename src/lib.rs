//! i18n-typegen - TypeScript declarations for i18n message catalogs
//!
//! This library infers the structure of merged i18n messages and renders a
//! declaration file augmenting `vue-i18n` and `@intlify/core`, then keeps it up
//! to date while locale and i18n config files change during development.
//!
//! # Core Concepts
//!
//! - **Inference**: a pure function from a [`MessageTree`] to interface body text
//! - **Snapshot cache**: the latest complete [`MergedOptions`], read by the template
//! - **Regeneration coordinator**: one fetch on the first `reload` signal, then
//!   one fetch per relevant file change, each followed by a re-render request
//!
//! # Example Usage
//!
//! ```
//! use i18n_typegen::{interface_body, MessageTree};
//!
//! let tree: MessageTree = serde_json::from_str(r#"{"greeting": "hi"}"#).unwrap();
//! assert_eq!(interface_body(&tree), "\"greeting\": string;");
//! ```
//!
//! # Project Structure
//!
//! - [`infer`]: message trees and structural inference
//! - [`declaration`]: the generated declaration template
//! - [`coordinator`]: regeneration protocol
//! - [`source`]: merged options sources (dev server, file, mock)
//! - [`watch`]: watched paths and the filesystem feed

pub mod cache;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod declaration;
pub mod infer;
pub mod lifecycle;
pub mod render;
pub mod session;
pub mod source;
pub mod util;
pub mod watch;

// Re-export key types for convenient access
pub use cache::SnapshotCache;
pub use config::{ConfigError, SessionMode, TypegenConfig};
pub use coordinator::{CoordinatorState, FirstSignalOutcome, Regeneration, RegenerationCoordinator};
pub use declaration::{render_declaration, TypeTemplate, GENERATED_FILENAME};
pub use infer::{infer, interface_body, FormatTable, MergedOptions, MessageTree};
pub use lifecycle::{LifecycleEvent, LifecycleHooks, Subscription, RELOAD_EVENT};
pub use render::{RenderTrigger, TemplateSelector};
pub use session::{prepare_type_generation, PreparedSession};
pub use source::{FetchError, MergedOptionsSource};
pub use util::{config_from_env, init_from_env, init_logging, LoggingConfig};
pub use watch::{WatchEvent, WatchEventKind, WatchedPathSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
