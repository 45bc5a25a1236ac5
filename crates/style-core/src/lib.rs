//! Style resolution core for UIAIStyle
//!
//! This crate maps a (style kind, color scheme) pair to a fully resolved
//! [`TokenBundle`], and keeps externally supplied styles in a
//! [`StyleRegistry`].
//!
//! Three style kinds are built in:
//! - [`StyleKind::Minimal`] - flat surfaces, no shadow
//! - [`StyleKind::LiquidGlass`] - translucent panels with soft shadows
//! - [`StyleKind::Skeuomorphic`] - opaque, tactile surfaces
//!
//! Each is available in sixteen [`ColorScheme`]s, twelve of which come from
//! six light/dark [`Duotone`] pairs.
//!
//! # Modules
//!
//! - [`color`] - RGBA colors and hex parsing
//! - [`scheme`] - Style kinds, color schemes, duotone pairs
//! - [`tokens`] - Radii, shadows, font descriptors
//! - [`bundle`] - Token bundles and semantic color lookups
//! - [`table`] - The built-in palette and treatment tables
//! - [`provider`] - Extension trait for custom style families
//! - [`registry`] - Custom style registry
//! - [`selection`] - The persisted theme choice
//!
//! # Example
//!
//! ```rust
//! use style_core::{ColorScheme, StyleKind, StyleRegistry};
//!
//! let registry = StyleRegistry::new();
//! let bundle = registry.resolve(StyleKind::LiquidGlass, ColorScheme::Dark);
//! assert!(bundle.shadow.is_some());
//!
//! let warning = bundle.log_level_color("warning");
//! assert_eq!(warning, bundle.warning_color);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod color;
pub mod provider;
pub mod registry;
pub mod scheme;
pub mod selection;
pub mod table;
pub mod tokens;

// Re-export commonly used types
pub use bundle::{BadgeCategory, BadgeColors, BundleError, LogLevel, TokenBundle};
pub use color::{Color, ColorParseError};
pub use provider::{CustomStyle, FixedStyle, StyleProvider};
pub use registry::{RegistryError, StyleRegistry};
pub use scheme::{ColorScheme, Duotone, StyleKind, Tone};
pub use selection::ThemeSelection;
pub use table::{all_bundles, resolve};
pub use tokens::{radius, FontDescriptor, FontDesign, FontWeight, Shadow};
