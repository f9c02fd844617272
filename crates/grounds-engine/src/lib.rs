//! MagicGrounds engine crate.
//!
//! Gradient model, filter pipeline, and the three synchronized outputs built
//! from them: CSS text, SVG markup and PNG/JPEG rasters with film grain.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`paint`] | `Color`, `ColorStops`, `GradientSpec`, surface geometry |
//! | [`filter`] | `FilterSet`, `FilterKey` |
//! | [`canvas`] | `CanvasSpec`, dimension parsing |
//! | [`catalog`] | palettes, templates, ratio shortcuts |
//! | [`style`] | CSS gradient/filter text |
//! | [`grain`] | achromatic noise pass |
//! | [`raster`] | CPU painter and PNG/JPEG encoding |
//! | [`vector`] | SVG serializer |
//! | [`export`] | coordinator and `Host` capabilities |
//! | [`session`] | the editing session and its commands |
//!
//! # Quick start
//!
//! ```rust
//! use grounds_engine::export::{export, ExportFormat, MemoryHost};
//! use grounds_engine::paint::{ColorStops, GradientKind};
//! use grounds_engine::session::Session;
//!
//! let session = Session::default()
//!     .set_stops(ColorStops::parse(&["#FF0000", "#0000FF"]).unwrap())
//!     .set_kind(GradientKind::Linear)
//!     .set_angle(90.0);
//!
//! let mut host = MemoryHost::new();
//! export(session.export_request(ExportFormat::Css), &mut host, &mut rand::thread_rng()).unwrap();
//! assert_eq!(host.texts[0], "background: linear-gradient(90deg, #FF0000 0%, #0000FF 100%);");
//! ```

pub mod canvas;
pub mod catalog;
pub mod error;
pub mod export;
pub mod filter;
pub mod grain;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod session;
pub mod style;
pub mod vector;

pub use error::{ExportError, HostError};
