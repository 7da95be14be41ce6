//! Logo image processing: pure Rust, built on the `image` crate.
//!
//! | Operation | Module / function |
//! |---|---|
//! | **Corner background** | [`background::corner_background`] (3-of-4 consensus) |
//! | **Edge background** | [`background::edge_background`] (border majority) |
//! | **Content box** | [`diff::content_bounds`] |
//! | **Trim** | [`trim()`] + [`BoundingBox::expand`] |
//! | **Extend** | [`extend()`] (3x canvas, centered) |
//! | **Chain** | [`OperationChain`] parsed from `e,t48`, run by [`apply`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for box and canvas math (unit testable)
//! - **Parameters**: The operation chain and its textual syntax
//! - **Transforms**: Background estimation, content bounds, trim, extend
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod background;
mod calculations;
pub mod chain;
pub mod diff;
pub mod extend;
pub mod params;
pub mod rust_backend;
pub mod trim;

pub use backend::{BackendError, ImageBackend, ValidationError};
pub use calculations::{BoundingBox, extend_layout};
pub use chain::{apply, images_identical};
pub use extend::extend;
pub use params::{CHAIN_TRIM_MARGIN, Operation, OperationChain, ParseError};
pub use rust_backend::{RustBackend, supported_input_extensions};
pub use trim::{DEFAULT_TRIM_MARGIN, trim};
