//! flatkit paint
//!
//! Widget imagery is drawn with aliased shape primitives on a large canvas
//! and then downsampled to its on-screen size with a bicubic filter. The
//! supersampling is what produces smooth edges.
//!
//! # Example
//!
//! ```rust
//! use flatkit_core::Rgb;
//! use flatkit_paint::{Bounds, Canvas, ShapeStyle};
//!
//! let mut canvas = Canvas::new(800, 400).unwrap();
//! canvas.rounded_rectangle(
//!     Bounds::new(10.0, 10.0, 790.0, 390.0),
//!     16.0,
//!     &ShapeStyle::filled(Rgb::from_hex(0x2c3e50)).with_outline(Rgb::BLACK, 3.0),
//! );
//! let image = canvas.downsample(200, 100).unwrap();
//! assert_eq!((image.width(), image.height()), (200, 100));
//! ```

pub mod canvas;
pub mod error;
pub mod raster;
pub mod primitives;

pub use canvas::Canvas;
pub use error::{PaintError, Result};
pub use raster::ImageHandle;
pub use primitives::{Bounds, Joint, ShapeStyle};
