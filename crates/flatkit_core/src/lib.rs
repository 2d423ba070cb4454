//! flatkit core
//!
//! Foundational primitives shared by the flatkit crates:
//!
//! - **Colors**: [`Rgb`] values parsed from and printed as hex strings
//! - **Widget states**: [`WidgetState`] flags and [`StateSpec`] matchers such
//!   as `"pressed !disabled"`
//! - **Event dispatch**: a single-threaded publish/subscribe [`EventBus`]
//!   with handle-based unsubscription
//!
//! # Example
//!
//! ```rust
//! use flatkit_core::{EventBus, Rgb};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let bus: EventBus<Rgb, ()> = EventBus::new();
//! let seen = Rc::new(Cell::new(None));
//! let sink = seen.clone();
//! let _sub = bus.subscribe("color-picked", move |msg| {
//!     sink.set(msg.copied());
//!     Ok(())
//! });
//!
//! let teal: Rgb = "#20c997".parse().unwrap();
//! bus.dispatch("color-picked", Some(&teal)).unwrap();
//! assert_eq!(seen.get(), Some(teal));
//! ```

pub mod color;
pub mod events;
pub mod state;

pub use color::{ColorError, Rgb};
pub use events::{Callback, EventBus, SubscriberId, Subscription};
pub use state::{StateSpec, StateSpecError, WidgetState};
