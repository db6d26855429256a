//! Widget core
//!
//! A retained widget tree with state-driven re-render, a focus ring and a
//! selector-filtered change event bus. Nothing in here touches the terminal;
//! the `tui` module is one backend that consumes [`DrawInstruction`]s and
//! produces [`Key`]s.
//!
//! ```text
//! Key ──► Runtime::dispatch_key ──► FocusRing ──► SwitchState
//!                                                     │
//!            DrawInstruction ◄── render_if_dirty ◄── dirty marks
//!                                                     │
//!                                  EventRouter ◄── ChangeEvent
//! ```

pub mod compose;
pub mod error;
pub mod focus;
pub mod key;
pub mod render;
pub mod router;
pub mod runtime;
pub mod switch;
pub mod widget;

pub use compose::{labeled_switch, Description};
pub use error::ConfigurationError;
pub use focus::{Direction, FocusRing};
pub use key::{Handled, Key};
pub use render::{DrawInstruction, DrawKind};
pub use router::{ChangeEvent, Selector};
pub use runtime::{Context, Runtime};
pub use switch::{Phase, SwitchState};
pub use widget::{Layout, NodeId, Payload, WidgetNode, WidgetTree};
