//! Pill-shaped single/multi select control for ratatui hosts.
//!
//! ```
//! use ratatui_capsules::prelude::*;
//!
//! let mut widget = CapsuleSelector::new();
//! let mut host = RecordingHost::new();
//! widget.mount(&mut host);
//!
//! let args = CapsuleArgs::new("Category", ["Charts", "Maps"])
//!     .with_default("Maps")
//!     .clearable(true)
//!     .build()
//!     .unwrap();
//! widget.on_render(RenderEvent::new(args), &mut host);
//!
//! widget.click(Target::Option(1), &mut host);
//! assert_eq!(host.last_value(), Some(&ComponentValue::Null));
//! ```
pub use ratatui_capsules_core::args;
pub use ratatui_capsules_core::capsules;
pub use ratatui_capsules_core::color;
pub use ratatui_capsules_core::error;
pub use ratatui_capsules_core::host;
pub use ratatui_capsules_core::input;
pub use ratatui_capsules_core::keymap;
pub use ratatui_capsules_core::render;
pub use ratatui_capsules_core::selection;
pub use ratatui_capsules_core::theme;

#[cfg(feature = "crossterm")]
pub use ratatui_capsules_core::crossterm_input;

pub mod prelude {
    pub use crate::args::CapsuleArgs;
    pub use crate::args::DefaultValue;
    pub use crate::args::LabelVisibility;
    pub use crate::args::RenderEvent;
    pub use crate::args::SelectionMode;
    pub use crate::capsules::CapsuleAction;
    pub use crate::capsules::CapsuleSelector;
    pub use crate::capsules::CapsuleSelectorOptions;
    pub use crate::capsules::Target;
    pub use crate::error::CapsuleError;
    pub use crate::host::ComponentValue;
    pub use crate::host::Host;
    pub use crate::host::RecordingHost;
    pub use crate::keymap::CapsuleBindings;
    pub use crate::theme::Theme;
    pub use crate::theme::ThemePayload;
}
