//! `ratatui-capsules-core` implements a pill-shaped single/multi select control ("capsules") for
//! ratatui hosts.
//!
//! The host owns the terminal and the event loop. It feeds the widget render events (args plus
//! an optional theme) and input events, and receives selection values back through the
//! [`host::Host`] trait.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: everything runs on the host's UI thread, in call order.
//! - Render payloads are plain serde data, so hosts can forward JSON they already have.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-capsules`.
//!
//! Useful entry points:
//! - [`capsules::CapsuleSelector`]: the widget.
//! - [`args::CapsuleArgs`] / [`args::RenderEvent`]: what the host sends each render.
//! - [`host::ComponentValue`]: what the widget reports back.
//! - [`color::adjust_opacity`]: the theme color helper.
pub mod args;
pub mod color;
pub mod error;
pub mod host;
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod capsules;
pub mod input;
pub mod keymap;
pub mod render;
pub mod selection;
