use std::collections::BTreeMap;

use ratatui::style::Modifier;
use ratatui::style::Style;
use serde::Deserialize;
use serde::Serialize;

use crate::color;
use crate::color::Rgb;

pub const BORDER_COLOR: &str = "--border-color";
pub const SELECTED: &str = "--selected";
pub const HOVER_SELECTED: &str = "--hover-selected";

const BORDER_OPACITY: f64 = 0.2;
const SELECTED_OPACITY: f64 = 0.1;
const HOVER_SELECTED_OPACITY: f64 = 0.2;

/// Theme data pushed by the host alongside a render event.
///
/// Only the text and primary colors drive the capsule style variables. The background is used to
/// flatten translucent variables into opaque terminal colors and falls back to black.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePayload {
    pub text_color: String,
    pub primary_color: String,
    #[serde(default)]
    pub background_color: Option<String>,
}

impl ThemePayload {
    pub fn new(text_color: impl Into<String>, primary_color: impl Into<String>) -> Self {
        Self {
            text_color: text_color.into(),
            primary_color: primary_color.into(),
            background_color: None,
        }
    }

    pub fn with_background(mut self, background_color: impl Into<String>) -> Self {
        self.background_color = Some(background_color.into());
        self
    }
}

/// Named style variables (`--border-color`, `--selected`, `--hover-selected`).
///
/// Values are CSS `rgba(...)` strings so hosts that forward them to a stylesheet can use them
/// verbatim; [`Theme::apply_vars`] flattens them for terminal drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleVars {
    props: BTreeMap<String, String>,
}

impl StyleVars {
    pub fn from_payload(payload: &ThemePayload) -> Self {
        let mut vars = Self::default();
        vars.set_property(
            BORDER_COLOR,
            color::adjust_opacity(&payload.text_color, BORDER_OPACITY),
        );
        vars.set_property(
            SELECTED,
            color::adjust_opacity(&payload.primary_color, SELECTED_OPACITY),
        );
        vars.set_property(
            HOVER_SELECTED,
            color::adjust_opacity(&payload.primary_color, HOVER_SELECTED_OPACITY),
        );
        vars
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.props.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub label: Style,
    pub capsule: Style,
    pub border: Style,
    pub selected: Style,
    pub hover_selected: Style,
    pub focused: Style,
    pub icon: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            label: Style::default(),
            capsule: Style::default(),
            border: Style::default().dark_gray(),
            selected: Style::default().cyan(),
            hover_selected: Style::default().cyan().add_modifier(Modifier::BOLD),
            focused: Style::default().add_modifier(Modifier::UNDERLINED),
            icon: Style::default(),
        }
    }
}

impl Theme {
    /// Restyles from host theme data: text color for labels and capsules, the primary color for
    /// selected text, and the style variables (flattened over the background) for fills.
    pub fn apply_vars(&mut self, payload: &ThemePayload, vars: &StyleVars) {
        let bg = payload
            .background_color
            .as_deref()
            .map(color::parse_hex)
            .unwrap_or_default();
        let text = color::parse_hex(&payload.text_color).to_color();
        let primary = color::parse_hex(&payload.primary_color).to_color();

        self.label = self.label.fg(text);
        self.capsule = self.capsule.fg(text);
        if let Some(c) = flatten(vars.get(BORDER_COLOR), bg) {
            self.border = self.border.fg(c.to_color());
        }
        if let Some(c) = flatten(vars.get(SELECTED), bg) {
            self.selected = self.selected.fg(primary).bg(c.to_color());
        }
        if let Some(c) = flatten(vars.get(HOVER_SELECTED), bg) {
            self.hover_selected = self.hover_selected.fg(primary).bg(c.to_color());
        }
    }
}

fn flatten(value: Option<&str>, bg: Rgb) -> Option<Rgb> {
    value.and_then(color::parse_rgba).map(|c| c.over(bg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn vars_use_fixed_opacities() {
        let vars = StyleVars::from_payload(&ThemePayload::new("#31333F", "#FF4B4B"));
        assert_eq!(vars.get(BORDER_COLOR), Some("rgba(49, 51, 63, 0.2)"));
        assert_eq!(vars.get(SELECTED), Some("rgba(255, 75, 75, 0.1)"));
        assert_eq!(vars.get(HOVER_SELECTED), Some("rgba(255, 75, 75, 0.2)"));
    }

    #[test]
    fn payload_reads_host_field_names() {
        let payload: ThemePayload = serde_json::from_str(
            r##"{"textColor":"#fff","primaryColor":"#f00","backgroundColor":"#000","font":"sans"}"##,
        )
        .unwrap();
        assert_eq!(payload.primary_color, "#f00");
        assert_eq!(payload.background_color.as_deref(), Some("#000"));
    }

    #[test]
    fn apply_vars_flattens_over_background() {
        let payload = ThemePayload::new("#ffffff", "#ff0000").with_background("#000000");
        let vars = StyleVars::from_payload(&payload);
        let mut theme = Theme::default();
        theme.apply_vars(&payload, &vars);
        assert_eq!(theme.selected.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(theme.selected.bg, Some(Color::Rgb(26, 0, 0)));
        assert_eq!(theme.border.fg, Some(Color::Rgb(51, 51, 51)));
    }
}
