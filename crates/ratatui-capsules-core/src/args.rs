//! Render payload sent by the host on every render.
//!
//! The wire shape follows the host's argument serialization: snake_case argument names,
//! camelCase theme fields, `null` wherever the host left an optional argument unset.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::error::CapsuleError;
use crate::error::Result;
use crate::theme::ThemePayload;

pub const DEFAULT_SELECT_ALL_LABELS: [&str; 2] = ["Select All", "Deselect All"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelVisibility {
    #[default]
    Visible,
    /// The label row keeps its space but draws nothing.
    Hidden,
    /// The label row is removed from the layout.
    Collapsed,
}

impl FromStr for LabelVisibility {
    type Err = CapsuleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "visible" => Ok(Self::Visible),
            "hidden" => Ok(Self::Hidden),
            "collapsed" => Ok(Self::Collapsed),
            other => Err(CapsuleError::InvalidLabelVisibility {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Multi,
}

impl FromStr for SelectionMode {
    type Err = CapsuleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            other => Err(CapsuleError::InvalidSelectionMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Single => f.write_str("single"),
            SelectionMode::Multi => f.write_str("multi"),
        }
    }
}

/// Initially selected value(s): one option in single mode, a list in multi mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl DefaultValue {
    /// Single mode: only a lone string can preselect an option.
    pub fn selects_single(&self, option: &str) -> bool {
        matches!(self, DefaultValue::One(v) if v == option)
    }

    /// Multi mode: a lone string is treated as a one-element list.
    pub fn selects_multi(&self, option: &str) -> bool {
        match self {
            DefaultValue::None => false,
            DefaultValue::One(v) => v == option,
            DefaultValue::Many(vs) => vs.iter().any(|v| v == option),
        }
    }

    fn map(self, f: &dyn Fn(&str) -> String) -> Self {
        match self {
            DefaultValue::None => DefaultValue::None,
            DefaultValue::One(v) => DefaultValue::One(f(v.as_str())),
            DefaultValue::Many(vs) => {
                DefaultValue::Many(vs.iter().map(|v| f(v.as_str())).collect())
            }
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::One(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::One(value)
    }
}

impl From<Option<&str>> for DefaultValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(DefaultValue::None, DefaultValue::from)
    }
}

impl From<Vec<String>> for DefaultValue {
    fn from(values: Vec<String>) -> Self {
        DefaultValue::Many(values)
    }
}

impl From<Vec<&str>> for DefaultValue {
    fn from(values: Vec<&str>) -> Self {
        DefaultValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Configuration fields of a render event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapsuleArgs {
    pub options: Vec<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label_visibility: LabelVisibility,
    #[serde(default)]
    pub icons: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selection_mode: SelectionMode,
    #[serde(default)]
    pub default: DefaultValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clearable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub show_select_all: bool,
    #[serde(
        default = "default_select_all_labels",
        deserialize_with = "select_all_labels_or_default"
    )]
    pub select_all_labels: [String; 2],
}

impl Default for CapsuleArgs {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            label: String::new(),
            label_visibility: LabelVisibility::default(),
            icons: None,
            selection_mode: SelectionMode::default(),
            default: DefaultValue::default(),
            clearable: false,
            show_select_all: false,
            select_all_labels: default_select_all_labels(),
        }
    }
}

impl CapsuleArgs {
    pub fn new<I, S>(label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_icons<I, S>(mut self, icons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.icons = Some(icons.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_label_visibility(mut self, label_visibility: LabelVisibility) -> Self {
        self.label_visibility = label_visibility;
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    pub fn multi(mut self) -> Self {
        self.selection_mode = SelectionMode::Multi;
        self
    }

    pub fn with_select_all(mut self, show: bool) -> Self {
        self.show_select_all = show;
        self
    }

    pub fn with_select_all_labels(
        mut self,
        select: impl Into<String>,
        deselect: impl Into<String>,
    ) -> Self {
        self.select_all_labels = [select.into(), deselect.into()];
        self
    }

    /// Rewrites option text (and defaults, so they keep matching) through `f`.
    pub fn with_format(mut self, f: impl Fn(&str) -> String) -> Self {
        self.options = self.options.iter().map(|o| f(o.as_str())).collect();
        self.default = self.default.map(&f);
        self
    }

    /// Validates and returns the args.
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(CapsuleError::EmptyOptions);
        }
        if let Some(icons) = &self.icons
            && icons.len() != self.options.len()
        {
            return Err(CapsuleError::IconCountMismatch {
                options: self.options.len(),
                icons: icons.len(),
            });
        }
        if let DefaultValue::One(value) = &self.default
            && !self.options.contains(value)
        {
            return Err(CapsuleError::DefaultNotInOptions {
                value: value.clone(),
            });
        }
        Ok(())
    }

    pub fn icon(&self, index: usize) -> Option<&str> {
        self.icons.as_ref()?.get(index).map(String::as_str)
    }
}

/// One host render event: args plus optional theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEvent {
    pub args: CapsuleArgs,
    #[serde(default)]
    pub theme: Option<ThemePayload>,
}

impl RenderEvent {
    pub fn new(args: CapsuleArgs) -> Self {
        Self { args, theme: None }
    }

    pub fn with_theme(mut self, theme: ThemePayload) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn default_select_all_labels() -> [String; 2] {
    DEFAULT_SELECT_ALL_LABELS.map(str::to_string)
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn select_all_labels_or_default<'de, D>(
    deserializer: D,
) -> std::result::Result<[String; 2], D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<[String; 2]>::deserialize(deserializer)?.unwrap_or_else(default_select_all_labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_payload_with_nulls_uses_defaults() {
        let ev = RenderEvent::from_json(
            r#"{"args":{"label":"Pick","options":["A","B"],"icons":null,"default":[],
                "value":[],"label_visibility":"visible","clearable":null,
                "selection_mode":"single","key":null}}"#,
        )
        .unwrap();
        assert_eq!(ev.args.options, vec!["A", "B"]);
        assert!(!ev.args.clearable);
        assert_eq!(ev.args.default, DefaultValue::Many(vec![]));
        assert_eq!(ev.args.select_all_labels, ["Select All", "Deselect All"]);
        assert_eq!(ev.theme, None);
    }

    #[test]
    fn default_accepts_string_list_or_null() {
        let one: CapsuleArgs =
            serde_json::from_str(r#"{"options":["A"],"default":"A"}"#).unwrap();
        assert_eq!(one.default, DefaultValue::One("A".into()));
        let none: CapsuleArgs =
            serde_json::from_str(r#"{"options":["A"],"default":null}"#).unwrap();
        assert_eq!(none.default, DefaultValue::None);
    }

    #[test]
    fn unknown_label_visibility_is_a_payload_error() {
        let err = RenderEvent::from_json(r#"{"args":{"options":["A"],"label_visibility":"gone"}}"#)
            .unwrap_err();
        assert_eq!(err.error_code(), "CAPSULES_PAYLOAD");
        assert!(matches!(
            "gone".parse::<LabelVisibility>(),
            Err(CapsuleError::InvalidLabelVisibility { .. })
        ));
    }

    #[test]
    fn validate_mirrors_wrapper_checks() {
        assert!(matches!(
            CapsuleArgs::new("x", Vec::<String>::new()).build(),
            Err(CapsuleError::EmptyOptions)
        ));
        assert!(matches!(
            CapsuleArgs::new("x", ["A", "B"]).with_icons(["🧰"]).build(),
            Err(CapsuleError::IconCountMismatch {
                options: 2,
                icons: 1
            })
        ));
        assert!(matches!(
            CapsuleArgs::new("x", ["A"]).with_default("Z").build(),
            Err(CapsuleError::DefaultNotInOptions { .. })
        ));
        assert!(CapsuleArgs::new("x", ["A"]).with_default("A").build().is_ok());
    }

    #[test]
    fn format_rewrites_options_and_defaults() {
        let args = CapsuleArgs::new("x", ["a", "b"])
            .with_default("b")
            .with_format(|s| s.to_uppercase())
            .build()
            .unwrap();
        assert_eq!(args.options, vec!["A", "B"]);
        assert!(args.default.selects_single("B"));
    }

    #[test]
    fn default_matching_differs_by_mode() {
        let many = DefaultValue::from(vec!["A"]);
        assert!(!many.selects_single("A"));
        assert!(many.selects_multi("A"));
        assert!(DefaultValue::from("A").selects_multi("A"));
        assert!(!DefaultValue::None.selects_multi("A"));
    }
}
