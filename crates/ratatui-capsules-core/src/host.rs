//! The outbound side of the widget: everything it tells its host.

use serde::Deserialize;
use serde::Serialize;

/// Value reported to the host after a click.
///
/// Serializes to what the host's backing logic expects: `null`, a string, or a list of strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    Null,
    Single(String),
    Multi(Vec<String>),
}

impl ComponentValue {
    pub fn to_json(&self) -> String {
        // Serializing strings and lists of strings cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

/// Calls the widget makes into its embedding host. All calls are fire-and-forget.
pub trait Host {
    /// Declares the widget ready to receive render events.
    fn set_component_ready(&mut self) {}

    fn set_component_value(&mut self, value: ComponentValue);

    /// Asks the host to remeasure the widget (see
    /// [`crate::capsules::CapsuleSelector::desired_height`]) and resize its frame.
    fn set_frame_height(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
    Ready,
    Value(ComponentValue),
    FrameHeight,
}

/// Host that records every call, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> impl Iterator<Item = &ComponentValue> {
        self.calls.iter().filter_map(|c| match c {
            HostCall::Value(v) => Some(v),
            _ => None,
        })
    }

    pub fn last_value(&self) -> Option<&ComponentValue> {
        self.values().last()
    }

    pub fn frame_height_requests(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::FrameHeight))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Host for RecordingHost {
    fn set_component_ready(&mut self) {
        self.calls.push(HostCall::Ready);
    }

    fn set_component_value(&mut self, value: ComponentValue) {
        self.calls.push(HostCall::Value(value));
    }

    fn set_frame_height(&mut self) {
        self.calls.push(HostCall::FrameHeight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_serialize_to_host_shapes() {
        assert_eq!(ComponentValue::Null.to_json(), "null");
        assert_eq!(ComponentValue::Single("A".into()).to_json(), r#""A""#);
        assert_eq!(
            ComponentValue::Multi(vec!["A".into(), "B".into()]).to_json(),
            r#"["A","B"]"#
        );
        assert_eq!(ComponentValue::Multi(vec![]).to_json(), "[]");
    }

    #[test]
    fn recording_host_keeps_order() {
        let mut host = RecordingHost::new();
        host.set_component_ready();
        host.set_frame_height();
        host.set_component_value(ComponentValue::Null);
        assert_eq!(host.calls.first(), Some(&HostCall::Ready));
        assert_eq!(host.last_value(), Some(&ComponentValue::Null));
        assert_eq!(host.frame_height_requests(), 1);
    }
}
