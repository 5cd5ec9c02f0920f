use ratatui_capsules::prelude::*;
use serde_json::Value;
use serde_json::json;

/// Host that forwards every value as JSON, like a host bridging to another process.
#[derive(Default)]
struct JsonHost {
    sent: Vec<Value>,
    ready: bool,
    resizes: usize,
}

impl Host for JsonHost {
    fn set_component_ready(&mut self) {
        self.ready = true;
    }

    fn set_component_value(&mut self, value: ComponentValue) {
        self.sent.push(serde_json::to_value(&value).unwrap());
    }

    fn set_frame_height(&mut self) {
        self.resizes += 1;
    }
}

fn event(args: Value) -> RenderEvent {
    serde_json::from_value(json!({ "args": args })).unwrap()
}

#[test]
fn single_mode_round_trip_through_json_host() {
    let mut widget = CapsuleSelector::new();
    let mut host = JsonHost::default();
    widget.mount(&mut host);
    assert!(host.ready);

    widget.on_render(
        event(json!({
            "label": "Select a category",
            "options": ["Charts", "Maps", "3D"],
            "icons": ["📊", "🗺️", "🧊"],
            "default": "3D",
            "clearable": true,
            "selection_mode": "single",
            "label_visibility": "visible"
        })),
        &mut host,
    );
    widget.click(Target::Option(2), &mut host);
    widget.click(Target::Option(0), &mut host);

    assert_eq!(host.sent, vec![Value::Null, json!("Charts")]);
    assert_eq!(host.resizes, 2);
}

#[test]
fn multi_mode_reports_lists_in_option_order() {
    let mut widget = CapsuleSelector::new();
    let mut host = JsonHost::default();
    widget.on_render(
        event(json!({
            "label": "Letters",
            "options": ["A", "B", "C"],
            "selection_mode": "multi",
            "default": [],
            "show_select_all": false
        })),
        &mut host,
    );
    widget.click(Target::Option(2), &mut host);
    widget.click(Target::Option(0), &mut host);
    widget.click(Target::Option(2), &mut host);

    assert_eq!(
        host.sent,
        vec![json!(["C"]), json!(["A", "C"]), json!(["A"])]
    );
    // One resize for the render, one per multi-mode click.
    assert_eq!(host.resizes, 4);
}

#[test]
fn rebuild_follows_option_changes_only() {
    let mut widget = CapsuleSelector::new();
    let mut host = JsonHost::default();
    let base = json!({"label": "L", "options": ["A", "B"], "selection_mode": "multi", "default": ["A"]});
    widget.on_render(event(base.clone()), &mut host);
    widget.click(Target::Option(1), &mut host);

    widget.on_render(event(base), &mut host);
    assert_eq!(
        widget.value(),
        Some(ComponentValue::Multi(vec!["A".into(), "B".into()]))
    );

    widget.on_render(
        event(json!({"label": "L", "options": ["A", "B", "C"], "selection_mode": "multi", "default": ["A"]})),
        &mut host,
    );
    assert_eq!(widget.value(), Some(ComponentValue::Multi(vec!["A".into()])));
}
