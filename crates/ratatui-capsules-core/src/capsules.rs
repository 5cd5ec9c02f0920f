//! The capsule selector: a label over a row of pill-shaped options.
//!
//! The host drives the widget with two kinds of calls, strictly in order on one thread:
//! [`CapsuleSelector::on_render`] whenever it has new args (and possibly a new theme), and
//! [`CapsuleSelector::handle_event`] / [`CapsuleSelector::click`] for user input. Every value the
//! widget produces goes back through the [`Host`] trait.
//!
//! Option capsules are only rebuilt when the option list changes; a render with an identical list
//! keeps the user's current selection even if `default` changed.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::args::CapsuleArgs;
use crate::args::LabelVisibility;
use crate::args::RenderEvent;
use crate::args::SelectionMode;
use crate::host::ComponentValue;
use crate::host::Host;
use crate::input::InputEvent;
use crate::input::MouseButton;
use crate::input::MouseEventKind;
use crate::keymap::CapsuleBindings;
use crate::keymap::CapsuleKeyAction;
use crate::render;
use crate::selection::Selection;
use crate::theme::StyleVars;
use crate::theme::Theme;

/// Element-wise equality of two sequences.
pub fn arrays_equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

#[derive(Clone, Debug)]
pub struct CapsuleSelectorOptions {
    pub bindings: CapsuleBindings,
    /// Base theme; host theme payloads are applied on top of a fresh copy.
    pub theme: Theme,
    /// Blank columns between neighbouring capsules.
    pub gap: u16,
    /// Flow capsules onto further rows instead of clipping at the right edge.
    pub wrap: bool,
}

impl Default for CapsuleSelectorOptions {
    fn default() -> Self {
        Self {
            bindings: CapsuleBindings::default(),
            theme: Theme::default(),
            gap: 1,
            wrap: true,
        }
    }
}

/// Something clickable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    SelectAll,
    Option(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CapsuleAction {
    None,
    Redraw,
    Changed(ComponentValue),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capsule {
    pub option: String,
    pub icon: Option<String>,
}

/// Everything built on a rebuild and kept until the next one.
///
/// Click behaviour (mode, clearable, select-all labels) is fixed here, so later renders with the
/// same options only change the label and theme.
#[derive(Clone, Debug)]
pub struct Capsules {
    items: Vec<Capsule>,
    selection: Selection,
    clearable: bool,
    select_all_visible: bool,
    select_all_labels: [String; 2],
}

impl Capsules {
    fn build(args: &CapsuleArgs) -> Self {
        let items = args
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| Capsule {
                option: option.clone(),
                icon: args.icon(i).map(str::to_string),
            })
            .collect();
        let selection =
            Selection::from_default(args.selection_mode, &args.options, &args.default);
        Self {
            items,
            selection,
            clearable: args.clearable,
            select_all_visible: args.show_select_all,
            select_all_labels: args.select_all_labels.clone(),
        }
    }

    pub fn items(&self) -> &[Capsule] {
        &self.items
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.is_selected(index)
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(self.items.len())
    }

    /// Multi mode always has a select-all control; it may be hidden.
    pub fn has_select_all(&self) -> bool {
        self.mode() == SelectionMode::Multi
    }

    pub fn select_all_visible(&self) -> bool {
        self.has_select_all() && self.select_all_visible
    }

    pub fn select_all_label(&self) -> Option<&str> {
        self.has_select_all()
            .then(|| self.select_all_labels[usize::from(self.all_selected())].as_str())
    }

    fn options(&self) -> Vec<String> {
        self.items.iter().map(|c| c.option.clone()).collect()
    }

    fn value(&self) -> ComponentValue {
        self.selection.value(&self.options())
    }

    fn targets(&self) -> Vec<Target> {
        let mut out = Vec::with_capacity(self.items.len() + 1);
        if self.select_all_visible() {
            out.push(Target::SelectAll);
        }
        out.extend((0..self.items.len()).map(Target::Option));
        out
    }
}

#[derive(Clone, Debug)]
pub struct CapsuleSelector {
    label: String,
    label_visibility: LabelVisibility,
    baseline: Vec<String>,
    needs_rebuild: bool,
    capsules: Option<Capsules>,
    style_vars: StyleVars,
    theme: Theme,
    focus: Option<Target>,
    hover: Option<Target>,
    hit_regions: Vec<(Target, Rect)>,
    options: CapsuleSelectorOptions,
}

impl Default for CapsuleSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CapsuleSelector {
    pub fn new() -> Self {
        Self::with_options(CapsuleSelectorOptions::default())
    }

    pub fn with_options(options: CapsuleSelectorOptions) -> Self {
        Self {
            label: String::new(),
            label_visibility: LabelVisibility::Visible,
            baseline: Vec::new(),
            needs_rebuild: true,
            capsules: None,
            style_vars: StyleVars::default(),
            theme: options.theme.clone(),
            focus: None,
            hover: None,
            hit_regions: Vec::new(),
            options,
        }
    }

    /// One-time readiness handshake: declares the widget ready, then asks for an initial
    /// measurement.
    pub fn mount(&self, host: &mut dyn Host) {
        host.set_component_ready();
        host.set_frame_height();
    }

    pub fn on_render(&mut self, event: RenderEvent, host: &mut dyn Host) {
        let RenderEvent { args, theme } = event;

        if let Err(err) = args.validate() {
            warn!(
                code = err.error_code(),
                error = %err,
                "render args failed validation; rendering anyway"
            );
        }

        self.label.clone_from(&args.label);
        self.label_visibility = args.label_visibility;

        if !arrays_equal(&args.options, &self.baseline) {
            debug!(
                previous = self.baseline.len(),
                next = args.options.len(),
                "options changed; rebuilding capsules"
            );
            self.needs_rebuild = true;
            self.capsules = None;
        }
        self.baseline.clone_from(&args.options);

        if self.needs_rebuild {
            let capsules = Capsules::build(&args);
            debug!(
                mode = %capsules.mode(),
                options = capsules.items.len(),
                selected = capsules.selection.selected_count(),
                "capsules built"
            );
            self.capsules = Some(capsules);
            self.needs_rebuild = false;
            self.focus = None;
            self.hover = None;
            self.hit_regions.clear();
        }

        if let Some(payload) = theme {
            let vars = StyleVars::from_payload(&payload);
            let mut theme = self.options.theme.clone();
            theme.apply_vars(&payload, &vars);
            trace!(vars = ?vars, "theme applied");
            self.theme = theme;
            self.style_vars = vars;
        }

        host.set_frame_height();
    }

    /// Clicks `target` as a user would. Returns the reported value, if any.
    pub fn click(&mut self, target: Target, host: &mut dyn Host) -> Option<ComponentValue> {
        let capsules = self.capsules.as_mut()?;
        let len = capsules.items.len();
        match (capsules.mode(), target) {
            (SelectionMode::Single, Target::Option(i)) if i < len => {
                capsules.selection.click_single(i, capsules.clearable);
                let value = capsules.value();
                debug!(index = i, value = %value.to_json(), "single capsule clicked");
                host.set_component_value(value.clone());
                Some(value)
            }
            (SelectionMode::Multi, Target::Option(i)) if i < len => {
                capsules.selection.toggle(i);
                let value = capsules.value();
                debug!(index = i, value = %value.to_json(), "multi capsule toggled");
                host.set_component_value(value.clone());
                host.set_frame_height();
                Some(value)
            }
            (SelectionMode::Multi, Target::SelectAll) if capsules.select_all_visible => {
                capsules.selection.toggle_all(len);
                let value = capsules.value();
                debug!(all = capsules.all_selected(), "select-all clicked");
                host.set_component_value(value.clone());
                host.set_frame_height();
                Some(value)
            }
            _ => None,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent, host: &mut dyn Host) -> CapsuleAction {
        match event {
            InputEvent::Key(key) => match self.options.bindings.action_for(&key) {
                Some(action) => self.apply_key_action(action, host),
                None => CapsuleAction::None,
            },
            InputEvent::Mouse(m) => match m.kind {
                MouseEventKind::Down(MouseButton::Left) => match self.hit_test(m.x, m.y) {
                    Some(target) => {
                        self.focus = Some(target);
                        self.clicked(target, host)
                    }
                    None => CapsuleAction::None,
                },
                MouseEventKind::Moved => {
                    let hover = self.hit_test(m.x, m.y);
                    if hover == self.hover {
                        CapsuleAction::None
                    } else {
                        self.hover = hover;
                        CapsuleAction::Redraw
                    }
                }
                _ => CapsuleAction::None,
            },
        }
    }

    fn apply_key_action(
        &mut self,
        action: CapsuleKeyAction,
        host: &mut dyn Host,
    ) -> CapsuleAction {
        let targets = self
            .capsules
            .as_ref()
            .map(Capsules::targets)
            .unwrap_or_default();
        let pos = self
            .focus
            .and_then(|f| targets.iter().position(|t| *t == f));
        let next_focus = match action {
            CapsuleKeyAction::FocusPrev => match pos {
                Some(p) => targets.get(p.saturating_sub(1)).copied(),
                None => targets.last().copied(),
            },
            CapsuleKeyAction::FocusNext => match pos {
                Some(p) => targets.get((p + 1).min(targets.len().saturating_sub(1))).copied(),
                None => targets.first().copied(),
            },
            CapsuleKeyAction::FocusFirst => targets.first().copied(),
            CapsuleKeyAction::FocusLast => targets.last().copied(),
            CapsuleKeyAction::Blur => None,
            CapsuleKeyAction::Activate => {
                return match self.focus {
                    Some(target) => self.clicked(target, host),
                    None => CapsuleAction::None,
                };
            }
            CapsuleKeyAction::ToggleAll => return self.clicked(Target::SelectAll, host),
        };
        if next_focus == self.focus {
            return CapsuleAction::None;
        }
        self.focus = next_focus;
        CapsuleAction::Redraw
    }

    fn clicked(&mut self, target: Target, host: &mut dyn Host) -> CapsuleAction {
        self.click(target, host)
            .map_or(CapsuleAction::None, CapsuleAction::Changed)
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<Target> {
        self.hit_regions
            .iter()
            .find(|(_, r)| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
            .map(|(t, _)| *t)
    }

    /// The value the widget would report right now, or `None` before the first render.
    pub fn value(&self) -> Option<ComponentValue> {
        self.capsules.as_ref().map(Capsules::value)
    }

    pub fn capsules(&self) -> Option<&Capsules> {
        self.capsules.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn label_visibility(&self) -> LabelVisibility {
        self.label_visibility
    }

    pub fn style_vars(&self) -> &StyleVars {
        &self.style_vars
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn focus(&self) -> Option<Target> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<Target>) {
        self.focus = focus;
    }

    /// Rows needed at `width`: the label row (unless collapsed) plus every capsule row.
    pub fn desired_height(&self, width: u16) -> u16 {
        let label_rows = self.label_rows();
        // Layout never looks at the height, rows grow downwards from `label_rows`.
        let regions = self.layout(Rect::new(0, label_rows, width, 1));
        let capsule_rows = regions
            .iter()
            .map(|(_, r)| r.bottom())
            .max()
            .map_or(0, |bottom| bottom - label_rows);
        label_rows + capsule_rows
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer) {
        self.hit_regions.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let label_rows = self.label_rows().min(area.height);
        if self.label_visibility == LabelVisibility::Visible && label_rows > 0 {
            let label_area = Rect::new(area.x, area.y, area.width, 1);
            buf.set_style(label_area, self.theme.label);
            render::render_spans_clipped(
                area.x,
                area.y,
                area.width,
                buf,
                &[Span::raw(self.label.as_str())],
                self.theme.label,
            );
        }

        let body = Rect::new(
            area.x,
            area.y + label_rows,
            area.width,
            area.height - label_rows,
        );
        let regions = self.layout(body);
        for (target, rect) in &regions {
            if rect.bottom() > body.bottom() {
                continue;
            }
            let content = self.content_spans(*target);
            let (cap, fill) = self.styles_for(*target);
            render::render_capsule(*rect, buf, &content, cap, fill);
            self.hit_regions.push((*target, *rect));
        }
    }

    fn label_rows(&self) -> u16 {
        match self.label_visibility {
            LabelVisibility::Collapsed => 0,
            LabelVisibility::Visible | LabelVisibility::Hidden => 1,
        }
    }

    fn layout(&self, area: Rect) -> Vec<(Target, Rect)> {
        let Some(capsules) = &self.capsules else {
            return Vec::new();
        };
        if area.width == 0 {
            return Vec::new();
        }

        let mut out = Vec::new();
        let (mut x, mut y) = (area.x, area.y);
        for target in capsules.targets() {
            let w = render::spans_width(&self.content_spans(target))
                .saturating_add(render::CAPSULE_CHROME)
                .min(area.width);
            if self.options.wrap && x > area.x && x.saturating_add(w) > area.right() {
                x = area.x;
                y = y.saturating_add(1);
            }
            if x >= area.right() {
                break;
            }
            let w = w.min(area.right() - x);
            out.push((target, Rect::new(x, y, w, 1)));
            x = x.saturating_add(w).saturating_add(self.options.gap);
        }
        out
    }

    fn content_spans(&self, target: Target) -> Vec<Span<'_>> {
        let Some(capsules) = &self.capsules else {
            return Vec::new();
        };
        match target {
            Target::SelectAll => capsules
                .select_all_label()
                .map(|l| vec![Span::raw(l)])
                .unwrap_or_default(),
            Target::Option(i) => match capsules.items.get(i) {
                Some(Capsule {
                    option,
                    icon: Some(icon),
                }) => vec![
                    Span::styled(icon.as_str(), self.theme.icon),
                    Span::raw(" "),
                    Span::raw(option.as_str()),
                ],
                Some(Capsule { option, icon: None }) => vec![Span::raw(option.as_str())],
                None => Vec::new(),
            },
        }
    }

    fn styles_for(&self, target: Target) -> (Style, Style) {
        let selected = self.capsules.as_ref().is_some_and(|c| match target {
            Target::SelectAll => c.all_selected(),
            Target::Option(i) => c.is_selected(i),
        });
        let active = self.focus == Some(target) || self.hover == Some(target);
        let fill = match (selected, active) {
            (true, true) => self.theme.hover_selected,
            (true, false) => self.theme.selected,
            (false, _) => self.theme.capsule,
        };
        let fill = if self.focus == Some(target) {
            fill.patch(self.theme.focused)
        } else {
            fill
        };
        let cap = if selected { fill } else { self.theme.border };
        (cap, fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::input::KeyCode;
    use crate::input::KeyEvent;
    use crate::input::MouseEvent;
    use crate::keymap;

    fn multi_abc() -> RenderEvent {
        RenderEvent::new(
            CapsuleArgs::new("Pick", ["A", "B", "C"])
                .multi()
                .with_default(vec!["A"])
                .with_select_all(true),
        )
    }

    #[test]
    fn arrays_equal_checks_length_and_positions() {
        assert!(arrays_equal::<i32>(&[], &[]));
        assert!(arrays_equal(&["a", "b"], &["a", "b"]));
        assert!(!arrays_equal(&["a", "b"], &["b", "a"]));
        assert!(!arrays_equal(&["a"], &["a", "a"]));
    }

    #[test]
    fn render_always_requests_frame_height_and_never_reports() {
        let mut w = CapsuleSelector::new();
        let mut host = RecordingHost::new();
        w.on_render(multi_abc(), &mut host);
        w.on_render(multi_abc(), &mut host);
        assert_eq!(host.frame_height_requests(), 2);
        assert_eq!(host.values().count(), 0);
    }

    #[test]
    fn mount_declares_ready_then_measures() {
        let w = CapsuleSelector::new();
        let mut host = RecordingHost::new();
        w.mount(&mut host);
        assert_eq!(
            host.calls,
            vec![crate::host::HostCall::Ready, crate::host::HostCall::FrameHeight]
        );
    }

    #[test]
    fn hidden_select_all_exists_but_is_not_clickable() {
        let mut w = CapsuleSelector::new();
        let mut host = RecordingHost::new();
        w.on_render(
            RenderEvent::new(CapsuleArgs::new("Pick", ["A", "B"]).multi()),
            &mut host,
        );
        let caps = w.capsules().unwrap();
        assert!(caps.has_select_all());
        assert!(!caps.select_all_visible());
        assert_eq!(w.click(Target::SelectAll, &mut host), None);

        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 2));
        w.render_ref(Rect::new(0, 0, 20, 2), &mut buf);
        assert_eq!(w.hit_test(0, 1), Some(Target::Option(0)));
    }

    #[test]
    fn keyboard_focus_walks_targets_and_activates() {
        let mut w = CapsuleSelector::new();
        let mut host = RecordingHost::new();
        w.on_render(multi_abc(), &mut host);

        let right = InputEvent::Key(KeyEvent::new(KeyCode::Right));
        assert_eq!(w.handle_event(right.clone(), &mut host), CapsuleAction::Redraw);
        assert_eq!(w.focus(), Some(Target::SelectAll));
        w.handle_event(right, &mut host);
        assert_eq!(w.focus(), Some(Target::Option(0)));

        let act = w.handle_event(InputEvent::Key(keymap::key_char(' ')), &mut host);
        assert_eq!(act, CapsuleAction::Changed(ComponentValue::Multi(vec![])));

        let act = w.handle_event(InputEvent::Key(keymap::key_char('a')), &mut host);
        assert_eq!(
            act,
            CapsuleAction::Changed(ComponentValue::Multi(vec![
                "A".into(),
                "B".into(),
                "C".into()
            ]))
        );
    }

    #[test]
    fn mouse_click_hits_rendered_capsule() {
        let mut w = CapsuleSelector::new();
        let mut host = RecordingHost::new();
        w.on_render(
            RenderEvent::new(CapsuleArgs::new("Pick", ["A", "B"])),
            &mut host,
        );
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 2));
        w.render_ref(Rect::new(0, 0, 20, 2), &mut buf);

        // "( A ) ( B )" on row 1: B starts at column 6.
        let act = w.handle_event(InputEvent::Mouse(MouseEvent::click(7, 1)), &mut host);
        assert_eq!(act, CapsuleAction::Changed(ComponentValue::Single("B".into())));
        assert_eq!(w.focus(), Some(Target::Option(1)));
        assert_eq!(
            w.handle_event(InputEvent::Mouse(MouseEvent::click(19, 0)), &mut host),
            CapsuleAction::None
        );
    }

    #[test]
    fn hover_changes_request_redraw_once() {
        let mut w = CapsuleSelector::new();
        let mut host = RecordingHost::new();
        w.on_render(
            RenderEvent::new(CapsuleArgs::new("Pick", ["A"])),
            &mut host,
        );
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 2));
        w.render_ref(Rect::new(0, 0, 10, 2), &mut buf);
        let over = InputEvent::Mouse(MouseEvent::moved(1, 1));
        assert_eq!(w.handle_event(over.clone(), &mut host), CapsuleAction::Redraw);
        assert_eq!(w.handle_event(over, &mut host), CapsuleAction::None);
    }

    #[test]
    fn capsules_wrap_onto_new_rows() {
        let mut w = CapsuleSelector::new();
        let mut host = RecordingHost::new();
        w.on_render(
            RenderEvent::new(CapsuleArgs::new("Pick", ["Alpha", "Beta", "Gamma"])),
            &mut host,
        );
        // Widths 9, 8, 9 with gap 1: 9+1+8 = 18 fits in 20, Gamma wraps.
        assert_eq!(w.desired_height(20), 3);
        assert_eq!(w.desired_height(80), 2);
    }

    #[test]
    fn collapsed_label_takes_no_rows() {
        let mut w = CapsuleSelector::new();
        let mut host = RecordingHost::new();
        let args = CapsuleArgs::new("Pick", ["A"]);
        w.on_render(
            RenderEvent::new(
                args.clone()
                    .with_label_visibility(LabelVisibility::Collapsed),
            ),
            &mut host,
        );
        assert_eq!(w.desired_height(40), 1);
        w.on_render(
            RenderEvent::new(args.with_label_visibility(LabelVisibility::Hidden)),
            &mut host,
        );
        assert_eq!(w.desired_height(40), 2);
    }
}
