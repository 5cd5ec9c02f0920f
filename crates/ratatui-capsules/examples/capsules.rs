use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_capsules::crossterm_input::input_event_from_crossterm;
use ratatui_capsules::input::InputEvent;
use ratatui_capsules::prelude::*;
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const OPTIONS: [&str; 10] = [
    "General widgets",
    "Charts",
    "Images",
    "Video",
    "Text",
    "Maps & geospatial",
    "Dataframes & tables",
    "Graphs",
    "3D",
    "Code & editors",
];

const ICONS: [&str; 10] = [
    "🧰", "📊", "🌇", "🎥", "📝", "🗺️", "🧮", "🪢", "🧊", "✏️",
];

#[derive(Default)]
struct DemoHost {
    last: Option<String>,
}

impl Host for DemoHost {
    fn set_component_value(&mut self, value: ComponentValue) {
        self.last = Some(value.to_json());
    }

    // Heights are recomputed from `desired_height` on every draw.
    fn set_frame_height(&mut self) {}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to a file so they do not tear the alternate screen.
    let appender = tracing_appender::rolling::never(std::env::temp_dir(), "capsules-demo.log");
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ratatui_capsules_core=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    let single = CapsuleArgs::new("Select a category", OPTIONS)
        .with_icons(ICONS)
        .with_default("3D")
        .clearable(true)
        .build()?;
    let multi = CapsuleArgs::new("Select several", OPTIONS)
        .multi()
        .with_default(vec!["Charts", "Text"])
        .with_select_all(true)
        .build()?;
    let theme = ThemePayload::new("#fafafa", "#ff4b4b").with_background("#0e1117");

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut widgets = [CapsuleSelector::new(), CapsuleSelector::new()];
    let mut host = DemoHost::default();
    for (widget, args) in widgets.iter_mut().zip([single, multi]) {
        widget.mount(&mut host);
        widget.on_render(
            RenderEvent::new(args).with_theme(theme.clone()),
            &mut host,
        );
    }

    let res = run(&mut terminal, &mut widgets, &mut host);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res.map_err(Into::into)
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    widgets: &mut [CapsuleSelector; 2],
    host: &mut DemoHost,
) -> io::Result<()> {
    let mut active = 0usize;
    let keys = CapsuleBindings::default()
        .help(true)
        .into_iter()
        .map(|b| format!("{} {}", b.help_key, b.help_desc))
        .collect::<Vec<_>>()
        .join(", ");
    let title = format!("Capsules ({keys}, s switch, q quit)");
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(area);

            let block = Block::default()
                .title(title.as_str())
                .borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let buf = f.buffer_mut();
            let mut y = inner.y;
            for widget in widgets.iter_mut() {
                let h = widget
                    .desired_height(inner.width)
                    .min(inner.bottom().saturating_sub(y));
                widget.render_ref(Rect::new(inner.x, y, inner.width, h), buf);
                y = y.saturating_add(h).saturating_add(1);
            }

            let value = host.last.as_deref().unwrap_or("-");
            let status_line = format!("widget={}  value={value}", active + 1);
            let status_span = Span::styled(status_line, Style::default());
            buf.set_span(status.x, status.y, &status_span, status.width);
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('s') => {
                    widgets[active].set_focus(None);
                    active = (active + 1) % widgets.len();
                    continue;
                }
                _ => {}
            }
        }

        let Some(input) = input_event_from_crossterm(ev) else {
            continue;
        };
        if let InputEvent::Mouse(_) = &input {
            for (i, widget) in widgets.iter_mut().enumerate() {
                if let CapsuleAction::Changed(_) = widget.handle_event(input.clone(), host) {
                    active = i;
                }
            }
        } else {
            widgets[active].handle_event(input, host);
        }
    }
}
