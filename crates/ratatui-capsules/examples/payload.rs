//! Feeds a host render payload through the widget without a terminal.
//!
//! ```text
//! cargo run -p ratatui-capsules --example payload -- [payload.json] [click...]
//! ```
//!
//! Clicks are option indices or `all`. Each reported value is printed as the JSON the host
//! would receive.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_capsules::host::HostCall;
use ratatui_capsules::prelude::*;

const SAMPLE: &str = r##"{
  "args": {
    "label": "Letters",
    "options": ["A", "B", "C"],
    "selection_mode": "multi",
    "default": ["A"],
    "show_select_all": true
  },
  "theme": { "textColor": "#31333F", "primaryColor": "#FF4B4B" }
}"##;

const WIDTH: u16 = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let payload = if args.peek().is_some_and(|p| p.ends_with(".json")) {
        std::fs::read_to_string(args.next().unwrap_or_default())?
    } else {
        SAMPLE.to_string()
    };

    let mut widget = CapsuleSelector::new();
    let mut host = RecordingHost::new();
    widget.mount(&mut host);
    widget.on_render(RenderEvent::from_json(&payload)?, &mut host);
    tracing::info!(vars = ?widget.style_vars(), "rendered payload");
    print_widget(&mut widget);

    for click in args {
        let target = if click == "all" {
            Target::SelectAll
        } else {
            Target::Option(click.parse()?)
        };
        if widget.click(target, &mut host).is_none() {
            eprintln!("click {click}: nothing to click");
        }
    }

    for call in &host.calls {
        match call {
            HostCall::Ready => println!("ready"),
            HostCall::FrameHeight => println!("frame-height"),
            HostCall::Value(v) => println!("value {}", v.to_json()),
        }
    }
    print_widget(&mut widget);
    Ok(())
}

fn print_widget(widget: &mut CapsuleSelector) {
    let area = Rect::new(0, 0, WIDTH, widget.desired_height(WIDTH));
    let mut buf = Buffer::empty(area);
    widget.render_ref(area, &mut buf);
    for y in 0..area.height {
        let line: String = (0..area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        println!("{}", line.trim_end());
    }
}
