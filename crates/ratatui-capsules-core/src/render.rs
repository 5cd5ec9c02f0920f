use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

pub const CAPSULE_LEFT: &str = "(";
pub const CAPSULE_RIGHT: &str = ")";

/// Columns a capsule needs beyond its content: both caps plus one space of padding each side.
pub const CAPSULE_CHROME: u16 = 4;

/// Display width of one grapheme. A tab takes a single column.
fn grapheme_width(symbol: &str) -> usize {
    if symbol == "\t" {
        1
    } else {
        UnicodeWidthStr::width(symbol)
    }
}

pub fn spans_width(spans: &[Span<'_>]) -> u16 {
    spans
        .iter()
        .flat_map(|s| s.styled_graphemes(Style::default()))
        .map(|g| grapheme_width(g.symbol))
        .sum::<usize>()
        .min(u16::MAX as usize) as u16
}

/// Draws `spans` starting at `(x, y)`, at most `max_cols` wide, one grapheme per cell so
/// emoji presentation sequences stay intact. Wide graphemes that would be split at the right
/// edge are dropped; zero-width graphemes are skipped and tabs become a space.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }

    let max_cols = max_cols as usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;

    for span in spans {
        for g in span.styled_graphemes(fallback_style) {
            let w = grapheme_width(g.symbol);
            if w == 0 {
                continue;
            }
            if out_cols + w > max_cols {
                return dx;
            }

            let symbol = if g.symbol == "\t" { " " } else { g.symbol };
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(g.style);
                cell.set_symbol(symbol);
            }
            dx += 1;
            for _ in 1..w {
                if let Some(cell) = buf.cell_mut((x + dx, y)) {
                    cell.set_style(g.style);
                    cell.set_symbol("");
                }
                dx += 1;
            }
            out_cols += w;
        }
    }
    dx
}

/// Draws one capsule into `area` (single row): caps in `cap_style`, padded content in
/// `fill_style`.
pub fn render_capsule(
    area: Rect,
    buf: &mut Buffer,
    content: &[Span<'_>],
    cap_style: Style,
    fill_style: Style,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    buf.set_style(area, fill_style);

    let right = area.x + area.width - 1;
    if let Some(cell) = buf.cell_mut((area.x, area.y)) {
        cell.set_style(cap_style);
        cell.set_symbol(CAPSULE_LEFT);
    }
    if area.width >= CAPSULE_CHROME {
        render_spans_clipped(
            area.x + 2,
            area.y,
            area.width - CAPSULE_CHROME,
            buf,
            content,
            fill_style,
        );
    }
    if right > area.x
        && let Some(cell) = buf.cell_mut((right, area.y))
    {
        cell.set_style(cap_style);
        cell.set_symbol(CAPSULE_RIGHT);
    }
}
