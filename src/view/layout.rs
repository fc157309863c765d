//! Screen layout rendering.
//!
//! The frame is split into the chat area on the left and the strobe panel
//! on the right. The chat area is divided by row according to
//! [`ScreenGeometry`]: history, separator with status, then the text box.

use crate::state::{ScreenGeometry, SessionState};
use crate::view::constants::{FALLBACK_WIDTH, SEPARATOR_CHAR};
use crate::view::styles::{signal_color, EntryStyles};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Width of the chat area for a terminal `total` columns wide.
///
/// The strobe panel is hidden (chat takes everything) when its width is 0
/// or would leave no room for text.
pub fn chat_width(total: u16, strobe_width: u16) -> u16 {
    let total = if total == 0 { FALLBACK_WIDTH } else { total };
    if strobe_width == 0 || strobe_width >= total {
        total
    } else {
        total - strobe_width
    }
}

/// Session geometry for a terminal of `width` x `height`.
pub fn chat_geometry(width: u16, height: u16, strobe_width: u16) -> ScreenGeometry {
    ScreenGeometry::new(
        usize::from(chat_width(width, strobe_width)),
        usize::from(height),
    )
}

/// Chat and strobe rectangles within `area`.
pub fn split_area(area: Rect, strobe_width: u16) -> (Rect, Option<Rect>) {
    let chat = chat_width(area.width, strobe_width).min(area.width);
    let chat_area = Rect::new(area.x, area.y, chat, area.height);
    if chat >= area.width {
        return (chat_area, None);
    }
    let strobe_area = Rect::new(area.x + chat, area.y, area.width - chat, area.height);
    (chat_area, Some(strobe_area))
}

/// Render the whole screen.
pub fn render(frame: &mut Frame, session: &SessionState, strobe_width: u16, styles: &EntryStyles) {
    let (chat_area, strobe_area) = split_area(frame.area(), strobe_width);
    let geometry = session.geometry();

    render_history(frame, chat_area, session, geometry, styles);
    render_separator(frame, chat_area, session, geometry, styles);
    render_textbox(frame, chat_area, session, geometry);

    if let Some(area) = strobe_area {
        render_strobe(frame, area, session);
    }
}

/// Sub-rectangle of `area` covering `rows` rows from `top`, clipped.
fn rows(area: Rect, top: usize, rows: usize) -> Option<Rect> {
    let top = u16::try_from(top).ok()?;
    if top >= area.height {
        return None;
    }
    let available = area.height - top;
    let height = u16::try_from(rows).unwrap_or(u16::MAX).min(available);
    (height > 0).then(|| Rect::new(area.x, area.y + top, area.width, height))
}

fn render_history(
    frame: &mut Frame,
    area: Rect,
    session: &SessionState,
    geometry: ScreenGeometry,
    styles: &EntryStyles,
) {
    let Some(history_area) = rows(area, 0, geometry.chatlog_height()) else {
        return;
    };
    let history = session.history();
    let entries = history.entries();
    let lines: Vec<Line> = history
        .visible(session.scroll_offset(), geometry.chatlog_height())
        .iter()
        .map(|line| {
            let style = entries
                .get(line.entry)
                .map(|entry| styles.for_kind(entry.kind()))
                .unwrap_or_default();
            Line::from(Span::styled(line.text.clone(), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), history_area);
}

/// Separator text: the fill character with the status embedded near the left.
pub fn separator_text(status: &str, width: usize) -> String {
    let fill = SEPARATOR_CHAR.to_string();
    let mut text = format!("{}{} {} ", fill, fill, status);
    let len = text.chars().count();
    if len < width {
        text.push_str(&fill.repeat(width - len));
    }
    text.chars().take(width).collect()
}

fn render_separator(
    frame: &mut Frame,
    area: Rect,
    session: &SessionState,
    geometry: ScreenGeometry,
    styles: &EntryStyles,
) {
    let Some(row) = rows(area, geometry.separator_row(), 1) else {
        return;
    };
    let text = separator_text(&session.status_line(), usize::from(row.width));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, styles.separator()))),
        row,
    );
}

fn render_textbox(frame: &mut Frame, area: Rect, session: &SessionState, geometry: ScreenGeometry) {
    let textbox = session.textbox();
    let Some(box_area) = rows(area, geometry.textbox_top(), geometry.textbox_height()) else {
        return;
    };

    let chars: Vec<char> = textbox.text().chars().collect();
    let lines: Vec<Line> = chars
        .chunks(textbox.width())
        .map(|chunk| Line::raw(chunk.iter().collect::<String>()))
        .collect();
    frame.render_widget(Paragraph::new(lines), box_area);

    let (row, col) = textbox.cursor();
    if let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) {
        if row < area.height && col < area.width {
            frame.set_cursor_position(Position::new(area.x + col, area.y + row));
        }
    }
}

fn render_strobe(frame: &mut Frame, area: Rect, session: &SessionState) {
    let color = signal_color(session.panel().current());
    frame.render_widget(Block::default().style(Style::default().bg(color)), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
