//! Drawing the view model with ratatui.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::Gui;
use crate::view::{View, ViewName};

const POPUPS: [ViewName; 4] = [
    ViewName::Menu,
    ViewName::Confirmation,
    ViewName::CommitMessage,
    ViewName::Credentials,
];

/// Draw every visible view bottom to top.
pub fn draw(f: &mut Frame, gui: &Gui) {
    let area = f.area();
    let current = gui.current_view_name();
    for v in gui.views.visible_views() {
        if v.name() == ViewName::Options {
            draw_options(f, area, v);
        } else {
            draw_view(f, area, v, current == Some(v.name()));
        }
    }

    if gui.views.cursor_visible
        && let Some(v) = gui.views.current_view()
    {
        let (x0, y0, _, _) = v.dimensions();
        let (cx, cy) = v.cursor();
        let x = x0 + 1 + cx as i32;
        let y = y0 + 1 + cy as i32;
        if x >= 0 && y >= 0 && area.contains(Position::new(x as u16, y as u16)) {
            f.set_cursor_position(Position::new(x as u16, y as u16));
        }
    }
}

/// A framed view; the focused one gets a green border.
fn draw_view(f: &mut Frame, area: Rect, v: &View, focused: bool) {
    let (x0, y0, x1, y1) = v.dimensions();
    let Some(rect) = clip(area, x0, y0, x1, y1) else {
        return;
    };
    if POPUPS.contains(&v.name()) {
        f.render_widget(Clear, rect);
    }

    let border_style = if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(v.title.as_str());

    let (ox, oy) = v.origin();
    let (_, height) = v.size();
    let selected = v.highlight && !v.editable;
    let lines: Vec<Line> = v
        .buffer()
        .lines()
        .enumerate()
        .skip(oy)
        .take(height)
        .map(|(i, line)| {
            let text = if v.mask {
                "*".repeat(line.chars().count())
            } else {
                line.to_string()
            };
            if selected && i == v.cursor_line() {
                Line::styled(
                    text,
                    Style::default()
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::raw(text)
            }
        })
        .collect();

    let mut paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((0, ox as u16));
    if POPUPS.contains(&v.name()) && v.name() != ViewName::Menu {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    f.render_widget(paragraph, rect);
}

/// The options bar has no frame; only its inner row is drawn.
fn draw_options(f: &mut Frame, area: Rect, v: &View) {
    let (x0, y0, x1, y1) = v.dimensions();
    let Some(rect) = clip(area, x0 + 1, y0 + 1, x1 - 1, y1 - 1) else {
        return;
    };
    let hints = Paragraph::new(v.buffer()).style(Style::default().fg(Color::Blue));
    f.render_widget(hints, rect);
}

/// Inclusive corners to a rect inside `area`, `None` when nothing is left.
fn clip(area: Rect, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<Rect> {
    let left = x0.max(i32::from(area.x));
    let top = y0.max(i32::from(area.y));
    let right = (x1 + 1).min(i32::from(area.right()));
    let bottom = (y1 + 1).min(i32::from(area.bottom()));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::loaded_gui;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn rows(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn render(gui: &mut Gui) -> Buffer {
        gui.views.flush_updates().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, gui)).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn side_panels_main_and_hints_are_drawn() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Files).unwrap();
        let buffer = render(&mut gui);
        let screen = rows(&buffer);

        assert!(screen[0].contains("Status"));
        assert!(screen[0].contains("Diff"));
        assert!(screen[1].contains("project → master"));
        assert!(screen[4].contains("src/lib.rs"));
        assert!(screen[39].starts_with("BackTab/Tab/Up/Down: navigate"));
    }

    #[test]
    fn selected_line_of_the_focused_list_is_highlighted() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Files).unwrap();
        let buffer = render(&mut gui);
        let width = buffer.area.width as usize;
        assert_eq!(buffer.content[4 * width + 2].bg, Color::Blue);
        assert_ne!(buffer.content[5 * width + 2].bg, Color::Blue);
    }

    #[test]
    fn masked_views_hide_their_text() {
        let mut gui = loaded_gui();
        gui.switch_to(None, ViewName::Files).unwrap();
        gui.open_credentials_panel().unwrap();
        gui.views
            .view_mut(ViewName::Credentials)
            .unwrap()
            .write_str("me");
        gui.submit_credentials().unwrap();
        gui.views
            .view_mut(ViewName::Credentials)
            .unwrap()
            .write_str("sesame");
        let screen = rows(&render(&mut gui)).join("\n");
        assert!(screen.contains("Password"));
        assert!(screen.contains("******"));
        assert!(!screen.contains("sesame"));
    }

    #[test]
    fn clipping_drops_offscreen_parts() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(clip(area, -1, 3, 10, 5), Some(Rect::new(0, 3, 10, 2)));
        assert_eq!(clip(area, 12, 0, 20, 4), None);
    }
}
