//! Screen geometry for every view, in inclusive frame coordinates.

use crate::{utils::wrapped_line_count, view::ViewName};

/// Frame corners `(x0, y0, x1, y1)`.
pub type Dimensions = (i32, i32, i32, i32);

/// Below this height the focused side panel grows and the others shrink.
const COMPACT_HEIGHT: i32 = 28;

/// Positions of the side panels, the main view and the options bar.
pub fn main_layout(
    width: i32,
    height: i32,
    side_panel_ratio: u16,
    focused: Option<ViewName>,
) -> Vec<(ViewName, Dimensions)> {
    let left_width = (width * i32::from(side_panel_ratio.clamp(10, 90)) / 100).max(1);
    let options_top = height - 2;

    let heights = side_panel_heights(height, focused);
    let mut panels = Vec::with_capacity(heights.len() + 2);
    let mut top = 0;
    for (name, h) in heights {
        panels.push((name, (0, top, left_width, top + h - 1)));
        top += h;
    }

    panels.push((ViewName::Main, (left_width + 1, 0, width - 1, options_top)));
    // Frameless one-row bar on the last screen line.
    panels.push((ViewName::Options, (-1, options_top, width, height)));
    panels
}

/// Heights of the side panels, top to bottom.
fn side_panel_heights(height: i32, focused: Option<ViewName>) -> [(ViewName, i32); 5] {
    let usable = (height - 7).max(3);
    let tall = usable / 3;
    let mut heights = [
        (ViewName::Status, 3),
        (ViewName::Files, tall + usable % 3),
        (ViewName::Branches, tall),
        (ViewName::Commits, tall),
        (ViewName::Stash, 3),
    ];

    if height < COMPACT_HEIGHT {
        let default_height = if height < 21 { 1 } else { 3 };
        // The focused panel takes what the others leave behind; with no side
        // panel focused, files does.
        let grow = focused
            .filter(|f| heights.iter().any(|(n, _)| n == f))
            .unwrap_or(ViewName::Files);
        let others = default_height * (heights.len() as i32 - 1);
        for (name, h) in heights.iter_mut() {
            *h = if *name == grow {
                (height - others - 1).max(default_height)
            } else {
                default_height
            };
        }
    }
    heights
}

/// Centred box wide enough for half the screen and tall enough for `content`
/// wrapped to that width.
pub fn confirmation_panel_dimensions(width: i32, height: i32, content: &str) -> Dimensions {
    let panel_width = width / 2;
    let panel_height = wrapped_line_count(content, panel_width.max(1) as usize) as i32;
    (
        width / 2 - panel_width / 2,
        height / 2 - panel_height / 2 - panel_height % 2 - 1,
        width / 2 + panel_width / 2,
        height / 2 + panel_height / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(layout: &[(ViewName, Dimensions)], name: ViewName) -> Dimensions {
        layout.iter().find(|(n, _)| *n == name).map(|(_, d)| *d).unwrap()
    }

    #[test]
    fn side_panels_stack_without_gaps() {
        let layout = main_layout(120, 40, 33, Some(ViewName::Files));
        let status = find(&layout, ViewName::Status);
        let files = find(&layout, ViewName::Files);
        let stash = find(&layout, ViewName::Stash);
        assert_eq!(status, (0, 0, 39, 2));
        assert_eq!(files.1, status.3 + 1);
        // Side panels end right above the options bar.
        assert_eq!(stash.3, 38);
    }

    #[test]
    fn options_bar_is_the_last_row() {
        let layout = main_layout(100, 30, 33, None);
        let (x0, y0, x1, y1) = find(&layout, ViewName::Options);
        assert_eq!(y0 + 1, 29);
        assert_eq!(y1 - y0 - 1, 1);
        assert_eq!(x1 - x0 - 1, 100);
    }

    #[test]
    fn focused_panel_grows_on_short_screens() {
        let layout = main_layout(100, 24, 33, Some(ViewName::Commits));
        let commits = find(&layout, ViewName::Commits);
        let branches = find(&layout, ViewName::Branches);
        assert_eq!(branches.3 - branches.1 + 1, 3);
        assert_eq!(commits.3 - commits.1 + 1, 24 - 12 - 1);
    }

    #[test]
    fn popup_is_centred_and_fits_content() {
        let (x0, y0, x1, y1) = confirmation_panel_dimensions(80, 24, "one line");
        assert_eq!((x0, x1), (20, 60));
        assert_eq!((y0, y1), (10, 12));
        let (_, ty0, _, ty1) = confirmation_panel_dimensions(80, 24, "a\nb\nc\nd");
        assert!(ty1 - ty0 > y1 - y0);
    }
}
