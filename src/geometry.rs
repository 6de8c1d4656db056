//! Cursor and origin placement inside a scrollable view.

use crate::view::{View, ViewError};

/// Put the cursor on logical line `cy`, scrolling the origin just enough to
/// keep that line inside the viewport. Negative lines are ignored.
pub fn focus_point(cx: i32, cy: i32, v: &mut View) -> Result<(), ViewError> {
    if cy < 0 {
        return Ok(());
    }
    let (ox, oy) = v.origin();
    let (ox, oy) = (ox as i32, oy as i32);
    let (_, height) = v.size();
    let ly = height as i32 - 1;

    if ly > v.lines_height() as i32 {
        // Everything fits: no scrolling.
        v.set_cursor(cx, cy)?;
        v.set_origin(ox, 0)
    } else if cy < oy {
        v.set_cursor(cx, 0)?;
        v.set_origin(ox, cy)
    } else if cy > oy + ly {
        v.set_cursor(cx, ly)?;
        v.set_origin(ox, cy - ly)
    } else {
        v.set_cursor(cx, cy - oy)
    }
}

/// Focus `line` while making sure `bottom_line` is on screen.
///
/// Callers guarantee `line` is not above the resulting origin; a negative
/// cursor surfaces as [`ViewError::InvalidPoint`].
pub fn general_focus_line(line: i32, bottom_line: i32, v: &mut View) -> Result<(), ViewError> {
    let (_, height) = v.size();
    let over_scroll = (bottom_line - height as i32 + 1).max(0);
    v.set_origin(0, over_scroll)?;
    v.set_cursor(0, line - over_scroll)
}

/// Scroll back to the top and put the cursor on the first cell.
pub fn reset_origin(v: &mut View) -> Result<(), ViewError> {
    v.set_cursor(0, 0)?;
    v.set_origin(0, 0)
}
