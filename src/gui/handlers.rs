//! Key routing by focused view.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Gui, actions::panel_actions};
use crate::{keybindings::matches_key, view::ViewName};

/// Handle one key press. Returns `true` when the app should quit.
pub fn handle_key(gui: &mut Gui, k: KeyEvent) -> Result<bool> {
    match gui.current_view_name() {
        Some(ViewName::CommitMessage) => handle_commit_message_key(gui, k),
        Some(ViewName::Credentials) => handle_credentials_key(gui, k),
        Some(ViewName::Menu) => handle_menu_key(gui, k),
        Some(ViewName::Confirmation) => handle_confirmation_key(gui, k),
        Some(ViewName::Main) => handle_main_key(gui, k),
        Some(ViewName::Staging) => handle_staging_key(gui, k),
        _ => handle_side_panel_key(gui, k),
    }
}

/// Ctrl+C quits from every view, editable ones included.
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}

/// List navigation, the menu and main scrolling first, then the panel's
/// own actions.
fn handle_side_panel_key(gui: &mut Gui, k: KeyEvent) -> Result<bool> {
    let u = &gui.keys.universal;
    if matches_key(&k, &u.up) {
        move_selection(gui, true)?;
    } else if matches_key(&k, &u.down) {
        move_selection(gui, false)?;
    } else if matches_key(&k, &u.menu) {
        gui.create_menu()?;
    } else if matches_key(&k, &u.scroll_up_main) {
        gui.scroll_view(ViewName::Main, -1)?;
    } else if matches_key(&k, &u.scroll_down_main) {
        gui.scroll_view(ViewName::Main, 1)?;
    } else {
        let action = panel_actions(&gui.keys, gui.current_view_name())
            .into_iter()
            .find(|(keys, _)| matches_key(&k, keys))
            .map(|(_, action)| action);
        if let Some(action) = action {
            return gui.run_action(action);
        }
    }
    Ok(false)
}

/// Move the selection of the focused list panel and show the new item.
fn move_selection(gui: &mut Gui, up: bool) -> Result<()> {
    let s = &mut gui.state;
    match gui.views.current_view_name() {
        Some(ViewName::Files) => {
            s.file_selection = s.file_selection.moved(up);
            gui.handle_file_select()
        }
        Some(ViewName::Branches) => {
            s.branch_selection = s.branch_selection.moved(up);
            gui.handle_branch_select()
        }
        Some(ViewName::Commits) => {
            s.commit_selection = s.commit_selection.moved(up);
            gui.handle_commit_select()
        }
        Some(ViewName::Stash) => {
            s.stash_selection = s.stash_selection.moved(up);
            gui.handle_stash_select()
        }
        _ => Ok(()),
    }
}

fn handle_menu_key(gui: &mut Gui, k: KeyEvent) -> Result<bool> {
    let u = &gui.keys.universal;
    if matches_key(&k, &u.close) || matches_key(&k, &u.quit) {
        gui.close_menu()?;
    } else if matches_key(&k, &u.up) {
        gui.move_menu_selection(true)?;
    } else if matches_key(&k, &u.down) {
        gui.move_menu_selection(false)?;
    } else if matches_key(&k, &u.execute) || matches_key(&k, &u.confirm) {
        return gui.execute_menu_item();
    }
    Ok(false)
}

fn handle_confirmation_key(gui: &mut Gui, k: KeyEvent) -> Result<bool> {
    let u = &gui.keys.universal;
    if matches_key(&k, &u.confirm) {
        gui.handle_confirm()?;
    } else if matches_key(&k, &u.close) || matches_key(&k, &u.quit) {
        gui.close_confirmation()?;
    }
    Ok(false)
}

/// Main has focus only while resolving conflicts.
fn handle_main_key(gui: &mut Gui, k: KeyEvent) -> Result<bool> {
    let u = &gui.keys.universal;
    if matches_key(&k, &u.close) {
        gui.return_to_previous(Some(ViewName::Main))?;
    } else if matches_key(&k, &u.up) {
        gui.select_conflict(true)?;
    } else if matches_key(&k, &u.down) {
        gui.select_conflict(false)?;
    } else if matches_key(&k, &u.scroll_up_main) {
        gui.scroll_view(ViewName::Main, -1)?;
    } else if matches_key(&k, &u.scroll_down_main) {
        gui.scroll_view(ViewName::Main, 1)?;
    } else if matches_key(&k, &u.quit) {
        return Ok(true);
    }
    Ok(false)
}

fn handle_staging_key(gui: &mut Gui, k: KeyEvent) -> Result<bool> {
    let u = &gui.keys.universal;
    if matches_key(&k, &u.close) {
        gui.close_staging_panel()?;
    } else if matches_key(&k, &u.up) || matches_key(&k, &u.scroll_up_main) {
        gui.scroll_view(ViewName::Staging, -1)?;
    } else if matches_key(&k, &u.down) || matches_key(&k, &u.scroll_down_main) {
        gui.scroll_view(ViewName::Staging, 1)?;
    } else if matches_key(&k, &u.quit) {
        return Ok(true);
    }
    Ok(false)
}

// Editable popups take every printable key as text, so only Ctrl+C quits.
fn handle_commit_message_key(gui: &mut Gui, k: KeyEvent) -> Result<bool> {
    if is_ctrl_c(&k) {
        return Ok(true);
    }
    let u = &gui.keys.universal;
    if matches_key(&k, &u.close) {
        gui.close_commit_message_panel()?;
    } else if matches_key(&k, &u.confirm) {
        gui.submit_commit_message()?;
    } else {
        gui.edit_view(ViewName::CommitMessage, k)?;
    }
    Ok(false)
}

fn handle_credentials_key(gui: &mut Gui, k: KeyEvent) -> Result<bool> {
    if is_ctrl_c(&k) {
        return Ok(true);
    }
    let u = &gui.keys.universal;
    if matches_key(&k, &u.close) {
        gui.close_credentials_panel()?;
    } else if matches_key(&k, &u.confirm) {
        gui.submit_credentials()?;
    } else {
        gui.edit_view(ViewName::Credentials, k)?;
    }
    Ok(false)
}
