//! What happens when a view gains focus, and the hint line shown for it.

use std::collections::HashMap;

use anyhow::Result;

use super::Gui;
use crate::{keybindings::primary_key, view::ViewName};

impl Gui {
    /// Run the focus handler of `name`. Every view except the options bar
    /// has one.
    pub(super) fn on_focus_enter(&mut self, name: ViewName) -> Result<()> {
        match name {
            ViewName::Menu => self.handle_menu_select(),
            ViewName::Status => self.handle_status_select(),
            ViewName::Files => self.handle_file_select(),
            ViewName::Branches => self.handle_branch_select(),
            ViewName::Commits => self.handle_commit_select(),
            ViewName::Stash => self.handle_stash_select(),
            ViewName::Confirmation => Ok(()),
            ViewName::CommitMessage => self.handle_commit_focused(),
            ViewName::Credentials => self.handle_credentials_view_focused(),
            ViewName::Main => {
                if let Err(e) = self.refresh_merge_panel() {
                    tracing::error!("refreshing merge panel: {e}");
                }
                self.views.view_mut(ViewName::Main)?.highlight = false;
                Ok(())
            }
            ViewName::Staging => Ok(()),
            ViewName::Options => panic!("no view matching new-line-focused switch statement"),
        }
    }

    /// Render the hints matching the focused view into the options bar.
    pub fn render_panel_options(&mut self) -> Result<()> {
        match self.current_view_name() {
            Some(ViewName::Menu) => self.render_menu_options(),
            Some(ViewName::Main) => self.render_merge_options(),
            _ => self.render_global_options(),
        }
    }

    /// Hints shared by the side panels and the non-menu popups.
    pub fn render_global_options(&mut self) -> Result<()> {
        let u = &self.keys.universal;
        let map = HashMap::from([
            (
                join_keys(&[&u.prev_panel, &u.next_panel, &u.up, &u.down]),
                "navigate".to_string(),
            ),
            (join_keys(&[&u.close, &u.quit]), "close/cancel".to_string()),
            (join_keys(&[&u.menu]), "menu".to_string()),
            (
                join_keys(&[&u.scroll_up_main, &u.scroll_down_main]),
                "scroll".to_string(),
            ),
        ]);
        self.render_options_map(&map)
    }

    /// Hints while the menu has focus.
    pub fn render_menu_options(&mut self) -> Result<()> {
        let u = &self.keys.universal;
        let map = HashMap::from([
            (join_keys(&[&u.close]), "close".to_string()),
            (join_keys(&[&u.up, &u.down]), "navigate".to_string()),
            (join_keys(&[&u.execute]), "execute".to_string()),
        ]);
        self.render_options_map(&map)
    }

    /// Hints while main steps through merge conflicts.
    pub fn render_merge_options(&mut self) -> Result<()> {
        let u = &self.keys.universal;
        let map = HashMap::from([
            (join_keys(&[&u.up, &u.down]), "select conflict".to_string()),
            (join_keys(&[&u.close]), "return".to_string()),
        ]);
        self.render_options_map(&map)
    }

    /// Hints for the editable popups.
    pub(super) fn render_prompt_options(&mut self) -> Result<()> {
        let u = &self.keys.universal;
        let map = HashMap::from([
            (join_keys(&[&u.confirm]), "confirm".to_string()),
            (join_keys(&[&u.close]), "close".to_string()),
        ]);
        self.render_options_map(&map)
    }

    /// Queue `map` for the options bar.
    pub fn render_options_map(&mut self, map: &HashMap<String, String>) -> Result<()> {
        self.render_string(ViewName::Options, options_map_to_string(map));
        Ok(())
    }
}

/// `"key: description"` pairs sorted as whole strings and joined by `", "`.
pub fn options_map_to_string(map: &HashMap<String, String>) -> String {
    let mut pairs: Vec<String> = map
        .iter()
        .map(|(key, description)| format!("{key}: {description}"))
        .collect();
    pairs.sort();
    pairs.join(", ")
}

/// First binding of each list, joined with `/`.
fn join_keys(bindings: &[&Vec<String>]) -> String {
    bindings
        .iter()
        .map(|b| primary_key(b))
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::test_gui;

    fn options_text(gui: &mut Gui) -> String {
        gui.views.flush_updates().unwrap();
        gui.views.view(ViewName::Options).unwrap().buffer().to_string()
    }

    #[test]
    fn options_are_sorted_by_whole_pair() {
        let map = HashMap::from([
            ("q".to_string(), "quit".to_string()),
            ("h".to_string(), "help".to_string()),
        ]);
        assert_eq!(options_map_to_string(&map), "h: help, q: quit");
    }

    #[test]
    fn options_ignore_insertion_order() {
        let pairs = [("b", "two"), ("a", "one"), ("c", "three"), ("a/b", "both")];
        let forward: HashMap<_, _> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let backward: HashMap<_, _> = pairs
            .iter()
            .rev()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let s = options_map_to_string(&forward);
        assert_eq!(s, options_map_to_string(&backward));
        assert_eq!(s, "a/b: both, a: one, b: two, c: three");
    }

    #[test]
    fn empty_map_renders_nothing() {
        assert_eq!(options_map_to_string(&HashMap::new()), "");
    }

    #[test]
    fn hints_follow_the_focused_view() {
        let mut gui = test_gui();
        gui.switch_to(None, ViewName::Files).unwrap();
        let global = options_text(&mut gui);
        assert!(global.contains("x: menu"), "{global}");

        gui.create_menu().unwrap();
        let menu = options_text(&mut gui);
        assert!(menu.contains("Space: execute"), "{menu}");

        gui.close_menu().unwrap();
        gui.switch_to(Some(ViewName::Files), ViewName::Main).unwrap();
        let merge = options_text(&mut gui);
        assert_eq!(merge, "Esc: return, Up/Down: select conflict");
    }

    #[test]
    fn rebound_keys_show_up_in_hints() {
        let mut gui = test_gui();
        gui.keys.universal.menu = vec!["?".into()];
        gui.render_global_options().unwrap();
        assert!(options_text(&mut gui).contains("?: menu"));
    }

    #[test]
    fn entering_main_clears_its_highlight() {
        let mut gui = test_gui();
        gui.switch_to(None, ViewName::Files).unwrap();
        gui.switch_to(Some(ViewName::Files), ViewName::Main).unwrap();
        assert!(!gui.views.view(ViewName::Main).unwrap().highlight);
    }
}
