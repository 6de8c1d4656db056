//! In-memory repository and GUI fixtures for the panel tests.

use std::{
    cell::RefCell,
    collections::HashMap,
    path::Path,
    rc::Rc,
};

use anyhow::{Result, anyhow};

use super::Gui;
use crate::{
    config::Config,
    git::{Branch, Commit, File, GitRepo, StashEntry},
    keybindings::Keybindings,
    view_service::ViewService,
};

/// Repository double that records every call it receives.
pub struct FakeRepo {
    pub files: Vec<File>,
    pub branches: Vec<Branch>,
    pub commits: Vec<Commit>,
    pub stash: Vec<StashEntry>,
    /// Working tree contents by path; other paths read as a single line.
    pub contents: HashMap<String, String>,
    pub fail_files: bool,
    pub calls: Rc<RefCell<Vec<String>>>,
}

pub fn file(name: &str, status: &str) -> File {
    let mut chars = status.chars();
    let (x, y) = (chars.next().unwrap_or(' '), chars.next().unwrap_or(' '));
    let untracked = status == "??";
    File {
        name: name.to_string(),
        short_status: status.to_string(),
        has_staged_changes: !untracked && x != ' ',
        has_unstaged_changes: untracked || y != ' ',
        tracked: !untracked,
        has_merge_conflicts: status == "UU",
    }
}

impl Default for FakeRepo {
    fn default() -> Self {
        Self {
            files: vec![
                file("src/lib.rs", " M"),
                file("README.md", "M "),
                file("notes.txt", "??"),
            ],
            branches: vec![
                Branch {
                    name: "master".into(),
                    recency: "*".into(),
                },
                Branch {
                    name: "feature".into(),
                    recency: "2d".into(),
                },
            ],
            commits: vec![
                Commit {
                    sha: "1111111111aaaa".into(),
                    name: "add panels".into(),
                    pushed: false,
                },
                Commit {
                    sha: "2222222222bbbb".into(),
                    name: "initial commit".into(),
                    pushed: true,
                },
            ],
            stash: vec![StashEntry {
                index: 0,
                name: "WIP on master: 2222222 initial commit".into(),
            }],
            contents: HashMap::new(),
            fail_files: false,
            calls: Rc::default(),
        }
    }
}

impl FakeRepo {
    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl GitRepo for FakeRepo {
    fn repo_path(&self) -> &Path {
        Path::new("/tmp/project")
    }

    fn current_branch(&self) -> Result<String> {
        self.record("current_branch");
        Ok("master".into())
    }

    fn upstream_counts(&self) -> Result<Option<(usize, usize)>> {
        self.record("upstream_counts");
        Ok(Some((1, 0)))
    }

    fn branches(&self) -> Result<Vec<Branch>> {
        self.record("branches");
        Ok(self.branches.clone())
    }

    fn files(&self) -> Result<Vec<File>> {
        self.record("files");
        if self.fail_files {
            return Err(anyhow!("git status failed"));
        }
        Ok(self.files.clone())
    }

    fn commits(&self) -> Result<Vec<Commit>> {
        self.record("commits");
        Ok(self.commits.clone())
    }

    fn stash_entries(&self) -> Result<Vec<StashEntry>> {
        self.record("stash");
        Ok(self.stash.clone())
    }

    fn file_diff(&self, file: &File, cached: bool) -> Result<String> {
        self.record(format!("diff {} cached={cached}", file.name));
        Ok(format!("diff of {}", file.name))
    }

    fn file_content(&self, name: &str) -> Result<String> {
        self.record(format!("content {name}"));
        Ok(self
            .contents
            .get(name)
            .cloned()
            .unwrap_or_else(|| format!("content of {name}\n")))
    }

    fn branch_graph(&self, branch: &str) -> Result<String> {
        self.record(format!("graph {branch}"));
        Ok(format!("graph of {branch}"))
    }

    fn show_commit(&self, sha: &str) -> Result<String> {
        self.record(format!("show {sha}"));
        Ok(format!("commit {sha}"))
    }

    fn show_stash(&self, entry: &StashEntry) -> Result<String> {
        self.record(format!("stash show {}", entry.ref_name()));
        Ok(format!("stash {}", entry.name))
    }

    fn stage_file(&self, name: &str) -> Result<()> {
        self.record(format!("stage {name}"));
        Ok(())
    }

    fn unstage_file(&self, file: &File) -> Result<()> {
        self.record(format!("unstage {}", file.name));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {message}"));
        Ok(())
    }

    fn stash_drop(&self, entry: &StashEntry) -> Result<()> {
        self.record(format!("stash drop {}", entry.ref_name()));
        Ok(())
    }

    fn repo_name(&self) -> String {
        "project".into()
    }
}

/// A 120x40 GUI over the default [`FakeRepo`], laid out but not started.
pub fn test_gui() -> Gui {
    test_gui_with(FakeRepo::default())
}

pub fn test_gui_with(repo: FakeRepo) -> Gui {
    let mut gui = Gui::new(
        Box::new(repo),
        Config::default(),
        Keybindings::default(),
        ViewService::new(120, 40),
    );
    gui.layout(120, 40).unwrap();
    gui
}

/// A GUI with every side panel loaded and the queue flushed.
pub fn loaded_gui() -> Gui {
    let mut gui = test_gui();
    gui.refresh_side_panels().unwrap();
    gui.views.flush_updates().unwrap();
    gui
}
