//! Repository access through the `git` command line.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Result, anyhow};

use crate::utils::ListItem;

/// A changed path as reported by `git status --porcelain`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    pub name: String,
    /// Two-letter porcelain status, e.g. `"M "` or `"??"`.
    pub short_status: String,
    pub has_staged_changes: bool,
    pub has_unstaged_changes: bool,
    pub tracked: bool,
    pub has_merge_conflicts: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    /// Short age of the branch tip, `*` for the checked-out branch.
    pub recency: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub name: String,
    pub pushed: bool,
}

impl Commit {
    /// First eight characters of the hash.
    pub fn short_sha(&self) -> &str {
        &self.sha[..self.sha.len().min(8)]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StashEntry {
    pub index: usize,
    pub name: String,
}

impl StashEntry {
    /// `stash@{n}`, as git expects it on the command line.
    pub fn ref_name(&self) -> String {
        format!("stash@{{{}}}", self.index)
    }
}

impl ListItem for File {
    fn display_strings(&self) -> Vec<String> {
        vec![self.short_status.clone(), self.name.clone()]
    }
}

impl ListItem for Branch {
    fn display_strings(&self) -> Vec<String> {
        vec![self.recency.clone(), self.name.clone()]
    }
}

impl ListItem for Commit {
    fn display_strings(&self) -> Vec<String> {
        let marker = if self.pushed { ' ' } else { '↑' };
        vec![format!("{marker}{}", self.short_sha()), self.name.clone()]
    }
}

impl ListItem for StashEntry {
    fn display_strings(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

/// Everything the GUI reads from or does to a repository.
pub trait GitRepo {
    fn repo_path(&self) -> &Path;
    /// Short name of `HEAD`, or the detached hash.
    fn current_branch(&self) -> Result<String>;
    /// `(ahead, behind)` relative to the upstream, `None` without upstream.
    fn upstream_counts(&self) -> Result<Option<(usize, usize)>>;
    /// Local branches, the checked-out one first.
    fn branches(&self) -> Result<Vec<Branch>>;
    fn files(&self) -> Result<Vec<File>>;
    /// Log of the checked-out branch.
    fn commits(&self) -> Result<Vec<Commit>>;
    fn stash_entries(&self) -> Result<Vec<StashEntry>>;
    /// Diff of one file; `cached` compares the index with `HEAD`.
    fn file_diff(&self, file: &File, cached: bool) -> Result<String>;
    /// Working tree content, conflict markers included.
    fn file_content(&self, name: &str) -> Result<String>;
    fn branch_graph(&self, branch: &str) -> Result<String>;
    fn show_commit(&self, sha: &str) -> Result<String>;
    fn show_stash(&self, entry: &StashEntry) -> Result<String>;
    fn stage_file(&self, name: &str) -> Result<()>;
    fn unstage_file(&self, file: &File) -> Result<()>;
    fn commit(&self, message: &str) -> Result<()>;
    fn stash_drop(&self, entry: &StashEntry) -> Result<()>;

    /// Directory name of the repository.
    fn repo_name(&self) -> String {
        let path = self.repo_path();
        path.canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// [`GitRepo`] backed by `git -C <repo>` subprocesses.
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    /// Run git in `repo_path`. The path is not checked until the first call.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Stdout of `git <args>`; a non-zero exit becomes an error carrying
    /// stderr.
    fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_path)
            .args(args)
            .output()?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(anyhow!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            ))
        }
    }
}

impl GitRepo for GitCli {
    fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn current_branch(&self) -> Result<String> {
        match self.run(&["symbolic-ref", "--short", "HEAD"]) {
            Ok(name) => Ok(name.trim().to_string()),
            // Detached HEAD.
            Err(_) => Ok(self.run(&["rev-parse", "--short", "HEAD"])?.trim().to_string()),
        }
    }

    fn upstream_counts(&self) -> Result<Option<(usize, usize)>> {
        let Ok(out) = self.run(&["rev-list", "--left-right", "--count", "HEAD...@{u}"]) else {
            return Ok(None);
        };
        let mut parts = out.split_whitespace().map(str::parse::<usize>);
        match (parts.next(), parts.next()) {
            (Some(Ok(ahead)), Some(Ok(behind))) => Ok(Some((ahead, behind))),
            _ => Err(anyhow!("unexpected rev-list output: {out:?}")),
        }
    }

    fn branches(&self) -> Result<Vec<Branch>> {
        let out = self.run(&[
            "for-each-ref",
            "--sort=-committerdate",
            "--format=%(HEAD)|%(refname:short)|%(committerdate:relative)",
            "refs/heads",
        ])?;
        Ok(parse_branches(&out))
    }

    fn files(&self) -> Result<Vec<File>> {
        let out = self.run(&["status", "--porcelain", "--untracked-files=all"])?;
        Ok(parse_status(&out))
    }

    fn commits(&self) -> Result<Vec<Commit>> {
        // An empty repository has no HEAD yet.
        let Ok(log) = self.run(&["log", "-n", "300", "--format=%H%x00%s"]) else {
            return Ok(vec![]);
        };
        let unpushed = self
            .run(&["rev-list", "@{u}..HEAD"])
            .map(|out| out.lines().map(str::to_string).collect::<HashSet<_>>())
            .unwrap_or_default();
        Ok(parse_commits(&log, &unpushed))
    }

    fn stash_entries(&self) -> Result<Vec<StashEntry>> {
        let out = self.run(&["stash", "list", "--format=%gs"])?;
        Ok(parse_stash(&out))
    }

    fn file_diff(&self, file: &File, cached: bool) -> Result<String> {
        if !file.tracked && !cached {
            return self.file_content(&file.name);
        }
        let mut args = vec!["diff"];
        if cached {
            args.push("--cached");
        }
        args.extend(["--", file.name.as_str()]);
        self.run(&args)
    }

    fn file_content(&self, name: &str) -> Result<String> {
        let bytes = fs::read(self.repo_path.join(name))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn branch_graph(&self, branch: &str) -> Result<String> {
        self.run(&[
            "log",
            "--graph",
            "--abbrev-commit",
            "--decorate",
            "--date=relative",
            "--pretty=medium",
            branch,
            "--",
        ])
    }

    fn show_commit(&self, sha: &str) -> Result<String> {
        self.run(&["show", "--stat", "-p", sha])
    }

    fn show_stash(&self, entry: &StashEntry) -> Result<String> {
        self.run(&["stash", "show", "-p", &entry.ref_name()])
    }

    fn stage_file(&self, name: &str) -> Result<()> {
        self.run(&["add", "--", name]).map(drop)
    }

    fn unstage_file(&self, file: &File) -> Result<()> {
        if file.tracked {
            self.run(&["reset", "HEAD", "--", &file.name]).map(drop)
        } else {
            self.run(&["rm", "--cached", "--force", "--", &file.name]).map(drop)
        }
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).map(drop)
    }

    fn stash_drop(&self, entry: &StashEntry) -> Result<()> {
        self.run(&["stash", "drop", &entry.ref_name()]).map(drop)
    }
}

const CONFLICT_STATUSES: [&str; 7] = ["DD", "AA", "UU", "AU", "UA", "UD", "DU"];

/// Parse `git status --porcelain` into files.
pub fn parse_status(out: &str) -> Vec<File> {
    out.lines()
        .filter(|l| l.len() > 3)
        .map(|line| {
            let short_status = line[..2].to_string();
            let path = &line[3..];
            // Renames are reported as "old -> new".
            let name = path.rsplit(" -> ").next().unwrap_or(path).to_string();
            let mut chars = short_status.chars();
            let x = chars.next().unwrap_or(' ');
            let y = chars.next().unwrap_or(' ');
            let tracked = short_status != "??";
            File {
                name,
                has_staged_changes: tracked && x != ' ',
                has_unstaged_changes: !tracked || y != ' ',
                tracked,
                has_merge_conflicts: CONFLICT_STATUSES.contains(&short_status.as_str()),
                short_status,
            }
        })
        .collect()
}

/// Parse `marker|name|relative date` lines, moving the checked-out branch
/// to the front.
pub fn parse_branches(out: &str) -> Vec<Branch> {
    let mut head = None;
    let mut branches = vec![];
    for line in out.lines() {
        let mut parts = line.splitn(3, '|');
        let (Some(marker), Some(name), Some(date)) = (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        if marker == "*" {
            head = Some(Branch {
                name: name.to_string(),
                recency: "*".into(),
            });
        } else {
            branches.push(Branch {
                name: name.to_string(),
                recency: abbreviate_age(date),
            });
        }
    }
    head.into_iter().chain(branches).collect()
}

/// "3 hours ago" -> "3h", "2 months ago" -> "2M".
fn abbreviate_age(relative: &str) -> String {
    let mut words = relative.split_whitespace();
    let (Some(n), Some(unit)) = (words.next(), words.next()) else {
        return relative.to_string();
    };
    let suffix = match unit.trim_end_matches(',') {
        u if u.starts_with("second") => "s",
        u if u.starts_with("minute") => "m",
        u if u.starts_with("hour") => "h",
        u if u.starts_with("day") => "d",
        u if u.starts_with("week") => "w",
        u if u.starts_with("month") => "M",
        u if u.starts_with("year") => "y",
        _ => return relative.to_string(),
    };
    format!("{n}{suffix}")
}

/// Parse `sha\0subject` lines.
pub fn parse_commits(out: &str, unpushed: &HashSet<String>) -> Vec<Commit> {
    out.lines()
        .filter_map(|line| line.split_once('\0'))
        .map(|(sha, name)| Commit {
            pushed: !unpushed.contains(sha),
            sha: sha.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// One entry per line of `git stash list`, in order.
pub fn parse_stash(out: &str) -> Vec<StashEntry> {
    out.lines()
        .enumerate()
        .map(|(index, name)| StashEntry {
            index,
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_classifies_changes() {
        let files = parse_status("M  staged.rs\n M unstaged.rs\n?? new.txt\nUU conflict.rs\nR  old.rs -> new.rs\n");
        assert_eq!(files.len(), 5);

        assert!(files[0].has_staged_changes && !files[0].has_unstaged_changes);
        assert!(!files[1].has_staged_changes && files[1].has_unstaged_changes);
        assert!(!files[2].tracked && files[2].has_unstaged_changes);
        assert!(files[3].has_merge_conflicts);
        assert_eq!(files[4].name, "new.rs");
    }

    #[test]
    fn checked_out_branch_comes_first() {
        let out = " |feature|2 hours ago\n*|main|3 days ago\n |old|1 year, 2 months ago\n";
        let branches = parse_branches(out);
        let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["main", "feature", "old"]);
        assert_eq!(branches[0].recency, "*");
        assert_eq!(branches[1].recency, "2h");
        assert_eq!(branches[2].recency, "1y");
    }

    #[test]
    fn commits_are_marked_unpushed() {
        let out = "aaaaaaaaaaaa\0second\nbbbbbbbbbbbb\0first\n";
        let unpushed: HashSet<String> = ["aaaaaaaaaaaa".to_string()].into();
        let commits = parse_commits(out, &unpushed);
        assert!(!commits[0].pushed);
        assert!(commits[1].pushed);
        assert_eq!(commits[0].short_sha(), "aaaaaaaa");
        assert_eq!(commits[0].display_strings()[0], "↑aaaaaaaa");
    }

    #[test]
    fn stash_entries_are_numbered_in_order() {
        let stash = parse_stash("WIP on main: fix\nOn feature: spike\n");
        assert_eq!(stash[1].index, 1);
        assert_eq!(stash[1].ref_name(), "stash@{1}");
    }
}
