//! The panel GUI: state shared by every view, the startup sequence and the
//! main event loop.

mod actions;
mod branches;
mod commit_message;
mod commits;
mod confirmation;
mod credentials;
mod dispatch;
mod files;
mod focus;
mod handlers;
mod menu;
mod merge;
mod render;
mod staging;
mod stash;
mod status;
mod view_helpers;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::{
    config::Config,
    git::{Branch, Commit, File, GitCli, GitRepo, StashEntry},
    keybindings::Keybindings,
    layout,
    selection::Selection,
    tui::Tui,
    view::ViewName,
    view_service::ViewService,
    worker::{self, WorkerCmd, WorkerEvent},
};

pub use actions::Action;
pub use confirmation::ConfirmAction;
pub use credentials::CredentialStage;
pub use dispatch::options_map_to_string;
pub use focus::{FocusState, PRIMARY_PANELS, SECOND_CLASS_PANELS};
pub use menu::MenuItem;
pub use merge::{Conflict, find_conflicts};
pub use view_helpers::trimmed_content;

/// Per-panel data and selections.
#[derive(Debug, Default)]
pub struct PanelStates {
    pub files: Vec<File>,
    pub file_selection: Selection,
    pub branches: Vec<Branch>,
    pub branch_selection: Selection,
    pub commits: Vec<Commit>,
    pub commit_selection: Selection,
    pub stash_entries: Vec<StashEntry>,
    pub stash_selection: Selection,
    pub menu_items: Vec<MenuItem>,
    pub menu_selection: Selection,
    pub conflicts: Vec<Conflict>,
    pub conflict_index: usize,
    pub confirm_action: ConfirmAction,
    pub credential_stage: CredentialStage,
    pub username: String,
    /// Views the reusable popups were opened from.
    pub commit_message_return: Option<ViewName>,
    pub credentials_return: Option<ViewName>,
}

/// Views, focus and panel data for one repository.
pub struct Gui {
    pub views: ViewService,
    pub focus: FocusState,
    pub state: PanelStates,
    pub repo: Box<dyn GitRepo>,
    pub cfg: Config,
    pub keys: Keybindings,
    /// Command channel to the background worker, absent in tests.
    pub worker_tx: Option<mpsc::Sender<WorkerCmd>>,
}

impl Gui {
    pub fn new(repo: Box<dyn GitRepo>, cfg: Config, keys: Keybindings, views: ViewService) -> Self {
        Self {
            views,
            focus: FocusState::default(),
            state: PanelStates::default(),
            repo,
            cfg,
            keys,
            worker_tx: None,
        }
    }

    /// Create or move every fixed view for a terminal of the given size.
    pub fn layout(&mut self, width: i32, height: i32) -> Result<()> {
        self.views.set_size(width, height);
        let focused = self.current_view_name();
        for (name, (x0, y0, x1, y1)) in
            layout::main_layout(width, height, self.cfg.gui.side_panel_ratio, focused)
        {
            if self.views.set_view(name, x0, y0, x1, y1) {
                self.views.view_mut(name)?.title = panel_title(name).into();
            }
            if name == ViewName::Main && self.views.view(ViewName::Staging).is_ok() {
                self.views.set_view(ViewName::Staging, x0, y0, x1, y1);
            }
        }
        if self.views.view(ViewName::Menu).is_ok() {
            self.resize_popup_panel(ViewName::Menu)?;
        }
        self.resize_current_popup_panel()
    }

    /// Load every panel and focus the configured view.
    pub fn start(&mut self) -> Result<()> {
        self.refresh_side_panels()?;
        let initial = match self.cfg.gui.initial_view.parse::<ViewName>() {
            Ok(name) if PRIMARY_PANELS.contains(&name) => name,
            Ok(name) => {
                tracing::warn!(view = %name, "initial view is not a side panel, using files");
                ViewName::Files
            }
            Err(e) => {
                tracing::warn!("{e}, using files");
                ViewName::Files
            }
        };
        self.switch_to(None, initial)?;
        if self.cfg.git.fetch_on_startup {
            self.request_fetch(None);
        }
        Ok(())
    }

    /// Apply a worker event to the panels.
    pub fn handle_worker_event(&mut self, ev: WorkerEvent) -> Result<()> {
        match ev {
            WorkerEvent::RefreshFiles => self.refresh_files(),
            WorkerEvent::FetchDone => {
                tracing::info!("fetch finished");
                self.refresh_side_panels()
            }
            WorkerEvent::FetchNeedsCredentials => self.open_credentials_panel(),
            WorkerEvent::Log(s) => {
                tracing::info!("worker: {s}");
                Ok(())
            }
            WorkerEvent::Error(s) => self.create_error_panel(&s),
        }
    }

    /// Ask the worker for a fetch; a no-op without a worker.
    pub fn request_fetch(&mut self, credentials: Option<crate::askpass::Credentials>) {
        let Some(tx) = &self.worker_tx else {
            tracing::warn!("fetch requested without a worker");
            return;
        };
        if let Err(e) = tx.try_send(WorkerCmd::Fetch { credentials }) {
            tracing::warn!("fetch request dropped: {e}");
        }
    }
}

fn panel_title(name: ViewName) -> &'static str {
    match name {
        ViewName::Status => "Status",
        ViewName::Files => "Files",
        ViewName::Branches => "Local Branches",
        ViewName::Commits => "Commits",
        ViewName::Stash => "Stash",
        ViewName::Main => "Diff",
        ViewName::Staging => "Staging",
        ViewName::Menu => "Menu",
        ViewName::Confirmation => "Confirm",
        ViewName::CommitMessage => "Commit message",
        ViewName::Credentials => "Username",
        ViewName::Options => "",
    }
}

/// Run the GUI until the user quits.
pub async fn run_app(terminal: &mut Tui, cfg: Config, keys: Keybindings) -> Result<()> {
    let repo = GitCli::new(&cfg.git.repo_path);

    // Background worker: refresh ticks and fetches.
    let (tx_cmd, rx_cmd) = mpsc::channel::<WorkerCmd>(16);
    let (tx_ev, mut rx_ev) = mpsc::channel::<WorkerEvent>(64);
    tokio::spawn(worker::run(
        rx_cmd,
        tx_ev,
        worker::WorkerSettings::from_config(&cfg),
    ));

    let size = terminal.size()?;
    let views = ViewService::new(size.width.into(), size.height.into());
    let mut gui = Gui::new(Box::new(repo), cfg, keys, views);
    gui.worker_tx = Some(tx_cmd.clone());

    gui.layout(size.width.into(), size.height.into())?;
    gui.start()?;

    loop {
        let size = terminal.size()?;
        gui.layout(size.width.into(), size.height.into())?;
        // Apply queued renders, then draw. Render targets can vanish between
        // scheduling and flushing; the next tick redraws anyway.
        if let Err(e) = gui.views.flush_updates() {
            tracing::debug!("update skipped: {e}");
        }
        terminal.draw(|f| render::draw(f, &gui))?;

        // Worker events, then at most one key press per tick.

        while let Ok(ev) = rx_ev.try_recv() {
            if let Err(e) = gui.handle_worker_event(ev) {
                gui.create_error_panel(&e.to_string())?;
            }
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(k) = event::read()?
            && k.kind == KeyEventKind::Press
        {
            match handlers::handle_key(&mut gui, k) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => gui.create_error_panel(&e.to_string())?,
            }
        }
    }

    // The worker may already be gone; nothing to do then.
    let _ = tx_cmd.send(WorkerCmd::Shutdown).await;
    Ok(())
}
