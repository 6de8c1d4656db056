//! Side-panel terminal UI for a git repository: status, files, branches,
//! commits and stash on the left, the selected item on the right.

pub mod askpass;
pub mod config;
pub mod geometry;
pub mod git;
pub mod gui;
pub mod keybindings;
pub mod layout;
pub mod selection;
pub mod tui;
pub mod utils;
pub mod view;
pub mod view_service;
pub mod worker;
