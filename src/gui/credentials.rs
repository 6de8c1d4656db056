//! Username/password popup shown when a fetch needs authentication.

use anyhow::Result;

use super::{Gui, trimmed_content};
use crate::{
    askpass::Credentials, geometry::reset_origin, layout::confirmation_panel_dimensions,
    view::ViewName,
};

/// Which half of the credentials the popup is asking for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialStage {
    #[default]
    Username,
    Password,
}

impl Gui {
    /// Ask for a username, then a password, for the fetch that was refused.
    pub fn open_credentials_panel(&mut self) -> Result<()> {
        let from = self.current_view_name();
        if from == Some(ViewName::Menu) {
            self.discard_menu()?;
        }
        // A second request while the popup is up keeps the first origin.
        if from != Some(ViewName::Credentials) {
            self.state.credentials_return = self.popup_origin(from);
        }
        let (width, height) = self.views.size();
        let (x0, y0, x1, y1) = confirmation_panel_dimensions(width, height, "");
        self.views.set_view(ViewName::Credentials, x0, y0, x1, y1);
        self.state.credential_stage = CredentialStage::Username;
        self.state.username.clear();
        let v = self.views.view_mut(ViewName::Credentials)?;
        v.title = "Username".to_string();
        v.editable = true;
        v.mask = false;
        v.clear();
        reset_origin(v)?;
        self.switch_to(from, ViewName::Credentials)
    }

    /// Focus handler: show the confirm/close hints.
    pub fn handle_credentials_view_focused(&mut self) -> Result<()> {
        self.render_prompt_options()
    }

    /// Take the username, then the password; the second submit retries the
    /// fetch with both.
    pub(super) fn submit_credentials(&mut self) -> Result<()> {
        let v = self.views.view_mut(ViewName::Credentials)?;
        match self.state.credential_stage {
            CredentialStage::Username => {
                self.state.username = trimmed_content(v).to_string();
                self.state.credential_stage = CredentialStage::Password;
                v.title = "Password".to_string();
                v.mask = true;
                v.clear();
                reset_origin(v)?;
                self.resize_current_popup_panel()
            }
            CredentialStage::Password => {
                let credentials = Credentials {
                    username: std::mem::take(&mut self.state.username),
                    password: v.buffer().to_string(),
                };
                self.close_credentials_panel()?;
                self.request_fetch(Some(credentials));
                Ok(())
            }
        }
    }

    /// Hide the popup and drop the half-entered credentials.
    pub(super) fn close_credentials_panel(&mut self) -> Result<()> {
        self.state.username.clear();
        self.state.credential_stage = CredentialStage::Username;
        let v = self.views.view_mut(ViewName::Credentials)?;
        v.clear();
        v.mask = false;
        v.visible = false;

        let back = self.state.credentials_return.take();
        self.return_from_popup(ViewName::Credentials, back)
    }
}
