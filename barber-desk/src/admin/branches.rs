//! Branch management panel
//!
//! The backend exposes no branch creation endpoint, so every change here is
//! local to the session.

use barber_client::{BookingApi, ClientResult};
use shared::models::Branch;

use super::store::{CrudStore, Editor};
use super::{optional, required, FormError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub is_active: bool,
}

impl Default for BranchForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            is_active: true,
        }
    }
}

impl BranchForm {
    fn from_branch(branch: &Branch) -> Self {
        Self {
            name: branch.name.clone(),
            address: branch.address.clone(),
            phone: branch.phone.clone().unwrap_or_default(),
            is_active: branch.is_active,
        }
    }

    fn apply(&self, branch: &mut Branch) -> Result<(), FormError> {
        let name = required(&self.name, "name")?;
        let address = required(&self.address, "address")?;
        branch.name = name.to_string();
        branch.address = address.to_string();
        branch.phone = optional(&self.phone);
        branch.is_active = self.is_active;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BranchesPanel {
    store: CrudStore<Branch>,
    editor: Option<Editor<BranchForm>>,
}

impl BranchesPanel {
    pub fn new(branches: Vec<Branch>) -> Self {
        Self {
            store: CrudStore::new(branches),
            editor: None,
        }
    }

    pub async fn load(api: &dyn BookingApi) -> ClientResult<Self> {
        Ok(Self::new(api.list_branches().await?))
    }

    pub fn store(&self) -> &CrudStore<Branch> {
        &self.store
    }

    pub fn editor(&self) -> Option<&Editor<BranchForm>> {
        self.editor.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut BranchForm> {
        self.editor.as_mut().map(|e| &mut e.form)
    }

    pub fn open_create(&mut self) -> &mut BranchForm {
        &mut self.editor.insert(Editor::create()).form
    }

    pub fn open_edit(&mut self, id: i64) -> Result<&mut BranchForm, FormError> {
        let branch = self.store.get(id).ok_or(FormError::NotFound(id))?;
        let form = BranchForm::from_branch(branch);
        Ok(&mut self.editor.insert(Editor::edit(id, form)).form)
    }

    pub fn cancel(&mut self) {
        self.editor = None;
    }

    pub fn save(&mut self) -> Result<i64, FormError> {
        let editor = self.editor.as_ref().ok_or(FormError::NoForm)?;

        let id = match editor.editing {
            Some(id) => {
                let mut branch = self.store.get(id).cloned().ok_or(FormError::NotFound(id))?;
                editor.form.apply(&mut branch)?;
                self.store.replace(branch)?;
                id
            }
            None => {
                let mut branch = Branch {
                    id: self.store.next_local_id(),
                    name: String::new(),
                    address: String::new(),
                    phone: None,
                    is_active: true,
                };
                editor.form.apply(&mut branch)?;
                self.store.insert(branch)
            }
        };

        tracing::debug!(branch_id = id, "Branch saved locally");
        self.editor = None;
        Ok(id)
    }

    pub fn toggle_active(&mut self, id: i64) -> Result<bool, FormError> {
        self.store.toggle_active(id)
    }

    pub fn delete(&mut self, id: i64) -> Result<Branch, FormError> {
        self.store.remove(id)
    }
}
