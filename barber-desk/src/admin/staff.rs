//! Staff (barbers) management panel

use barber_client::{BookingApi, ClientResult};
use shared::models::{Barber, BarberCreate};

use super::store::{CrudStore, Editor};
use super::{optional, required, FormError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub branch_id: Option<i64>,
}

impl StaffForm {
    fn from_barber(barber: &Barber) -> Self {
        Self {
            name: barber.name.clone(),
            email: barber.email.clone().unwrap_or_default(),
            phone: barber.phone.clone().unwrap_or_default(),
            specialty: barber.specialty.clone().unwrap_or_default(),
            branch_id: barber.branch_id,
        }
    }

    fn payload(&self) -> Result<BarberCreate, FormError> {
        Ok(BarberCreate {
            name: required(&self.name, "name")?.to_string(),
            email: optional(&self.email),
            phone: optional(&self.phone),
            specialty: optional(&self.specialty),
            branch_id: self.branch_id,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaffPanel {
    store: CrudStore<Barber>,
    editor: Option<Editor<StaffForm>>,
    search: String,
}

impl StaffPanel {
    pub fn new(staff: Vec<Barber>) -> Self {
        Self {
            store: CrudStore::new(staff),
            ..Self::default()
        }
    }

    pub async fn load(api: &dyn BookingApi) -> ClientResult<Self> {
        Ok(Self::new(api.list_staff().await?))
    }

    pub fn store(&self) -> &CrudStore<Barber> {
        &self.store
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn visible(&self) -> Vec<&Barber> {
        self.store.search(&self.search)
    }

    pub fn active_count(&self) -> usize {
        self.store.active_count()
    }

    pub fn editor(&self) -> Option<&Editor<StaffForm>> {
        self.editor.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut StaffForm> {
        self.editor.as_mut().map(|e| &mut e.form)
    }

    pub fn open_create(&mut self) -> &mut StaffForm {
        &mut self.editor.insert(Editor::create()).form
    }

    pub fn open_edit(&mut self, id: i64) -> Result<&mut StaffForm, FormError> {
        let barber = self.store.get(id).ok_or(FormError::NotFound(id))?;
        let form = StaffForm::from_barber(barber);
        Ok(&mut self.editor.insert(Editor::edit(id, form)).form)
    }

    pub fn cancel(&mut self) {
        self.editor = None;
    }

    /// Save the open form; new barbers start active and are posted to
    /// `/usuarios` when `api` is given
    pub async fn save(&mut self, api: Option<&dyn BookingApi>) -> Result<i64, FormError> {
        let editor = self.editor.as_ref().ok_or(FormError::NoForm)?;
        let (editing, payload) = (editor.editing, editor.form.payload()?);

        let id = match editing {
            Some(id) => {
                self.store.update(id, |b| {
                    b.name = payload.name;
                    b.email = payload.email;
                    b.phone = payload.phone;
                    b.specialty = payload.specialty;
                    b.branch_id = payload.branch_id;
                })?;
                id
            }
            None => {
                let local_id = self.store.insert(Barber {
                    id: self.store.next_local_id(),
                    name: payload.name.clone(),
                    email: payload.email.clone(),
                    phone: payload.phone.clone(),
                    specialty: payload.specialty.clone(),
                    branch_id: payload.branch_id,
                    is_active: true,
                    schedule: None,
                });
                match api {
                    Some(api) => self.sync_created(api, local_id, &payload).await,
                    None => local_id,
                }
            }
        };

        self.editor = None;
        Ok(id)
    }

    async fn sync_created(
        &mut self,
        api: &dyn BookingApi,
        local_id: i64,
        payload: &BarberCreate,
    ) -> i64 {
        match api.create_staff(payload).await {
            Ok(created) => {
                let id = created.id;
                if self.store.remove(local_id).is_ok() {
                    self.store.insert(created);
                }
                tracing::info!(barber_id = id, "Barber registered");
                id
            }
            Err(e) => {
                tracing::warn!(error = %e, local_id, "Barber sync failed, keeping local copy");
                local_id
            }
        }
    }

    pub fn toggle_active(&mut self, id: i64) -> Result<bool, FormError> {
        self.store.toggle_active(id)
    }

    pub fn delete(&mut self, id: i64) -> Result<Barber, FormError> {
        self.store.remove(id)
    }
}
