//! Services management panel

use barber_client::{BookingApi, ClientResult};
use shared::models::{Service, ServiceCreate, DEFAULT_SERVICE_MINUTES};
use shared::Decimal;

use super::store::{CrudStore, Editor};
use super::{required, FormError};

/// Service form as typed by the admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: String,
    pub is_active: bool,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            duration: DEFAULT_SERVICE_MINUTES.to_string(),
            price: String::new(),
            is_active: true,
        }
    }
}

impl ServiceForm {
    fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            duration: service.duration.to_string(),
            price: service.price.to_string(),
            is_active: service.is_active,
        }
    }

    /// Minutes; unparsable or zero falls back to the default length
    pub fn duration_minutes(&self) -> u32 {
        match self.duration.trim().parse::<u32>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => DEFAULT_SERVICE_MINUTES,
        }
    }

    /// Price; unparsable falls back to zero
    pub fn price_value(&self) -> Decimal {
        self.price.trim().parse().unwrap_or(Decimal::ZERO)
    }

    fn payload(&self) -> Result<ServiceCreate, FormError> {
        Ok(ServiceCreate {
            name: required(&self.name, "name")?.to_string(),
            description: self.description.trim().to_string(),
            duration: self.duration_minutes(),
            price: self.price_value(),
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServicesPanel {
    store: CrudStore<Service>,
    editor: Option<Editor<ServiceForm>>,
    search: String,
}

impl ServicesPanel {
    pub fn new(services: Vec<Service>) -> Self {
        Self {
            store: CrudStore::new(services),
            ..Self::default()
        }
    }

    pub async fn load(api: &dyn BookingApi) -> ClientResult<Self> {
        Ok(Self::new(api.list_services().await?))
    }

    pub fn store(&self) -> &CrudStore<Service> {
        &self.store
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Services matching the search box
    pub fn visible(&self) -> Vec<&Service> {
        self.store.search(&self.search)
    }

    pub fn active_count(&self) -> usize {
        self.store.active_count()
    }

    pub fn inactive_count(&self) -> usize {
        self.store.inactive_count()
    }

    pub fn editor(&self) -> Option<&Editor<ServiceForm>> {
        self.editor.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ServiceForm> {
        self.editor.as_mut().map(|e| &mut e.form)
    }

    pub fn open_create(&mut self) -> &mut ServiceForm {
        &mut self.editor.insert(Editor::create()).form
    }

    pub fn open_edit(&mut self, id: i64) -> Result<&mut ServiceForm, FormError> {
        let service = self.store.get(id).ok_or(FormError::NotFound(id))?;
        let form = ServiceForm::from_service(service);
        Ok(&mut self.editor.insert(Editor::edit(id, form)).form)
    }

    pub fn cancel(&mut self) {
        self.editor = None;
    }

    /// Save the open form
    ///
    /// Edits stay local. New services are added locally and, when `api` is
    /// given, posted to `/servicios`; the server copy replaces the local one
    /// on success. Returns the id of the saved service.
    pub async fn save(&mut self, api: Option<&dyn BookingApi>) -> Result<i64, FormError> {
        let editor = self.editor.as_ref().ok_or(FormError::NoForm)?;
        let (editing, payload) = (editor.editing, editor.form.payload()?);

        let id = match editing {
            Some(id) => {
                self.store.update(id, |s| {
                    s.name = payload.name;
                    s.description = payload.description;
                    s.duration = payload.duration;
                    s.price = payload.price;
                    s.is_active = payload.is_active;
                })?;
                id
            }
            None => {
                let local = Service {
                    id: self.store.next_local_id(),
                    name: payload.name.clone(),
                    description: payload.description.clone(),
                    duration: payload.duration,
                    price: payload.price,
                    is_active: payload.is_active,
                };
                let local_id = self.store.insert(local);
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
        payload: &ServiceCreate,
    ) -> i64 {
        match api.create_service(payload).await {
            Ok(created) => {
                let id = created.id;
                if self.store.remove(local_id).is_ok() {
                    self.store.insert(created);
                }
                tracing::info!(service_id = id, "Service created");
                id
            }
            Err(e) => {
                tracing::warn!(error = %e, local_id, "Service sync failed, keeping local copy");
                local_id
            }
        }
    }

    pub fn toggle_active(&mut self, id: i64) -> Result<bool, FormError> {
        self.store.toggle_active(id)
    }

    pub fn delete(&mut self, id: i64) -> Result<Service, FormError> {
        self.store.remove(id)
    }
}
