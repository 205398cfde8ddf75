//! Local record lists behind the management panels

use shared::models::{Barber, Branch, Service};
use shared::util::local_id;

use super::FormError;
use crate::views::filter::matches_search;

/// Record managed by a [`CrudStore`]
pub trait Record: Clone {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
    /// Fields matched by the panel search box
    fn search_fields(&self) -> Vec<&str>;
}

impl Record for Service {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

impl Record for Barber {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.specialty.as_deref());
        fields.extend(self.email.as_deref());
        fields
    }
}

impl Record for Branch {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.address.as_str()]
    }
}

/// Ordered list of records, edited optimistically
#[derive(Debug, Clone)]
pub struct CrudStore<T> {
    items: Vec<T>,
}

impl<T> Default for CrudStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> CrudStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    fn get_mut(&mut self, id: i64) -> Result<&mut T, FormError> {
        self.items
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(FormError::NotFound(id))
    }

    /// Id for a record created before the backend confirms it
    pub fn next_local_id(&self) -> i64 {
        local_id(self.items.iter().map(Record::id).max())
    }

    /// Append a record, returning its id
    pub fn insert(&mut self, record: T) -> i64 {
        let id = record.id();
        self.items.push(record);
        id
    }

    /// Swap the record with the same id
    pub fn replace(&mut self, record: T) -> Result<(), FormError> {
        let slot = self.get_mut(record.id())?;
        *slot = record;
        Ok(())
    }

    /// Apply `edit` to the record with `id`
    pub fn update(&mut self, id: i64, edit: impl FnOnce(&mut T)) -> Result<(), FormError> {
        edit(self.get_mut(id)?);
        Ok(())
    }

    /// Flip the active flag, returning the new value
    pub fn toggle_active(&mut self, id: i64) -> Result<bool, FormError> {
        let record = self.get_mut(id)?;
        let active = !record.is_active();
        record.set_active(active);
        Ok(active)
    }

    pub fn remove(&mut self, id: i64) -> Result<T, FormError> {
        let index = self
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or(FormError::NotFound(id))?;
        Ok(self.items.remove(index))
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|r| r.is_active()).count()
    }

    pub fn inactive_count(&self) -> usize {
        self.len() - self.active_count()
    }

    /// Records whose search fields contain `query`
    pub fn search(&self, query: &str) -> Vec<&T> {
        self.items
            .iter()
            .filter(|r| matches_search(&r.search_fields(), query))
            .collect()
    }
}

/// Open create/edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor<F> {
    /// `None` while creating
    pub editing: Option<i64>,
    pub form: F,
}

impl<F: Default> Editor<F> {
    pub fn create() -> Self {
        Self {
            editing: None,
            form: F::default(),
        }
    }
}

impl<F> Editor<F> {
    pub fn edit(id: i64, form: F) -> Self {
        Self {
            editing: Some(id),
            form,
        }
    }

    pub fn is_create(&self) -> bool {
        self.editing.is_none()
    }
}
