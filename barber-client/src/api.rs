//! Typed REST endpoints of the booking backend

use async_trait::async_trait;
use shared::models::{
    Appointment, AppointmentCreate, Barber, BarberCreate, Branch, Service, ServiceCreate,
};

use crate::http::{HttpClient, RequestOptions};
use crate::ClientResult;

/// Endpoint paths
pub mod paths {
    pub const BRANCHES: &str = "/sucursales";
    pub const SERVICES: &str = "/servicios";
    pub const STAFF: &str = "/usuarios";
    pub const APPOINTMENTS: &str = "/turnos";
}

/// Operations the screens need from the backend
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn list_branches(&self) -> ClientResult<Vec<Branch>>;
    async fn list_services(&self) -> ClientResult<Vec<Service>>;
    async fn list_staff(&self) -> ClientResult<Vec<Barber>>;
    async fn list_appointments(&self) -> ClientResult<Vec<Appointment>>;
    async fn create_service(&self, payload: &ServiceCreate) -> ClientResult<Service>;
    async fn create_staff(&self, payload: &BarberCreate) -> ClientResult<Barber>;
    async fn create_appointment(&self, payload: &AppointmentCreate) -> ClientResult<Appointment>;
}

#[async_trait]
impl BookingApi for HttpClient {
    async fn list_branches(&self) -> ClientResult<Vec<Branch>> {
        self.get(paths::BRANCHES).await
    }

    async fn list_services(&self) -> ClientResult<Vec<Service>> {
        self.get(paths::SERVICES).await
    }

    async fn list_staff(&self) -> ClientResult<Vec<Barber>> {
        self.get(paths::STAFF).await
    }

    async fn list_appointments(&self) -> ClientResult<Vec<Appointment>> {
        self.get(paths::APPOINTMENTS).await
    }

    async fn create_service(&self, payload: &ServiceCreate) -> ClientResult<Service> {
        self.post(paths::SERVICES, payload, &RequestOptions::success("Servicio guardado."))
            .await
    }

    async fn create_staff(&self, payload: &BarberCreate) -> ClientResult<Barber> {
        self.post(paths::STAFF, payload, &RequestOptions::success("Barbero registrado."))
            .await
    }

    async fn create_appointment(&self, payload: &AppointmentCreate) -> ClientResult<Appointment> {
        tracing::info!(
            barber_id = payload.barber_id,
            service_id = payload.service_id,
            start = %payload.start,
            "Booking appointment"
        );
        self.post(paths::APPOINTMENTS, payload, &RequestOptions::success("¡Turno confirmado!"))
            .await
    }
}
