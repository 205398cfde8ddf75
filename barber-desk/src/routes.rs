//! Route table and navigation state

use std::sync::RwLock;

use barber_client::{Navigator, LOGIN_PATH};
use serde::{Deserialize, Serialize};

use crate::error::{DeskError, DeskResult};

/// Who is using the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Admin,
}

impl Role {
    /// Route shown right after login
    pub fn landing(&self) -> Route {
        match self {
            Self::Client => Route::ClientHome,
            Self::Admin => Route::AdminHome,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    ClientHome,
    ClientBooking,
    AdminHome,
    AdminBranches,
    AdminServices,
    AdminStaff,
    AdminSchedules,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Self::Login,
        Self::ClientHome,
        Self::ClientBooking,
        Self::AdminHome,
        Self::AdminBranches,
        Self::AdminServices,
        Self::AdminStaff,
        Self::AdminSchedules,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::ClientHome => "/client",
            Self::ClientBooking => "/client/booking",
            Self::AdminHome => "/admin",
            Self::AdminBranches => "/admin/branches",
            Self::AdminServices => "/admin/services",
            Self::AdminStaff => "/admin/staff",
            Self::AdminSchedules => "/admin/schedules",
        }
    }

    /// Resolve a path; `/login` is an alias of the root login page
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() || path == LOGIN_PATH || trimmed == LOGIN_PATH {
            return Some(Self::Login);
        }
        Self::ALL.into_iter().find(|r| r.path() == trimmed)
    }

    /// Role allowed to open the route, `None` for public routes
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::Login => None,
            Self::ClientHome | Self::ClientBooking => Some(Role::Client),
            _ => Some(Role::Admin),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Iniciar sesión",
            Self::ClientHome => "Mi perfil",
            Self::ClientBooking => "Nueva reserva",
            Self::AdminHome => "Dashboard",
            Self::AdminBranches => "Sucursales",
            Self::AdminServices => "Servicios",
            Self::AdminStaff => "Personal",
            Self::AdminSchedules => "Horarios",
        }
    }
}

/// Current route of the session
///
/// Implements [`Navigator`] so the HTTP client can send the user back to the
/// login page when the backend rejects the token.
#[derive(Debug)]
pub struct Router {
    current: RwLock<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn current(&self) -> Route {
        match self.current.read() {
            Ok(route) => *route,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn go(&self, route: Route) {
        tracing::debug!(path = route.path(), "Route change");
        match self.current.write() {
            Ok(mut current) => *current = route,
            Err(poisoned) => *poisoned.into_inner() = route,
        }
    }

    /// Open a route as `role`, sending mismatched roles to their landing page
    pub fn open(&self, route: Route, role: Option<Role>) -> Route {
        let target = match (route.required_role(), role) {
            (None, _) => route,
            (Some(_), None) => Route::Login,
            (Some(required), Some(role)) if required == role => route,
            (Some(_), Some(role)) => role.landing(),
        };
        self.go(target);
        target
    }

    /// Like [`Router::open`], but a redirect is an error
    pub fn enter(&self, route: Route, role: Option<Role>) -> DeskResult<()> {
        if self.open(route, role) == route {
            Ok(())
        } else {
            Err(DeskError::Forbidden(route.path()))
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        match Route::parse(path) {
            Some(route) => self.go(route),
            None => {
                tracing::warn!(path, "Unknown route, falling back to login");
                self.go(Route::Login);
            }
        }
    }
}
