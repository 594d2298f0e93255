//! Role-gated navigation policy.
//!
//! A single pure function decides, for every request, whether the viewer
//! may render the requested area or must be redirected elsewhere. The web
//! layer consumes it at the routing boundary (auth extractors and the
//! auth-page handlers); views never re-check roles ad hoc.

use crate::types::Role;

/// The viewer classes the policy distinguishes.
///
/// Transitions happen only through login (`Anonymous -> Customer | Admin`)
/// and logout (any -> `Anonymous`); there is no direct customer/admin
/// transition without a fresh login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Customer,
    Admin,
}

impl Viewer {
    /// Derive the viewer from an optional authenticated role.
    #[must_use]
    pub const fn from_role(role: Option<Role>) -> Self {
        match role {
            None => Self::Anonymous,
            Some(Role::Customer) => Self::Customer,
            Some(Role::Admin) => Self::Admin,
        }
    }
}

/// Logical areas of the site, as coarse as the policy needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteArea {
    /// Home page and menu browsing.
    Public,
    /// Viewing the cart (submitting it is [`RouteArea::Checkout`]).
    CartView,
    /// Submitting an order.
    Checkout,
    /// A customer's past orders.
    OrderHistory,
    /// The admin dashboard and everything under it.
    Admin,
    /// Login and registration pages.
    Auth,
}

/// Where a redirect decision points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    Home,
    AdminDashboard,
}

impl Destination {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Home => "/",
            Self::AdminDashboard => "/admin",
        }
    }
}

/// The decision for one (viewer, area) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Render,
    Redirect(Destination),
}

/// Decide whether `viewer` may see `area`.
///
/// Pure and idempotent; safe to re-evaluate on every request.
#[must_use]
pub const fn route_access(viewer: Viewer, area: RouteArea) -> Access {
    match (viewer, area) {
        // Catalog browsing and the cart view are public.
        (_, RouteArea::Public | RouteArea::CartView) => Access::Render,

        // Placing an order and reading history require an identity.
        (Viewer::Anonymous, RouteArea::Checkout | RouteArea::OrderHistory) => {
            Access::Redirect(Destination::Login)
        }
        (Viewer::Customer | Viewer::Admin, RouteArea::Checkout | RouteArea::OrderHistory) => {
            Access::Render
        }

        // The dashboard requires the admin role; everyone else is sent to
        // login rather than shown a forbidden page.
        (Viewer::Admin, RouteArea::Admin) => Access::Render,
        (Viewer::Anonymous | Viewer::Customer, RouteArea::Admin) => {
            Access::Redirect(Destination::Login)
        }

        // Authenticated users are bounced off the login/register pages.
        (Viewer::Anonymous, RouteArea::Auth) => Access::Render,
        (Viewer::Customer, RouteArea::Auth) => Access::Redirect(Destination::Home),
        (Viewer::Admin, RouteArea::Auth) => Access::Redirect(Destination::AdminDashboard),
    }
}
