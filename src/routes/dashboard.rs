//! Dashboard shell endpoint.

use axum::{Extension, response::Json};
use serde::Serialize;

use crate::session::models::{CurrentSession, SessionUser};

#[derive(Debug, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

/// Shell view model: the signed-in identity plus sidebar navigation
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: SessionUser,
    pub nav: Vec<NavItem>,
}

pub async fn overview(Extension(session): Extension<CurrentSession>) -> Json<DashboardView> {
    Json(DashboardView {
        user: session.user,
        nav: vec![
            NavItem { label: "Overview", href: "/dashboard" },
            NavItem { label: "Orders", href: "/dashboard/orders" },
            NavItem { label: "Clients", href: "#" },
            NavItem { label: "Products", href: "#" },
            NavItem { label: "Reports", href: "#" },
            NavItem { label: "Settings", href: "#" },
        ],
    })
}
