//! Dashboard pages. Leave forms and request tables live with the backend's
//! own views; these pages only mark each zone.

use crate::state::auth::use_auth;
use leavedesk_access::{landing_path, UNAUTHORIZED_PATH};
use leptos::*;

mod profile;

pub use profile::ProfilePage;

#[component]
fn ZonePlaceholder(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <section class="px-4 py-6 sm:px-0">
            <h2 class="text-2xl font-bold text-fg">{title}</h2>
            <p class="mt-2 text-fg-muted">{description}</p>
        </section>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <ZonePlaceholder
            title="Admin Dashboard"
            description="Manage users, roles and leave policies."
        />
    }
}

#[component]
pub fn HrDashboardPage() -> impl IntoView {
    view! {
        <ZonePlaceholder
            title="HR Dashboard"
            description="Review and approve pending leave requests."
        />
    }
}

#[component]
pub fn EmployeeDashboardPage() -> impl IntoView {
    view! {
        <ZonePlaceholder
            title="My Leaves"
            description="Apply for leave and track your requests."
        />
    }
}

/// `/dashboard` itself points the user at their own zone.
#[component]
pub fn DashboardIndexPage() -> impl IntoView {
    let auth = use_auth().state();
    let target = move || {
        auth.get()
            .identity
            .map_or(UNAUTHORIZED_PATH, |identity| landing_path(&identity.roles))
    };
    view! {
        <section class="px-4 py-6 sm:px-0">
            <h2 class="text-2xl font-bold text-fg">"Welcome"</h2>
            <a href=target class="mt-2 inline-block text-action-primary-bg hover:underline">
                "Open your dashboard"
            </a>
        </section>
    }
}
