use crate::state::auth::use_auth;
use leavedesk_access::{landing_path, Role, LOGIN_PATH, UNAUTHORIZED_PATH};
use leptos::*;

/// The user's own landing page if it differs from this one, otherwise login.
fn return_path(roles: Option<&[Role]>) -> &'static str {
    match roles.map(landing_path) {
        Some(path) if path != UNAUTHORIZED_PATH => path,
        _ => LOGIN_PATH,
    }
}

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let auth = use_auth().state();
    let back = move || {
        let state = auth.get();
        return_path(state.identity.as_ref().map(|identity| identity.roles.as_slice()))
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface px-4">
            <div class="max-w-md w-full text-center space-y-4">
                <h1 class="text-3xl font-extrabold text-fg">"Access denied"</h1>
                <p class="text-fg-muted">"You do not have permission to view this page."</p>
                <a href=back class="text-action-primary-bg hover:underline">"Go back"</a>
            </div>
        </div>
    }
}
