use crate::{
    state::auth::{use_auth, AuthState},
    utils::navigate_to,
};
use leavedesk_access::{landing_path, LOGIN_PATH};
use leptos::*;

/// Where `/` sends the visitor: a signed-in user goes to their own zone.
fn home_redirect(state: &AuthState) -> Option<&'static str> {
    state
        .identity
        .as_ref()
        .map(|identity| landing_path(&identity.roles))
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth().state();

    create_effect(move |_| {
        if let Some(target) = auth.with(home_redirect) {
            navigate_to(target);
        }
    });

    let signed_out = move || auth.with(|state| !state.loading && state.identity.is_none());

    view! {
        <Show when=signed_out fallback=|| ()>
            <main class="min-h-screen flex items-center justify-center bg-surface px-4">
                <section class="max-w-sm w-full rounded-lg bg-surface-elevated shadow p-8 space-y-6">
                    <header class="space-y-1">
                        <h1 class="text-2xl font-bold text-fg">"Leave Desk"</h1>
                        <p class="text-sm text-fg-muted">"Sign in to request or approve leave."</p>
                    </header>
                    <a
                        href=LOGIN_PATH
                        class="block w-full text-center px-4 py-2 rounded-md text-action-primary-text bg-action-primary-bg"
                    >
                        "Sign in"
                    </a>
                </section>
            </main>
        </Show>
    }
}
