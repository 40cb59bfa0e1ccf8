use crate::state::auth::use_auth;
use leavedesk_access::{navigation::NavLink, navigation_for, zone::PROFILE_PATH};
use leptos::*;

const NAV_LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_auth();
    let auth = ctx.state();
    let links = move || -> &'static [NavLink] {
        auth.get()
            .identity
            .as_ref()
            .map(|identity| navigation_for(&identity.roles))
            .unwrap_or(&[])
    };
    let initial = move || {
        auth.get()
            .identity
            .as_ref()
            .and_then(|identity| identity.display_initial())
            .map(String::from)
            .unwrap_or_default()
    };
    let signed_in = move || auth.get().identity.is_some();

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Leave Desk"</h1>
                    <nav class="flex items-center space-x-4">
                        {move || {
                            links()
                                .iter()
                                .map(|link| {
                                    view! { <a href=link.href class=NAV_LINK_CLASS>{link.label}</a> }
                                })
                                .collect_view()
                        }}
                        <Show when=signed_in fallback=|| ()>
                            <a
                                href=PROFILE_PATH
                                class="inline-flex h-8 w-8 items-center justify-center rounded-full bg-action-primary-bg text-action-primary-text text-sm font-semibold"
                                title="Profile"
                            >
                                {initial}
                            </a>
                            <button on:click=move |_| ctx.logout() class=NAV_LINK_CLASS>
                                "Logout"
                            </button>
                        </Show>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn DashboardLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">{children()}</main>
        </div>
    }
}
