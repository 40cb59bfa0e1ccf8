use crate::state::auth::use_auth;
use leptos::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth().state();
    let field = move |pick: fn(&leavedesk_access::SessionIdentity) -> Option<String>| {
        move || {
            auth.get()
                .identity
                .as_ref()
                .and_then(pick)
                .unwrap_or_else(|| "-".to_string())
        }
    };
    let full_name = field(|identity| identity.full_name.clone());
    let email = field(|identity| identity.email.clone());
    let roles = field(|identity| {
        let tags: Vec<&str> = identity.roles.iter().map(|role| role.as_str()).collect();
        Some(tags.join(", "))
    });

    view! {
        <section class="px-4 py-6 sm:px-0">
            <h2 class="text-2xl font-bold text-fg">"Profile"</h2>
            <dl class="mt-4 grid grid-cols-1 gap-4 sm:grid-cols-3">
                <div>
                    <dt class="text-sm text-fg-muted">"Name"</dt>
                    <dd class="text-fg">{full_name}</dd>
                </div>
                <div>
                    <dt class="text-sm text-fg-muted">"Email"</dt>
                    <dd class="text-fg">{email}</dd>
                </div>
                <div>
                    <dt class="text-sm text-fg-muted">"Roles"</dt>
                    <dd class="text-fg">{roles}</dd>
                </div>
            </dl>
        </section>
    }
}
