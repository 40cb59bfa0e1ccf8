use crate::{state::auth::use_auth, utils::navigate_to};
use leavedesk_access::{ClientAccessGate, ClientDecision};
use leptos::*;
use leptos_router::use_location;
use std::cell::RefCell;

/// Re-validates the current page against the signed-in identity's roles.
#[component]
pub fn RequireRole(children: ChildrenFn) -> impl IntoView {
    let location = use_location();
    let path = Signal::derive(move || location.pathname.get());
    view! { <RoleGate path=path>{children()}</RoleGate> }
}

/// Renders `children` only while the gate decides `Render`. A redirect is
/// performed at most once per (path, identity) pair.
#[component]
pub fn RoleGate(#[prop(into)] path: Signal<String>, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth().state();
    let decision = create_memo(move |_| {
        let state = auth.get();
        ClientAccessGate::decide(state.identity.as_ref(), &path.get())
    });

    let gate = RefCell::new(ClientAccessGate::new());
    create_effect(move |_| {
        let state = auth.get();
        let target = gate.borrow_mut().observe(state.identity.as_ref(), &path.get());
        if let Some(target) = target {
            navigate_to(target);
        }
    });

    view! {
        <Show when=move || should_render_children(decision.get()) fallback=|| ()>
            {children()}
        </Show>
    }
}

fn should_render_children(decision: ClientDecision) -> bool {
    decision == ClientDecision::Render
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::RoleGate;
    use crate::state::auth::{provide_test_auth, AuthState};
    use crate::test_support::helpers::{identity, provide_auth};
    use crate::test_support::ssr::render_to_string;
    use leavedesk_access::Role;
    use leptos::*;

    #[test]
    fn renders_children_for_permitted_role() {
        let html = render_to_string(|| {
            provide_auth(Some(identity(&[Role::Hr])));
            view! {
                <RoleGate path={Signal::derive(|| "/dashboard/hr".to_string())}>
                    {|| view! { <div>"zone-content"</div> }}
                </RoleGate>
            }
        });
        assert!(html.contains("zone-content"));
    }

    #[test]
    fn admin_sees_every_zone() {
        for path in ["/dashboard/admin", "/dashboard/hr", "/dashboard/employee"] {
            let html = render_to_string(move || {
                provide_auth(Some(identity(&[Role::Admin])));
                view! {
                    <RoleGate path={Signal::derive(move || path.to_string())}>
                        {|| view! { <div>"zone-content"</div> }}
                    </RoleGate>
                }
            });
            assert!(html.contains("zone-content"), "{}", path);
        }
    }

    #[test]
    fn hides_children_for_forbidden_zone() {
        let html = render_to_string(|| {
            provide_auth(Some(identity(&[Role::Employee])));
            view! {
                <RoleGate path={Signal::derive(|| "/dashboard/hr".to_string())}>
                    {|| view! { <div>"zone-content"</div> }}
                </RoleGate>
            }
        });
        assert!(!html.contains("zone-content"));
    }

    #[test]
    fn hides_children_for_roleless_identity() {
        let html = render_to_string(|| {
            provide_auth(Some(identity(&[])));
            view! {
                <RoleGate path={Signal::derive(|| "/dashboard/profile".to_string())}>
                    {|| view! { <div>"zone-content"</div> }}
                </RoleGate>
            }
        });
        assert!(!html.contains("zone-content"));
    }

    #[test]
    fn renders_nothing_while_identity_loads() {
        let html = render_to_string(|| {
            provide_test_auth(AuthState::default());
            view! {
                <RoleGate path={Signal::derive(|| "/dashboard/employee".to_string())}>
                    {|| view! { <div>"zone-content"</div> }}
                </RoleGate>
            }
        });
        assert!(!html.contains("zone-content"));
    }
}
