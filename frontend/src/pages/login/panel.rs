use crate::{
    api::LoginRequest,
    pages::login::{components::form::LoginForm, utils},
    state::auth::use_auth,
    utils::navigate_to,
};
use leavedesk_access::landing_path;
use leptos::{ev::SubmitEvent, Callback, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = use_auth().login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(identity) => {
                    set_error.set(None);
                    set_password.set(String::new());
                    navigate_to(landing_path(&identity.roles));
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
        }
    });

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();

        if let Err(msg) = utils::validate_credentials(&email, &password) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);

        login_action.dispatch(LoginRequest {
            email: email.trim().to_string(),
            password,
        });
    });

    let email_input = Callback::new(move |value: String| set_email.set(value));
    let password_input = Callback::new(move |value: String| set_password.set(value));

    view! {
        <LoginForm
            email=email
            password=password
            error=error
            pending=pending
            on_email_input=email_input
            on_password_input=password_input
            on_submit=handle_submit
        />
    }
}
