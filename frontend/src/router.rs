use leavedesk_access::{
    zone::{ADMIN_DASHBOARD_PATH, EMPLOYEE_DASHBOARD_PATH, HR_DASHBOARD_PATH, PROFILE_PATH},
    LOGIN_PATH, UNAUTHORIZED_PATH,
};
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{guard::RequireRole, layout::DashboardLayout},
    pages::{
        dashboard::{
            AdminDashboardPage, DashboardIndexPage, EmployeeDashboardPage, HrDashboardPage,
            ProfilePage,
        },
        home::HomePage,
        login::LoginPage,
        unauthorized::UnauthorizedPage,
    },
    state::auth::AuthProvider,
};

const DASHBOARD_PATH: &str = "/dashboard";

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    view! {
        <Title text="Leave Desk"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path=LOGIN_PATH view=LoginPage/>
                    <Route path=UNAUTHORIZED_PATH view=UnauthorizedPage/>
                    <Route path=DASHBOARD_PATH view=ProtectedDashboardIndex/>
                    <Route path=ADMIN_DASHBOARD_PATH view=ProtectedAdminDashboard/>
                    <Route path=HR_DASHBOARD_PATH view=ProtectedHrDashboard/>
                    <Route path=EMPLOYEE_DASHBOARD_PATH view=ProtectedEmployeeDashboard/>
                    <Route path=PROFILE_PATH view=ProtectedProfile/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedDashboardIndex() -> impl IntoView {
    view! { <RequireRole><DashboardLayout><DashboardIndexPage/></DashboardLayout></RequireRole> }
}

#[component]
fn ProtectedAdminDashboard() -> impl IntoView {
    view! { <RequireRole><DashboardLayout><AdminDashboardPage/></DashboardLayout></RequireRole> }
}

#[component]
fn ProtectedHrDashboard() -> impl IntoView {
    view! { <RequireRole><DashboardLayout><HrDashboardPage/></DashboardLayout></RequireRole> }
}

#[component]
fn ProtectedEmployeeDashboard() -> impl IntoView {
    view! { <RequireRole><DashboardLayout><EmployeeDashboardPage/></DashboardLayout></RequireRole> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireRole><DashboardLayout><ProfilePage/></DashboardLayout></RequireRole> }
}
