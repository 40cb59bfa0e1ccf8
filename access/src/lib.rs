//! Access rules shared by the edge server and the browser application:
//! credential decoding, the route zone table, the client-side gate, the
//! navigation surface and the tab session store.

pub mod cookie;
pub mod credential;
pub mod error;
pub mod gate;
pub mod navigation;
pub mod role;
pub mod session;
pub mod zone;

pub use credential::{decode_credential, Claims};
pub use error::AccessError;
pub use gate::{ClientAccessGate, ClientDecision};
pub use navigation::{landing_path, navigation_for, NavLink};
pub use role::{Role, RoleSet};
pub use session::{
    AuthBackend, CookieWriter, LoginRequest, LoginResponse, SessionIdentity, SessionStorage,
    SessionStore,
};
pub use zone::{is_permitted, RouteZone, LOGIN_PATH, UNAUTHORIZED_PATH};
