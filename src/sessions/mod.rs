mod cookie;
mod store;
mod token;

pub use cookie::{session_token, set_session_cookie};
pub use store::SessionStore;
