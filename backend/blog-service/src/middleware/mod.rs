mod auth;

pub use auth::{
    encode_session, require_session, Claims, CurrentSession, SessionRole, SESSION_COOKIE,
};
