// Registration, login and the session layer guarding the assessment routes.

pub mod handlers;
pub mod password;
pub mod session;
pub mod users;
