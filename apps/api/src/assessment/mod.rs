// Resume assessment: upload pipeline, dashboard, scheme suggestions.
// The scoring itself lives in `crate::scoring`; this module wires it to the
// advisor, the database and the session.

pub mod handlers;
pub mod persistence;
pub mod service;
