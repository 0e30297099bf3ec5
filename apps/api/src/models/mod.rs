pub mod skill;
pub mod user;
