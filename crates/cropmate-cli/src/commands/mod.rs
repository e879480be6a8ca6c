pub mod auth;
pub mod dashboard;
pub mod detect;
pub mod history;
pub mod recommend;
pub mod render;
pub mod session;
