mod client;
mod dashboard;
mod ownership;
mod payment;
mod project;
mod user;

pub use client::*;
pub use dashboard::*;
pub use ownership::*;
pub use payment::*;
pub use project::*;
pub use user::*;
