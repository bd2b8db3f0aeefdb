pub mod analytics;
pub mod catalog;
pub mod health;
pub mod intake;
pub mod rate_limits;
pub mod site;
