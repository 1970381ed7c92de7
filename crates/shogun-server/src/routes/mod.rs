pub mod dashboard;
pub mod events;
pub mod health;
pub mod panes;
