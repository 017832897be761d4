pub mod checkins;
pub mod health;
pub mod history;
