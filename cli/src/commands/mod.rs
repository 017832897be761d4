pub mod checkin;
pub mod health;
pub mod history;
