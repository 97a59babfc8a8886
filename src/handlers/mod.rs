pub mod chat;
pub mod entries;
pub mod habit_days;
pub mod habits;
pub mod health;
pub mod insights;
pub mod objectives;
pub mod quotes;
pub mod stats;
pub mod ws;
