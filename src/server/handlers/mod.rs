pub mod documents;
pub mod health;
pub mod ratings;
pub mod search;
