//! Reusable widgets.

pub mod card;

pub use card::Card;
