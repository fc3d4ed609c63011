pub mod controller;
pub mod distance;
pub mod favorites;
pub mod location;
pub mod search;
pub mod view;
