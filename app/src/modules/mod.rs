pub mod auth;
pub mod bill;
pub mod branch_office;
pub mod city;
pub mod client;
pub mod common;
pub mod course;
pub mod department;
pub mod factor;
pub mod graphs;
pub mod location;
pub mod notification;
pub mod occupation;
pub mod permission;
pub mod propane_truck;
pub mod role;
pub mod stationary_tank;
pub mod tablet;
pub mod user;
pub mod zone;
