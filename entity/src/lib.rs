pub mod prelude;

pub mod enums;

pub mod bill;
pub mod branch_office;
pub mod branch_office_city;
pub mod branch_office_client;
pub mod branch_office_factor;
pub mod branch_office_stationary_tank;
pub mod branch_office_zone;
pub mod city;
pub mod client;
pub mod course;
pub mod course_location;
pub mod department;
pub mod factor;
pub mod location;
pub mod location_branch_office;
pub mod notification;
pub mod occupation;
pub mod permission;
pub mod propane_truck;
pub mod role;
pub mod role_permission;
pub mod stationary_tank;
pub mod tablet;
pub mod user;
pub mod zone;
