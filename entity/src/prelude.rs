pub use super::bill::Entity as Bill;
pub use super::branch_office::Entity as BranchOffice;
pub use super::branch_office_city::Entity as BranchOfficeCity;
pub use super::branch_office_client::Entity as BranchOfficeClient;
pub use super::branch_office_factor::Entity as BranchOfficeFactor;
pub use super::branch_office_stationary_tank::Entity as BranchOfficeStationaryTank;
pub use super::branch_office_zone::Entity as BranchOfficeZone;
pub use super::city::Entity as City;
pub use super::client::Entity as Client;
pub use super::course::Entity as Course;
pub use super::course_location::Entity as CourseLocation;
pub use super::department::Entity as Department;
pub use super::factor::Entity as Factor;
pub use super::location::Entity as Location;
pub use super::location_branch_office::Entity as LocationBranchOffice;
pub use super::notification::Entity as Notification;
pub use super::occupation::Entity as Occupation;
pub use super::permission::Entity as Permission;
pub use super::propane_truck::Entity as PropaneTruck;
pub use super::role::Entity as Role;
pub use super::role_permission::Entity as RolePermission;
pub use super::stationary_tank::Entity as StationaryTank;
pub use super::tablet::Entity as Tablet;
pub use super::user::Entity as User;
pub use super::zone::Entity as Zone;
