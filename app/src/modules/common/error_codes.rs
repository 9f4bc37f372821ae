/// a request to a endpoint was not authorized because it did not
/// contain a bearer token in the authorization header
pub static NO_BEARER_TOKEN: &str = "NO_BEARER_TOKEN";

/// a request to a endpoint was not authorized because the bearer
/// token is expired, malformed or refers to a deleted user
pub static INVALID_TOKEN: &str = "INVALID_TOKEN";

/// a sign in attempt failed because the password does not match
pub static WRONG_PASSWORD: &str = "WRONG_PASSWORD";

/// a bill with the same start date and start hour already exists
pub static DUPLICATED_BILL: &str = "DUPLICATED_BILL";

/// a stationary tank cannot be deleted while assigned to a branch office
pub static TANK_ASSIGNED: &str = "TANK_ASSIGNED";

/// a branch office cannot be deleted while on a ongoing delivery route
pub static BRANCH_OFFICE_ON_ROUTE: &str = "BRANCH_OFFICE_ON_ROUTE";
