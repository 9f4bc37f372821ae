use crate::modules::{
    auth, bill, branch_office, city, client, common, course, department, factor, graphs, location,
    notification, occupation, permission, propane_truck, role, stationary_tank, tablet, user, zone,
};
use crate::server::controller;
use axum::Router;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::openapi::{ContactBuilder, InfoBuilder};
use utoipa::{openapi::OpenApiBuilder, Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        entity::user::Model,
        entity::role::Model,
        entity::permission::Model,
        entity::client::Model,
        entity::occupation::Model,
        entity::branch_office::Model,
        entity::stationary_tank::Model,
        entity::propane_truck::Model,
        entity::course::Model,
        entity::location::Model,
        entity::bill::Model,
        entity::notification::Model,
        entity::city::Model,
        entity::department::Model,
        entity::zone::Model,
        entity::factor::Model,
        entity::tablet::Model,

        entity::enums::RecordState,
        entity::enums::BranchOfficeStatus,
        entity::enums::TankStatus,
        entity::enums::OperatorStatus,
        entity::enums::NotificationStatus,
        entity::enums::NotificationKind,

        common::responses::SimpleError,

        auth::dto::SignIn,
        auth::dto::SignInResponse,

        user::dto::UserDto,
        user::dto::CreateUserDto,
        user::dto::UpdateUserDto,

        role::dto::RoleDto,
        role::dto::CreateRoleDto,
        role::dto::UpdateRoleDto,

        permission::dto::CreatePermissionDto,
        permission::dto::UpdatePermissionDto,

        client::dto::CreateClientDto,
        client::dto::UpdateClientDto,

        occupation::dto::CreateOccupationDto,
        occupation::dto::UpdateOccupationDto,

        branch_office::dto::BranchOfficeDto,
        branch_office::dto::BranchOfficeWithBillsDto,
        branch_office::dto::CreateBranchOfficeDto,
        branch_office::dto::UpdateBranchOfficeDto,
        branch_office::dto::UpdateBranchOfficeStatusDto,

        stationary_tank::dto::CreateStationaryTankDto,
        stationary_tank::dto::UpdateStationaryTankDto,
        stationary_tank::dto::ReleaseStationaryTanksDto,

        propane_truck::dto::CreatePropaneTruckDto,
        propane_truck::dto::UpdatePropaneTruckDto,

        course::dto::CourseDto,
        course::dto::CreateCourseDto,
        course::dto::UpdateCourseDto,

        location::dto::LocationDto,
        location::dto::CreateLocationDto,
        location::dto::UpdateLocationDto,

        bill::dto::CreateBillDto,
        bill::dto::UpdateBillDto,
        bill::dto::BillsByDateDto,

        notification::dto::CreateNotificationDto,

        city::dto::CreateCityDto,
        city::dto::UpdateCityDto,

        department::dto::CreateDepartmentDto,
        department::dto::UpdateDepartmentDto,

        zone::dto::CreateZoneDto,
        zone::dto::UpdateZoneDto,

        factor::dto::CreateFactorDto,
        factor::dto::UpdateFactorDto,

        tablet::dto::CreateTabletDto,
        tablet::dto::UpdateTabletDto,

        graphs::dto::MonthDto,
        graphs::dto::DailyPurchaseDto,
        graphs::dto::DailyPurchasePoint,
    )),
    paths(
        controller::healthcheck,

        auth::routes::sign_in,

        user::routes::list_users,
        user::routes::list_operators,
        user::routes::list_available_operators,
        user::routes::user_by_id,
        user::routes::create_user,
        user::routes::update_user,
        user::routes::delete_user,
        user::routes::activate_user,

        role::routes::list_roles,
        role::routes::role_by_id,
        role::routes::create_role,
        role::routes::update_role,
        role::routes::delete_role,

        permission::routes::list_permissions,
        permission::routes::permission_by_id,
        permission::routes::create_permission,
        permission::routes::update_permission,
        permission::routes::delete_permission,

        client::routes::list_clients,
        client::routes::client_by_id,
        client::routes::clients_by_branch_office,
        client::routes::create_client,
        client::routes::update_client,
        client::routes::delete_client,

        occupation::routes::list_occupations,
        occupation::routes::occupation_by_id,
        occupation::routes::create_occupation,
        occupation::routes::update_occupation,
        occupation::routes::delete_occupation,

        branch_office::routes::list_branch_offices,
        branch_office::routes::list_pending_branch_offices,
        branch_office::routes::branch_office_by_id_or_code,
        branch_office::routes::list_branch_offices_with_bills,
        branch_office::routes::list_available_branch_offices,
        branch_office::routes::create_branch_office,
        branch_office::routes::create_branch_office_for_operator,
        branch_office::routes::create_multiple_branch_offices,
        branch_office::routes::update_branch_office,
        branch_office::routes::approve_branch_office,
        branch_office::routes::update_branch_office_status,
        branch_office::routes::delete_branch_office,

        stationary_tank::routes::list_stationary_tanks,
        stationary_tank::routes::list_available_stationary_tanks,
        stationary_tank::routes::stationary_tank_by_id,
        stationary_tank::routes::create_stationary_tank,
        stationary_tank::routes::create_multiple_stationary_tanks,
        stationary_tank::routes::update_stationary_tank,
        stationary_tank::routes::release_stationary_tanks,
        stationary_tank::routes::delete_stationary_tank,

        propane_truck::routes::list_propane_trucks,
        propane_truck::routes::propane_truck_by_id,
        propane_truck::routes::propane_trucks_by_operator,
        propane_truck::routes::create_propane_truck,
        propane_truck::routes::update_propane_truck,
        propane_truck::routes::delete_propane_truck,

        course::routes::list_courses,
        course::routes::course_by_id,
        course::routes::course_by_operator,
        course::routes::create_course,
        course::routes::update_course,
        course::routes::soft_delete_course,
        course::routes::hard_delete_course,

        location::routes::list_locations,
        location::routes::location_by_id,
        location::routes::create_location,
        location::routes::update_location,
        location::routes::delete_location,

        bill::routes::list_bills,
        bill::routes::bill_by_id,
        bill::routes::bills_by_branch_office_code,
        bill::routes::bills_by_date,
        bill::routes::bills_by_operator,
        bill::routes::create_bill,
        bill::routes::create_multiple_bills,
        bill::routes::update_bill,
        bill::routes::delete_bill,

        notification::routes::list_notifications,
        notification::routes::list_unread_notifications,
        notification::routes::notification_by_id,
        notification::routes::create_notification,
        notification::routes::mark_notification_read,
        notification::routes::delete_notification,

        city::routes::list_cities,
        city::routes::city_by_id,
        city::routes::create_city,
        city::routes::update_city,
        city::routes::delete_city,

        department::routes::list_departments,
        department::routes::department_by_id,
        department::routes::create_department,
        department::routes::update_department,
        department::routes::delete_department,

        zone::routes::list_zones,
        zone::routes::zone_by_id,
        zone::routes::create_zone,
        zone::routes::update_zone,
        zone::routes::delete_zone,

        factor::routes::list_factors,
        factor::routes::factor_by_id,
        factor::routes::create_factor,
        factor::routes::update_factor,
        factor::routes::delete_factor,

        tablet::routes::list_tablets,
        tablet::routes::tablet_by_id,
        tablet::routes::tablet_by_branch_office_code,
        tablet::routes::create_tablet,
        tablet::routes::update_tablet,
        tablet::routes::delete_tablet,

        graphs::routes::bills_csv,
        graphs::routes::bills_csv_by_date,
        graphs::routes::daily_purchase,
    ),
    modifiers(&JwtSecurityScheme),
)]
struct ApiDoc;

/// bearer token authentication with the JWT issued on sign in
struct JwtSecurityScheme;

impl Modify for JwtSecurityScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

pub fn create_openapi_router() -> Router<controller::AppState> {
    let builder: OpenApiBuilder = ApiDoc::openapi().into();

    let info = InfoBuilder::new()
        .title("Gas distribution API")
        .description(Some(
            "Back office api for propane distribution: branch offices, delivery routes and billing.",
        ))
        .version("0.0.1")
        .contact(Some(ContactBuilder::new().build()))
        .build();

    let api_doc = builder.info(info).build();

    Router::new().merge(SwaggerUi::new("/swagger").url("/docs/openapi.json", api_doc))
}
