use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let statement = r#"
        create table "role" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "name" varchar(255) not null
        );

        alter table
            "role"
        add
            constraint "role_name_unique" unique ("name");

        create table "permission" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "name" varchar(255) not null,
            "access_code" varchar(255) not null,
            "description" text not null
        );

        alter table
            "permission"
        add
            constraint "permission_name_unique" unique ("name");

        create table "role_permission" (
            "role_id" uuid not null,
            "permission_id" uuid not null,
            primary key ("role_id", "permission_id")
        );

        create table "user" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "status" varchar(255) not null default 'DISPONIBLE',
            "first_name" varchar(255) not null,
            "last_name" varchar(255) not null,
            "email" varchar(255) not null,
            "id_number" varchar(255) not null,
            "password" varchar(255) not null,
            "role_id" uuid not null
        );

        alter table
            "user"
        add
            constraint "user_email_unique" unique ("email");

        alter table
            "user"
        add
            constraint "user_id_number_unique" unique ("id_number");

        create table "occupation" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "name" varchar(255) not null
        );

        create table "client" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "first_name" varchar(255) not null,
            "last_name" varchar(255) not null,
            "cc" varchar(255) not null,
            "phone" varchar(255) not null,
            "email" varchar(255) not null,
            "occupation_id" uuid null
        );

        create table "department" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "name" varchar(255) not null
        );

        create table "city" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "name" varchar(255) not null,
            "department_id" uuid not null
        );

        create table "zone" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "name" varchar(255) not null
        );

        create table "factor" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "name" varchar(255) not null,
            "value" double precision not null
        );

        create table "branch_office" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "status" varchar(255) not null default 'PENDIENTE',
            "name" varchar(255) not null,
            "nit" varchar(255) not null,
            "branch_office_code" int not null,
            "address" varchar(255) not null,
            "latitude" varchar(255) not null,
            "longitude" varchar(255) not null,
            "phone" varchar(255) not null,
            "email" varchar(255) not null,
            "kilogram_value" double precision not null,
            "tank_stock" int not null default 0,
            "general_ticket" boolean not null default false,
            "geofence" text not null
        );

        alter table
            "branch_office"
        add
            constraint "branch_office_nit_unique" unique ("nit");

        alter table
            "branch_office"
        add
            constraint "branch_office_branch_office_code_unique" unique ("branch_office_code");

        create table "stationary_tank" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "status" varchar(255) not null default 'NO ASIGNADO',
            "serial" varchar(255) not null,
            "capacity" int not null
        );

        alter table
            "stationary_tank"
        add
            constraint "stationary_tank_serial_unique" unique ("serial");

        create table "propane_truck" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "plate" varchar(255) not null,
            "capacity" int not null,
            "operator_id" uuid null
        );

        alter table
            "propane_truck"
        add
            constraint "propane_truck_plate_unique" unique ("plate");

        create table "location" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "name" varchar(255) not null
        );

        create table "course" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "operator_id" uuid not null
        );

        create table "tablet" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "imei" varchar(255) not null,
            "branch_office_code" int not null
        );

        alter table
            "tablet"
        add
            constraint "tablet_imei_unique" unique ("imei");

        create table "notification" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "status" varchar(255) not null default 'NO LEIDO',
            "title" varchar(255) not null,
            "message" text not null,
            "kind" varchar(255) not null,
            "subject_id" varchar(255) not null
        );

        create table "bill" (
            "id" uuid primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "state" varchar(255) not null default 'ACTIVO',
            "branch_office_id" uuid not null,
            "operator_id" uuid not null,
            "client_id" uuid not null,
            "branch_office_name" varchar(255) not null,
            "branch_office_nit" varchar(255) not null,
            "branch_office_address" varchar(255) not null,
            "branch_office_code" int not null,
            "client_first_name" varchar(255) not null,
            "client_last_name" varchar(255) not null,
            "client_cc" varchar(255) not null,
            "operator_first_name" varchar(255) not null,
            "operator_last_name" varchar(255) not null,
            "densidad" double precision not null,
            "temperatura" double precision not null,
            "masa_total" double precision not null,
            "volumen_total" double precision not null,
            "fecha_inicial" date not null,
            "fecha_final" date not null,
            "hora_inicial" varchar(255) not null,
            "hora_final" varchar(255) not null,
            "total" double precision not null
        );

        alter table
            "bill"
        add
            constraint "bill_fecha_inicial_hora_inicial_unique" unique ("fecha_inicial", "hora_inicial");

        create table "branch_office_city" (
            "branch_office_id" uuid not null,
            "city_id" uuid not null,
            primary key ("branch_office_id", "city_id")
        );

        create table "branch_office_zone" (
            "branch_office_id" uuid not null,
            "zone_id" uuid not null,
            primary key ("branch_office_id", "zone_id")
        );

        create table "branch_office_factor" (
            "branch_office_id" uuid not null,
            "factor_id" uuid not null,
            primary key ("branch_office_id", "factor_id")
        );

        create table "branch_office_client" (
            "branch_office_id" uuid not null,
            "client_id" uuid not null,
            primary key ("branch_office_id", "client_id")
        );

        create table "branch_office_stationary_tank" (
            "branch_office_id" uuid not null,
            "stationary_tank_id" uuid not null,
            primary key ("branch_office_id", "stationary_tank_id")
        );

        create table "location_branch_office" (
            "location_id" uuid not null,
            "branch_office_id" uuid not null,
            primary key ("location_id", "branch_office_id")
        );

        create table "course_location" (
            "course_id" uuid not null,
            "location_id" uuid not null,
            primary key ("course_id", "location_id")
        );

        alter table
            "role_permission"
        add
            constraint "role_permission_role_id_foreign" foreign key ("role_id") references "role" ("id") on update cascade on delete cascade;

        alter table
            "role_permission"
        add
            constraint "role_permission_permission_id_foreign" foreign key ("permission_id") references "permission" ("id") on update cascade on delete cascade;

        alter table
            "user"
        add
            constraint "user_role_id_foreign" foreign key ("role_id") references "role" ("id") on update cascade;

        alter table
            "client"
        add
            constraint "client_occupation_id_foreign" foreign key ("occupation_id") references "occupation" ("id") on update cascade;

        alter table
            "city"
        add
            constraint "city_department_id_foreign" foreign key ("department_id") references "department" ("id") on update cascade;

        alter table
            "propane_truck"
        add
            constraint "propane_truck_operator_id_foreign" foreign key ("operator_id") references "user" ("id") on update cascade;

        alter table
            "course"
        add
            constraint "course_operator_id_foreign" foreign key ("operator_id") references "user" ("id") on update cascade;

        alter table
            "bill"
        add
            constraint "bill_branch_office_id_foreign" foreign key ("branch_office_id") references "branch_office" ("id") on update cascade;

        alter table
            "bill"
        add
            constraint "bill_operator_id_foreign" foreign key ("operator_id") references "user" ("id") on update cascade;

        alter table
            "bill"
        add
            constraint "bill_client_id_foreign" foreign key ("client_id") references "client" ("id") on update cascade;

        alter table
            "branch_office_city"
        add
            constraint "branch_office_city_branch_office_id_foreign" foreign key ("branch_office_id") references "branch_office" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_city"
        add
            constraint "branch_office_city_city_id_foreign" foreign key ("city_id") references "city" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_zone"
        add
            constraint "branch_office_zone_branch_office_id_foreign" foreign key ("branch_office_id") references "branch_office" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_zone"
        add
            constraint "branch_office_zone_zone_id_foreign" foreign key ("zone_id") references "zone" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_factor"
        add
            constraint "branch_office_factor_branch_office_id_foreign" foreign key ("branch_office_id") references "branch_office" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_factor"
        add
            constraint "branch_office_factor_factor_id_foreign" foreign key ("factor_id") references "factor" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_client"
        add
            constraint "branch_office_client_branch_office_id_foreign" foreign key ("branch_office_id") references "branch_office" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_client"
        add
            constraint "branch_office_client_client_id_foreign" foreign key ("client_id") references "client" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_stationary_tank"
        add
            constraint "branch_office_stationary_tank_branch_office_id_foreign" foreign key ("branch_office_id") references "branch_office" ("id") on update cascade on delete cascade;

        alter table
            "branch_office_stationary_tank"
        add
            constraint "branch_office_stationary_tank_stationary_tank_id_foreign" foreign key ("stationary_tank_id") references "stationary_tank" ("id") on update cascade on delete cascade;

        alter table
            "location_branch_office"
        add
            constraint "location_branch_office_location_id_foreign" foreign key ("location_id") references "location" ("id") on update cascade on delete cascade;

        alter table
            "location_branch_office"
        add
            constraint "location_branch_office_branch_office_id_foreign" foreign key ("branch_office_id") references "branch_office" ("id") on update cascade on delete cascade;

        alter table
            "course_location"
        add
            constraint "course_location_course_id_foreign" foreign key ("course_id") references "course" ("id") on update cascade on delete cascade;

        alter table
            "course_location"
        add
            constraint "course_location_location_id_foreign" foreign key ("location_id") references "location" ("id") on update cascade on delete cascade;
        "#;

        db.execute_unprepared(statement).await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(String::from("cannot be reverted")))
    }
}
