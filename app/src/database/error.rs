use crate::modules::common::error_codes::DUPLICATED_BILL;
use crate::modules::common::responses::{internal_error_res, SimpleError};
use convert_case::{Case, Casing};
use http::StatusCode;
use sea_orm::{DbErr, RuntimeErr, SqlxError, TransactionError};

/// Wrapper for seaorm errors.
///
/// This is useful for wrapping database errors and safely returning them from
/// axum route handlers without worrying about leaking sensitive information,
/// as it implements `Into<(StatusCode, SimpleError)>`
#[derive(Debug)]
pub struct DbError(pub DbErr);

impl From<DbErr> for DbError {
    fn from(err: DbErr) -> Self {
        DbError(err)
    }
}

impl From<TransactionError<DbErr>> for DbError {
    fn from(err: TransactionError<DbErr>) -> Self {
        match err {
            TransactionError::Connection(e) => DbError(e),
            TransactionError::Transaction(e) => DbError(e),
        }
    }
}

impl From<DbError> for (StatusCode, SimpleError) {
    fn from(err: DbError) -> Self {
        match err.0 {
            DbErr::RecordNotFound(_) => {
                (StatusCode::NOT_FOUND, SimpleError::from("entity not found"))
            }

            DbErr::Exec(RuntimeErr::SqlxError(error)) => handle_sqlx_error(error),
            DbErr::Query(RuntimeErr::SqlxError(error)) => handle_sqlx_error(error),

            _ => internal_error_res(),
        }
    }
}

fn handle_sqlx_error(sqlx_error: SqlxError) -> (StatusCode, SimpleError) {
    match sqlx_error {
        SqlxError::Database(e) => {
            if !e.is_unique_violation() {
                return internal_error_res();
            }

            if let Some(constraint) = e.constraint() {
                if let Some(error_code) = unique_violation_error_code(constraint) {
                    return (StatusCode::BAD_REQUEST, SimpleError::from(error_code));
                }
            }

            internal_error_res()
        }
        _ => internal_error_res(),
    }
}

/// Maps a violated unique constraint to the error code exposed to api clients.
///
/// Composite constraints with a dedicated error code are matched by name,
/// everything else falls back to `<COLUMN>_IN_USE`.
fn unique_violation_error_code(constraint: &str) -> Option<String> {
    if constraint == "bill_fecha_inicial_hora_inicial_unique" {
        return Some(String::from(DUPLICATED_BILL));
    }

    get_column_name_from_unique_constraint_name(constraint)
        .map(|column_name| format!("{}_IN_USE", column_name.to_case(Case::ScreamingSnake)))
}

/// Extracts the column name from the name of a database unique constraint.
/// assuming the naming pattern: `<table_name>_<column>_unique`.
///
/// returns `Some(<column>)` if the pattern is ok otherwise `None`.
fn get_column_name_from_unique_constraint_name(unique_constraint_name: &str) -> Option<&str> {
    if let Some(non_suffixed_constraint_name) = unique_constraint_name.strip_suffix("_unique") {
        return non_suffixed_constraint_name.split('_').last();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_column_from_constraint_name() {
        assert_eq!(
            get_column_name_from_unique_constraint_name("branch_office_nit_unique"),
            Some("nit")
        );
        assert_eq!(
            get_column_name_from_unique_constraint_name("user_email_unique"),
            Some("email")
        );
        assert_eq!(
            get_column_name_from_unique_constraint_name("stationary_tank_serial_pkey"),
            None
        );
    }

    #[test]
    fn maps_unique_violations_to_error_codes() {
        assert_eq!(
            unique_violation_error_code("user_email_unique"),
            Some(String::from("EMAIL_IN_USE"))
        );
        assert_eq!(
            unique_violation_error_code("bill_fecha_inicial_hora_inicial_unique"),
            Some(String::from(DUPLICATED_BILL))
        );
        assert_eq!(unique_violation_error_code("bill_pkey"), None);
    }
}
