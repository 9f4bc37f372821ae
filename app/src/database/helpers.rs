use sea_orm::{ActiveValue, Set, Value};

/// Sets a active model field to `Set(value)` if the option contains a
/// value, otherwise leaves the field untouched, useful for applying
/// partial update DTOs
pub fn set_if_some<T>(field: &mut ActiveValue<T>, value: Option<T>)
where
    T: Into<Value>,
{
    if let Some(v) = value {
        *field = Set(v);
    }
}
