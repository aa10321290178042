use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::users;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Insertable, PartialEq)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// argon2 PHC string.
    pub password: String,
}
