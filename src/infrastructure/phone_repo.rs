use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::phone::Phone;
use crate::domain::ports::PhoneRepository;
use crate::schema::phones;

use super::models::PhoneRow;

pub struct DieselPhoneRepository {
    pool: DbPool,
}

impl DieselPhoneRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PhoneRepository for DieselPhoneRepository {
    fn list_available(&self) -> Result<Vec<Phone>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = phones::table
            .filter(phones::is_available.eq(true))
            .filter(phones::stock.gt(0))
            .order(phones::id.asc())
            .select(PhoneRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Phone::from).collect())
    }

    fn find(&self, id: i64) -> Result<Option<Phone>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = phones::table
            .filter(phones::id.eq(id))
            .select(PhoneRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Phone::from))
    }
}
