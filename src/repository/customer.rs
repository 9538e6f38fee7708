//! Repository implementation for CRM customers.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::{
        customer::{Customer, NewCustomer, UpdateCustomer},
        types::{CustomerEmail, CustomerId},
    },
    models::customer::{
        Customer as DbCustomer, CustomerCount, NewCustomer as DbNewCustomer,
        UpdateCustomer as DbUpdateCustomer,
    },
    repository::{
        CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, SortField, SortOrder,
        errors::{RepositoryError, RepositoryResult},
        search,
    },
    schema::customers,
};

/// Applies the requested ordering, breaking ties by id.
fn apply_order(
    items: customers::BoxedQuery<'_, Sqlite>,
    sort_by: SortField,
    order: SortOrder,
) -> customers::BoxedQuery<'_, Sqlite> {
    macro_rules! by {
        ($column:expr) => {
            match order {
                SortOrder::Asc => items.order($column.asc()),
                SortOrder::Desc => items.order($column.desc()),
            }
        };
    }

    let items = match sort_by {
        SortField::FirstName => by!(customers::first_name),
        SortField::LastName => by!(customers::last_name),
        SortField::Email => by!(customers::email),
        SortField::PhoneNumber => by!(customers::phone_number),
        SortField::Address => by!(customers::address),
        SortField::City => by!(customers::city),
        SortField::State => by!(customers::state),
        SortField::Country => by!(customers::country),
        SortField::CreatedAt => by!(customers::created_at),
        SortField::UpdatedAt => by!(customers::updated_at),
    };

    items.then_order_by(customers::id.asc())
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn into_domain(rows: Vec<DbCustomer>) -> RepositoryResult<Vec<Customer>> {
    rows.into_iter()
        .map(|row| Customer::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl DieselRepository {
    fn list_all(
        &self,
        conn: &mut SqliteConnection,
        query: &CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        let total = customers::table.count().get_result::<i64>(conn)?;

        let mut items = apply_order(
            customers::table.into_boxed::<Sqlite>(),
            query.sort_by,
            query.order,
        );
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(to_i64(pagination.offset()))
                .limit(to_i64(pagination.per_page));
        }

        let rows = items.load::<DbCustomer>(conn)?;

        Ok((total as usize, into_domain(rows)?))
    }

    fn list_matching(
        &self,
        conn: &mut SqliteConnection,
        query: &CustomerListQuery,
        term: &str,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        let Some(expression) = search::match_expression(term) else {
            return Ok((0, Vec::new()));
        };

        let total = diesel::sql_query(search::count_sql())
            .bind::<Text, _>(expression.as_str())
            .get_result::<CustomerCount>(conn)?
            .count;

        // SQLite treats a negative LIMIT as "no limit".
        let (limit, offset) = match &query.pagination {
            Some(pagination) => (
                to_i64(pagination.per_page),
                to_i64(pagination.offset()),
            ),
            None => (-1, 0),
        };

        let rows = diesel::sql_query(search::page_sql(query.sort_by, query.order))
            .bind::<Text, _>(expression.as_str())
            .bind::<BigInt, _>(limit)
            .bind::<BigInt, _>(offset)
            .load::<DbCustomer>(conn)?;

        Ok((total as usize, into_domain(rows)?))
    }
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;
        let customer = customers::table
            .find(id.to_string())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_customer_by_email(&self, email: &CustomerEmail) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::email.eq(email.as_str()))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)> {
        let mut conn = self.conn()?;

        match query.search.as_deref() {
            Some(term) => self.list_matching(&mut conn, &query, term),
            None => self.list_all(&mut conn, &query),
        }
    }

    fn count_customers(&self) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total = customers::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;
        let insertable = DbNewCustomer::from_domain(new_customer, Utc::now().naive_utc());

        let created = diesel::insert_into(customers::table)
            .values(&insertable)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(Customer::try_from(created)?)
    }

    fn update_customer(
        &self,
        customer_id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;
        let changeset = DbUpdateCustomer::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(customers::table.find(customer_id.to_string()))
            .set(&changeset)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(Customer::try_from(updated)?)
    }

    fn delete_customer(&self, customer_id: CustomerId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted =
            diesel::delete(customers::table.find(customer_id.to_string())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
