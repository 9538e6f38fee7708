use crate::{
    db::{DbConnection, DbPool},
    domain::{
        customer::{Customer, NewCustomer, UpdateCustomer},
        types::{CustomerEmail, CustomerId},
    },
    repository::errors::RepositoryResult,
};

pub mod customer;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod search;

/// Customer columns a listing may be ordered by.
///
/// This is the only path from caller-supplied sort names to SQL column
/// names; the raw search query interpolates [`SortField::column`] and nothing
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Address,
    City,
    State,
    Country,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 10] = [
        SortField::FirstName,
        SortField::LastName,
        SortField::Email,
        SortField::PhoneNumber,
        SortField::Address,
        SortField::City,
        SortField::State,
        SortField::Country,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    /// Resolves an API field name (camelCase) against the allow-list.
    pub fn from_api_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.api_name() == name)
    }

    pub const fn api_name(self) -> &'static str {
        match self {
            SortField::FirstName => "firstName",
            SortField::LastName => "lastName",
            SortField::Email => "email",
            SortField::PhoneNumber => "phoneNumber",
            SortField::Address => "address",
            SortField::City => "city",
            SortField::State => "state",
            SortField::Country => "country",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    /// Storage column backing this field.
    pub const fn column(self) -> &'static str {
        match self {
            SortField::FirstName => "first_name",
            SortField::LastName => "last_name",
            SortField::Email => "email",
            SortField::PhoneNumber => "phone_number",
            SortField::Address => "address",
            SortField::City => "city",
            SortField::State => "state",
            SortField::Country => "country",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows preceding the requested page.
    pub fn offset(&self) -> usize {
        self.page.max(1).saturating_sub(1).saturating_mul(self.per_page)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerListQuery {
    pub search: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to customers matching the full-text search.
    ///
    /// Blank input leaves the listing unfiltered.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = Some(term).filter(|s| !s.is_empty());
        self
    }

    pub fn sort(mut self, sort_by: SortField, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    fn get_customer_by_email(&self, email: &CustomerEmail) -> RepositoryResult<Option<Customer>>;
    /// Returns the number of matching rows and the requested page.
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    fn count_customers(&self) -> RepositoryResult<usize>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        customer_id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, customer_id: CustomerId) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of the customer repository traits.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(crate::db::get_connection(&self.pool)?)
    }
}
