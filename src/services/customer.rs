//! Services implementing the customer CRUD workflows.

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::forms::customer::{CreateCustomerForm, ListCustomersForm, UpdateCustomerForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE, Paginated};
use crate::repository::errors::RepositoryError;
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Malformed identifiers cannot name a stored customer.
fn parse_id(id: &str) -> ServiceResult<CustomerId> {
    id.parse()
        .map_err(|_| ServiceError::NotFound(id.to_string()))
}

fn internal(context: &str, err: RepositoryError) -> ServiceError {
    log::error!("{context}: {err}");
    ServiceError::from(err)
}

/// Returns one page of customers, optionally filtered by a full-text search.
pub fn list_customers<R>(repo: &R, form: ListCustomersForm) -> ServiceResult<Paginated<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let query = CustomerListQuery::try_from(form)?;
    let (page, limit) = query
        .pagination
        .as_ref()
        .map_or((DEFAULT_PAGE, DEFAULT_ITEMS_PER_PAGE), |p| {
            (p.page, p.per_page)
        });

    let (total, customers) = repo
        .list_customers(query)
        .map_err(|err| internal("Failed to list customers", err))?;

    Ok(Paginated::new(customers, page, limit, total))
}

pub fn get_customer<R>(repo: &R, id: &str) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    let customer_id = parse_id(id)?;

    repo.get_customer_by_id(customer_id)
        .map_err(|err| internal("Failed to load customer", err))?
        .ok_or_else(|| ServiceError::NotFound(id.to_string()))
}

/// Validates the payload and stores a new customer.
///
/// The email pre-check gives the common case a clear answer; the storage
/// `UNIQUE` constraint settles races between concurrent creates.
pub fn create_customer<R>(repo: &R, form: CreateCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let new_customer = NewCustomer::try_from(form)?;
    let email = new_customer.email.to_string();

    if repo
        .get_customer_by_email(&new_customer.email)
        .map_err(|err| internal("Failed to check customer email", err))?
        .is_some()
    {
        return Err(ServiceError::Conflict(email));
    }

    match repo.create_customer(&new_customer) {
        Ok(customer) => {
            log::info!("Created customer {}", customer.id);
            Ok(customer)
        }
        Err(RepositoryError::UniqueViolation(_)) => Err(ServiceError::Conflict(email)),
        Err(err) => Err(internal("Failed to create customer", err)),
    }
}

/// Applies a partial update to an existing customer.
///
/// An empty body still refreshes `updatedAt`.
pub fn update_customer<R>(repo: &R, id: &str, form: UpdateCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let customer_id = parse_id(id)?;

    if repo
        .get_customer_by_id(customer_id)
        .map_err(|err| internal("Failed to load customer", err))?
        .is_none()
    {
        return Err(ServiceError::NotFound(id.to_string()));
    }

    let updates = UpdateCustomer::try_from(form)?;
    let email = updates
        .email
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();

    if let Some(new_email) = &updates.email {
        let holder = repo
            .get_customer_by_email(new_email)
            .map_err(|err| internal("Failed to check customer email", err))?;
        if holder.is_some_and(|holder| holder.id != customer_id) {
            return Err(ServiceError::Conflict(email));
        }
    }

    match repo.update_customer(customer_id, &updates) {
        Ok(customer) => Ok(customer),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(id.to_string())),
        Err(RepositoryError::UniqueViolation(_)) => Err(ServiceError::Conflict(email)),
        Err(err) => Err(internal("Failed to update customer", err)),
    }
}

pub fn delete_customer<R>(repo: &R, id: &str) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    let customer_id = parse_id(id)?;

    match repo.delete_customer(customer_id) {
        Ok(()) => {
            log::info!("Deleted customer {customer_id}");
            Ok(())
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(id.to_string())),
        Err(err) => Err(internal("Failed to delete customer", err)),
    }
}

pub fn count_customers<R>(repo: &R) -> ServiceResult<usize>
where
    R: CustomerReader + ?Sized,
{
    repo.count_customers()
        .map_err(|err| internal("Failed to count customers", err))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::{CustomerEmail, PersonName};
    use crate::repository::mock::MockRepository;
    use crate::repository::{Pagination, SortField, SortOrder};

    fn build_customer(id: CustomerId, email: &str) -> Customer {
        let now = chrono::Utc::now();
        Customer {
            id,
            first_name: PersonName::new("Ann").expect("valid name"),
            last_name: PersonName::new("Lee").expect("valid name"),
            email: CustomerEmail::new(email).expect("valid email"),
            phone_number: None,
            address: None,
            city: None,
            state: None,
            country: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_form(email: &str) -> CreateCustomerForm {
        CreateCustomerForm {
            first_name: Some("Ann".into()),
            last_name: Some("Lee".into()),
            email: Some(email.into()),
            ..CreateCustomerForm::default()
        }
    }

    #[test]
    fn list_passes_defaults_and_builds_meta() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .withf(|query| {
                query.sort_by == SortField::CreatedAt
                    && query.order == SortOrder::Desc
                    && query.search.is_none()
                    && query.pagination
                        == Some(Pagination {
                            page: 1,
                            per_page: 10,
                        })
            })
            .times(1)
            .returning(|_| Ok((25, vec![build_customer(CustomerId::new(), "a@x.com")])));

        let page = list_customers(&repo, ListCustomersForm::default()).expect("should list");

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.total, 25);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next_page);
        assert!(!page.meta.has_previous_page);
    }

    #[test]
    fn list_rejects_unknown_sort_field_without_querying() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers().times(0);
        let form = ListCustomersForm {
            sort_by: Some("password".into()),
            ..ListCustomersForm::default()
        };

        let result = list_customers(&repo, form);

        assert!(matches!(result, Err(ServiceError::Validation(v)) if v[0].field == "sortBy"));
    }

    #[test]
    fn get_treats_malformed_id_as_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().times(0);

        let result = get_customer(&repo, "123");

        assert!(matches!(result, Err(ServiceError::NotFound(id)) if id == "123"));
    }

    #[test]
    fn get_reports_missing_customer() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let id = CustomerId::new().to_string();
        let result = get_customer(&repo, &id);

        assert!(matches!(result, Err(ServiceError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn create_stores_valid_customer() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create_customer()
            .withf(|new_customer| {
                new_customer.first_name.as_str() == "Ann" && new_customer.phone_number.is_none()
            })
            .times(1)
            .returning(|new_customer| {
                Ok(build_customer(CustomerId::new(), new_customer.email.as_str()))
            });

        let customer = create_customer(&repo, create_form("ann@x.com")).expect("should create");

        assert_eq!(customer.email.as_str(), "ann@x.com");
    }

    #[test]
    fn create_rejects_invalid_payload_before_touching_storage() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_email().times(0);
        repo.expect_create_customer().times(0);

        let result = create_customer(&repo, CreateCustomerForm::default());

        assert!(matches!(result, Err(ServiceError::Validation(v)) if v.len() == 3));
    }

    #[test]
    fn create_reports_taken_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_email()
            .times(1)
            .returning(|_| Ok(Some(build_customer(CustomerId::new(), "ann@x.com"))));
        repo.expect_create_customer().times(0);

        let result = create_customer(&repo, create_form("ann@x.com"));

        assert!(matches!(result, Err(ServiceError::Conflict(email)) if email == "ann@x.com"));
    }

    #[test]
    fn create_maps_unique_violation_to_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create_customer()
            .times(1)
            .returning(|_| Err(RepositoryError::UniqueViolation("customers.email".into())));

        let result = create_customer(&repo, create_form("ann@x.com"));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn create_hides_storage_failures() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_email()
            .times(1)
            .returning(|_| Err(RepositoryError::ConnectionError("pool exhausted".into())));

        let result = create_customer(&repo, create_form("ann@x.com"));

        assert!(matches!(result, Err(ServiceError::Internal(_))));
    }

    #[test]
    fn update_allows_keeping_own_email() {
        let id = CustomerId::new();
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(move |_| Ok(Some(build_customer(id, "ann@x.com"))));
        repo.expect_get_customer_by_email()
            .times(1)
            .returning(move |_| Ok(Some(build_customer(id, "ann@x.com"))));
        repo.expect_update_customer()
            .withf(move |customer_id, updates| {
                *customer_id == id && updates.city == Some(Some("Lyon".to_string()))
            })
            .times(1)
            .returning(move |_, _| Ok(build_customer(id, "ann@x.com")));

        let form = UpdateCustomerForm {
            email: Some(Some("ann@x.com".into())),
            city: Some(Some("Lyon".into())),
            ..UpdateCustomerForm::default()
        };

        update_customer(&repo, &id.to_string(), form).expect("should update");
    }

    #[test]
    fn update_rejects_email_held_by_another_customer() {
        let id = CustomerId::new();
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(move |_| Ok(Some(build_customer(id, "ann@x.com"))));
        repo.expect_get_customer_by_email()
            .times(1)
            .returning(|_| Ok(Some(build_customer(CustomerId::new(), "bob@x.com"))));
        repo.expect_update_customer().times(0);

        let form = UpdateCustomerForm {
            email: Some(Some("bob@x.com".into())),
            ..UpdateCustomerForm::default()
        };

        let result = update_customer(&repo, &id.to_string(), form);

        assert!(matches!(result, Err(ServiceError::Conflict(email)) if email == "bob@x.com"));
    }

    #[test]
    fn update_reports_missing_customer() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_update_customer().times(0);

        let result = update_customer(
            &repo,
            &CustomerId::new().to_string(),
            UpdateCustomerForm::default(),
        );

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn update_maps_vanished_row_to_not_found() {
        let id = CustomerId::new();
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(move |_| Ok(Some(build_customer(id, "ann@x.com"))));
        repo.expect_update_customer()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = update_customer(&repo, &id.to_string(), UpdateCustomerForm::default());

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn update_rejects_null_first_name() {
        let id = CustomerId::new();
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(move |_| Ok(Some(build_customer(id, "ann@x.com"))));
        repo.expect_update_customer().times(0);

        let form = UpdateCustomerForm {
            first_name: Some(None),
            ..UpdateCustomerForm::default()
        };

        let result = update_customer(&repo, &id.to_string(), form);

        assert!(matches!(result, Err(ServiceError::Validation(v)) if v[0].field == "firstName"));
    }

    #[test]
    fn delete_reports_missing_customer() {
        let mut repo = MockRepository::new();
        repo.expect_delete_customer()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_customer(&repo, &CustomerId::new().to_string());

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn delete_treats_malformed_id_as_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_customer().times(0);

        assert!(matches!(
            delete_customer(&repo, "not-a-uuid"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn count_returns_total() {
        let mut repo = MockRepository::new();
        repo.expect_count_customers().times(1).returning(|| Ok(4));

        assert_eq!(count_customers(&repo).expect("should count"), 4);
    }
}
