use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::api::{ApiResponse, CountData};
use crate::forms::customer::{CreateCustomerForm, ListCustomersForm, UpdateCustomerForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, customer as customer_service};

#[get("/customers")]
pub async fn list_customers(
    query: web::Query<ListCustomersForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = customer_service::list_customers(repo.get_ref(), query.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::page(page)))
}

/// Registered ahead of `/customers/{id}` so that `count` is not taken for an id.
#[get("/customers/count")]
pub async fn count_customers(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let count = customer_service::count_customers(repo.get_ref())?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(CountData { count })))
}

#[get("/customers/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer = customer_service::get_customer(repo.get_ref(), &customer_id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(customer)))
}

#[post("/customers")]
pub async fn create_customer(
    form: web::Json<CreateCustomerForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer = customer_service::create_customer(repo.get_ref(), form.into_inner())?;
    Ok(HttpResponse::Created()
        .json(ApiResponse::data(customer).with_message("Customer created successfully")))
}

#[put("/customers/{customer_id}")]
pub async fn update_customer(
    customer_id: web::Path<String>,
    form: web::Json<UpdateCustomerForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer =
        customer_service::update_customer(repo.get_ref(), &customer_id, form.into_inner())?;
    Ok(HttpResponse::Ok()
        .json(ApiResponse::data(customer).with_message("Customer updated successfully")))
}

#[delete("/customers/{customer_id}")]
pub async fn delete_customer(
    customer_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    customer_service::delete_customer(repo.get_ref(), &customer_id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Customer deleted successfully")))
}
