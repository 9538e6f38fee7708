//! DTOs shaping the JSON bodies returned by the API.

pub mod api;
