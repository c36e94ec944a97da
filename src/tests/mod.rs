mod auth_tests;
mod extractor_tests;
mod file_service_tests;
mod pagination_tests;
mod response_tests;
mod route_tests;
