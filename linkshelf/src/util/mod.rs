pub mod test_service_container;
pub mod testing;
