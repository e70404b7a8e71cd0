pub mod entity_store;
