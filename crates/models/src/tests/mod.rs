/// Entity relations and identity helpers against an in-memory database
pub mod relation_tests;
