pub mod api;
pub mod db;
pub mod serializers;
pub mod validators;

#[cfg(test)]
mod validators_test;
