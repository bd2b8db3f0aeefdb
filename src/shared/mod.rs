pub mod constants;
pub mod security;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
