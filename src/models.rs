pub mod car;
pub mod controller_identity;
pub mod reconcile_key;

#[cfg(test)]
mod tests;
