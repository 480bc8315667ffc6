pub mod extract;
pub mod fs;

#[cfg(test)]
pub(crate) mod testutil;
