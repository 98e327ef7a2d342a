#[cfg(test)]
pub(crate) mod headless;
pub mod time;
