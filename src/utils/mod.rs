pub mod debounce;
pub mod validate;
