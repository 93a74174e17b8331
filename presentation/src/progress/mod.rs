//! Progress reporting while providers are called

pub mod reporter;
