pub mod css;
pub mod error;
pub mod fileset;
pub mod logger;
pub mod validation;
