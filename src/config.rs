//! Support for library configuration options

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

/// Base URL of the task-scheduling REST service.
/// Feel free to override it when initing this library.
pub static BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| {
    Arc::new(Mutex::new(
        "https://porefect-production.up.railway.app/api".to_string(),
    ))
});

/// The product name sent in the `User-Agent` header.
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> =
    Lazy::new(|| Arc::new(Mutex::new("VanityShelf".to_string())));
