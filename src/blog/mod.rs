//! Blog domain layer.
//!
//! - `service`: query/mutation layer with request memoization
//! - `mapper`: nested join rows to flat posts
//! - `validation`: form rules checked before any store call
//! - `slug`: URL-safe slugs
//! - `seed`: one-time sample data
//! - `markdown`: post body rendering

pub mod cache;
pub mod error;
pub mod mapper;
pub mod markdown;
pub mod seed;
pub mod service;
pub mod slug;
pub mod validation;


pub use error::{BlogError, BlogResult};
pub use seed::SeedReport;
pub use service::BlogService;
pub use slug::slugify;
pub use validation::{CategoryInput, FieldError, PostInput, ValidationErrors};
