pub mod category;
pub mod post;
pub mod seed;


#[cfg(test)]
#[path = "post_test.rs"]
mod post_test;
