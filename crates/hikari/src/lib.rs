pub mod error;
pub mod fetch;
pub mod hls;
pub mod http;
pub mod info;

pub use error::*;
pub use info::*;

pub use reqwest::{Client, Url};
