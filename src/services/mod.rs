pub mod context;
pub mod landing;
pub mod redirect;
pub mod render;
pub mod resolver;
pub mod seed;
pub mod site;
pub mod threads;
pub mod views;
