pub mod context;
pub mod landing;
pub mod pages;
pub mod redirects;
pub mod site;
