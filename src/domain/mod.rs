pub mod article;
pub mod navigation_link;
pub mod page;
pub mod subforem;

pub use article::Article;
pub use navigation_link::{DisplayTo, NavigationLink, NavigationSection};
pub use page::{MAX_SLUG_SEGMENTS, Page, PageTemplate};
pub use subforem::Subforem;
