//! Built-in document handlers.
//!
//! | Name                | Component           | Extra fields                                    |
//! |---------------------|---------------------|-------------------------------------------------|
//! | `DefaultController` | `Documents/Default` | none                                            |
//! | `BlogController`    | `Documents/Blog`    | `relatedPosts`                                  |
//! | `ProductController` | `Documents/Product` | `specifications`, `variants`, `relatedProducts` |

mod blog;
mod default;
mod product;

pub use blog::{BlogHandler, RelatedPost};
pub use default::DefaultHandler;
pub use product::{ProductHandler, ProductVariant, RelatedProduct};
