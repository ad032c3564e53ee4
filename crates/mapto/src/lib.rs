//! Compile-time generated mappings between structs.
//!
//! Place `#[mapto::mappings]` on an inline module and mark structs with
//! `#[map_from(Source)]`. Each marked struct gets constructors reading its
//! members from the source, by name, with nested structs and collections
//! mapped recursively.
//!
//! ```ignore
//! #[mapto::mappings]
//! mod views {
//!     pub struct User {
//!         pub id: u32,
//!         pub name: String,
//!     }
//!
//!     #[map_from(User)]
//!     pub struct UserView {
//!         pub id: u64,
//!         #[map_property(source = "name")]
//!         pub display_name: String,
//!     }
//! }
//!
//! let view = UserView::from_user(&user);
//! ```

mod context;
pub use context::MappingContext;

mod convert;
pub use convert::{MapFrom, TypeConverter};

mod param;
pub use param::Param;

pub use mapto_macros::mappings;

#[doc(hidden)]
pub use serde_json;
