pub mod core;
pub mod list;
pub mod macros;
pub mod primitive;

pub use self::core::{short_type_name, Serializer, Wrap};
pub use list::{ListSerializer, CACHE_KEY_DELIMITER};
pub use macros::RenderExt;
pub use primitive::{is_primitive, PrimitiveSerializer};
