//! Service layer for the member viewer.
//!
//! This module contains the business logic for:
//! - CSV loading (`DataSource`, `load_csv`)
//! - Row parsing (`MemberParser`)
//! - Field normalization (`parse_name`, `parse_region`, `to_boolean`)
//! - Avatar resolution (`AvatarResolver`)
//! - Display ordering (`order_members`)

pub mod avatar;
pub mod loader;
pub mod normalize;
pub mod ordering;
pub mod parser;

pub use avatar::{AvatarResolver, FallbackAvatar};
pub use loader::{AnySource, DataSource, FetchResponse, FileSource, HttpSource, load_csv};
pub use normalize::{parse_name, parse_region, to_boolean};
pub use ordering::order_members;
pub use parser::MemberParser;
