//! Reusable UI components

mod alerts;
mod drop_area;
mod layout;
mod loading;
mod resource_list;
mod tool_list;

pub use alerts::*;
pub use drop_area::*;
pub use layout::*;
pub use loading::*;
pub use resource_list::*;
pub use tool_list::*;
