//! Widgets
//!
//! - [`PageView`]: borderless scrollable page of pre-wrapped lines
//! - [`RoleRotator`]: typed text plus blinking caret

mod page_view;
mod role_rotator;

pub use page_view::{PageView, PageViewState};
pub use role_rotator::RoleRotator;
