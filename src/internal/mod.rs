//! Module with page cursor implementation.
//!
//! Most of the logic is put inside macro_rules! because the crate provides different flavours of
//! page cursors and all of them have slightly different trait bounds despite function bodies and
//! impls being the same for them.
//!
//! WARNING: The macros here implicitly expect `FetchPage`, `FetchError`, `FetchResult`,
//! `CursorResult`, `PagesStream` and `stream` to be defined/imported in the calling context. By
//! calling a macro in a flavour module you generate the code specific to that flavour's
//! `FetchPage` trait. Arguments of every macro are extra `where` bounds appended to generated
//! items.
//!
//! Every flavour requires everything from this module so it's ok to use glob imports
//! (`use internal::*;`) in flavour modules.

pub mod cursor;
pub mod walk;

pub use walk::{Direction, WalkState};

pub(crate) use cursor::page_cursor_def;
pub(crate) use walk::{turn_page_decl, walk_next_decl};
