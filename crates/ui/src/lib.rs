//! Rowdeck UI - Front-end layer
//!
//! This crate drives a `TableController` from an async event loop and
//! renders its frames as text. Front ends talk to the loop through the
//! `TableCommand`/`TableUpdate` channels in [`bridge`].

pub mod bridge;
pub mod event_loop;
pub mod notice;
pub mod text;

pub use bridge::{Frame, TableCommand, TableUpdate};
pub use event_loop::{TableEventLoop, TableHandle};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use text::{render_frame, render_table};
