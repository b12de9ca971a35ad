//! # TUI Components
//!
//! Every piece of the screen lives here as a component.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they draw as fields and keep nothing between frames:
//! - `Header`: icon, title and clock
//! - `TabBar`: tab strip with the active tab highlighted
//! - `About`: application metadata
//! - `Footer`: active key bindings
//! - `QuitDialog`: modal quit confirmation (focus lives in core `App`)
//! - `Toasts`: notifications in the bottom-right corner
//!
//! ### Stateful Components
//!
//! - `LogView`: scrollable activity log, backed by `LogViewState` which
//!   persists in `TuiState` across frames
//!
//! Components that support mouse input expose a `hit_test` next to their
//! render code, computed from the same geometry, so clicks and drawing
//! never disagree.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (Top bar)
//! ├── tab_bar.rs       (Tab strip)
//! ├── log_view.rs      (Main tab)
//! ├── about.rs         (About tab)
//! ├── footer.rs        (Key binding hints)
//! ├── quit_dialog.rs   (Modal)
//! └── toasts.rs        (Notifications)
//! ```

pub mod about;
pub mod footer;
pub mod header;
pub mod log_view;
pub mod quit_dialog;
pub mod tab_bar;
pub mod toasts;

pub use about::About;
pub use footer::Footer;
pub use header::Header;
pub use log_view::{LogView, LogViewState};
pub use quit_dialog::{DialogLayout, QuitDialog};
pub use tab_bar::TabBar;
pub use toasts::Toasts;
