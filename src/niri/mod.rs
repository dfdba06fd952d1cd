//! Reading and surgically updating niri's `config.kdl`.
//!
//! [`reader::load`] extracts a [`NiriSettings`] snapshot from the file and
//! [`writer::save`] writes a snapshot back, touching nothing but the value
//! tokens of keys that already exist.  Both sides share the block tracker
//! in [`scan`], so a file that is loaded and saved without edits comes back
//! byte-for-byte identical.
//!
//! Nothing outside this module should know about the file's layout.

pub mod error;
pub mod reader;
pub mod scan;
pub mod settings;
pub mod writer;

pub use error::{LoadError, NiriConfigError};
pub use reader::load;
pub use settings::{default_config_path, NiriSettings, SettingKey, SettingValue};
pub use writer::save;
