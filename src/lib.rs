//! **nirimatic**: a terminal dashboard for the niri compositor.
//!
//! The dashboard shows whether niri and its companion services are running,
//! offers a couple of quick actions, and edits a handful of layout and
//! behavior settings in `~/.config/niri/config.kdl` without disturbing the
//! rest of the file.
//!
//! # Architecture
//!
//! * [`niri`]: the config file reader and format-preserving writer.  Both
//!   walk the file with the same block scanner, so a value is only ever
//!   rewritten where it would have been read.
//! * [`traits::CommandRunner`]: abstracts running external programs so
//!   service probes ([`services`]) and quick actions ([`actions`]) are not
//!   coupled to real processes.  [`system::SystemRunner`] is the real
//!   implementation.
//! * [`tui`]: ratatui screens, key bindings and the event loop.  Blocking
//!   work runs on background threads and reports back over a channel.
//!
//! Application settings (which services to watch, where the niri config
//! lives) come from [`config`].

pub mod actions;
pub mod config;
pub mod niri;
pub mod services;
pub mod system;
pub mod traits;
pub mod tui;
