//! `vn-command`: the cross-thread command surface.
//!
//! Listener threads hold a [`NavHandle`]; the simulation loop owns the
//! [`CommandPump`] and the `Navigator`.  Requests travel over a crossbeam
//! channel and are applied at the start of the next simulation tick, so the
//! navigator is only ever touched from its own thread.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`gate`]     | `CommandGate`: busy/initializing guards and their timeouts |
//! | [`handle`]   | `NavHandle`: request travel, cancel, status, force reset   |
//! | [`pump`]     | `CommandPump`, `channel()`                                 |
//! | [`protocol`] | `Request` / `Response` text protocol                       |
//! | [`clock`]    | `Clock`, `SystemClock`, `ManualClock`                      |
//! | [`error`]    | `CommandError`, `CommandResult<T>`                         |
//!
//! # Example
//!
//! ```rust,ignore
//! let (handle, pump) = vn_command::channel(&config);
//! std::thread::spawn(move || {
//!     println!("{}", handle.handle_line("120,64,-40"));
//! });
//! loop {
//!     pump.tick(&mut nav, &world, &mut NoopObserver);
//!     world.step(&nav.controls())?;
//! }
//! ```

pub mod clock;
pub mod error;
pub mod gate;
pub mod handle;
pub mod protocol;
pub mod pump;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CommandError, CommandResult};
pub use gate::{Admission, CommandGate};
pub use handle::NavHandle;
pub use protocol::{Request, Response};
pub use pump::{channel, channel_with_clock, CommandPump};
