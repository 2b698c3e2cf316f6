// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude re-exporting every time-based operator.
//!
//! - [`DelayExt`] - Delay each emission by a duration
//! - [`DebounceExt`] - Drop values arriving within the interval of the last forwarded one
//! - [`ThrottleExt`] - Forward one value per window

pub use crate::debounce::DebounceExt;
pub use crate::delay::DelayExt;
pub use crate::throttle::ThrottleExt;
