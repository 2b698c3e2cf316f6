// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub use crate::catch::CatchExt;
pub use crate::concat::ConcatExt;
pub use crate::filter::FilterExt;
pub use crate::flat_map::{FlatMapExt, FlattenExt};
pub use crate::map::MapExt;
pub use crate::merge::MergeExt;
pub use crate::observe::ObserveExt;
pub use crate::reduce::ReduceExt;
pub use crate::scan::ScanExt;
pub use crate::tap::TapExt;
