/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Pure parsing functions for converting raw report text to domain objects
//!
//! These functions are pure (no side effects) and can be easily tested in
//! isolation. The grammar stage in [`report`] is strict and all-or-nothing;
//! the decoders in [`fields`] run downstream of it and never affect whether
//! a report parses.

pub mod common;
pub mod fields;
pub mod report;

pub use common::*;
pub use fields::*;
pub use report::*;
