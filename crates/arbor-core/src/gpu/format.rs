// Copyright 2026 arbor-engine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pixel formats and their per-value traits.
//!
//! [`FormatTraits`] drives the format-conversion path of the transfer
//! subsystem: when source and target formats disagree in size, each value
//! is widened to the target size, with the missing trailing bytes taken
//! positionally from [`FormatTraits::default_value`].

/// Pixel/value formats supported by the upload path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Format {
    /// No format; zero-sized traits.
    #[default]
    Undefined,
    /// One 8-bit normalized channel.
    R8Unorm,
    /// Two 8-bit normalized channels.
    R8g8Unorm,
    /// Three 8-bit normalized channels.
    R8g8b8Unorm,
    /// Four 8-bit normalized channels.
    R8g8b8a8Unorm,
    /// Four 16-bit float channels.
    R16g16b16a16Sfloat,
    /// One 32-bit float channel.
    R32Sfloat,
    /// Two 32-bit float channels.
    R32g32Sfloat,
    /// Three 32-bit float channels.
    R32g32b32Sfloat,
    /// Four 32-bit float channels.
    R32g32b32a32Sfloat,
}

/// Size and fill metadata for a [`Format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatTraits {
    /// Bytes per value.
    pub size: u32,
    /// A vec4's worth of default component values, laid out as the format's
    /// component type. Byte `s` of a widened value that the source did not
    /// provide is filled from `default_value[s]`, so an RGB8-to-RGBA8
    /// expansion reads its alpha from index 3.
    pub default_value: [u8; 16],
}

/// The default pattern for 8-bit normalized formats: opaque black.
const UNORM8_DEFAULT: [u8; 16] = [0, 0, 0, 255, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// (0.0, 0.0, 0.0, 1.0) as four IEEE half-floats.
const SFLOAT16_DEFAULT: [u8; 16] = [0, 0, 0, 0, 0, 0, 0x00, 0x3c, 0, 0, 0, 0, 0, 0, 0, 0];

/// (0.0, 0.0, 0.0, 1.0) as four IEEE single-floats.
const SFLOAT32_DEFAULT: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x80, 0x3f];

impl Format {
    /// Returns the size and default-fill traits for this format.
    pub fn traits(&self) -> FormatTraits {
        let (size, default_value) = match self {
            Format::Undefined => (0, [0; 16]),
            Format::R8Unorm => (1, UNORM8_DEFAULT),
            Format::R8g8Unorm => (2, UNORM8_DEFAULT),
            Format::R8g8b8Unorm => (3, UNORM8_DEFAULT),
            Format::R8g8b8a8Unorm => (4, UNORM8_DEFAULT),
            Format::R16g16b16a16Sfloat => (8, SFLOAT16_DEFAULT),
            Format::R32Sfloat => (4, SFLOAT32_DEFAULT),
            Format::R32g32Sfloat => (8, SFLOAT32_DEFAULT),
            Format::R32g32b32Sfloat => (12, SFLOAT32_DEFAULT),
            Format::R32g32b32a32Sfloat => (16, SFLOAT32_DEFAULT),
        };
        FormatTraits {
            size,
            default_value,
        }
    }
}
