//! Domain constants
//!
//! Naming conventions shared by registration and lookup. Both sides must
//! agree on these, otherwise a declared join point can never be found.

/// Separator between the aspect name and the point name in a join-point id
pub const JOIN_POINT_SEPARATOR: char = '.';

/// Point name used for around-style aspects (`<aspect>.proceed`)
pub const AROUND_POINT_NAME: &str = "proceed";

/// Word separator recognised by the canonical naming transform
pub const NAME_SEGMENT_SEPARATOR: char = '_';

/// Separator between a type name and a method name in call signatures
pub const SIGNATURE_SEPARATOR: &str = "::";
