/// Byte order used when decoding/encoding multi-byte scalars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// Platform-specific sizing rules for the layout-dependent members of
/// [`crate::ty::Type`] (`Sized` integers, pointers, and struct padding).
///
/// Immutable for the lifetime of a capture (one `MemoryLayout` per capture
/// header).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Width in bytes of `Type::Pointer`.
    pub pointer_size: u8,
    /// Width in bytes of `Sized(sized_int | sized_uint)`.
    pub int_size: u8,
    /// Width in bytes of `Sized(sized_size)`.
    pub size_size: u8,
    /// Width in bytes of `Sized(sized_char)`.
    pub char_size: u8,
    /// Byte order for every multi-byte read/write, including string length
    /// prefixes.
    pub endianness: Endianness,
    /// Upper bound on any computed alignment. A struct whose natural
    /// alignment would exceed this is clamped to it, matching typical C ABI
    /// `#pragma pack`-free behavior where alignment never exceeds pointer
    /// width.
    pub max_alignment: u8,
}

impl MemoryLayout {
    /// A common little-endian 64-bit layout, useful for tests and as a
    /// sensible default.
    pub const LP64_LE: MemoryLayout = MemoryLayout {
        pointer_size: 8,
        int_size: 4,
        size_size: 8,
        char_size: 1,
        endianness: Endianness::Little,
        max_alignment: 8,
    };

    /// A 32-bit little-endian layout.
    pub const ILP32_LE: MemoryLayout = MemoryLayout {
        pointer_size: 4,
        int_size: 4,
        size_size: 4,
        char_size: 1,
        endianness: Endianness::Little,
        max_alignment: 4,
    };

    pub fn clamp_alignment(&self, natural: u64) -> u64 {
        natural.min(u64::from(self.max_alignment)).max(1)
    }
}
