use crate::error::{ProfileError, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// Fixed-width integer codec for BLE attribute values
///
/// Characteristic values travel as contiguous fixed-width integers with no
/// padding and no length prefix; the expected length is fixed per
/// characteristic and supplied out-of-band. Both little-endian and
/// big-endian wire orders are supported, converting to host order on
/// decode.
pub trait WireScalar: Sized + Copy {
    /// Width of the wire representation in bytes
    const WIDTH: usize;

    /// Decode a little-endian value starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::OutOfRange`] if the decode window extends
    /// past the end of the buffer.
    fn decode_le(buf: &[u8], offset: usize) -> Result<Self>;

    /// Decode a big-endian value starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::OutOfRange`] if the decode window extends
    /// past the end of the buffer.
    fn decode_be(buf: &[u8], offset: usize) -> Result<Self>;

    /// Pack this value little-endian into `buf` at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::OutOfRange`] if the encode window extends
    /// past the end of the buffer.
    fn encode_le(self, buf: &mut [u8], offset: usize) -> Result<()>;

    /// Pack this value big-endian into `buf` at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::OutOfRange`] if the encode window extends
    /// past the end of the buffer.
    fn encode_be(self, buf: &mut [u8], offset: usize) -> Result<()>;

    /// Decode every whole little-endian element from offset 0
    ///
    /// Advances by [`Self::WIDTH`] per element. A trailing partial element
    /// is truncated, not an error.
    fn decode_all_le(buf: &[u8]) -> Vec<Self>;

    /// Decode every whole big-endian element from offset 0
    ///
    /// Advances by [`Self::WIDTH`] per element. A trailing partial element
    /// is truncated, not an error.
    fn decode_all_be(buf: &[u8]) -> Vec<Self>;

    /// Serialize this value as an owned little-endian buffer
    fn to_bytes_le(self) -> Bytes;

    /// Serialize this value as an owned big-endian buffer
    fn to_bytes_be(self) -> Bytes;
}

fn check_window(len: usize, offset: usize, width: usize) -> Result<usize> {
    offset
        .checked_add(width)
        .filter(|&end| end <= len)
        .ok_or(ProfileError::OutOfRange { offset, width, len })
}

macro_rules! wire_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireScalar for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn decode_le(buf: &[u8], offset: usize) -> Result<Self> {
                    let end = check_window(buf.len(), offset, Self::WIDTH)?;
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&buf[offset..end]);
                    Ok(<$ty>::from_le_bytes(raw))
                }

                fn decode_be(buf: &[u8], offset: usize) -> Result<Self> {
                    let end = check_window(buf.len(), offset, Self::WIDTH)?;
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&buf[offset..end]);
                    Ok(<$ty>::from_be_bytes(raw))
                }

                fn encode_le(self, buf: &mut [u8], offset: usize) -> Result<()> {
                    let end = check_window(buf.len(), offset, Self::WIDTH)?;
                    buf[offset..end].copy_from_slice(&self.to_le_bytes());
                    Ok(())
                }

                fn encode_be(self, buf: &mut [u8], offset: usize) -> Result<()> {
                    let end = check_window(buf.len(), offset, Self::WIDTH)?;
                    buf[offset..end].copy_from_slice(&self.to_be_bytes());
                    Ok(())
                }

                fn decode_all_le(buf: &[u8]) -> Vec<Self> {
                    buf.chunks_exact(Self::WIDTH)
                        .map(|chunk| {
                            let mut raw = [0u8; std::mem::size_of::<$ty>()];
                            raw.copy_from_slice(chunk);
                            <$ty>::from_le_bytes(raw)
                        })
                        .collect()
                }

                fn decode_all_be(buf: &[u8]) -> Vec<Self> {
                    buf.chunks_exact(Self::WIDTH)
                        .map(|chunk| {
                            let mut raw = [0u8; std::mem::size_of::<$ty>()];
                            raw.copy_from_slice(chunk);
                            <$ty>::from_be_bytes(raw)
                        })
                        .collect()
                }

                fn to_bytes_le(self) -> Bytes {
                    Bytes::copy_from_slice(&self.to_le_bytes())
                }

                fn to_bytes_be(self) -> Bytes {
                    Bytes::copy_from_slice(&self.to_be_bytes())
                }
            }
        )*
    };
}

wire_scalar!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Serialize a sequence of values as one contiguous little-endian buffer
pub fn encode_slice_le<T: WireScalar>(values: &[T]) -> Bytes {
    let mut buf = BytesMut::with_capacity(values.len() * T::WIDTH);
    for value in values.iter().copied() {
        buf.put_slice(&value.to_bytes_le());
    }
    buf.freeze()
}

/// Serialize a sequence of values as one contiguous big-endian buffer
pub fn encode_slice_be<T: WireScalar>(values: &[T]) -> Bytes {
    let mut buf = BytesMut::with_capacity(values.len() * T::WIDTH);
    for value in values.iter().copied() {
        buf.put_slice(&value.to_bytes_be());
    }
    buf.freeze()
}
